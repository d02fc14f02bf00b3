use std::{
    io::{self, Write as _},
    path::PathBuf,
};

use anyhow::Result;
use clap::{Parser, Subcommand};

use geopin_core::{controller::MapViewController, entities::MapPoint};
use geopin_gateways::nominatim::Nominatim;

mod config;
mod render;
mod session;

use self::{render::PopupFormat, session::Command};

#[derive(Parser)]
#[command(name = "geopin", about = "Locate, click and search places on a map")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print popups as HTML
    #[arg(long, global = true)]
    html: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Center the map on a position as if reported by the device
    Locate {
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
    },
    /// Click on the map
    Click {
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
    },
    /// Search for a place by name
    Search { query: Vec<String> },
    /// Read commands from stdin, one per line
    Session,
}

fn position(lng: f64, lat: f64) -> Result<MapPoint> {
    MapPoint::try_from_lng_lat_deg(lng, lat)
        .ok_or_else(|| anyhow::anyhow!("Invalid position: lng = {lng}, lat = {lat}"))
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let cfg = config::Config::try_load_from_file_or_default(cli.config.as_ref())?;
    let format = if cli.html {
        PopupFormat::Html
    } else {
        PopupFormat::Text
    };

    log::info!("Use Nominatim at {}", cfg.nominatim.base_url);
    let nominatim = Nominatim::new(&cfg.nominatim.base_url, &cfg.nominatim.user_agent)?;
    let mut ctrl = MapViewController::new(cfg.map);

    let cmd = match cli.command {
        Commands::Locate { lng, lat } => Command::Locate(position(lng, lat)?),
        Commands::Click { lng, lat } => Command::Click(position(lng, lat)?),
        Commands::Search { query } => Command::Search(query.join(" ")),
        Commands::Session => {
            let stdin = io::stdin().lock();
            let stdout = io::stdout().lock();
            return session::run(&mut ctrl, &nominatim, stdin, stdout, format);
        }
    };

    let mut stdout = io::stdout().lock();
    for effect in session::apply(&mut ctrl, &nominatim, cmd) {
        if let Some(msg) = render::effect(&effect) {
            writeln!(stdout, "{msg}")?;
        }
    }
    match render::popup(ctrl.popup(), format)? {
        Some(popup) => writeln!(stdout, "{popup}")?,
        None => write!(stdout, "{}", render::state(&ctrl, format)?)?,
    }
    Ok(())
}
