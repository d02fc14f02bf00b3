//! Line based event input for driving a map view from a terminal or a script.

use std::{
    io::{BufRead, Write},
    str::FromStr,
};

use anyhow::Result;
use strum::{Display, EnumString};
use thiserror::Error;

use geopin_core::{
    controller::{Effect, MapViewController},
    dispatch::dispatch,
    entities::{MapPoint, ParseError},
    gateways::{geocode::GeocodingGateway, geolocation::GeolocationError},
};

use crate::render::{self, PopupFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
enum Keyword {
    Locate,
    Deny,
    Click,
    Relocate,
    Search,
    Close,
    Fullscreen,
    Controls,
    UnsetLayer,
    SetLayer,
    State,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Locate(MapPoint),
    Deny(GeolocationError),
    Click(MapPoint),
    Relocate,
    Search(String),
    Close,
    Fullscreen,
    Controls,
    UnsetLayer,
    SetLayer,
    State,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'")]
    Unknown(String),
    #[error("Missing coordinates (lng,lat)")]
    MissingCoordinates,
    #[error(transparent)]
    Coordinates(#[from] ParseError),
    #[error("Invalid error code '{0}'")]
    ErrorCode(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (keyword, args) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let args = args.trim();
        let keyword =
            Keyword::from_str(keyword).map_err(|_| CommandError::Unknown(keyword.to_string()))?;
        let pos = || {
            if args.is_empty() {
                return Err(CommandError::MissingCoordinates);
            }
            Ok(args.parse::<MapPoint>()?)
        };
        let cmd = match keyword {
            Keyword::Locate => Self::Locate(pos()?),
            Keyword::Click => Self::Click(pos()?),
            Keyword::Deny => {
                let err = if args.is_empty() {
                    GeolocationError::PermissionDenied
                } else {
                    let code = args
                        .parse()
                        .map_err(|_| CommandError::ErrorCode(args.to_string()))?;
                    GeolocationError::from_code(code)
                };
                Self::Deny(err)
            }
            // The query may be empty
            Keyword::Search => Self::Search(args.to_string()),
            Keyword::Relocate => Self::Relocate,
            Keyword::Close => Self::Close,
            Keyword::Fullscreen => Self::Fullscreen,
            Keyword::Controls => Self::Controls,
            Keyword::UnsetLayer => Self::UnsetLayer,
            Keyword::SetLayer => Self::SetLayer,
            Keyword::State => Self::State,
        };
        Ok(cmd)
    }
}

/// Applies a command and performs the resulting requests.
///
/// Returns the alerts and notices to show.
pub fn apply<G>(ctrl: &mut MapViewController, gateway: &G, cmd: Command) -> Vec<Effect>
where
    G: GeocodingGateway + ?Sized,
{
    let effects = match cmd {
        Command::Locate(pos) => ctrl.on_locate_success(pos),
        Command::Deny(err) => ctrl.on_locate_failure(err),
        Command::Click(pos) => ctrl.on_map_click(pos.to_projected()),
        Command::Relocate => ctrl.on_relocate(),
        Command::Search(query) => ctrl.on_search(&query),
        Command::Close => {
            ctrl.close_popup();
            vec![]
        }
        Command::Fullscreen => {
            ctrl.toggle_fullscreen();
            vec![]
        }
        Command::Controls => {
            ctrl.toggle_controls();
            vec![]
        }
        Command::UnsetLayer => ctrl.unset_layer(),
        Command::SetLayer => ctrl.set_layer(),
        Command::State => vec![],
    };
    dispatch(ctrl, gateway, effects)
}

/// Reads one command per line and prints the state after each command.
///
/// Blank lines and lines starting with `#` are skipped. Invalid commands
/// are reported and do not end the session.
pub fn run<G, R, W>(
    ctrl: &mut MapViewController,
    gateway: &G,
    input: R,
    mut output: W,
    format: PopupFormat,
) -> Result<()>
where
    G: GeocodingGateway + ?Sized,
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let cmd = match line.parse::<Command>() {
            Ok(cmd) => cmd,
            Err(err) => {
                log::warn!("Invalid command '{line}': {err}");
                writeln!(output, "> {line}\n{err}\n")?;
                continue;
            }
        };
        log::debug!("Apply {cmd:?}");
        writeln!(output, "> {line}")?;
        for effect in apply(ctrl, gateway, cmd) {
            if let Some(msg) = render::effect(&effect) {
                writeln!(output, "{msg}")?;
            }
        }
        writeln!(output, "{}", render::state(ctrl, format)?)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use geopin_core::{
        controller::{Config, Features},
        entities::Place,
        gateways::geocode::GeocodingError,
    };

    use super::*;

    #[derive(Default)]
    struct FakeGeocoder {
        reverse_calls: Cell<usize>,
    }

    impl GeocodingGateway for FakeGeocoder {
        fn reverse(&self, _: MapPoint) -> Result<Option<String>, GeocodingError> {
            self.reverse_calls.set(self.reverse_calls.get() + 1);
            Ok(Some("Jalan Sarijadi, Bandung".into()))
        }
        fn search(&self, query: &str) -> Result<Vec<Place>, GeocodingError> {
            if query == "braga" {
                Ok(vec![Place {
                    display_name: "Jalan Braga, Bandung".into(),
                    pos: MapPoint::from_lat_lng_deg(-6.917, 107.609),
                }])
            } else {
                Ok(vec![])
            }
        }
    }

    fn run_session(ctrl: &mut MapViewController, input: &str) -> String {
        let mut out = Vec::new();
        run(
            ctrl,
            &FakeGeocoder::default(),
            input.as_bytes(),
            &mut out,
            PopupFormat::Text,
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parse_commands() {
        assert_eq!(
            "click 107.5, -6.87".parse::<Command>().unwrap(),
            Command::Click(MapPoint::from_lat_lng_deg(-6.87, 107.5))
        );
        assert_eq!(
            "search  Jalan Braga ".parse::<Command>().unwrap(),
            Command::Search("Jalan Braga".into())
        );
        assert_eq!(
            "search".parse::<Command>().unwrap(),
            Command::Search(String::new())
        );
        assert_eq!(
            "deny".parse::<Command>().unwrap(),
            Command::Deny(GeolocationError::PermissionDenied)
        );
        assert_eq!(
            "deny 3".parse::<Command>().unwrap(),
            Command::Deny(GeolocationError::Timeout)
        );
        assert_eq!(
            "unset-layer".parse::<Command>().unwrap(),
            Command::UnsetLayer
        );
    }

    #[test]
    fn reject_invalid_commands() {
        assert_eq!(
            "fly 1,2".parse::<Command>(),
            Err(CommandError::Unknown("fly".into()))
        );
        assert_eq!(
            "locate".parse::<Command>(),
            Err(CommandError::MissingCoordinates)
        );
        assert_eq!(
            "click 181,0".parse::<Command>(),
            Err(CommandError::Coordinates(ParseError::Range))
        );
        assert_eq!(
            "deny x".parse::<Command>(),
            Err(CommandError::ErrorCode("x".into()))
        );
    }

    #[test]
    fn locate_and_click() {
        let mut ctrl = MapViewController::default();
        let out = run_session(&mut ctrl, "locate 107.5,-6.87\nclick 107.6,-6.9\n");
        assert!(out.contains("> locate 107.5,-6.87\n"));
        assert!(out.contains("  Lokasi Anda\n"));
        assert!(out.contains("  Alamat: Jalan Sarijadi, Bandung\n"));
        assert!(out.contains("  Koordinat: 107.500000, -6.870000\n"));
        assert!(out.contains("  Koordinat: 107.600000, -6.900000\n"));
        assert_eq!(ctrl.markers().len(), 1);
    }

    #[test]
    fn report_alerts_and_notices() {
        let mut ctrl = MapViewController::default();
        let out = run_session(&mut ctrl, "relocate\nsearch\nsearch nowhere\ndeny\n");
        assert!(out.contains("Lokasi Anda belum tersedia."));
        assert!(out.contains("Masukkan nama lokasi terlebih dahulu."));
        assert!(out.contains("Lokasi tidak ditemukan."));
        assert!(out.contains("Gagal mengambil lokasi."));
    }

    #[test]
    fn continue_after_invalid_lines() {
        let mut ctrl = MapViewController::default();
        let out = run_session(&mut ctrl, "# comment\n\nfly\nsearch braga\n");
        assert!(out.contains("> fly\nUnknown command 'fly'\n"));
        assert!(out.contains("  Hasil Pencarian\n"));
        assert!(out.contains("  Alamat: Jalan Braga, Bandung\n"));
        assert!(!out.contains("# comment"));
    }

    #[test]
    fn toggle_layers() {
        let mut ctrl = MapViewController::new(Config {
            features: Features::layer_toggle(),
            ..Config::default()
        });
        let out = run_session(&mut ctrl, "click 107.5,-6.87\nunset-layer\nset-layer\n");
        assert!(out.contains("Layer peta disembunyikan."));
        assert!(out.contains("layer: hidden\n"));
        assert!(out.contains("Layer peta ditampilkan."));
        assert!(ctrl.layer_visible());
        assert!(ctrl.popup().is_visible());
    }
}
