use std::{env, fs, io::ErrorKind, path::Path};

use anyhow::{anyhow, Result};

use geopin_core::{
    controller::{self, Features},
    entities::MapPoint,
};
use geopin_gateways::nominatim::DEFAULT_USER_AGENT;

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "geopin.toml";

const ENV_NAME_NOMINATIM_URL: &str = "GEOPIN_NOMINATIM_URL";

pub struct Config {
    pub map: controller::Config,
    pub nominatim: Nominatim,
}

pub struct Nominatim {
    pub base_url: String,
    pub user_agent: String,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(url) = env::var(ENV_NAME_NOMINATIM_URL) {
            log::debug!("Use Nominatim URL from {ENV_NAME_NOMINATIM_URL}");
            cfg.nominatim.base_url = url;
        }
        Ok(cfg)
    }
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            map,
            features,
            notices,
            gateway,
        } = from;

        let raw::Map {
            default_center,
            default_zoom,
            locate_zoom,
            search_zoom,
        } = map.unwrap_or_default();

        let default_center: MapPoint = default_center
            .parse()
            .map_err(|err| anyhow!("Invalid default center '{default_center}': {err}"))?;

        for (name, zoom) in [
            ("default-zoom", default_zoom),
            ("locate-zoom", locate_zoom),
            ("search-zoom", search_zoom),
        ] {
            if !zoom.is_finite() || zoom < 0.0 {
                return Err(anyhow!("Invalid {name}: {zoom}"));
            }
        }

        let raw::Features {
            preset,
            layer_visibility,
            search_in_fullscreen,
            relocate_refetches,
        } = features.unwrap_or_default();

        let defaults = match preset {
            Some(raw::FeaturePreset::LayerToggle) => Features::layer_toggle(),
            Some(raw::FeaturePreset::ControlsToggle) | None => Features::controls_toggle(),
        };
        let features = Features {
            layer_visibility: layer_visibility.unwrap_or(defaults.layer_visibility),
            search_in_fullscreen: search_in_fullscreen.unwrap_or(defaults.search_in_fullscreen),
            relocate_refetches: relocate_refetches.unwrap_or(defaults.relocate_refetches),
        };

        let raw::Notices {
            search_duration,
            layer_duration,
        } = notices.unwrap_or_default();

        let map = controller::Config {
            default_center,
            default_zoom,
            locate_zoom,
            search_zoom,
            search_notice_duration: search_duration,
            layer_notice_duration: layer_duration,
            features,
        };

        let raw::Nominatim {
            base_url,
            user_agent,
        } = gateway.unwrap_or_default().nominatim.unwrap_or_default();

        if base_url.trim().is_empty() {
            return Err(anyhow!("Missing Nominatim base URL"));
        }
        let nominatim = Nominatim {
            base_url,
            user_agent: user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        };

        Ok(Self { map, nominatim })
    }
}
