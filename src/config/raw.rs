use std::time::Duration;

use duration_str::deserialize_duration;
use serde::{Deserialize, Serialize};

const DEFAULT_CONFIG_FILE: &str = include_str!("geopin.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub map: Option<Map>,
    pub features: Option<Features>,
    pub notices: Option<Notices>,
    pub gateway: Option<Gateway>,
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Map {
    /// "lng, lat"
    pub default_center: String,
    pub default_zoom: f64,
    pub locate_zoom: f64,
    pub search_zoom: f64,
}

impl Default for Map {
    fn default() -> Self {
        Config::default().map.expect("Map configuration")
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Features {
    pub preset: Option<FeaturePreset>,
    pub layer_visibility: Option<bool>,
    pub search_in_fullscreen: Option<bool>,
    pub relocate_refetches: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeaturePreset {
    ControlsToggle,
    LayerToggle,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Notices {
    #[serde(deserialize_with = "deserialize_duration")]
    pub search_duration: Duration,
    #[serde(deserialize_with = "deserialize_duration")]
    pub layer_duration: Duration,
}

impl Default for Notices {
    fn default() -> Self {
        Config::default().notices.expect("Notices configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Gateway {
    pub nominatim: Option<Nominatim>,
}

impl Default for Gateway {
    fn default() -> Self {
        Config::default().gateway.expect("Gateway configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Nominatim {
    pub base_url: String,
    pub user_agent: Option<String>,
}

impl Default for Nominatim {
    fn default() -> Self {
        Gateway::default()
            .nominatim
            .expect("Nominatim gateway configuration")
    }
}
