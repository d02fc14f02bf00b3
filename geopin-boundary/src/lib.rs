//! Wire format of the Nominatim geocoding API (`format=json`).

use serde::{Deserialize, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

#[cfg(feature = "entity-conversions")]
pub use self::conv::*;

/// A coordinate value as sent by the service.
///
/// Nominatim encodes degrees as decimal strings,
/// some compatible services use plain numbers.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(untagged)]
pub enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    #[must_use]
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Self::Number(deg) => Some(*deg),
            Self::Text(deg) => deg.trim().parse().ok(),
        }
    }
}

/// Answer of `GET /reverse`.
#[rustfmt::skip]
#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct ReverseResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name : Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat          : Option<Degrees>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon          : Option<Degrees>,
    /// Set instead of an address, e.g. "Unable to geocode".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error        : Option<String>,
}

impl ReverseResponse {
    /// The address, if the service found one.
    #[must_use]
    pub fn into_address(self) -> Option<String> {
        let Self {
            display_name,
            error,
            ..
        } = self;
        if error.is_some() {
            return None;
        }
        display_name.filter(|name| !name.trim().is_empty())
    }
}

/// Element of the array returned by `GET /search`.
#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct SearchHit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id     : Option<u64>,
    pub lat          : Degrees,
    pub lon          : Degrees,
    pub display_name : String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance   : Option<f64>,
}
