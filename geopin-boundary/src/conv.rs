use geopin_entities as e;
use thiserror::Error;

use super::*;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Invalid coordinate value")]
    Degrees,
    #[error("Coordinate out of range")]
    Range,
}

impl TryFrom<SearchHit> for e::place::Place {
    type Error = ConversionError;
    fn try_from(from: SearchHit) -> Result<Self, Self::Error> {
        let SearchHit {
            lat,
            lon,
            display_name,
            ..
        } = from;
        let lat = lat.to_f64().ok_or(ConversionError::Degrees)?;
        let lng = lon.to_f64().ok_or(ConversionError::Degrees)?;
        let pos =
            e::geo::MapPoint::try_from_lat_lng_deg(lat, lng).ok_or(ConversionError::Range)?;
        Ok(Self { display_name, pos })
    }
}

impl From<e::place::Place> for SearchHit {
    fn from(from: e::place::Place) -> Self {
        let e::place::Place { display_name, pos } = from;
        Self {
            place_id: None,
            lat: Degrees::Number(pos.lat()),
            lon: Degrees::Number(pos.lng()),
            display_name,
            importance: None,
        }
    }
}
