use std::{fmt, str::FromStr};

use thiserror::Error;

/// Equatorial radius of the WGS 84 ellipsoid used by Web Mercator.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Latitudes beyond this value cannot be projected to Web Mercator.
pub const MERCATOR_MAX_LAT_DEG: f64 = 85.051_128_779_806_59;

const LAT_DEG_MAX: f64 = 90.0;
const LAT_DEG_MIN: f64 = -90.0;
const LNG_DEG_MAX: f64 = 180.0;
const LNG_DEG_MIN: f64 = -180.0;

/// Number of decimals used when presenting coordinates to users.
pub const COORD_DISPLAY_PRECISION: usize = 6;

/// A geographical position in degrees (WGS 84).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MapPoint {
    lat: f64,
    lng: f64,
}

impl MapPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn from_lat_lng_deg(lat: f64, lng: f64) -> Self {
        let res = Self::new(lat, lng);
        debug_assert!(res.is_valid());
        res
    }

    pub fn try_from_lat_lng_deg(lat: f64, lng: f64) -> Option<Self> {
        let res = Self::new(lat, lng);
        res.is_valid().then_some(res)
    }

    /// Same as [`MapPoint::try_from_lat_lng_deg`] but in the
    /// (longitude, latitude) order used by geocoding services.
    pub fn try_from_lng_lat_deg(lng: f64, lat: f64) -> Option<Self> {
        Self::try_from_lat_lng_deg(lat, lng)
    }

    pub const fn lat(self) -> f64 {
        self.lat
    }

    pub const fn lng(self) -> f64 {
        self.lng
    }

    pub fn is_valid(self) -> bool {
        (LAT_DEG_MIN..=LAT_DEG_MAX).contains(&self.lat)
            && (LNG_DEG_MIN..=LNG_DEG_MAX).contains(&self.lng)
    }

    /// Projects the position into Web Mercator (EPSG:3857) metres.
    ///
    /// Latitudes outside of the Mercator range are clamped.
    pub fn to_projected(self) -> ProjectedPoint {
        let lat = self.lat.clamp(-MERCATOR_MAX_LAT_DEG, MERCATOR_MAX_LAT_DEG);
        let x = EARTH_RADIUS * self.lng.to_radians();
        let y = EARTH_RADIUS * (std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();
        ProjectedPoint { x, y }
    }

    /// "lng, lat" with six decimals, e.g. `107.500000, -6.870000`.
    pub fn to_lng_lat_string(self) -> String {
        format!(
            "{:.prec$}, {:.prec$}",
            self.lng,
            self.lat,
            prec = COORD_DISPLAY_PRECISION
        )
    }
}

impl fmt::Display for MapPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_lng_lat_string())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Expected two comma separated numbers")]
    Format,
    #[error("Invalid number: {0}")]
    Number(String),
    #[error("Coordinate out of range")]
    Range,
}

/// Parses "lng,lat" in degrees.
impl FromStr for MapPoint {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',').map(str::trim);
        let (Some(lng), Some(lat), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ParseError::Format);
        };
        let lng = lng
            .parse::<f64>()
            .map_err(|_| ParseError::Number(lng.to_owned()))?;
        let lat = lat
            .parse::<f64>()
            .map_err(|_| ParseError::Number(lat.to_owned()))?;
        Self::try_from_lng_lat_deg(lng, lat).ok_or(ParseError::Range)
    }
}

/// A position in Web Mercator (EPSG:3857) metres.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

impl ProjectedPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_map_point(self) -> MapPoint {
        let lng = (self.x / EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (self.y / EARTH_RADIUS).exp().atan() - std::f64::consts::FRAC_PI_2)
            .to_degrees();
        MapPoint::new(lat, lng)
    }
}

impl From<MapPoint> for ProjectedPoint {
    fn from(from: MapPoint) -> Self {
        from.to_projected()
    }
}

impl From<ProjectedPoint> for MapPoint {
    fn from(from: ProjectedPoint) -> Self {
        from.to_map_point()
    }
}
