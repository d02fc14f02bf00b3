pub mod geocode;
pub mod geolocation;
