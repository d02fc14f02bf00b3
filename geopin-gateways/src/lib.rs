pub mod nominatim;
pub mod popup;
