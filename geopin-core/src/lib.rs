pub mod controller;
pub mod dispatch;
pub mod gateways;
pub mod text;

pub mod entities {
    pub use geopin_entities::{geo::*, marker::*, place::*, popup::*, view::*};
}
