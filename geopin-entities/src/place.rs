use crate::geo::*;

/// A hit of a forward geocoding search.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub display_name : String,
    pub pos          : MapPoint,
}
