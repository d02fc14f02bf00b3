use std::time::Duration;

use strum::{Display, EnumString};

use crate::{entities::MapPoint, gateways::geolocation::GeolocationError};

/// Ties the completion of a request to the request itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn to_raw(self) -> u64 {
        self.0
    }
}

/// Something the host has to do on behalf of the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Resolve the address of `pos` and report it back
    /// with [`super::MapViewController::on_reverse_geocoded`].
    ReverseGeocode { ticket: Ticket, pos: MapPoint },
    /// Search for `query` and report the hits back
    /// with [`super::MapViewController::on_search_results`].
    Search { ticket: Ticket, query: String },
    /// Show a blocking error dialog.
    Alert(Alert),
    /// Show a non-blocking notification that disappears by itself.
    Notice(Notice),
}

impl Effect {
    pub const fn is_request(&self) -> bool {
        matches!(self, Self::ReverseGeocode { .. } | Self::Search { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    LocationUnavailable(GeolocationError),
    LocationNotYetAvailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum NoticeKind {
    EmptyQuery,
    NotFound,
    SearchFailed,
    LayerHidden,
    LayerShown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub duration: Duration,
}
