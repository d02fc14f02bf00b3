//! The map view controller.
//!
//! It owns the viewport, the marker layer and the popup and reacts on the
//! events a host (browser, command line, tests) forwards to it.
//! Network requests are not performed here: the controller returns them as
//! [`Effect`]s and expects the host to report the outcome back.

use std::mem;

use crate::{
    entities::*,
    gateways::{geocode::GeocodingError, geolocation::GeolocationError},
};

mod config;
mod effect;

#[cfg(test)]
mod tests;

pub use self::{config::*, effect::*};

#[derive(Debug, Clone, Copy)]
struct PendingReverse {
    ticket: Ticket,
    pos: MapPoint,
}

#[derive(Debug)]
pub struct MapViewController {
    cfg: Config,
    view: ViewState,
    /// Incremented whenever the controller recenters the view.
    recenter_count: u64,
    user_location: Option<MapPoint>,
    /// Outcome of the last address lookup for the user's location.
    user_address: Option<PopupBody>,
    markers: MarkerSet,
    popup: PopupState,
    layer_visible: bool,
    /// The popup that was open when the layers were removed.
    stashed_popup: PopupState,
    fullscreen: bool,
    controls_hidden: bool,
    last_ticket: u64,
    /// The request whose outcome the popup is waiting for.
    pending_reverse: Option<PendingReverse>,
    pending_search: Option<Ticket>,
    /// Lookup of the user's location that has not finished yet.
    user_address_lookup: Option<Ticket>,
}

impl MapViewController {
    pub fn new(cfg: Config) -> Self {
        let view = ViewState::new(cfg.default_center, cfg.default_zoom);
        log::debug!(
            "Initialize map view at {} (zoom {})",
            cfg.default_center,
            cfg.default_zoom
        );
        Self {
            cfg,
            view,
            recenter_count: 0,
            user_location: None,
            user_address: None,
            markers: MarkerSet::default(),
            popup: PopupState::Hidden,
            layer_visible: true,
            stashed_popup: PopupState::Hidden,
            fullscreen: false,
            controls_hidden: false,
            last_ticket: 0,
            pending_reverse: None,
            pending_search: None,
            user_address_lookup: None,
        }
    }

    // -- accessors -- //

    pub const fn config(&self) -> &Config {
        &self.cfg
    }

    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    /// Changes each time the host has to move its map to [`Self::view`],
    /// even if the target equals the previous one.
    pub const fn recenter_count(&self) -> u64 {
        self.recenter_count
    }

    pub const fn user_location(&self) -> Option<MapPoint> {
        self.user_location
    }

    pub const fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    pub const fn popup(&self) -> &PopupState {
        &self.popup
    }

    /// `false` while the tile source and the marker layer are removed.
    pub const fn layer_visible(&self) -> bool {
        self.layer_visible
    }

    pub const fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub const fn controls_hidden(&self) -> bool {
        self.controls_hidden
    }

    pub const fn search_enabled(&self) -> bool {
        !self.fullscreen || self.cfg.features.search_in_fullscreen
    }

    // -- geolocation -- //

    #[must_use]
    pub fn on_locate_success(&mut self, pos: MapPoint) -> Vec<Effect> {
        if let Some(known) = self.user_location {
            log::warn!("Ignore location {pos}: the location of the user is already known ({known})");
            return vec![];
        }
        log::info!("Located user at {pos}");
        self.user_location = Some(pos);
        self.focus(pos, self.cfg.locate_zoom, MarkerKind::Locate);
        vec![self.request_reverse(pos, MarkerKind::Locate)]
    }

    #[must_use]
    pub fn on_locate_failure(&mut self, err: GeolocationError) -> Vec<Effect> {
        log::warn!("Unable to locate user: {err}");
        vec![Effect::Alert(Alert::LocationUnavailable(err))]
    }

    // -- map interaction -- //

    #[must_use]
    pub fn on_map_click(&mut self, coordinate: ProjectedPoint) -> Vec<Effect> {
        if self.cfg.features.layer_visibility && !self.layer_visible {
            log::debug!("Ignore map click: layers are removed");
            return vec![];
        }
        let pos = coordinate.to_map_point();
        log::debug!("Map clicked at {pos}");
        self.markers.replace(coordinate, MarkerKind::Click);
        vec![self.request_reverse(pos, MarkerKind::Click)]
    }

    /// Records pan and zoom gestures the host has already applied.
    pub fn set_view(&mut self, view: ViewState) {
        self.view = view;
    }

    #[must_use]
    pub fn on_relocate(&mut self) -> Vec<Effect> {
        let Some(pos) = self.user_location else {
            log::warn!("Cannot return to the user's location: not yet available");
            return vec![Effect::Alert(Alert::LocationNotYetAvailable)];
        };
        self.focus(pos, self.cfg.locate_zoom, MarkerKind::Relocate);
        if self.cfg.features.relocate_refetches {
            return vec![self.request_reverse(pos, MarkerKind::Relocate)];
        }
        self.supersede_requests();
        let body = self.user_address.clone().unwrap_or(PopupBody::NoAddress);
        self.show_popup(PopupContent {
            title: PopupTitle::Location,
            body,
            pos,
        });
        vec![]
    }

    #[must_use]
    pub fn on_reverse_geocoded(
        &mut self,
        ticket: Ticket,
        res: Result<Option<String>, GeocodingError>,
    ) -> Vec<Effect> {
        let user_address_lookup = self.user_address_lookup == Some(ticket);
        let pending = self
            .pending_reverse
            .filter(|pending| pending.ticket == ticket);
        if !user_address_lookup && pending.is_none() {
            log::debug!("Discard outdated address lookup #{}", ticket.to_raw());
            return vec![];
        }
        if let Err(err) = &res {
            log::warn!("Address lookup #{} failed: {err}", ticket.to_raw());
        }
        let body = PopupBody::from_lookup(res);
        if user_address_lookup {
            self.user_address_lookup = None;
            self.user_address = Some(body.clone());
        }
        let Some(pending) = pending else {
            log::debug!(
                "Keep the user's address of lookup #{} without showing it",
                ticket.to_raw()
            );
            return vec![];
        };
        self.pending_reverse = None;
        self.show_popup(PopupContent {
            title: PopupTitle::Location,
            body,
            pos: pending.pos,
        });
        vec![]
    }

    // -- search -- //

    #[must_use]
    pub fn on_search(&mut self, query: &str) -> Vec<Effect> {
        let query = query.trim();
        if query.is_empty() {
            return vec![self.notice(NoticeKind::EmptyQuery)];
        }
        if !self.search_enabled() {
            log::debug!("Ignore search for '{query}' in fullscreen mode");
            return vec![];
        }
        self.supersede_requests();
        let ticket = self.next_ticket();
        self.pending_search = Some(ticket);
        log::debug!("Search for '{query}' (#{})", ticket.to_raw());
        vec![Effect::Search {
            ticket,
            query: query.to_owned(),
        }]
    }

    #[must_use]
    pub fn on_search_results(
        &mut self,
        ticket: Ticket,
        res: Result<Vec<Place>, GeocodingError>,
    ) -> Vec<Effect> {
        if self.pending_search != Some(ticket) {
            log::debug!("Discard outdated search results #{}", ticket.to_raw());
            return vec![];
        }
        self.pending_search = None;
        let places = match res {
            Ok(places) => places,
            Err(err) => {
                log::warn!("Search failed: {err}");
                return vec![self.notice(NoticeKind::SearchFailed)];
            }
        };
        let Some(Place { display_name, pos }) = places.into_iter().next() else {
            log::info!("Search without results");
            return vec![self.notice(NoticeKind::NotFound)];
        };
        log::info!("Found '{display_name}' at {pos}");
        self.focus(pos, self.cfg.search_zoom, MarkerKind::Search);
        let body = PopupBody::from_lookup::<()>(Ok(Some(display_name)));
        self.show_popup(PopupContent {
            title: PopupTitle::SearchResult,
            body,
            pos,
        });
        vec![]
    }

    // -- popup -- //

    /// Hides the popup without touching the markers.
    pub fn close_popup(&mut self) {
        self.popup = PopupState::Hidden;
    }

    // -- layers -- //

    #[must_use]
    pub fn unset_layer(&mut self) -> Vec<Effect> {
        if !self.cfg.features.layer_visibility {
            log::warn!("Removing the map layers is not supported");
            return vec![];
        }
        if !self.layer_visible {
            return vec![];
        }
        log::debug!("Remove tile source and marker layer");
        self.layer_visible = false;
        self.stashed_popup = mem::take(&mut self.popup);
        vec![self.layer_notice(NoticeKind::LayerHidden)]
    }

    #[must_use]
    pub fn set_layer(&mut self) -> Vec<Effect> {
        if !self.cfg.features.layer_visibility {
            log::warn!("Restoring the map layers is not supported");
            return vec![];
        }
        if self.layer_visible {
            return vec![];
        }
        log::debug!("Restore tile source and marker layer");
        self.layer_visible = true;
        self.popup = mem::take(&mut self.stashed_popup);
        vec![self.layer_notice(NoticeKind::LayerShown)]
    }

    // -- UI state -- //

    /// Returns `true` if the controls are hidden now.
    pub fn toggle_controls(&mut self) -> bool {
        self.controls_hidden = !self.controls_hidden;
        self.controls_hidden
    }

    /// Returns `true` if the map is shown in fullscreen mode now.
    pub fn toggle_fullscreen(&mut self) -> bool {
        self.fullscreen = !self.fullscreen;
        self.fullscreen
    }

    // -- helpers -- //

    fn next_ticket(&mut self) -> Ticket {
        self.last_ticket += 1;
        Ticket::new(self.last_ticket)
    }

    fn request_reverse(&mut self, pos: MapPoint, kind: MarkerKind) -> Effect {
        self.supersede_requests();
        let ticket = self.next_ticket();
        self.pending_reverse = Some(PendingReverse { ticket, pos });
        if matches!(kind, MarkerKind::Locate | MarkerKind::Relocate) {
            self.user_address_lookup = Some(ticket);
        }
        Effect::ReverseGeocode { ticket, pos }
    }

    /// Only the latest interaction may show a popup.
    fn supersede_requests(&mut self) {
        self.pending_reverse = None;
        self.pending_search = None;
    }

    fn focus(&mut self, pos: MapPoint, zoom: Zoom, kind: MarkerKind) {
        let center = pos.to_projected();
        self.view.recenter(center, zoom);
        self.recenter_count += 1;
        self.markers.replace(center, kind);
    }

    fn show_popup(&mut self, content: PopupContent) {
        let popup = PopupState::show(content);
        if self.layer_visible {
            self.popup = popup;
        } else {
            self.stashed_popup = popup;
        }
    }

    fn notice(&self, kind: NoticeKind) -> Effect {
        Effect::Notice(Notice {
            kind,
            duration: self.cfg.search_notice_duration,
        })
    }

    fn layer_notice(&self, kind: NoticeKind) -> Effect {
        Effect::Notice(Notice {
            kind,
            duration: self.cfg.layer_notice_duration,
        })
    }
}

impl Default for MapViewController {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
