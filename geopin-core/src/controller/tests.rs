use std::cell::Cell;

use geopin_entities::builders::*;

use super::*;
use crate::{
    dispatch::dispatch,
    gateways::geocode::GeocodingGateway,
    text::{popup_text, LOOKUP_FAILED},
};

#[derive(Default)]
struct MockGeocoder {
    address: Option<String>,
    fail: bool,
    places: Vec<Place>,
    reverse_calls: Cell<usize>,
    search_calls: Cell<usize>,
}

impl MockGeocoder {
    fn with_address(address: &str) -> Self {
        Self {
            address: Some(address.to_string()),
            ..Default::default()
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn with_places(places: Vec<Place>) -> Self {
        Self {
            places,
            ..Default::default()
        }
    }
}

impl GeocodingGateway for MockGeocoder {
    fn reverse(&self, _: MapPoint) -> Result<Option<String>, GeocodingError> {
        self.reverse_calls.set(self.reverse_calls.get() + 1);
        if self.fail {
            return Err(GeocodingError::Request("offline".into()));
        }
        Ok(self.address.clone())
    }

    fn search(&self, _: &str) -> Result<Vec<Place>, GeocodingError> {
        self.search_calls.set(self.search_calls.get() + 1);
        if self.fail {
            return Err(GeocodingError::Request("offline".into()));
        }
        Ok(self.places.clone())
    }
}

fn bandung() -> MapPoint {
    MapPoint::from_lat_lng_deg(-6.87, 107.5)
}

fn controller(features: Features) -> MapViewController {
    MapViewController::new(Config {
        features,
        ..Default::default()
    })
}

fn layer_toggle_controller() -> MapViewController {
    controller(Features::layer_toggle())
}

fn located(features: Features, gw: &MockGeocoder) -> MapViewController {
    let mut ctrl = controller(features);
    let effects = ctrl.on_locate_success(bandung());
    assert!(dispatch(&mut ctrl, gw, effects).is_empty());
    ctrl
}

fn popup_string(ctrl: &MapViewController) -> String {
    popup_text(ctrl.popup().content().expect("visible popup"))
}

#[test]
fn initial_view() {
    let ctrl = MapViewController::default();
    assert_eq!(ctrl.view().zoom, DEFAULT_ZOOM);
    assert_eq!(ctrl.view().center, DEFAULT_CENTER.to_projected());
    assert!(ctrl.markers().is_empty());
    assert!(!ctrl.popup().is_visible());
    assert!(ctrl.user_location().is_none());
    assert!(ctrl.layer_visible());
}

mod locate {
    use super::*;

    #[test]
    fn recenter_and_place_a_single_marker() {
        let mut ctrl = MapViewController::default();
        let effects = ctrl.on_locate_success(bandung());
        assert_eq!(effects.len(), 1);
        assert!(matches!(
            effects[0],
            Effect::ReverseGeocode { pos, .. } if pos == bandung()
        ));
        assert_eq!(ctrl.view().zoom, 20.0);
        assert_eq!(ctrl.view().center, bandung().to_projected());
        assert_eq!(ctrl.markers().len(), 1);
        let marker = ctrl.markers().last().unwrap();
        assert_eq!(marker.pos, bandung().to_projected());
        assert_eq!(marker.kind, MarkerKind::Locate);
        assert_eq!(ctrl.user_location(), Some(bandung()));
    }

    #[test]
    fn show_popup_with_coordinates_even_if_lookup_fails() {
        let gw = MockGeocoder::failing();
        let ctrl = located(Features::default(), &gw);
        assert_eq!(ctrl.view().zoom, 20.0);
        assert_eq!(ctrl.markers().len(), 1);
        assert!(ctrl.popup().is_visible());
        assert_eq!(ctrl.popup().anchor(), Some(bandung().to_projected()));
        let text = popup_string(&ctrl);
        assert!(text.contains("Koordinat: 107.500000, -6.870000"));
        assert!(text.contains(LOOKUP_FAILED));
    }

    #[test]
    fn show_popup_with_address() {
        let gw = MockGeocoder::with_address("Sarijadi, Bandung");
        let ctrl = located(Features::default(), &gw);
        let content = ctrl.popup().content().unwrap();
        assert_eq!(content.title, PopupTitle::Location);
        assert_eq!(content.body.address(), Some("Sarijadi, Bandung"));
        assert!(popup_string(&ctrl).contains("Koordinat: 107.500000, -6.870000"));
    }

    #[test]
    fn failure_raises_an_alert_without_side_effects() {
        let mut ctrl = MapViewController::default();
        let effects = ctrl.on_locate_failure(GeolocationError::PermissionDenied);
        assert_eq!(
            effects,
            vec![Effect::Alert(Alert::LocationUnavailable(
                GeolocationError::PermissionDenied
            ))]
        );
        assert!(ctrl.markers().is_empty());
        assert!(!ctrl.popup().is_visible());
        assert_eq!(ctrl.view().zoom, DEFAULT_ZOOM);
        assert!(ctrl.user_location().is_none());
    }

    #[test]
    fn the_first_location_is_kept() {
        let gw = MockGeocoder::default();
        let mut ctrl = located(Features::default(), &gw);
        let other = MapPoint::from_lat_lng_deg(52.5, 13.4);
        assert!(ctrl.on_locate_success(other).is_empty());
        assert_eq!(ctrl.user_location(), Some(bandung()));
    }
}

mod click {
    use super::*;

    #[test]
    fn always_leaves_exactly_one_marker() {
        let gw = MockGeocoder::with_address("somewhere");
        let mut ctrl = located(Features::default(), &gw);
        for (lat, lng) in [(1.0, 2.0), (3.0, 4.0), (-5.0, 6.0), (7.0, -8.0)] {
            let coordinate = MapPoint::from_lat_lng_deg(lat, lng).to_projected();
            let effects = ctrl.on_map_click(coordinate);
            assert_eq!(ctrl.markers().len(), 1);
            assert_eq!(ctrl.markers().last().unwrap().pos, coordinate);
            assert!(dispatch(&mut ctrl, &gw, effects).is_empty());
            assert_eq!(ctrl.markers().len(), 1);
        }
        assert_eq!(gw.reverse_calls.get(), 5);
    }

    #[test]
    fn show_popup_at_clicked_position() {
        let gw = MockGeocoder::with_address("Jalan Kampus Polban");
        let mut ctrl = MapViewController::default();
        let coordinate = bandung().to_projected();
        let effects = ctrl.on_map_click(coordinate);
        dispatch(&mut ctrl, &gw, effects);
        let PopupState::Visible { anchor, content } = ctrl.popup() else {
            panic!("popup should be visible");
        };
        assert_eq!(*anchor, coordinate);
        assert_eq!(content.body.address(), Some("Jalan Kampus Polban"));
        assert!(popup_string(&ctrl).contains("Koordinat: 107.500000, -6.870000"));
    }

    #[test]
    fn failed_lookup_still_shows_coordinates() {
        let gw = MockGeocoder::failing();
        let mut ctrl = MapViewController::default();
        let pos = MapPoint::from_lat_lng_deg(10.0, 20.0);
        let effects = ctrl.on_map_click(pos.to_projected());
        dispatch(&mut ctrl, &gw, effects);
        assert_eq!(ctrl.markers().len(), 1);
        let text = popup_string(&ctrl);
        assert!(text.contains("Koordinat: 20.000000, 10.000000"));
    }

    #[test]
    fn ignored_while_layers_are_removed() {
        let mut ctrl = layer_toggle_controller();
        let _ = ctrl.unset_layer();
        let effects = ctrl.on_map_click(bandung().to_projected());
        assert!(effects.is_empty());
        assert!(ctrl.markers().is_empty());
    }

    #[test]
    fn outdated_lookup_is_discarded() {
        let mut ctrl = MapViewController::default();
        let first = ctrl.on_map_click(MapPoint::from_lat_lng_deg(1.0, 1.0).to_projected());
        let second = ctrl.on_map_click(MapPoint::from_lat_lng_deg(2.0, 2.0).to_projected());
        let (Effect::ReverseGeocode { ticket: first, .. }, Effect::ReverseGeocode { ticket: second, .. }) =
            (&first[0], &second[0])
        else {
            panic!("expected address lookups");
        };
        assert!(ctrl
            .on_reverse_geocoded(*first, Ok(Some("first".into())))
            .is_empty());
        assert!(!ctrl.popup().is_visible());
        let _ = ctrl.on_reverse_geocoded(*second, Ok(Some("second".into())));
        assert_eq!(
            ctrl.popup().content().unwrap().body.address(),
            Some("second")
        );
    }
}

mod relocate {
    use super::*;

    #[test]
    fn alert_if_location_is_unknown() {
        let mut ctrl = MapViewController::default();
        assert_eq!(
            ctrl.on_relocate(),
            vec![Effect::Alert(Alert::LocationNotYetAvailable)]
        );
        assert!(ctrl.markers().is_empty());
    }

    #[test]
    fn fetch_the_address_again() {
        let gw = MockGeocoder::with_address("Sarijadi");
        let mut ctrl = located(Features::controls_toggle(), &gw);
        let click = ctrl.on_map_click(MapPoint::from_lat_lng_deg(0.0, 0.0).to_projected());
        dispatch(&mut ctrl, &gw, click);
        ctrl.set_view(ViewState::new(MapPoint::from_lat_lng_deg(0.0, 0.0), 3.0));

        let effects = ctrl.on_relocate();
        assert!(matches!(effects[..], [Effect::ReverseGeocode { pos, .. }] if pos == bandung()));
        assert_eq!(ctrl.view().zoom, 20.0);
        assert_eq!(ctrl.view().center, bandung().to_projected());
        assert_eq!(ctrl.markers().len(), 1);
        assert_eq!(ctrl.markers().last().unwrap().kind, MarkerKind::Relocate);
        dispatch(&mut ctrl, &gw, effects);
        assert_eq!(gw.reverse_calls.get(), 3);
        assert_eq!(ctrl.popup().anchor(), Some(bandung().to_projected()));
    }

    #[test]
    fn reuse_the_cached_address() {
        let gw = MockGeocoder::with_address("Sarijadi");
        let mut ctrl = located(Features::layer_toggle(), &gw);
        ctrl.close_popup();
        let effects = ctrl.on_relocate();
        assert!(effects.is_empty());
        assert_eq!(gw.reverse_calls.get(), 1);
        assert_eq!(
            ctrl.popup().content().unwrap().body.address(),
            Some("Sarijadi")
        );
        assert_eq!(ctrl.markers().len(), 1);
    }

    #[test]
    fn keep_the_address_of_an_interrupted_locate() {
        let mut ctrl = layer_toggle_controller();
        let locate = ctrl.on_locate_success(bandung());
        let click = ctrl.on_map_click(MapPoint::from_lat_lng_deg(1.0, 1.0).to_projected());
        let (
            [Effect::ReverseGeocode { ticket: locate, .. }],
            [Effect::ReverseGeocode { ticket: click, .. }],
        ) = (&locate[..], &click[..])
        else {
            panic!("expected address lookups");
        };
        assert!(ctrl
            .on_reverse_geocoded(*locate, Ok(Some("Sarijadi".into())))
            .is_empty());
        assert!(!ctrl.popup().is_visible());
        let _ = ctrl.on_reverse_geocoded(*click, Ok(Some("Jalan Setiabudi".into())));
        assert_eq!(
            ctrl.popup().content().unwrap().body.address(),
            Some("Jalan Setiabudi")
        );

        assert!(ctrl.on_relocate().is_empty());
        assert_eq!(
            ctrl.popup().content().unwrap().body.address(),
            Some("Sarijadi")
        );
        assert_eq!(ctrl.popup().anchor(), Some(bandung().to_projected()));
    }

    #[test]
    fn recenter_on_the_same_view_again() {
        let gw = MockGeocoder::with_address("Sarijadi");
        let mut ctrl = located(Features::layer_toggle(), &gw);
        let located_view = *ctrl.view();
        let count = ctrl.recenter_count();

        let _ = ctrl.on_relocate();
        assert_eq!(*ctrl.view(), located_view);
        assert_eq!(ctrl.recenter_count(), count + 1);

        ctrl.set_view(ViewState::new(MapPoint::from_lat_lng_deg(0.0, 0.0), 3.0));
        assert_eq!(ctrl.recenter_count(), count + 1);
        let _ = ctrl.on_relocate();
        assert_eq!(*ctrl.view(), located_view);
        assert_eq!(ctrl.recenter_count(), count + 2);
    }
}

mod search {
    use super::*;

    fn braga() -> Place {
        Place::build()
            .display_name("Jalan Braga, Bandung")
            .pos(MapPoint::from_lat_lng_deg(-6.917, 107.609))
            .finish()
    }

    #[test]
    fn empty_query_never_issues_a_request() {
        let gw = MockGeocoder::with_places(vec![braga()]);
        let mut ctrl = MapViewController::default();
        for query in ["", "   "] {
            let effects = ctrl.on_search(query);
            assert!(matches!(
                effects[..],
                [Effect::Notice(Notice {
                    kind: NoticeKind::EmptyQuery,
                    ..
                })]
            ));
            assert_eq!(dispatch(&mut ctrl, &gw, effects).len(), 1);
        }
        assert_eq!(gw.search_calls.get(), 0);
    }

    #[test]
    fn no_results_keep_the_view() {
        let gw = MockGeocoder::default();
        let mut ctrl = MapViewController::default();
        let before = *ctrl.view();
        let effects = ctrl.on_search("atlantis");
        let remaining = dispatch(&mut ctrl, &gw, effects);
        assert_eq!(gw.search_calls.get(), 1);
        assert!(matches!(
            remaining[..],
            [Effect::Notice(Notice {
                kind: NoticeKind::NotFound,
                ..
            })]
        ));
        assert_eq!(*ctrl.view(), before);
        assert!(ctrl.markers().is_empty());
    }

    #[test]
    fn failure_shows_a_notice() {
        let gw = MockGeocoder::failing();
        let mut ctrl = MapViewController::default();
        let effects = ctrl.on_search("bandung");
        let remaining = dispatch(&mut ctrl, &gw, effects);
        assert!(matches!(
            remaining[..],
            [Effect::Notice(Notice {
                kind: NoticeKind::SearchFailed,
                ..
            })]
        ));
        assert_eq!(ctrl.view().zoom, DEFAULT_ZOOM);
    }

    #[test]
    fn focus_the_first_result() {
        let other = Place::build()
            .display_name("Braga City Walk")
            .pos(MapPoint::from_lat_lng_deg(-6.91, 107.61))
            .finish();
        let gw = MockGeocoder::with_places(vec![braga(), other]);
        let mut ctrl = located(Features::default(), &gw);
        let effects = ctrl.on_search(" braga ");
        assert!(matches!(&effects[..], [Effect::Search { query, .. }] if query == "braga"));
        assert!(dispatch(&mut ctrl, &gw, effects).is_empty());

        let pos = braga().pos;
        assert_eq!(ctrl.view().zoom, 15.0);
        assert_eq!(ctrl.view().center, pos.to_projected());
        assert_eq!(ctrl.markers().len(), 1);
        assert_eq!(ctrl.markers().last().unwrap().kind, MarkerKind::Search);
        let content = ctrl.popup().content().unwrap();
        assert_eq!(content.title, PopupTitle::SearchResult);
        assert_eq!(content.body.address(), Some("Jalan Braga, Bandung"));
        assert!(popup_string(&ctrl).contains("Koordinat: 107.609000, -6.917000"));
        assert_eq!(ctrl.user_location(), Some(bandung()));
    }

    #[test]
    fn disabled_in_fullscreen() {
        let gw = MockGeocoder::with_places(vec![braga()]);
        let mut ctrl = controller(Features::controls_toggle());
        assert!(ctrl.toggle_fullscreen());
        assert!(!ctrl.search_enabled());
        assert!(ctrl.on_search("braga").is_empty());
        assert!(!ctrl.toggle_fullscreen());
        let effects = ctrl.on_search("braga");
        dispatch(&mut ctrl, &gw, effects);
        assert_eq!(gw.search_calls.get(), 1);
    }

    #[test]
    fn enabled_in_fullscreen() {
        let mut ctrl = layer_toggle_controller();
        ctrl.toggle_fullscreen();
        assert!(ctrl.search_enabled());
        assert_eq!(ctrl.on_search("braga").len(), 1);
    }

    #[test]
    fn outdated_results_are_discarded() {
        let mut ctrl = MapViewController::default();
        let first = ctrl.on_search("first");
        let _second = ctrl.on_search("second");
        let Effect::Search { ticket, .. } = &first[0] else {
            panic!("expected a search request");
        };
        assert!(ctrl.on_search_results(*ticket, Ok(vec![braga()])).is_empty());
        assert!(ctrl.markers().is_empty());
        assert_eq!(ctrl.view().zoom, DEFAULT_ZOOM);
    }

    #[test]
    fn a_later_click_supersedes_the_search() {
        let mut ctrl = MapViewController::default();
        let search = ctrl.on_search("braga");
        let clicked = MapPoint::from_lat_lng_deg(1.0, 1.0).to_projected();
        let click = ctrl.on_map_click(clicked);
        let ([Effect::Search { ticket: search, .. }], [Effect::ReverseGeocode { ticket: click, .. }]) =
            (&search[..], &click[..])
        else {
            panic!("expected a search and an address lookup");
        };

        assert!(ctrl.on_search_results(*search, Ok(vec![braga()])).is_empty());
        assert!(!ctrl.popup().is_visible());
        assert_eq!(ctrl.view().zoom, DEFAULT_ZOOM);
        assert_eq!(ctrl.markers().last().unwrap().kind, MarkerKind::Click);

        let _ = ctrl.on_reverse_geocoded(*click, Ok(Some("Jalan Setiabudi".into())));
        assert_eq!(ctrl.markers().len(), 1);
        assert_eq!(ctrl.markers().last().unwrap().pos, clicked);
        assert_eq!(ctrl.popup().anchor(), Some(clicked));
        assert_eq!(ctrl.popup().content().unwrap().title, PopupTitle::Location);
    }

    #[test]
    fn a_later_search_supersedes_the_click() {
        let mut ctrl = MapViewController::default();
        let click = ctrl.on_map_click(MapPoint::from_lat_lng_deg(1.0, 1.0).to_projected());
        let search = ctrl.on_search("braga");
        let ([Effect::ReverseGeocode { ticket: click, .. }], [Effect::Search { ticket: search, .. }]) =
            (&click[..], &search[..])
        else {
            panic!("expected an address lookup and a search");
        };

        assert!(ctrl.on_search_results(*search, Ok(vec![braga()])).is_empty());
        assert!(ctrl
            .on_reverse_geocoded(*click, Ok(Some("Jalan Setiabudi".into())))
            .is_empty());

        let pos = braga().pos.to_projected();
        assert_eq!(ctrl.markers().len(), 1);
        assert_eq!(ctrl.markers().last().unwrap().pos, pos);
        assert_eq!(ctrl.popup().anchor(), Some(pos));
        let content = ctrl.popup().content().unwrap();
        assert_eq!(content.title, PopupTitle::SearchResult);
        assert_eq!(content.body.address(), Some("Jalan Braga, Bandung"));
    }
}

mod popup {
    use super::*;

    #[test]
    fn close_keeps_the_markers() {
        let gw = MockGeocoder::default();
        let mut ctrl = located(Features::default(), &gw);
        assert!(ctrl.popup().is_visible());
        ctrl.close_popup();
        assert!(!ctrl.popup().is_visible());
        assert_eq!(ctrl.markers().len(), 1);
    }
}

mod layers {
    use super::*;

    #[test]
    fn unset_and_set_restore_everything() {
        let gw = MockGeocoder::with_address("Sarijadi");
        let mut ctrl = located(Features::layer_toggle(), &gw);
        let marker = ctrl.markers().last().cloned();

        let effects = ctrl.unset_layer();
        assert!(matches!(
            effects[..],
            [Effect::Notice(Notice {
                kind: NoticeKind::LayerHidden,
                ..
            })]
        ));
        assert!(!ctrl.layer_visible());
        assert!(!ctrl.popup().is_visible());
        assert_eq!(ctrl.user_location(), Some(bandung()));

        let effects = ctrl.set_layer();
        assert!(matches!(
            effects[..],
            [Effect::Notice(Notice {
                kind: NoticeKind::LayerShown,
                ..
            })]
        ));
        assert!(ctrl.layer_visible());
        assert_eq!(ctrl.markers().last().cloned(), marker);
        assert!(ctrl.popup().is_visible());
        assert_eq!(ctrl.user_location(), Some(bandung()));
    }

    #[test]
    fn repeated_transitions_are_ignored() {
        let mut ctrl = layer_toggle_controller();
        assert!(ctrl.set_layer().is_empty());
        assert_eq!(ctrl.unset_layer().len(), 1);
        assert!(ctrl.unset_layer().is_empty());
        assert_eq!(ctrl.set_layer().len(), 1);
    }

    #[test]
    fn not_supported_without_the_feature() {
        let mut ctrl = controller(Features::controls_toggle());
        assert!(ctrl.unset_layer().is_empty());
        assert!(ctrl.layer_visible());
    }

    #[test]
    fn lookups_finishing_while_hidden_are_shown_after_restore() {
        let mut ctrl = layer_toggle_controller();
        let effects = ctrl.on_locate_success(bandung());
        let _ = ctrl.unset_layer();
        let Effect::ReverseGeocode { ticket, .. } = effects[0] else {
            panic!("expected an address lookup");
        };
        let _ = ctrl.on_reverse_geocoded(ticket, Ok(Some("Sarijadi".into())));
        assert!(!ctrl.popup().is_visible());
        let _ = ctrl.set_layer();
        assert!(ctrl.popup().is_visible());
    }
}

#[test]
fn toggle_controls() {
    let mut ctrl = MapViewController::default();
    assert!(!ctrl.controls_hidden());
    assert!(ctrl.toggle_controls());
    assert!(!ctrl.toggle_controls());
    assert!(ctrl.markers().is_empty());
}

#[test]
fn toggle_fullscreen() {
    let mut ctrl = MapViewController::default();
    assert!(!ctrl.is_fullscreen());
    assert!(ctrl.toggle_fullscreen());
    assert!(!ctrl.search_enabled());
    assert!(!ctrl.toggle_fullscreen());
    assert!(ctrl.search_enabled());
}

#[test]
fn set_view_records_gestures() {
    let mut ctrl = MapViewController::default();
    let view = ViewState::new(bandung(), 12.0);
    ctrl.set_view(view);
    assert_eq!(*ctrl.view(), view);
    assert!(ctrl.markers().is_empty());
}
