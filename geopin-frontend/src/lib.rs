use leptos::*;
use wasm_bindgen::JsCast;

use geopin_boundary::SearchHit;
use geopin_core::{
    controller::{Config, Effect, Features, MapViewController, Notice},
    entities::{MapPoint, Place},
    gateways::geocode::GeocodingError,
    text,
};
use geopin_frontend_api as api;

mod components;
mod geolocation;

use components::*;

const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Value of the `data-features` attribute of the app container
/// that enables the layer buttons.
const LAYER_TOGGLE_FEATURES: &str = "layer-toggle";

/// A notice currently shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    id: u64,
    pub message: &'static str,
}

/// Performs the effects emitted by the controller.
#[derive(Clone)]
struct EffectRunner {
    ctrl: RwSignal<MapViewController>,
    toast: RwSignal<Option<Toast>>,
    toast_count: StoredValue<u64>,
    api: api::NominatimApi,
}

impl EffectRunner {
    fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ReverseGeocode { ticket, pos } => {
                    let runner = self.clone();
                    spawn_local(async move {
                        let res = runner
                            .api
                            .reverse(pos.lat(), pos.lng())
                            .await
                            .map_err(|err| GeocodingError::Request(err.to_string()));
                        let effects = runner
                            .ctrl
                            .try_update(|ctrl| ctrl.on_reverse_geocoded(ticket, res))
                            .unwrap_or_default();
                        runner.run(effects);
                    });
                }
                Effect::Search { ticket, query } => {
                    let runner = self.clone();
                    spawn_local(async move {
                        let res = runner
                            .api
                            .search(&query)
                            .await
                            .map(hits_into_places)
                            .map_err(|err| GeocodingError::Request(err.to_string()));
                        let effects = runner
                            .ctrl
                            .try_update(|ctrl| ctrl.on_search_results(ticket, res))
                            .unwrap_or_default();
                        runner.run(effects);
                    });
                }
                Effect::Alert(alert) => {
                    let message = text::alert_message(&alert);
                    if let Err(err) = window().alert_with_message(message) {
                        log::warn!("Unable to show alert '{message}': {err:?}");
                    }
                }
                Effect::Notice(notice) => {
                    self.show_notice(notice);
                }
            }
        }
    }

    fn show_notice(&self, notice: Notice) {
        let Notice { kind, duration } = notice;
        self.toast_count.update_value(|count| *count += 1);
        let id = self.toast_count.get_value();
        self.toast.set(Some(Toast {
            id,
            message: text::notice_message(kind),
        }));
        let toast = self.toast;
        set_timeout(
            move || {
                // A newer notice replaces this one
                if toast.get_untracked().is_some_and(|t| t.id == id) {
                    toast.set(None);
                }
            },
            duration,
        );
    }
}

fn hits_into_places(hits: Vec<SearchHit>) -> Vec<Place> {
    hits.into_iter()
        .filter_map(|hit| {
            Place::try_from(hit)
                .map_err(|err| log::warn!("Ignoring search hit: {err}"))
                .ok()
        })
        .collect()
}

fn features_of_container() -> Features {
    let selected = document()
        .get_element_by_id("app")
        .and_then(|el| el.get_attribute("data-features"));
    if selected.as_deref() == Some(LAYER_TOGGLE_FEATURES) {
        Features::layer_toggle()
    } else {
        Features::controls_toggle()
    }
}

#[component]
#[must_use]
pub fn App() -> impl IntoView {
    // -- signals -- //

    let features = features_of_container();
    log::debug!("Enabled features: {features:?}");
    let ctrl = RwSignal::new(MapViewController::new(Config {
        features,
        ..Config::default()
    }));
    let toast = RwSignal::new(None::<Toast>);

    let runner = EffectRunner {
        ctrl,
        toast,
        toast_count: StoredValue::new(0),
        api: api::NominatimApi::new(DEFAULT_NOMINATIM_URL),
    };

    // -- callbacks -- //

    let on_located = {
        let runner = runner.clone();
        Callback::new(move |pos: MapPoint| {
            let effects = ctrl
                .try_update(|ctrl| ctrl.on_locate_success(pos))
                .unwrap_or_default();
            runner.run(effects);
        })
    };

    let on_locate_failed = {
        let runner = runner.clone();
        Callback::new(move |err| {
            let effects = ctrl
                .try_update(|ctrl| ctrl.on_locate_failure(err))
                .unwrap_or_default();
            runner.run(effects);
        })
    };

    let on_map_click = {
        let runner = runner.clone();
        Callback::new(move |pos: MapPoint| {
            let effects = ctrl
                .try_update(|ctrl| ctrl.on_map_click(pos.to_projected()))
                .unwrap_or_default();
            runner.run(effects);
        })
    };

    let on_search = {
        let runner = runner.clone();
        Callback::new(move |query: String| {
            let effects = ctrl
                .try_update(|ctrl| ctrl.on_search(&query))
                .unwrap_or_default();
            runner.run(effects);
        })
    };

    let on_relocate = {
        let runner = runner.clone();
        Callback::new(move |()| {
            let effects = ctrl
                .try_update(MapViewController::on_relocate)
                .unwrap_or_default();
            runner.run(effects);
        })
    };

    let on_unset_layer = {
        let runner = runner.clone();
        Callback::new(move |()| {
            let effects = ctrl
                .try_update(MapViewController::unset_layer)
                .unwrap_or_default();
            runner.run(effects);
        })
    };

    let on_set_layer = Callback::new(move |()| {
        let effects = ctrl
            .try_update(MapViewController::set_layer)
            .unwrap_or_default();
        runner.run(effects);
    });

    let on_close_popup = Callback::new(move |()| {
        ctrl.update(MapViewController::close_popup);
    });

    let on_toggle_fullscreen = Callback::new(move |()| {
        ctrl.update(|ctrl| {
            let fullscreen = ctrl.toggle_fullscreen();
            log::debug!("Fullscreen: {fullscreen}");
        });
    });

    let on_toggle_controls = Callback::new(move |()| {
        ctrl.update(|ctrl| {
            ctrl.toggle_controls();
        });
    });

    // -- init -- //

    geolocation::current_position(on_located, on_locate_failed);

    view! {
      <Controls
        ctrl = ctrl.read_only()
        on_search
        on_relocate
        on_toggle_fullscreen
        on_toggle_controls
        on_unset_layer
        on_set_layer
      />
      <Map ctrl on_click = on_map_click on_close_popup />
      <NoticeToast toast = toast.read_only() />
    }
}

pub fn mount() {
    let Some(app_container) = document()
        .get_element_by_id("app")
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        log::error!("No app container element found");
        return;
    };
    mount_to(app_container, || view! { <App /> });
}
