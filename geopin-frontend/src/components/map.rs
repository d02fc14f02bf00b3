use std::time::Duration;

use leaflet::LatLng;
use leptos::*;
use leptos_leaflet::{position, MapContainer, MapEvents, Marker, Popup, Position, TileLayer};

use geopin_core::{
    controller::MapViewController,
    entities::{MapPoint, PopupContent, ViewState},
    text,
};

const TILE_LAYER_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
const MAP_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

#[component]
pub fn Map(
    ctrl: RwSignal<MapViewController>,
    on_click: Callback<MapPoint>,
    on_close_popup: Callback<()>,
) -> impl IntoView {
    let events = MapEvents::new();
    let map = RwSignal::<Option<leaflet::Map>>::new(None);

    let layer_visible = Signal::derive(move || ctrl.with(MapViewController::layer_visible));
    let fullscreen = Signal::derive(move || ctrl.with(MapViewController::is_fullscreen));
    let recenter_count = create_memo(move |_| ctrl.with(MapViewController::recenter_count));
    let popup = Signal::derive(move || {
        ctrl.with(|c| {
            c.layer_visible()
                .then(|| c.popup().content().cloned())
                .flatten()
        })
    });

    let events = events
        .mouse_click(move |ev| {
            let lat_lng = ev.lat_lng();
            match MapPoint::try_from_lat_lng_deg(lat_lng.lat(), lat_lng.lng()) {
                Some(pos) => on_click.call(pos),
                None => log::warn!("Ignore click outside of the map: {lat_lng:?}"),
            }
        })
        .move_end(move |_| {
            let Some(map) = map.get_untracked() else {
                log::warn!("No leaflet map found");
                return;
            };
            let center = map.get_center();
            let Some(center) = MapPoint::try_from_lat_lng_deg(center.lat(), center.lng()) else {
                return;
            };
            // The map already shows this view
            ctrl.update_untracked(|c| c.set_view(ViewState::new(center, map.get_zoom())));
        })
        .popup_close(move |_| {
            // Leaflet also closes the popup that is being replaced
            set_timeout(
                move || {
                    let open_in_map = document()
                        .query_selector("#map .leaflet-popup")
                        .ok()
                        .flatten()
                        .is_some();
                    if !open_in_map && popup.get_untracked().is_some() {
                        on_close_popup.call(());
                    }
                },
                Duration::ZERO,
            );
        });

    Effect::new(move |_| {
        log::debug!("Recenter map ({})", recenter_count.get());
        let view = ctrl.with_untracked(|c| *c.view());
        let Some(map) = map.get_untracked() else {
            log::warn!("No leaflet map found");
            return;
        };
        let center = view.center_pos();
        map.set_view(&LatLng::new(center.lat(), center.lng()), view.zoom);
    });

    let initial = ctrl.with_untracked(|c| *c.view());
    let center = initial.center_pos();
    let center = Position::new(center.lat(), center.lng());

    view! {
      <div
        id="map"
        class = move || text::fullscreen_css_class(fullscreen.get())
      >
        <MapContainer
          class="h-full"
          center
          zoom = initial.zoom
          map = map.write_only()
          set_view = true
          events
        >
          <Show when = move || layer_visible.get()>
            <TileLayer url=TILE_LAYER_URL attribution=MAP_ATTRIBUTION />
            <For
              each = move || ctrl.with(|c| c.markers().iter().cloned().collect::<Vec<_>>())
              key = |marker| marker.id.to_raw()
              let:marker
            >
              {
                let pos = marker.pos.to_map_point();
                view! { <Marker position=position!(pos.lat(), pos.lng()) /> }
              }
            </For>
          </Show>
          { move || popup.get().map(|content| view! {
              <PopupView content on_close = on_close_popup />
            })
          }
        </MapContainer>
      </div>
    }
}

#[component]
fn PopupView(content: PopupContent, on_close: Callback<()>) -> impl IntoView {
    let pos = content.pos;
    view! {
      <Popup position=position!(pos.lat(), pos.lng())>
        <button class="close-btn" on:click = move |_| on_close.call(())>"×"</button>
        <h3>{ text::popup_title(content.title) }</h3>
        <p>{ text::address_line(&content.body) }</p>
        <p>{ text::coordinates_line(&content) }</p>
      </Popup>
    }
}
