use leptos::*;

use geopin_core::{controller::MapViewController, text};

use super::SearchBar;

#[component]
pub fn Controls(
    ctrl: ReadSignal<MapViewController>,
    on_search: Callback<String>,
    on_relocate: Callback<()>,
    on_toggle_fullscreen: Callback<()>,
    on_toggle_controls: Callback<()>,
    on_unset_layer: Callback<()>,
    on_set_layer: Callback<()>,
) -> impl IntoView {
    let fullscreen = Signal::derive(move || ctrl.with(MapViewController::is_fullscreen));
    let controls_hidden = Signal::derive(move || ctrl.with(MapViewController::controls_hidden));
    let search_enabled = Signal::derive(move || ctrl.with(MapViewController::search_enabled));
    let layer_buttons = ctrl.with_untracked(|c| c.config().features.layer_visibility);

    view! {
      <button
        id="toggle-ui"
        on:click = move |_| on_toggle_controls.call(())
      >
        { move || text::controls_toggle_label(controls_hidden.get()) }
      </button>
      <div
        id="controls"
        class:hidden = controls_hidden
      >
        <SearchBar enabled = search_enabled on_search />
        <button
          id="back-to-location"
          on:click = move |_| on_relocate.call(())
        >
          "Kembali ke Lokasi"
        </button>
        <button
          id="toggle-view"
          on:click = move |_| on_toggle_fullscreen.call(())
        >
          { move || text::fullscreen_toggle_label(fullscreen.get()) }
        </button>
        <Show when = move || layer_buttons>
          <button id="unset-layer" on:click = move |_| on_unset_layer.call(())>
            "Hide Layer"
          </button>
          <button id="set-layer" on:click = move |_| on_set_layer.call(())>
            "Show Layer"
          </button>
        </Show>
      </div>
    }
}
