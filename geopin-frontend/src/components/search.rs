use leptos::*;

const SEARCH_ICON_URL: &str = "https://cdn-icons-png.flaticon.com/512/622/622669.png";

#[component]
pub fn SearchBar(
    #[prop(into)] enabled: Signal<bool>,
    on_search: Callback<String>,
) -> impl IntoView {
    let query = RwSignal::new(String::new());

    let submit = move || {
        let q = query.get_untracked();
        on_search.call(q);
    };

    view! {
      <div class="search">
        <input
          id="search-location"
          type="search"
          placeholder="Cari lokasi"
          prop:value = query
          prop:disabled = move || !enabled.get()
          on:input = move |ev| query.set(event_target_value(&ev))
          on:keyup = move |ev: ev::KeyboardEvent| {
            ev.stop_propagation();
            match &*ev.key() {
              "Enter" => {
                submit();
              }
              "Escape" => {
                query.set(String::new());
              }
              _ => { /* nothing to do */ }
            }
          }
        />
        <button
          id="search-button"
          prop:disabled = move || !enabled.get()
          on:click = move |_| submit()
        >
          <img src=SEARCH_ICON_URL alt="Search" />
        </button>
      </div>
    }
}
