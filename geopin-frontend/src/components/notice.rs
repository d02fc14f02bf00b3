use leptos::*;

use crate::Toast;

#[component]
pub fn NoticeToast(toast: ReadSignal<Option<Toast>>) -> impl IntoView {
    view! {
      <Show when = move || toast.with(Option::is_some)>
        <div class="notice">
          { move || toast.with(|t| t.as_ref().map(|t| t.message)) }
        </div>
      </Show>
    }
}
