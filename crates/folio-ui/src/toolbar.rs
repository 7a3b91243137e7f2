//! Reader toolbar: theme toggle and font size.

use folio_reader::Theme;
use leptos::prelude::*;

#[component]
pub fn Toolbar(
    theme: Signal<Theme>,
    on_toggle_theme: Callback<()>,
    on_font_increase: Callback<()>,
    on_font_decrease: Callback<()>,
) -> impl IntoView {
    view! {
      <div class="toolbar">
        <button id="font-decrease" title="Smaller text" on:click=move |_| on_font_decrease.run(())>
          "A-"
        </button>
        <button id="font-increase" title="Larger text" on:click=move |_| on_font_increase.run(())>
          "A+"
        </button>
        <button id="dark-mode-btn" title="Toggle theme" on:click=move |_| on_toggle_theme.run(())>
          {move || theme.get().toggle_icon()}
        </button>
      </div>
    }
}
