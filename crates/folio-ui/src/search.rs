//! Search components: the query box, the result list and the header summary.

use folio_reader::{SearchHit, SearchOutcome};
use leptos::prelude::*;

/// Text of a result's hit count.
pub fn hits_label(hits: usize) -> String {
    format!("({hits} occurrences in this article)")
}

/// Search box with a clear button shown while searching.
#[component]
pub fn SearchBox(
    /// Current text of the box.
    query: RwSignal<String>,
    /// Whether search mode is active.
    searching: Signal<bool>,
    /// Called with the new text on every input.
    on_input: Callback<String>,
    /// Called when the clear button is pressed.
    on_clear: Callback<()>,
) -> impl IntoView {
    view! {
      <div class="search-container">
        <input
          id="search-box"
          type="search"
          placeholder="Search all articles..."
          autocomplete="off"
          prop:value=move || query.get()
          on:input=move |ev| on_input.run(event_target_value(&ev))
        />
        <Show when=move || searching.get()>
          <button
            id="clear-search-btn"
            title="Clear search"
            on:click=move |_| on_clear.run(())
          >
            "×"
          </button>
        </Show>
      </div>
    }
}

/// Matching articles in index order.
#[component]
pub fn SearchResults(
    /// Current search outcome.
    outcome: Signal<Option<SearchOutcome>>,
    /// Called with the article id of a clicked result.
    on_open: Callback<usize>,
) -> impl IntoView {
    let hits = move || outcome.get().map(|o| o.hits).unwrap_or_default();

    view! {
      <ul id="toc-list">
        <Show
          when=move || !hits().is_empty()
          fallback=|| view! { <li class="search-empty">"No results found."</li> }
        >
          <For
            each=hits
            key=|hit| hit.id
            children=move |hit| view! { <SearchResultEntry hit=hit on_open=on_open /> }
          />
        </Show>
      </ul>
    }
}

#[component]
fn SearchResultEntry(hit: SearchHit, on_open: Callback<usize>) -> impl IntoView {
    let id = hit.id;
    view! {
      <li class="search-result" on:click=move |ev| {
        ev.prevent_default();
        on_open.run(id);
      }>
        <span class="result-year">"Year: " {hit.year}</span>
        <a href="#" class="result-link">{hit.heading}</a>
        <span class="result-hits">{hits_label(hit.hits)}</span>
      </li>
    }
}

/// Summary line shown in the page header while searching.
#[component]
pub fn SearchSummary(outcome: Signal<Option<SearchOutcome>>) -> impl IntoView {
    view! {
      <Show when=move || outcome.with(Option::is_some)>
        <div id="header-search-summary">
          {move || outcome.with(|o| o.as_ref().map(SearchOutcome::summary))}
        </div>
      </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hits_label() {
        assert_eq!(hits_label(3), "(3 occurrences in this article)");
    }
}
