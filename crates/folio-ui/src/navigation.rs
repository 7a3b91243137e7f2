//! Chapter navigation, the chapter outline and highlight stepping.

use folio_core::ChapterEntry;
use folio_reader::{TableOfContents, TocItem, TocSection};
use leptos::prelude::*;

/// One button per chapter.
#[component]
pub fn ChapterNav(
    chapters: Vec<ChapterEntry>,
    /// File of the active chapter.
    active: Signal<Option<String>>,
    on_select: Callback<String>,
) -> impl IntoView {
    view! {
      <nav class="chapter-nav">
        {chapters
          .into_iter()
          .map(|entry| {
            let file = entry.file.clone();
            let is_active = {
              let file = file.clone();
              move || active.with(|a| a.as_deref() == Some(file.as_str()))
            };
            view! {
              <button
                class="part-button"
                class:active=is_active
                data-file=entry.file
                on:click=move |_| on_select.run(file.clone())
              >
                {entry.name}
              </button>
            }
          })
          .collect_view()}
      </nav>
    }
}

/// Collapsible outline of the loaded chapter.
#[component]
pub fn ChapterOutline(
    toc: Signal<TableOfContents>,
    /// Whether expand/collapse-all are shown.
    show_controls: Signal<bool>,
    on_toggle: Callback<usize>,
    on_expand_all: Callback<()>,
    on_collapse_all: Callback<()>,
) -> impl IntoView {
    let sections = move || {
        toc.with(|toc| {
            toc.sections()
                .iter()
                .cloned()
                .enumerate()
                .collect::<Vec<_>>()
        })
    };

    view! {
      <div class="toc-controls" style:display=move || if show_controls.get() { "flex" } else { "none" }>
        <button id="toc-expand-all" on:click=move |_| on_expand_all.run(())>"Expand all"</button>
        <button id="toc-collapse-all" on:click=move |_| on_collapse_all.run(())>"Collapse all"</button>
      </div>
      <ul id="toc-list">
        <Show
          when=move || toc.with(|t| !t.is_empty())
          fallback=|| view! { <li>"No headings found"</li> }
        >
          <For
            each=sections
            key=|(index, section)| (*index, section.heading.id.clone(), section.expanded)
            children=move |(index, section)| {
              let on_toggle = Callback::new(move |()| on_toggle.run(index));
              view! { <OutlineSection section=section on_toggle=on_toggle /> }
            }
          />
        </Show>
      </ul>
    }
}

#[component]
fn OutlineSection(section: TocSection, on_toggle: Callback<()>) -> impl IntoView {
    let has_toggle = section.has_toggle();
    let label = section.toggle_label();
    let expanded = section.expanded;

    view! {
      <li class="level-1" class:open=expanded>
        {has_toggle
          .then(|| {
            view! {
              <span class="toggle" on:click=move |ev| {
                ev.prevent_default();
                on_toggle.run(());
              }>
                {label}
              </span>
            }
          })}
        <OutlineLink item=section.heading />
        <ul>
          {section
            .children
            .into_iter()
            .map(|item| {
              let class = format!("level-{}", item.level);
              view! {
                <li class=class>
                  <OutlineLink item=item />
                </li>
              }
            })
            .collect_view()}
        </ul>
      </li>
    }
}

#[component]
fn OutlineLink(item: TocItem) -> impl IntoView {
    view! { <a href=format!("#{}", item.id)>{item.text}</a> }
}

/// Previous/next controls over the highlighted matches.
#[component]
pub fn HighlightNav(
    visible: Signal<bool>,
    counter: Signal<String>,
    can_prev: Signal<bool>,
    can_next: Signal<bool>,
    on_prev: Callback<()>,
    on_next: Callback<()>,
) -> impl IntoView {
    view! {
      <Show when=move || visible.get()>
        <div id="highlight-nav">
          <button
            id="prev-highlight"
            prop:disabled=move || !can_prev.get()
            on:click=move |_| on_prev.run(())
          >
            "▲"
          </button>
          <span id="highlight-counter">{move || counter.get()}</span>
          <button
            id="next-highlight"
            prop:disabled=move || !can_next.get()
            on:click=move |_| on_next.run(())
          >
            "▼"
          </button>
        </div>
      </Show>
    }
}

/// Button that returns the content pane to its top.
#[component]
pub fn BackToTop(visible: Signal<bool>, on_click: Callback<()>) -> impl IntoView {
    view! {
      <button
        id="back-to-top-btn"
        title="Back to top"
        style:display=move || if visible.get() { "block" } else { "none" }
        on:click=move |_| on_click.run(())
      >
        "↑"
      </button>
    }
}
