use folio_core::Config;
use folio_reader::{
    ChapterRequest, ChapterView, QueryAction, ReaderMode, ReaderState,
    state::{CHAPTER_ERROR_CONTENT, LOADING_CONTENT},
};
use folio_ui::{
    BackToTop, ChapterNav, ChapterOutline, HighlightNav, SearchBox, SearchResults, SearchSummary,
    Toolbar,
    browser::{
        BACK_TO_TOP_THRESHOLD, CONTENT_AREA_ID, apply_scroll, apply_theme, focus_highlight,
        load_preferences, save_preferences, scroll_content_to_top, take_manifest,
    },
    fetch_chapter, fetch_index,
};
use leptos::{prelude::*, task::spawn_local};
use leptos_meta::{Title, provide_meta_context};

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    let config = Config::default();
    let manifest = take_manifest(&config.manifest);
    let chapters = manifest.entries().to_vec();
    let state = RwSignal::new(
        ReaderState::new(manifest, load_preferences())
            .with_min_query_len(config.search.min_query_len),
    );

    let content = RwSignal::new(String::new());
    let query = RwSignal::new(String::new());
    let scrolled = RwSignal::new(false);

    let load_chapter = move |request: ChapterRequest| {
        content.set(LOADING_CONTENT.to_string());
        spawn_local(async move {
            match fetch_chapter(&request.file).await {
                Ok(html) => {
                    if let Some(view) = state.try_update(|s| s.chapter_loaded(&request, &html)) {
                        show_chapter(content, view);
                    }
                }
                Err(err) => {
                    let html = state
                        .try_update(|s| s.chapter_failed(&request, &err))
                        .unwrap_or(CHAPTER_ERROR_CONTENT);
                    content.set(html.to_string());
                }
            }
        });
    };

    let index_file = config.site.index_file.clone();
    spawn_local(async move {
        match fetch_index(&index_file).await {
            Ok(index) => state.update(|s| s.set_index(index)),
            Err(err) => state.update(|s| s.index_failed(&err)),
        }
    });

    if let Some(request) = state.try_update(ReaderState::start).flatten() {
        load_chapter(request);
    }

    Effect::new(move |_| apply_theme(state.with(|s| s.prefs().theme)));

    let on_select = Callback::new(move |file: String| {
        query.set(String::new());
        if let Some(request) = state.try_update(|s| s.select_chapter(&file)).flatten() {
            load_chapter(request);
        }
    });

    let on_input = Callback::new(move |raw: String| {
        query.set(raw.clone());
        match state.try_update(|s| s.input_query(&raw)) {
            Some(QueryAction::Reset(Some(request))) => load_chapter(request),
            Some(QueryAction::Invalid(message)) => log::warn!("{message}"),
            _ => {}
        }
    });

    let on_clear = Callback::new(move |()| {
        query.set(String::new());
        if let Some(request) = state.try_update(ReaderState::clear_search).flatten() {
            load_chapter(request);
        }
    });

    let on_open = Callback::new(move |id: usize| {
        if let Some(request) = state.try_update(|s| s.open_result(id)).flatten() {
            load_chapter(request);
        }
    });

    let on_prev = Callback::new(move |()| {
        if let Some(id) = state
            .try_update(|s| s.prev_highlight().map(str::to_string))
            .flatten()
        {
            focus_highlight(&id);
        }
    });

    let on_next = Callback::new(move |()| {
        if let Some(id) = state
            .try_update(|s| s.next_highlight().map(str::to_string))
            .flatten()
        {
            focus_highlight(&id);
        }
    });

    let on_toggle_theme = Callback::new(move |()| {
        if let Some(prefs) = state.try_update(|s| {
            s.toggle_theme();
            s.prefs()
        }) {
            save_preferences(&prefs);
        }
    });

    let on_font_increase = Callback::new(move |()| {
        if let Some(prefs) = state.try_update(ReaderState::increase_font) {
            save_preferences(&prefs);
        }
    });

    let on_font_decrease = Callback::new(move |()| {
        if let Some(prefs) = state.try_update(ReaderState::decrease_font) {
            save_preferences(&prefs);
        }
    });

    let searching = Signal::derive(move || state.with(|s| s.mode() == ReaderMode::Search));
    let outcome = Signal::derive(move || state.with(|s| s.search_outcome().cloned()));
    let highlights = Memo::new(move |_| state.with(|s| s.highlights().clone()));

    view! {
      <Title text=move || state.with(|s| s.active_title().to_string()) />

      <header class="page-header">
        <h1 id="global-search-title" style:display=move || if searching.get() { "none" } else { "block" }>
          {move || state.with(|s| s.active_title().to_string())}
        </h1>
        <SearchSummary outcome=outcome />
        <Toolbar
          theme=Signal::derive(move || state.with(|s| s.prefs().theme))
          on_toggle_theme=on_toggle_theme
          on_font_increase=on_font_increase
          on_font_decrease=on_font_decrease
        />
      </header>

      <ChapterNav
        chapters=chapters
        active=Signal::derive(move || state.with(|s| s.active_file().map(str::to_string)))
        on_select=on_select
      />

      <div class="layout">
        <aside class="sidebar">
          <SearchBox query=query searching=searching on_input=on_input on_clear=on_clear />
          <h2 id="sidebar-title">{move || state.with(ReaderState::sidebar_title)}</h2>
          <p id="sidebar-subtitle" class:search-summary=move || searching.get()>
            {move || state.with(ReaderState::sidebar_subtitle)}
          </p>
          <Show
            when=move || searching.get()
            fallback=move || {
              view! {
                <ChapterOutline
                  toc=Signal::derive(move || state.with(|s| s.toc().clone()))
                  show_controls=Signal::derive(move || state.with(ReaderState::nav_controls_visible))
                  on_toggle=Callback::new(move |index: usize| state.update(|s| s.toggle_section(index)))
                  on_expand_all=Callback::new(move |()| state.update(ReaderState::expand_all))
                  on_collapse_all=Callback::new(move |()| state.update(ReaderState::collapse_all))
                />
              }
            }
          >
            <SearchResults outcome=outcome on_open=on_open />
          </Show>
        </aside>

        <main
          id=CONTENT_AREA_ID
          style:font-size=move || state.with(|s| s.prefs().font_size.to_css())
          inner_html=move || content.get()
          on:scroll=move |ev| {
            let pane = event_target::<web_sys::HtmlElement>(&ev);
            scrolled.set(pane.scroll_top() > BACK_TO_TOP_THRESHOLD);
          }
        ></main>
      </div>

      <HighlightNav
        visible=Signal::derive(move || searching.get() && highlights.with(|h| !h.is_empty()))
        counter=Signal::derive(move || highlights.with(|h| h.counter()))
        can_prev=Signal::derive(move || highlights.with(|h| h.can_prev()))
        can_next=Signal::derive(move || highlights.with(|h| h.can_next()))
        on_prev=on_prev
        on_next=on_next
      />
      <BackToTop visible=scrolled.into() on_click=Callback::new(move |()| scroll_content_to_top()) />
    }
}

/// Swap in a rendered chapter, then scroll once the markup is in the page.
fn show_chapter(content: RwSignal<String>, view: ChapterView) {
    let ChapterView {
        html,
        scroll,
        highlight,
    } = view;
    content.set(html);
    request_animation_frame(move || {
        if let Some(target) = &scroll {
            apply_scroll(target);
        }
        if let Some(id) = &highlight {
            focus_highlight(id);
        }
    });
}
