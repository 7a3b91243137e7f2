//! Application state of the reader.
//!
//! All UI state lives in one [`ReaderState`] owned by the UI thread. Event handlers call
//! into it and render what it reports; fetching is left to the caller, which gets a
//! [`ChapterRequest`] back whenever a chapter has to be loaded.

use folio_core::{ChapterManifest, SearchIndex, config::SearchConfig};
use log::{debug, info, warn};

use crate::{
    ReaderError,
    highlight::{HighlightNavigator, highlight_matches},
    prefs::{Preferences, Theme},
    query::{SearchOutcome, SearchQuery, search},
    render::{ChapterRenderer, ScrollTarget},
    toc::TableOfContents,
};

/// Sidebar subtitle outside search mode.
pub const BROWSE_SUBTITLE: &str = "Quick navigation (current chapter)";

/// Sidebar subtitle when the search index could not be loaded.
pub const INDEX_ERROR_SUBTITLE: &str = "Error loading search";

/// Content shown while a chapter is being fetched.
pub const LOADING_CONTENT: &str = "<h2>Loading content...</h2>";

/// Content shown when a chapter could not be fetched.
pub const CHAPTER_ERROR_CONTENT: &str = "<h2>Error:</h2><p>The file could not be loaded.</p>";

/// Loading state of the search index.
#[derive(Debug, Clone, Default)]
pub enum IndexStatus {
    #[default]
    Loading,
    Ready(SearchIndex),
    Failed(String),
}

/// Whether the sidebar shows the chapter outline or search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderMode {
    Browse,
    Search,
}

/// Why a chapter is being loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOrigin {
    /// Plain navigation; the outline is rebuilt.
    Browse,
    /// A search result was opened; matches are highlighted.
    SearchResult { heading: String },
}

/// A chapter the UI has to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterRequest {
    pub file: String,
    pub origin: LoadOrigin,
}

impl ChapterRequest {
    fn browse(file: &str) -> Self {
        Self {
            file: file.to_string(),
            origin: LoadOrigin::Browse,
        }
    }
}

/// A rendered chapter for the content pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterView {
    pub html: String,
    /// `None` when the target article was not found.
    pub scroll: Option<ScrollTarget>,
    /// Active highlight marker to bring into view.
    pub highlight: Option<String>,
}

/// Result of typing into the search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryAction {
    /// Too short to search; the view is unchanged.
    Ignored,
    /// Results were updated.
    Searched,
    /// Search mode ended; the active chapter is reloaded.
    Reset(Option<ChapterRequest>),
    /// The query is not a valid pattern; the view is unchanged.
    Invalid(String),
}

#[derive(Debug, Clone)]
struct SearchSession {
    query: SearchQuery,
    outcome: SearchOutcome,
}

/// State of one reader session.
#[derive(Debug, Clone)]
pub struct ReaderState {
    manifest: ChapterManifest,
    index: IndexStatus,
    active_file: Option<String>,
    search: Option<SearchSession>,
    toc: TableOfContents,
    highlights: HighlightNavigator,
    prefs: Preferences,
    min_query_len: usize,
}

impl ReaderState {
    /// Create the state for a manifest and the stored preferences.
    pub fn new(manifest: ChapterManifest, prefs: Preferences) -> Self {
        Self {
            manifest,
            index: IndexStatus::Loading,
            active_file: None,
            search: None,
            toc: TableOfContents::default(),
            highlights: HighlightNavigator::default(),
            prefs,
            min_query_len: SearchConfig::default().min_query_len,
        }
    }

    /// Override the minimum query length.
    #[must_use]
    pub fn with_min_query_len(mut self, min_query_len: usize) -> Self {
        self.min_query_len = min_query_len;
        self
    }

    /// Activate the first chapter. `None` when the manifest is empty.
    pub fn start(&mut self) -> Option<ChapterRequest> {
        let first = self.manifest.first()?.file.clone();
        let request = ChapterRequest::browse(&first);
        self.active_file = Some(first);
        Some(request)
    }

    pub fn manifest(&self) -> &ChapterManifest {
        &self.manifest
    }

    pub fn index_status(&self) -> &IndexStatus {
        &self.index
    }

    pub fn set_index(&mut self, index: SearchIndex) {
        info!("search index loaded with {} articles", index.len());
        self.index = IndexStatus::Ready(index);
    }

    pub fn index_failed(&mut self, err: &ReaderError) {
        warn!("search index unavailable: {err}");
        self.index = IndexStatus::Failed(err.to_string());
    }

    pub fn mode(&self) -> ReaderMode {
        if self.search.is_some() {
            ReaderMode::Search
        } else {
            ReaderMode::Browse
        }
    }

    pub fn is_searching(&self) -> bool {
        self.search.is_some()
    }

    pub fn active_file(&self) -> Option<&str> {
        self.active_file.as_deref()
    }

    /// Display name of the active chapter.
    pub fn active_title(&self) -> &str {
        self.manifest
            .display_name(self.active_file.as_deref().unwrap_or_default())
    }

    /// Switch to a chapter from the navigation, leaving search mode.
    ///
    /// Files outside the manifest do not change the active chapter; the active chapter
    /// is reloaded instead.
    pub fn select_chapter(&mut self, file: &str) -> Option<ChapterRequest> {
        if self.manifest.get(file).is_some() {
            self.active_file = Some(file.to_string());
        } else {
            debug!("ignoring unknown chapter '{file}'");
        }
        self.clear_search()
    }

    /// Handle a change of the search box.
    pub fn input_query(&mut self, raw: &str) -> QueryAction {
        let len = raw.chars().count();
        if len == 0 {
            if self.is_searching() {
                return QueryAction::Reset(self.clear_search());
            }
            return QueryAction::Ignored;
        }

        let query = match SearchQuery::parse(raw, self.min_query_len) {
            Ok(Some(query)) => query,
            Ok(None) => return QueryAction::Ignored,
            Err(err) => {
                warn!("{err}");
                return QueryAction::Invalid(err.to_string());
            }
        };

        let outcome = match &self.index {
            IndexStatus::Ready(index) => search(index, &query),
            _ => {
                debug!("search index not available, searching nothing");
                search(&SearchIndex::default(), &query)
            }
        };
        info!("{}", outcome.summary());

        self.search = Some(SearchSession { query, outcome });
        QueryAction::Searched
    }

    /// Leave search mode and reload the active chapter.
    pub fn clear_search(&mut self) -> Option<ChapterRequest> {
        self.search = None;
        self.highlights.clear();
        self.active_file.as_deref().map(ChapterRequest::browse)
    }

    /// The current query as typed.
    pub fn query(&self) -> Option<&str> {
        self.search.as_ref().map(|s| s.query.as_str())
    }

    pub fn search_outcome(&self) -> Option<&SearchOutcome> {
        self.search.as_ref().map(|s| &s.outcome)
    }

    /// Open a search result by article id.
    pub fn open_result(&mut self, id: usize) -> Option<ChapterRequest> {
        let hit = self.search_outcome()?.get(id)?.clone();
        if self.manifest.get(&hit.file).is_some() {
            self.active_file = Some(hit.file.clone());
        }
        self.highlights.clear();
        Some(ChapterRequest {
            file: hit.file,
            origin: LoadOrigin::SearchResult {
                heading: hit.heading,
            },
        })
    }

    /// Render a fetched chapter.
    ///
    /// Search-result loads highlight the current query and start the navigator at the
    /// target article. Other loads rebuild the outline and drop highlights.
    pub fn chapter_loaded(&mut self, request: &ChapterRequest, html: &str) -> ChapterView {
        let mut rendered = ChapterRenderer::render(html);

        let (LoadOrigin::SearchResult { heading }, Some(session)) = (&request.origin, &self.search)
        else {
            self.toc = rendered.toc();
            self.highlights.clear();
            return ChapterView {
                html: rendered.to_html(),
                scroll: Some(ScrollTarget::Top),
                highlight: None,
            };
        };

        let target = rendered.find_target(heading);
        let markers = highlight_matches(rendered.document_mut(), session.query.regex());
        debug!("highlighted {} matches in {}", markers.len(), request.file);
        self.highlights = HighlightNavigator::new(rendered.document(), markers, target);

        ChapterView {
            html: rendered.to_html(),
            scroll: target.map(|t| rendered.scroll_target(t)),
            highlight: self.highlights.current_id().map(str::to_string),
        }
    }

    /// Record a failed chapter fetch and return the content to show instead.
    pub fn chapter_failed(&mut self, request: &ChapterRequest, err: &ReaderError) -> &'static str {
        warn!("failed to load chapter {}: {err}", request.file);
        self.highlights.clear();
        CHAPTER_ERROR_CONTENT
    }

    pub fn toc(&self) -> &TableOfContents {
        &self.toc
    }

    pub fn toggle_section(&mut self, index: usize) {
        self.toc.toggle(index);
    }

    pub fn expand_all(&mut self) {
        self.toc.expand_all();
    }

    pub fn collapse_all(&mut self) {
        self.toc.collapse_all();
    }

    /// Expand/collapse-all controls are hidden while searching.
    pub fn nav_controls_visible(&self) -> bool {
        !self.is_searching()
    }

    pub fn highlights(&self) -> &HighlightNavigator {
        &self.highlights
    }

    /// Step to the next marker. Returns its id when the position moved.
    pub fn next_highlight(&mut self) -> Option<&str> {
        if self.highlights.next() {
            self.highlights.current_id()
        } else {
            None
        }
    }

    /// Step to the previous marker. Returns its id when the position moved.
    pub fn prev_highlight(&mut self) -> Option<&str> {
        if self.highlights.prev() {
            self.highlights.current_id()
        } else {
            None
        }
    }

    pub fn prefs(&self) -> Preferences {
        self.prefs
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.prefs.theme = self.prefs.theme.toggled();
        self.prefs.theme
    }

    pub fn increase_font(&mut self) -> Preferences {
        self.prefs.font_size = self.prefs.font_size.increased();
        self.prefs
    }

    pub fn decrease_font(&mut self) -> Preferences {
        self.prefs.font_size = self.prefs.font_size.decreased();
        self.prefs
    }

    /// Sidebar heading: the query in search mode, the chapter name otherwise.
    pub fn sidebar_title(&self) -> String {
        match self.query() {
            Some(query) => format!("Search: '{query}'"),
            None => self.active_title().to_string(),
        }
    }

    /// Sidebar subtitle: the search summary, an index error, or the navigation hint.
    pub fn sidebar_subtitle(&self) -> String {
        if let Some(outcome) = self.search_outcome() {
            return outcome.summary();
        }
        match self.index {
            IndexStatus::Failed(_) => INDEX_ERROR_SUBTITLE.to_string(),
            _ => BROWSE_SUBTITLE.to_string(),
        }
    }
}
