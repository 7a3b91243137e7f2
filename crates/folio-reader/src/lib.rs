//! Folio Reader Library
//!
//! Browser-independent core of the Folio article reader: the query engine over the
//! prebuilt search index, the chapter document tree, table-of-contents construction,
//! search highlighting, reader preferences and the application state that ties them
//! together.
//!
//! Nothing here touches the DOM; the UI crate feeds fetched markup and user events into
//! [`ReaderState`] and renders what it returns.

pub mod document;
pub mod highlight;
pub mod prefs;
pub mod query;
pub mod render;
pub mod state;
pub mod toc;

pub use document::{ChapterDocument, DomNode, ElementData};
pub use highlight::{ACTIVE_HIGHLIGHT_CLASS, HIGHLIGHT_CLASS, HighlightNavigator, highlight_matches};
pub use prefs::{FontSize, MemoryStore, PreferenceStore, Preferences, Theme};
pub use query::{SearchHit, SearchOutcome, SearchQuery, search};
pub use render::{ArticleTarget, ChapterRenderer, RenderedChapter, SEPARATOR_CLASS, ScrollTarget};
pub use state::{
    ChapterRequest, ChapterView, IndexStatus, LoadOrigin, QueryAction, ReaderMode, ReaderState,
};
use thiserror::Error;
pub use toc::{TableOfContents, TocItem, TocSection};

/// Reader errors. None of them are fatal; the reader stays interactive.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// The query is not a valid pattern.
    #[error("invalid search pattern '{query}': {message}")]
    Pattern { query: String, message: String },

    /// A static file could not be fetched.
    #[error("failed to fetch {url}: {status}")]
    Fetch { url: String, status: String },

    /// The search index could not be parsed.
    #[error("search index error: {0}")]
    Index(String),
}

impl ReaderError {
    /// Create a new fetch error.
    pub fn fetch(url: impl Into<String>, status: impl ToString) -> Self {
        Self::Fetch {
            url: url.into(),
            status: status.to_string(),
        }
    }
}

impl From<folio_core::CoreError> for ReaderError {
    fn from(err: folio_core::CoreError) -> Self {
        Self::Index(err.to_string())
    }
}

/// Result type for reader operations.
pub type Result<T> = std::result::Result<T, ReaderError>;
