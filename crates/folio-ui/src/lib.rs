//! Folio UI Components
//!
//! Leptos components for the Folio reader, plus the browser glue they need.
//!
//! # Components
//!
//! ## Search
//! - [`SearchBox`] - Query input with a clear button
//! - [`SearchResults`] - Matching articles with their hit counts
//! - [`SearchSummary`] - Header summary line
//!
//! ## Navigation
//! - [`ChapterNav`] - One button per chapter
//! - [`ChapterOutline`] - Collapsible table of contents
//! - [`HighlightNav`] - Step through highlighted matches
//! - [`BackToTop`] - Scroll the content pane back up
//!
//! ## Toolbar
//! - [`Toolbar`] - Theme toggle and font size

pub mod browser;
pub mod fetch;
pub mod navigation;
pub mod search;
pub mod toolbar;

pub use fetch::{cache_busted, fetch_chapter, fetch_index};
pub use navigation::{BackToTop, ChapterNav, ChapterOutline, HighlightNav};
pub use search::{SearchBox, SearchResults, SearchSummary};
pub use toolbar::Toolbar;
