//! Folio Core Library
//!
//! Shared data model, configuration, and error handling for the Folio article reader
//! and its offline index builder.

pub mod article;
pub mod config;
pub mod error;
pub mod manifest;
pub mod role;

pub use article::{ArticleRecord, EMPTY_HEADING, OPENING_ARTICLE_PREFIX, SearchIndex};
pub use config::Config;
pub use error::{CoreError, Result};
pub use manifest::{ChapterEntry, ChapterManifest};
pub use role::ElementRole;
