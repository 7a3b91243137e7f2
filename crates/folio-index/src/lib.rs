//! Folio Index Library
//!
//! Offline build step that turns the chapter files of a Folio site into the JSON
//! search index consumed by the reader.
//!
//! # Pipeline
//!
//! - **Manifest**: chapter buttons are read from the hosting page
//! - **Segmentation**: each chapter is split into articles at its main headings
//! - **Build**: articles are numbered across all chapters and written as one JSON array
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use folio_core::Config;
//! use folio_index::IndexBuilder;
//!
//! let builder = IndexBuilder::new(Config::default(), Path::new("."));
//! let stats = builder.build_and_write().unwrap();
//! println!("{} articles", stats.total_articles());
//! ```

pub mod builder;
pub mod manifest;
pub mod segment;

use std::path::PathBuf;

pub use builder::{BuildStats, ChapterStats, IndexBuilder};
use folio_core::CoreError;
pub use manifest::{extract_manifest, load_manifest};
pub use segment::{ArticleSegmenter, Segment};
use thiserror::Error;

/// Index build errors. All of them abort the build.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The hosting page could not be read or declares no chapters.
    #[error("manifest error in {path}: {message}")]
    Manifest { path: PathBuf, message: String },

    /// The configured chapter selector is not valid CSS.
    #[error("invalid manifest selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Core error, including index serialization.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl IndexError {
    /// Create a new manifest error.
    pub fn manifest(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Manifest {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for index operations.
pub type Result<T> = std::result::Result<T, IndexError>;
