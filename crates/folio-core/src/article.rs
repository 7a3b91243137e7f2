//! Article records and the search index file format.
//!
//! The index is a plain JSON array of records, ordered by chapter (manifest order)
//! and then by position inside the chapter.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Heading prefix for content that precedes the first main heading of a chapter.
pub const OPENING_ARTICLE_PREFIX: &str = "(opening article";

/// Heading used when a main heading element has no text.
pub const EMPTY_HEADING: &str = "(empty heading)";

/// One article of one chapter, as stored in the search index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Dense sequence number across the whole index.
    pub id: usize,

    /// Display name of the owning chapter.
    pub year: String,

    /// File name of the owning chapter.
    pub file: String,

    /// Heading text, or one of the placeholder headings.
    pub heading: String,

    /// Lower-cased, space-joined text of the article body.
    pub text: String,
}

impl ArticleRecord {
    /// Heading for the article that opens a chapter before its first main heading.
    pub fn opening_heading(year: &str) -> String {
        format!("{OPENING_ARTICLE_PREFIX} - {year})")
    }

    /// Whether this record is the synthetic opening article of its chapter.
    pub fn is_opening(&self) -> bool {
        self.heading.starts_with(OPENING_ARTICLE_PREFIX)
    }
}

/// The full ordered list of article records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchIndex {
    articles: Vec<ArticleRecord>,
}

impl SearchIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, assigning it the next id.
    pub fn push(&mut self, year: &str, file: &str, heading: String, text: &str) -> usize {
        let id = self.articles.len();
        self.articles.push(ArticleRecord {
            id,
            year: year.to_string(),
            file: file.to_string(),
            heading,
            text: text.to_lowercase(),
        });
        id
    }

    /// All records in index order.
    pub fn articles(&self) -> &[ArticleRecord] {
        &self.articles
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Whether the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Serialize the index to compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize an index from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CoreError::index(e.to_string()))
    }

    /// Write the index to a file.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Read an index from a file.
    pub fn read_from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl From<Vec<ArticleRecord>> for SearchIndex {
    fn from(articles: Vec<ArticleRecord>) -> Self {
        Self { articles }
    }
}
