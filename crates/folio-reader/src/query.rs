//! Search query engine over the prebuilt article index.
//!
//! The query is a case-insensitive regular expression, used as typed. Each article
//! scores the number of matches in its body text plus its heading, counted the way a
//! global JavaScript `match` counts them: empty matches included.

use std::collections::HashSet;

use folio_core::{ArticleRecord, SearchIndex};
use regex::{Match, Regex, RegexBuilder};
use serde::Serialize;

use crate::{ReaderError, Result};

/// A compiled search query.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    raw: String,
    regex: Regex,
}

impl SearchQuery {
    /// Compile a query.
    ///
    /// Returns `Ok(None)` for queries shorter than `min_len` characters, which never
    /// search, and an error when the query is not a valid pattern.
    pub fn parse(raw: &str, min_len: usize) -> Result<Option<Self>> {
        if raw.chars().count() < min_len {
            return Ok(None);
        }

        let regex = RegexBuilder::new(raw)
            .case_insensitive(true)
            .build()
            .map_err(|e| ReaderError::Pattern {
                query: raw.to_string(),
                message: e.to_string(),
            })?;

        Ok(Some(Self {
            raw: raw.to_string(),
            regex,
        }))
    }

    /// The query as typed.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The compiled pattern.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Number of matches in `haystack`.
    pub fn count(&self, haystack: &str) -> usize {
        find_all(&self.regex, haystack).count()
    }

    /// Hit count of one article: body matches plus heading matches.
    pub fn hits(&self, article: &ArticleRecord) -> usize {
        self.count(&article.text) + self.count(&article.heading)
    }
}

/// All matches of `regex` in `haystack`, resuming each search where the last match
/// ended.
///
/// An empty match moves the next search one character forward, so an empty match is
/// also reported right after a non-empty one. `Regex::find_iter` skips those.
pub(crate) fn find_all<'a>(
    regex: &'a Regex,
    haystack: &'a str,
) -> impl Iterator<Item = Match<'a>> + 'a {
    let mut next = Some(0);
    std::iter::from_fn(move || {
        let found = regex.find_at(haystack, next?)?;
        next = if found.is_empty() {
            haystack[found.end()..]
                .chars()
                .next()
                .map(|c| found.end() + c.len_utf8())
        } else {
            Some(found.end())
        };
        Some(found)
    })
}

/// One matching article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: usize,
    pub year: String,
    pub file: String,
    pub heading: String,
    pub hits: usize,
}

/// Matching articles in index order, with aggregates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub query: String,
    pub hits: Vec<SearchHit>,
    pub total_occurrences: usize,
    pub years_matched: usize,
}

impl SearchOutcome {
    /// Number of articles with at least one hit.
    pub fn articles_matched(&self) -> usize {
        self.hits.len()
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Human-readable summary line.
    pub fn summary(&self) -> String {
        format!(
            "Found {} occurrences in {} articles ({} years)",
            self.total_occurrences,
            self.articles_matched(),
            self.years_matched
        )
    }

    /// Hit for an article id.
    pub fn get(&self, id: usize) -> Option<&SearchHit> {
        self.hits.iter().find(|h| h.id == id)
    }
}

/// Run a query over the whole index.
pub fn search(index: &SearchIndex, query: &SearchQuery) -> SearchOutcome {
    let mut years = HashSet::new();
    let mut outcome = SearchOutcome {
        query: query.as_str().to_string(),
        ..SearchOutcome::default()
    };

    for article in index.articles() {
        let hits = query.hits(article);
        if hits == 0 {
            continue;
        }

        years.insert(article.year.as_str());
        outcome.total_occurrences += hits;
        outcome.hits.push(SearchHit {
            id: article.id,
            year: article.year.clone(),
            file: article.file.clone(),
            heading: article.heading.clone(),
            hits,
        });
    }

    outcome.years_matched = years.len();
    log::debug!(
        "query '{}' matched {} articles",
        outcome.query,
        outcome.articles_matched()
    );
    outcome
}
