//! Search command - queries a built index from the terminal

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr, eyre};
use folio_core::SearchIndex;
use folio_reader::{SearchOutcome, SearchQuery, search};

use crate::load_config;

/// Run the search command.
///
/// Prints matching articles in index order followed by the summary line, or the outcome
/// as JSON.
pub fn run(config_path: &Path, root: &Path, query: &str, json: bool) -> Result<SearchOutcome> {
    let config = load_config(config_path)?;
    let index_path = config.index_path(root);
    let index = SearchIndex::read_from_file(&index_path)
        .wrap_err_with(|| format!("Failed to read search index {}", index_path.display()))?;

    let Some(parsed) = SearchQuery::parse(query, config.search.min_query_len)? else {
        return Err(eyre!(
            "Query must be at least {} characters",
            config.search.min_query_len
        ));
    };

    let outcome = search(&index, &parsed);
    tracing::info!(query, articles = outcome.articles_matched(), "Search completed");

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(outcome);
    }

    println!();
    if outcome.is_empty() {
        println!("  No results found.");
    }
    for hit in &outcome.hits {
        println!("  [{}] {} ({} occurrences in this article)", hit.year, hit.heading, hit.hits);
    }
    println!();
    println!("  {}", outcome.summary());
    println!();

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_index(root: &Path) {
        let mut index = SearchIndex::new();
        index.push("1990", "a.html", "Intro".into(), "Hello world ");
        index.push("1991", "b.html", "Two".into(), "Hello again, hello ");
        index.write_to_file(&root.join("search-index.json")).unwrap();
    }

    #[test]
    fn test_search_index_on_disk() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_index(dir.path());

        let outcome = run(&dir.path().join("folio.toml"), dir.path(), "hello", false).unwrap();
        assert_eq!(outcome.total_occurrences, 3);
        assert_eq!(outcome.years_matched, 2);
    }

    #[test]
    fn test_short_query_is_rejected() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_index(dir.path());

        assert!(run(&dir.path().join("folio.toml"), dir.path(), "h", false).is_err());
    }

    #[test]
    fn test_missing_index() {
        let dir = tempfile::tempdir().expect("create temp dir");
        assert!(run(&dir.path().join("folio.toml"), dir.path(), "hello", true).is_err());
    }
}
