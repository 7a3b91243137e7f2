//! Fetching the search index and chapter files.

use folio_core::SearchIndex;
use folio_reader::{ReaderError, Result};
use gloo_net::http::Request;

/// Append a `v=<timestamp>` parameter so the index is never served from cache.
pub fn cache_busted(url: &str, timestamp_ms: f64) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}v={}", timestamp_ms as u64)
}

/// Fetch a static file as text.
pub async fn fetch_text(url: &str) -> Result<String> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| ReaderError::fetch(url, e))?;

    if !response.ok() {
        return Err(ReaderError::fetch(url, format!("HTTP {}", response.status())));
    }

    response.text().await.map_err(|e| ReaderError::fetch(url, e))
}

/// Fetch and parse the search index.
pub async fn fetch_index(url: &str) -> Result<SearchIndex> {
    let url = cache_busted(url, js_sys::Date::now());
    let json = fetch_text(&url).await?;
    Ok(SearchIndex::from_json(&json)?)
}

/// Fetch a chapter fragment by its file name.
pub async fn fetch_chapter(file: &str) -> Result<String> {
    fetch_text(file).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_busted() {
        assert_eq!(
            cache_busted("search-index.json", 1_700_000_000_123.0),
            "search-index.json?v=1700000000123"
        );
        assert_eq!(cache_busted("index.json?lang=he", 5.0), "index.json?lang=he&v=5");
    }
}
