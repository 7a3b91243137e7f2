//! Chapter manifest extraction from the hosting page.

use std::{fs, path::Path};

use folio_core::{ChapterEntry, ChapterManifest, config::ManifestConfig};
use scraper::{Html, Selector};
use tracing::{debug, info};

use crate::{IndexError, Result};

/// Extract the chapter manifest from the hosting page markup.
///
/// Every element matching the configured selector that carries the file attribute and
/// a non-blank label becomes one chapter, in document order. `source` only names the
/// page in error messages.
pub fn extract_manifest(
    html: &str,
    config: &ManifestConfig,
    source: &Path,
) -> Result<ChapterManifest> {
    let selector = Selector::parse(&config.selector).map_err(|e| IndexError::Selector {
        selector: config.selector.clone(),
        message: e.to_string(),
    })?;

    let document = Html::parse_document(html);
    let entries = document.select(&selector).filter_map(|button| {
        let file = button.value().attr(&config.file_attribute)?.trim();
        let name = button.text().collect::<String>();
        let name = name.trim();
        if file.is_empty() || name.is_empty() {
            debug!(file, name, "skipping incomplete chapter button");
            return None;
        }
        Some(ChapterEntry::new(file, name))
    });

    let manifest = ChapterManifest::new(entries);
    if manifest.is_empty() {
        return Err(IndexError::manifest(
            source,
            format!(
                "no '{}' elements with '{}' found",
                config.selector, config.file_attribute
            ),
        ));
    }

    Ok(manifest)
}

/// Read the hosting page and extract its chapter manifest.
pub fn load_manifest(path: &Path, config: &ManifestConfig) -> Result<ChapterManifest> {
    if !path.exists() {
        return Err(IndexError::manifest(path, "file not found"));
    }

    let html = fs::read_to_string(path)
        .map_err(|e| IndexError::manifest(path, format!("failed to read: {e}")))?;
    let manifest = extract_manifest(&html, config, path)?;

    info!(
        path = %path.display(),
        chapters = manifest.len(),
        "found chapter manifest"
    );
    Ok(manifest)
}
