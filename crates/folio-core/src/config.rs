//! Site configuration management.
//!
//! All settings have defaults, so a site without a `folio.toml` builds the index
//! from `index.html` in the working directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for Folio.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Site layout settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// Chapter manifest markup settings.
    #[serde(default)]
    pub manifest: ManifestConfig,

    /// Search settings.
    #[serde(default)]
    pub search: SearchConfig,
}

/// Site layout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Hosting page that declares the chapter buttons.
    #[serde(default = "default_manifest_file")]
    pub manifest_file: String,

    /// Name of the generated search index.
    #[serde(default = "default_index_file")]
    pub index_file: String,
}

/// How chapter buttons are found in the hosting page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestConfig {
    /// CSS selector matching one button per chapter.
    #[serde(default = "default_selector")]
    pub selector: String,

    /// Attribute carrying the chapter file name.
    #[serde(default = "default_file_attribute")]
    pub file_attribute: String,
}

/// Search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Queries shorter than this (in characters) never search.
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
}

fn default_manifest_file() -> String {
    "index.html".to_string()
}

fn default_index_file() -> String {
    "search-index.json".to_string()
}

fn default_selector() -> String {
    ".part-button".to_string()
}

fn default_file_attribute() -> String {
    "data-file".to_string()
}

fn default_min_query_len() -> usize {
    2
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            manifest_file: default_manifest_file(),
            index_file: default_index_file(),
        }
    }
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            selector: default_selector(),
            file_attribute: default_file_attribute(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_len: default_min_query_len(),
        }
    }
}

impl Config {
    /// Load configuration using the config crate, layering `FOLIO__*` environment
    /// variables over the file. A missing file leaves every setting at its default.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
            .build()
            .map_err(|e| {
                CoreError::config_with_source(
                    format!("Failed to load config file: {}", path.display()),
                    e,
                )
            })?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.manifest_file.trim().is_empty() {
            return Err(CoreError::config("site.manifest_file cannot be empty"));
        }

        if self.site.index_file.trim().is_empty() {
            return Err(CoreError::config("site.index_file cannot be empty"));
        }

        if self.manifest.selector.trim().is_empty() {
            return Err(CoreError::config("manifest.selector cannot be empty"));
        }

        if self.manifest.file_attribute.trim().is_empty() {
            return Err(CoreError::config("manifest.file_attribute cannot be empty"));
        }

        if self.search.min_query_len == 0 {
            return Err(CoreError::config("search.min_query_len must be at least 1"));
        }

        if !self.site.index_file.ends_with(".json") {
            tracing::warn!(
                index_file = %self.site.index_file,
                "site.index_file does not end in .json"
            );
        }

        Ok(())
    }

    /// Path of the hosting page under `root`.
    pub fn manifest_path(&self, root: &Path) -> PathBuf {
        root.join(&self.site.manifest_file)
    }

    /// Path of the search index under `root`.
    pub fn index_path(&self, root: &Path) -> PathBuf {
        root.join(&self.site.index_file)
    }

    /// Path of a chapter file under `root`.
    ///
    /// Chapter files are named relative to the site root, the same URL the reader
    /// fetches them from.
    pub fn chapter_path(&self, root: &Path, file: &str) -> PathBuf {
        root.join(file)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn create_test_config() -> String {
        r#"
[site]
manifest_file = "reader.html"
index_file = "articles.json"

[manifest]
selector = "button.chapter"
file_attribute = "data-src"

[search]
min_query_len = 3
"#
        .to_string()
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("folio.toml");
        let mut file = std::fs::File::create(&config_path).expect("create file");
        file.write_all(create_test_config().as_bytes())
            .expect("write");

        let config = Config::load_with_env(&config_path).expect("load config");

        assert_eq!(config.site.manifest_file, "reader.html");
        assert_eq!(config.site.index_file, "articles.json");
        assert_eq!(config.manifest.selector, "button.chapter");
        assert_eq!(config.manifest.file_attribute, "data-src");
        assert_eq!(config.search.min_query_len, 3);
    }

    #[test]
    fn test_config_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("folio.toml");
        std::fs::write(&config_path, "").expect("write");

        let config = Config::load_with_env(&config_path).expect("load config");

        assert_eq!(config.site.manifest_file, "index.html");
        assert_eq!(config.site.index_file, "search-index.json");
        assert_eq!(config.manifest.selector, ".part-button");
        assert_eq!(config.manifest.file_attribute, "data-file");
        assert_eq!(config.search.min_query_len, 2);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = Config::load_with_env(&dir.path().join("folio.toml")).expect("defaults");
        assert_eq!(config.site.index_file, "search-index.json");
    }

    #[test]
    fn test_paths() {
        let config = Config::default();
        let root = Path::new("/site");
        assert_eq!(config.manifest_path(root), Path::new("/site/index.html"));
        assert_eq!(config.index_path(root), Path::new("/site/search-index.json"));
        assert_eq!(
            config.chapter_path(root, "chapters/part1.html"),
            Path::new("/site/chapters/part1.html")
        );
    }

    #[test]
    fn test_config_validation_zero_query_len() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("folio.toml");
        std::fs::write(&config_path, "[search]\nmin_query_len = 0\n").expect("write");

        let result = Config::load_with_env(&config_path);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("min_query_len must be at least 1")
        );
    }

    #[test]
    fn test_malformed_config_names_the_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("folio.toml");
        std::fs::write(&config_path, "[site\nindex_file = ").expect("write");

        let err = Config::load_with_env(&config_path).unwrap_err();
        assert!(matches!(err, CoreError::Config { .. }));
        assert!(err.to_string().contains("folio.toml"));
    }
}
