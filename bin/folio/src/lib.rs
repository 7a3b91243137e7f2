//! Folio CLI Library
//!
//! Command implementations behind the `folio` binary: building the search index of a
//! site, querying a built index from the terminal, and serving a site for preview.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, search, serve)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use folio::cmd;
//!
//! // Build the search index of the site in the current directory
//! cmd::build::run(Path::new("folio.toml"), Path::new(".")).unwrap();
//! ```

pub mod cmd;

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
// Re-export core types for convenience
pub use folio_core::{Config, SearchIndex};
pub use folio_index::{BuildStats, IndexBuilder};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level(verbose).into()))
        .init();
}

fn level(verbose: u8) -> tracing::Level {
    match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

/// Load the configuration, layering `FOLIO__*` environment variables.
///
/// A missing file means defaults.
pub fn load_config(config_path: &Path) -> Result<Config> {
    if !config_path.exists() {
        tracing::debug!(?config_path, "no config file, using defaults");
    }
    Config::load_with_env(config_path).wrap_err("Failed to load configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level(0), tracing::Level::WARN);
        assert_eq!(level(1), tracing::Level::INFO);
        assert_eq!(level(2), tracing::Level::DEBUG);
        assert_eq!(level(7), tracing::Level::TRACE);
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = load_config(&dir.path().join("folio.toml")).unwrap();
        assert_eq!(config.site.index_file, "search-index.json");
    }
}
