//! Build command - writes the search index of a site

use std::{path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use folio_index::{BuildStats, IndexBuilder};

use crate::load_config;

/// Run the build command.
///
/// Reads the chapter manifest and chapters under `root` and writes the index there.
pub fn run(config_path: &Path, root: &Path) -> Result<BuildStats> {
    let start = Instant::now();
    tracing::info!(?config_path, ?root, "Starting index build");

    let config = load_config(config_path)?;
    tracing::debug!(?config, "Loaded configuration");

    let stats = IndexBuilder::new(config, root)
        .build_and_write()
        .wrap_err("Index build failed")?;

    let duration = start.elapsed();
    print_stats(&stats);
    println!("  Duration:   {:.2}s", duration.as_secs_f64());
    println!();

    tracing::info!(articles = stats.total_articles(), ?duration, "Build completed successfully");
    Ok(stats)
}

fn print_stats(stats: &BuildStats) {
    println!();
    for chapter in &stats.chapters {
        if chapter.missing {
            println!("  ⚠ {:<24} missing, skipped", chapter.file);
        } else {
            println!("  {:<26} {} articles", chapter.file, chapter.articles);
        }
    }
    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Articles:   {}", stats.total_articles());
    if let Some(output) = &stats.output {
        println!("  Output:     {}", output.display());
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_build_writes_index() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(
            dir.path().join("index.html"),
            r#"<button class="part-button" data-file="part1.html">1990</button>"#,
        )
        .unwrap();
        fs::write(dir.path().join("part1.html"), "<h1>Intro</h1><p>Hello</p>").unwrap();

        let stats = run(&dir.path().join("folio.toml"), dir.path()).unwrap();

        assert_eq!(stats.total_articles(), 1);
        assert!(dir.path().join("search-index.json").exists());
    }

    #[test]
    fn test_build_without_manifest_fails() {
        let dir = tempfile::tempdir().expect("create temp dir");
        assert!(run(&dir.path().join("folio.toml"), dir.path()).is_err());
        assert!(!dir.path().join("search-index.json").exists());
    }
}
