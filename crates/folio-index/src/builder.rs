//! Index build orchestration.
//!
//! Reads the manifest, segments every chapter and numbers the resulting articles in
//! manifest order.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use folio_core::{ChapterEntry, ChapterManifest, Config, SearchIndex};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    Result,
    manifest::load_manifest,
    segment::{ArticleSegmenter, Segment},
};

/// Outcome of indexing one chapter file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterStats {
    /// Chapter file name.
    pub file: String,

    /// Number of articles emitted for the chapter.
    pub articles: usize,

    /// Whether the chapter file was missing and skipped.
    pub missing: bool,
}

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Per-chapter results, in manifest order.
    pub chapters: Vec<ChapterStats>,

    /// Path of the written index, if it was written.
    pub output: Option<PathBuf>,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

impl BuildStats {
    /// Total number of articles across all chapters.
    pub fn total_articles(&self) -> usize {
        self.chapters.iter().map(|c| c.articles).sum()
    }

    /// Number of chapters skipped because their file was missing.
    pub fn missing_chapters(&self) -> usize {
        self.chapters.iter().filter(|c| c.missing).count()
    }
}

/// Builds the search index of a site.
#[derive(Debug)]
pub struct IndexBuilder {
    config: Config,
    root: PathBuf,
}

impl IndexBuilder {
    /// Create a new builder for the site rooted at `root`.
    #[must_use]
    pub fn new(config: Config, root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            root: root.into(),
        }
    }

    /// Site root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read the manifest and index every chapter.
    pub fn build(&self) -> Result<(SearchIndex, BuildStats)> {
        let manifest_path = self.config.manifest_path(&self.root);
        let manifest = load_manifest(&manifest_path, &self.config.manifest)?;
        Ok(self.build_from_manifest(&manifest))
    }

    /// Index every chapter of an already loaded manifest.
    pub fn build_from_manifest(&self, manifest: &ChapterManifest) -> (SearchIndex, BuildStats) {
        let start = Instant::now();

        // Chapters are parsed in parallel; numbering below stays in manifest order.
        let chapters: Vec<_> = manifest
            .entries()
            .par_iter()
            .map(|entry| (entry, self.segment_chapter(entry)))
            .collect();

        let mut index = SearchIndex::new();
        let mut stats = BuildStats::default();

        for (entry, segments) in chapters {
            let Some(segments) = segments else {
                stats.chapters.push(ChapterStats {
                    file: entry.file.clone(),
                    articles: 0,
                    missing: true,
                });
                continue;
            };

            for segment in &segments {
                index.push(&entry.name, &entry.file, segment.heading.clone(), &segment.text);
            }

            info!(file = %entry.file, articles = segments.len(), "indexed chapter");
            stats.chapters.push(ChapterStats {
                file: entry.file.clone(),
                articles: segments.len(),
                missing: false,
            });
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        (index, stats)
    }

    /// Build the index and write it to the configured index file.
    ///
    /// Nothing is written when the manifest cannot be loaded.
    pub fn build_and_write(&self) -> Result<BuildStats> {
        let (index, mut stats) = self.build()?;
        let output = self.config.index_path(&self.root);

        index.write_to_file(&output)?;

        info!(
            path = %output.display(),
            articles = index.len(),
            chapters = stats.chapters.len(),
            missing = stats.missing_chapters(),
            "wrote search index"
        );
        stats.output = Some(output);
        Ok(stats)
    }

    /// Segment one chapter, or `None` when its file is missing.
    fn segment_chapter(&self, entry: &ChapterEntry) -> Option<Vec<Segment>> {
        let path = self.config.chapter_path(&self.root, &entry.file);
        let html = match fs::read_to_string(&path) {
            Ok(html) => html,
            Err(e) => {
                warn!(file = %entry.file, path = %path.display(), error = %e, "chapter not found, skipping");
                return None;
            }
        };

        debug!(file = %entry.file, bytes = html.len(), "reading chapter");
        Some(ArticleSegmenter::new(&entry.name).segment(&html))
    }
}
