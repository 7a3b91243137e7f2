//! Chapter manifest model.
//!
//! The hosting page lists one button per chapter; each button names a chapter file
//! and carries the label shown in chapter navigation.

use serde::{Deserialize, Serialize};

/// Label used when a file is not part of the manifest.
pub const FALLBACK_TITLE: &str = "Content";

/// One chapter declared by the hosting page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterEntry {
    /// Chapter file name, relative to the site root.
    pub file: String,

    /// Display label, also used as the article `year`.
    pub name: String,
}

impl ChapterEntry {
    /// Create a new entry.
    pub fn new(file: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            name: name.into(),
        }
    }
}

/// Ordered list of chapters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterManifest {
    entries: Vec<ChapterEntry>,
}

impl ChapterManifest {
    /// Create a manifest from entries in declaration order.
    ///
    /// Entries with an empty file name or label are skipped, and a file declared twice
    /// keeps its first position and its last label.
    pub fn new(entries: impl IntoIterator<Item = ChapterEntry>) -> Self {
        let mut manifest = Self::default();
        for entry in entries {
            manifest.insert(entry);
        }
        manifest
    }

    fn insert(&mut self, entry: ChapterEntry) {
        if entry.file.is_empty() || entry.name.is_empty() {
            return;
        }
        match self.entries.iter_mut().find(|e| e.file == entry.file) {
            Some(existing) => existing.name = entry.name,
            None => self.entries.push(entry),
        }
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[ChapterEntry] {
        &self.entries
    }

    /// Number of chapters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest declares no chapters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First declared chapter, loaded at startup.
    pub fn first(&self) -> Option<&ChapterEntry> {
        self.entries.first()
    }

    /// Look up an entry by file name.
    pub fn get(&self, file: &str) -> Option<&ChapterEntry> {
        self.entries.iter().find(|e| e.file == file)
    }

    /// Display name for a chapter file, or the generic fallback title.
    pub fn display_name(&self, file: &str) -> &str {
        self.get(file).map_or(FALLBACK_TITLE, |e| e.name.as_str())
    }
}
