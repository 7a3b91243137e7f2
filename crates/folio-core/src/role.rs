//! Element roles shared by the indexer and the reader.
//!
//! Chapter files come from word-processor exports, so headings appear either as
//! `h1`..`h6` tags or as elements carrying a legacy `MsoHeadingN` class.

/// Legacy class prefix for exported headings.
const LEGACY_HEADING_CLASS: &str = "MsoHeading";

/// What a chapter element means for segmentation and outlining.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole {
    /// Article boundary: `h1` or `MsoHeading1`.
    MainHeading,
    /// Sub-heading of level 2 to 6.
    Heading(u8),
    /// Body paragraph.
    Paragraph,
}

impl ElementRole {
    /// Classify an element from its tag name and class list, as the reader sees it.
    ///
    /// Returns `None` for elements that carry no article text of their own. When the
    /// tag and a legacy class disagree, the shallower level wins.
    pub fn classify<'a>(tag: &str, classes: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let legacy = classes.into_iter().filter_map(legacy_level).min();
        Self::from_level(tag, shallower(tag_level(tag), legacy))
    }

    /// Classify an element for article segmentation.
    ///
    /// Only `h1` and `p.MsoHeading1` open an article here. Any other element carrying
    /// `MsoHeading1` counts by its tag and its deeper legacy classes, so a
    /// `div.MsoHeading1` is not indexed on its own.
    pub fn classify_for_index<'a>(
        tag: &str,
        classes: impl IntoIterator<Item = &'a str>,
    ) -> Option<Self> {
        let levels: Vec<u8> = classes.into_iter().filter_map(legacy_level).collect();
        let tag_level = tag_level(tag);
        if tag_level == Some(1) || (is_paragraph(tag) && levels.contains(&1)) {
            return Some(Self::MainHeading);
        }

        let legacy = levels.into_iter().filter(|&level| level > 1).min();
        Self::from_level(tag, shallower(tag_level, legacy))
    }

    /// Whether the reader highlights matches inside this element: every `p` tag and
    /// every outline heading.
    pub fn is_highlight_scope<'a>(tag: &str, classes: impl IntoIterator<Item = &'a str>) -> bool {
        is_paragraph(tag) || Self::classify(tag, classes).is_some_and(Self::is_outline_heading)
    }

    fn from_level(tag: &str, level: Option<u8>) -> Option<Self> {
        match level {
            Some(1) => Some(Self::MainHeading),
            Some(level) => Some(Self::Heading(level)),
            None if is_paragraph(tag) => Some(Self::Paragraph),
            None => None,
        }
    }

    /// Heading level, `None` for paragraphs.
    pub fn level(self) -> Option<u8> {
        match self {
            Self::MainHeading => Some(1),
            Self::Heading(level) => Some(level),
            Self::Paragraph => None,
        }
    }

    /// Whether this element opens a new article.
    pub fn is_main_heading(self) -> bool {
        self == Self::MainHeading
    }

    /// Headings of level 1 to 3, the ones shown in the table of contents.
    pub fn is_outline_heading(self) -> bool {
        matches!(self.level(), Some(1..=3))
    }
}

fn shallower(a: Option<u8>, b: Option<u8>) -> Option<u8> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

fn is_paragraph(tag: &str) -> bool {
    tag.eq_ignore_ascii_case("p")
}

fn tag_level(tag: &str) -> Option<u8> {
    let bytes = tag.as_bytes();
    match bytes {
        [h, digit] if h.eq_ignore_ascii_case(&b'h') && (b'1'..=b'6').contains(digit) => {
            Some(digit - b'0')
        }
        _ => None,
    }
}

fn legacy_level(class: &str) -> Option<u8> {
    let level: u8 = class.strip_prefix(LEGACY_HEADING_CLASS)?.parse().ok()?;
    (1..=6).contains(&level).then_some(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_headings() {
        assert_eq!(ElementRole::classify("h1", []), Some(ElementRole::MainHeading));
        assert_eq!(ElementRole::classify("H2", []), Some(ElementRole::Heading(2)));
        assert_eq!(ElementRole::classify("h6", []), Some(ElementRole::Heading(6)));
        assert_eq!(ElementRole::classify("h7", []), None);
    }

    #[test]
    fn test_legacy_classes() {
        assert_eq!(
            ElementRole::classify("p", ["MsoHeading1"]),
            Some(ElementRole::MainHeading)
        );
        assert_eq!(
            ElementRole::classify("p", ["MsoNormal", "MsoHeading3"]),
            Some(ElementRole::Heading(3))
        );
        assert_eq!(
            ElementRole::classify("div", ["MsoHeading2"]),
            Some(ElementRole::Heading(2))
        );
        assert_eq!(
            ElementRole::classify("p", ["MsoHeading10"]),
            Some(ElementRole::Paragraph)
        );
    }

    #[test]
    fn test_shallower_level_wins() {
        assert_eq!(
            ElementRole::classify("h4", ["MsoHeading2"]),
            Some(ElementRole::Heading(2))
        );
        assert_eq!(
            ElementRole::classify("h2", ["MsoHeading5"]),
            Some(ElementRole::Heading(2))
        );
        assert_eq!(
            ElementRole::classify("h2", ["MsoHeading1"]),
            Some(ElementRole::MainHeading)
        );
    }

    #[test]
    fn test_index_article_boundaries() {
        assert_eq!(
            ElementRole::classify_for_index("h1", []),
            Some(ElementRole::MainHeading)
        );
        assert_eq!(
            ElementRole::classify_for_index("p", ["MsoHeading1"]),
            Some(ElementRole::MainHeading)
        );
        assert_eq!(
            ElementRole::classify_for_index("h2", ["MsoHeading1"]),
            Some(ElementRole::Heading(2))
        );
        assert_eq!(
            ElementRole::classify_for_index("div", ["MsoHeading1", "MsoHeading3"]),
            Some(ElementRole::Heading(3))
        );
        assert_eq!(ElementRole::classify_for_index("div", ["MsoHeading1"]), None);
        assert_eq!(
            ElementRole::classify_for_index("p", ["MsoNormal"]),
            Some(ElementRole::Paragraph)
        );
    }

    #[test]
    fn test_paragraph_and_other() {
        assert_eq!(ElementRole::classify("p", ["MsoNormal"]), Some(ElementRole::Paragraph));
        assert_eq!(ElementRole::classify("div", []), None);
        assert_eq!(ElementRole::classify("span", ["x"]), None);
    }

    #[test]
    fn test_outline_and_highlight_sets() {
        assert!(ElementRole::MainHeading.is_outline_heading());
        assert!(ElementRole::Heading(3).is_outline_heading());
        assert!(!ElementRole::Heading(4).is_outline_heading());
        assert_eq!(ElementRole::Paragraph.level(), None);

        assert!(ElementRole::is_highlight_scope("p", []));
        assert!(ElementRole::is_highlight_scope("p", ["MsoHeading4"]));
        assert!(ElementRole::is_highlight_scope("span", ["MsoHeading3"]));
        assert!(ElementRole::is_highlight_scope("h2", []));
        assert!(!ElementRole::is_highlight_scope("h4", []));
        assert!(!ElementRole::is_highlight_scope("div", ["MsoHeading5"]));
    }
}
