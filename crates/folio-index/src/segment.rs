//! Article segmentation of chapter HTML.
//!
//! A chapter is cut into articles at every main heading. Text that appears before the
//! first main heading forms an opening article, and articles without text are dropped.

use folio_core::{ArticleRecord, EMPTY_HEADING, ElementRole};
use scraper::{ElementRef, Html};

/// One article found in a chapter, before it is numbered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Heading text or placeholder.
    pub heading: String,

    /// Space-joined text of the article body, in original case.
    pub text: String,
}

/// Splits chapter HTML into articles.
#[derive(Debug)]
pub struct ArticleSegmenter<'a> {
    year: &'a str,
}

impl<'a> ArticleSegmenter<'a> {
    /// Create a segmenter for a chapter with the given display name.
    pub fn new(year: &'a str) -> Self {
        Self { year }
    }

    /// Segment a chapter into articles, in document order.
    pub fn segment(&self, html: &str) -> Vec<Segment> {
        let document = Html::parse_document(html);
        let mut segments = Vec::new();
        let mut heading = ArticleRecord::opening_heading(self.year);
        let mut text = String::new();

        for element in document.root_element().descendants().filter_map(ElementRef::wrap) {
            let value = element.value();
            let Some(role) = ElementRole::classify_for_index(value.name(), value.classes()) else {
                continue;
            };

            let element_text = element.text().collect::<String>();
            let element_text = element_text.trim();

            if role.is_main_heading() {
                if !text.is_empty() {
                    segments.push(Segment {
                        heading: std::mem::take(&mut heading),
                        text: std::mem::take(&mut text),
                    });
                }
                heading = if element_text.is_empty() {
                    EMPTY_HEADING.to_string()
                } else {
                    element_text.to_string()
                };
                text.clear();
            } else if !element_text.is_empty() {
                text.push_str(element_text);
                text.push(' ');
            }
        }

        if !text.is_empty() {
            segments.push(Segment { heading, text });
        }

        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(html: &str) -> Vec<Segment> {
        ArticleSegmenter::new("1990").segment(html)
    }

    #[test]
    fn test_two_articles() {
        let segments =
            segment("<h1>Intro</h1><p>Hello world</p><h1>Two</h1><p>Hello again, hello</p>");

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].heading, "Intro");
        assert_eq!(segments[0].text, "Hello world ");
        assert_eq!(segments[1].heading, "Two");
        assert_eq!(segments[1].text, "Hello again, hello ");
    }

    #[test]
    fn test_opening_article() {
        let segments = segment("<p>Preface</p><h1>Intro</h1><p>Body</p>");

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].heading, "(opening article - 1990)");
        assert_eq!(segments[0].text, "Preface ");
        assert_eq!(segments[1].heading, "Intro");
    }

    #[test]
    fn test_empty_heading_placeholder() {
        let segments = segment("<h1>  </h1><p>Orphan text</p>");

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].heading, EMPTY_HEADING);
    }

    #[test]
    fn test_articles_without_text_are_dropped() {
        let segments = segment("<h1>Empty</h1><h1>Also empty</h1><p> </p><h1>Full</h1><p>x</p>");

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].heading, "Full");
    }

    #[test]
    fn test_subheadings_and_legacy_classes() {
        let html = r#"
            <div>
              <p class="MsoHeading1">Legacy Title</p>
              <p class="MsoHeading2">Section</p>
              <h3>Sub</h3>
              <p>Body <b>bold</b> text</p>
              <div>ignored div text</div>
            </div>
        "#;
        let segments = segment(html);

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].heading, "Legacy Title");
        assert_eq!(segments[0].text, "Section Sub Body bold text ");
    }

    #[test]
    fn test_only_h1_and_legacy_paragraphs_open_articles() {
        let html = r#"
            <h1>Start</h1>
            <p>One</p>
            <h2 class="MsoHeading1">Styled subheading</h2>
            <p>Two</p>
            <div class="MsoHeading1">Styled block</div>
        "#;
        let segments = segment(html);

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].heading, "Start");
        assert_eq!(segments[0].text, "One Styled subheading Two ");
    }

    #[test]
    fn test_no_elements() {
        assert!(segment("").is_empty());
        assert!(segment("<div>just a div</div>").is_empty());
    }
}
