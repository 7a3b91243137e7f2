//! Chapter rendering: article separators, heading ids and outline extraction.

use ego_tree::NodeId;
use folio_core::{EMPTY_HEADING, OPENING_ARTICLE_PREFIX};
use log::debug;

use crate::{
    document::{ChapterDocument, ElementData},
    toc::{TableOfContents, TocItem},
};

/// Class of the divider inserted between articles.
pub const SEPARATOR_CLASS: &str = "visual-separator";

/// Where a search result points inside a chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleTarget {
    /// The opening article, i.e. the chapter as a whole.
    Document,
    /// A heading element.
    Heading(NodeId),
}

/// Where the content pane should scroll after a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollTarget {
    Top,
    /// Element with the given DOM id.
    Element(String),
}

/// Renders chapter markup for display.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChapterRenderer;

impl ChapterRenderer {
    /// Parse a chapter, insert separators and number its outline headings.
    pub fn render(html: &str) -> RenderedChapter {
        let mut document = ChapterDocument::parse(html);
        insert_separators(&mut document);
        let headings = assign_heading_ids(&mut document);
        debug!("rendered chapter with {} outline headings", headings.len());
        RenderedChapter {
            document,
            headings,
        }
    }
}

/// A chapter ready to be shown.
#[derive(Debug, Clone)]
pub struct RenderedChapter {
    document: ChapterDocument,
    headings: Vec<(NodeId, TocItem)>,
}

impl RenderedChapter {
    pub fn document(&self) -> &ChapterDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut ChapterDocument {
        &mut self.document
    }

    /// Outline headings in document order.
    pub fn headings(&self) -> impl Iterator<Item = &TocItem> {
        self.headings.iter().map(|(_, item)| item)
    }

    /// Table of contents built from the outline headings.
    pub fn toc(&self) -> TableOfContents {
        TableOfContents::from_headings(self.headings().cloned())
    }

    /// Locate the article a search result names.
    ///
    /// Opening articles target the whole chapter. Other headings match the first
    /// outline heading with the same trimmed text; the empty-heading placeholder matches
    /// the first main heading without text.
    pub fn find_target(&self, heading: &str) -> Option<ArticleTarget> {
        if heading.starts_with(OPENING_ARTICLE_PREFIX) {
            return Some(ArticleTarget::Document);
        }

        let found = if heading == EMPTY_HEADING {
            self.headings
                .iter()
                .find(|(_, item)| item.level == 1 && item.text.is_empty())
        } else {
            self.headings.iter().find(|(_, item)| item.text == heading)
        };

        if found.is_none() {
            debug!("heading '{heading}' not found in chapter");
        }
        found.map(|(id, _)| ArticleTarget::Heading(*id))
    }

    /// Scroll position for a target.
    ///
    /// A heading scrolls to the separator opening its article when one precedes it
    /// among its siblings before any main heading.
    pub fn scroll_target(&self, target: ArticleTarget) -> ScrollTarget {
        let ArticleTarget::Heading(heading) = target else {
            return ScrollTarget::Top;
        };

        let mut current = self.document.previous_element_sibling(heading);
        while let Some(id) = current {
            let Some(data) = self.document.element(id) else {
                break;
            };
            if data.has_class(SEPARATOR_CLASS) {
                if let Some(dom_id) = data.attr("id") {
                    return ScrollTarget::Element(dom_id.to_string());
                }
                break;
            }
            if data.role().is_some_and(|r| r.is_main_heading()) {
                break;
            }
            current = self.document.previous_element_sibling(id);
        }

        self.document
            .element(heading)
            .and_then(|data| data.attr("id"))
            .map_or(ScrollTarget::Top, |id| ScrollTarget::Element(id.to_string()))
    }

    /// Serialized markup for the content pane.
    pub fn to_html(&self) -> String {
        self.document.to_html()
    }
}

fn separator_id(n: usize) -> String {
    format!("separator-{n}")
}

fn insert_separators(document: &mut ChapterDocument) {
    let main_headings: Vec<NodeId> = document
        .elements_with_role()
        .filter(|(_, role)| role.is_main_heading())
        .map(|(id, _)| id)
        .collect();

    for (n, heading) in main_headings.into_iter().skip(1).enumerate() {
        let existing = document
            .previous_element_sibling(heading)
            .filter(|&prev| document.element(prev).is_some_and(|e| e.has_class(SEPARATOR_CLASS)));

        match existing {
            Some(separator) => {
                let has_id = document
                    .element(separator)
                    .is_some_and(|e| e.attr("id").is_some());
                if !has_id {
                    document.set_attribute(separator, "id", &separator_id(n));
                }
            }
            None => {
                let separator = ElementData::new("div")
                    .with_attr("class", SEPARATOR_CLASS)
                    .with_attr("id", separator_id(n));
                document.insert_element_before(heading, separator);
            }
        }
    }
}

fn assign_heading_ids(document: &mut ChapterDocument) -> Vec<(NodeId, TocItem)> {
    let outline: Vec<(NodeId, u8)> = document
        .elements_with_role()
        .filter(|(_, role)| role.is_outline_heading())
        .filter_map(|(id, role)| role.level().map(|level| (id, level)))
        .collect();

    outline
        .into_iter()
        .enumerate()
        .map(|(n, (node, level))| {
            let id = format!("heading-{n}");
            document.set_attribute(node, "id", &id);
            let text = document.text_content(node).trim().to_string();
            (node, TocItem { id, text, level })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHAPTER: &str = "<p>Preface</p>\
        <h1>Intro</h1><p>Hello world</p><h2>Part</h2>\
        <h1>Two</h1><p>Hello again</p>\
        <p class=\"MsoHeading1\">Three</p><h3>Deep</h3><h4>Too deep</h4>";

    #[test]
    fn test_separators_between_articles() {
        let rendered = ChapterRenderer::render(CHAPTER);
        let html = rendered.to_html();

        assert_eq!(html.matches(SEPARATOR_CLASS).count(), 2);
        assert!(html.contains(
            "<div class=\"visual-separator\" id=\"separator-0\"></div><h1 id=\"heading-2\">Two</h1>"
        ));
        assert!(html.starts_with("<p>Preface</p><h1 id=\"heading-0\">Intro</h1>"));
    }

    #[test]
    fn test_existing_separator_is_reused() {
        let html = "<h1>A</h1><p>x</p><div class=\"visual-separator\"></div><h1>B</h1>";
        let rendered = ChapterRenderer::render(html);
        let out = rendered.to_html();

        assert_eq!(out.matches(SEPARATOR_CLASS).count(), 1);
        assert!(out.contains("id=\"separator-0\""));
    }

    #[test]
    fn test_heading_ids_and_toc() {
        let rendered = ChapterRenderer::render(CHAPTER);
        let items: Vec<_> = rendered
            .headings()
            .map(|h| (h.id.as_str(), h.text.as_str(), h.level))
            .collect();

        assert_eq!(
            items,
            vec![
                ("heading-0", "Intro", 1),
                ("heading-1", "Part", 2),
                ("heading-2", "Two", 1),
                ("heading-3", "Three", 1),
                ("heading-4", "Deep", 3),
            ]
        );

        let toc = rendered.toc();
        assert_eq!(toc.sections().len(), 3);
        assert_eq!(toc.sections()[2].children[0].text, "Deep");
    }

    #[test]
    fn test_heading_counter_resets_per_render() {
        let first = ChapterRenderer::render("<h1>A</h1><h1>B</h1>");
        let second = ChapterRenderer::render("<h1>C</h1>");
        assert_eq!(first.headings().last().unwrap().id, "heading-1");
        assert_eq!(second.headings().next().unwrap().id, "heading-0");
    }

    #[test]
    fn test_find_target() {
        let rendered = ChapterRenderer::render(CHAPTER);

        assert_eq!(
            rendered.find_target("(opening article - 1990)"),
            Some(ArticleTarget::Document)
        );
        assert!(matches!(
            rendered.find_target("Two"),
            Some(ArticleTarget::Heading(_))
        ));
        assert_eq!(rendered.find_target("Missing"), None);
    }

    #[test]
    fn test_find_empty_heading() {
        let rendered = ChapterRenderer::render("<h1>A</h1><p>x</p><h1> </h1><p>y</p>");
        let target = rendered.find_target(EMPTY_HEADING).unwrap();
        assert_eq!(
            rendered.scroll_target(target),
            ScrollTarget::Element("separator-0".to_string())
        );
    }

    #[test]
    fn test_scroll_targets() {
        let rendered = ChapterRenderer::render(CHAPTER);

        let first = rendered.find_target("Intro").unwrap();
        assert_eq!(
            rendered.scroll_target(first),
            ScrollTarget::Element("heading-0".to_string())
        );

        let second = rendered.find_target("Two").unwrap();
        assert_eq!(
            rendered.scroll_target(second),
            ScrollTarget::Element("separator-0".to_string())
        );

        let sub = rendered.find_target("Part").unwrap();
        assert_eq!(
            rendered.scroll_target(sub),
            ScrollTarget::Element("heading-1".to_string())
        );

        assert_eq!(
            rendered.scroll_target(ArticleTarget::Document),
            ScrollTarget::Top
        );
    }
}
