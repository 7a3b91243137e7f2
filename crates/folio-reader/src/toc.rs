//! Two-level table of contents for the loaded chapter.

use serde::Serialize;

/// One heading shown in the outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocItem {
    /// DOM id assigned to the heading, `heading-<n>`.
    pub id: String,
    pub text: String,
    pub level: u8,
}

/// A main heading with the sub-headings that follow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocSection {
    pub heading: TocItem,
    pub children: Vec<TocItem>,
    pub expanded: bool,
}

impl TocSection {
    /// Sections without children have nothing to expand.
    pub fn has_toggle(&self) -> bool {
        !self.children.is_empty()
    }

    /// Flip the expanded flag. No effect without children.
    pub fn toggle(&mut self) {
        if self.has_toggle() {
            self.expanded = !self.expanded;
        }
    }

    /// Label of the toggle button.
    pub fn toggle_label(&self) -> &'static str {
        if self.expanded { "−" } else { "+" }
    }
}

/// Outline of one chapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableOfContents {
    sections: Vec<TocSection>,
}

impl TableOfContents {
    /// Build the outline from headings in document order.
    ///
    /// Level 1 headings open sections; level 2 and 3 headings join the current section
    /// and are dropped when no section is open yet.
    pub fn from_headings(headings: impl IntoIterator<Item = TocItem>) -> Self {
        let mut sections: Vec<TocSection> = Vec::new();
        for item in headings {
            match item.level {
                1 => sections.push(TocSection {
                    heading: item,
                    children: Vec::new(),
                    expanded: false,
                }),
                2 | 3 => {
                    if let Some(section) = sections.last_mut() {
                        section.children.push(item);
                    }
                }
                _ => {}
            }
        }
        Self { sections }
    }

    pub fn sections(&self) -> &[TocSection] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Toggle one section.
    pub fn toggle(&mut self, index: usize) {
        if let Some(section) = self.sections.get_mut(index) {
            section.toggle();
        }
    }

    pub fn expand_all(&mut self) {
        self.set_all(true);
    }

    pub fn collapse_all(&mut self) {
        self.set_all(false);
    }

    fn set_all(&mut self, expanded: bool) {
        for section in self.sections.iter_mut().filter(|s| s.has_toggle()) {
            section.expanded = expanded;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(n: usize, level: u8) -> TocItem {
        TocItem {
            id: format!("heading-{n}"),
            text: format!("Heading {n}"),
            level,
        }
    }

    #[test]
    fn test_nesting() {
        let toc = TableOfContents::from_headings([
            item(0, 2),
            item(1, 1),
            item(2, 2),
            item(3, 3),
            item(4, 1),
        ]);

        assert_eq!(toc.sections().len(), 2);
        assert_eq!(toc.sections()[0].heading.id, "heading-1");
        assert_eq!(toc.sections()[0].children.len(), 2);
        assert_eq!(toc.sections()[0].children[1].id, "heading-3");
        assert!(toc.sections()[1].children.is_empty());
    }

    #[test]
    fn test_toggle_only_with_children() {
        let mut toc = TableOfContents::from_headings([item(0, 1), item(1, 2), item(2, 1)]);

        assert!(toc.sections()[0].has_toggle());
        assert!(!toc.sections()[1].has_toggle());
        assert!(!toc.sections()[0].expanded);
        assert_eq!(toc.sections()[0].toggle_label(), "+");

        toc.toggle(0);
        toc.toggle(1);
        assert!(toc.sections()[0].expanded);
        assert_eq!(toc.sections()[0].toggle_label(), "−");
        assert!(!toc.sections()[1].expanded);
    }

    #[test]
    fn test_expand_and_collapse_all() {
        let mut toc = TableOfContents::from_headings([item(0, 1), item(1, 3), item(2, 1)]);

        toc.expand_all();
        assert!(toc.sections()[0].expanded);
        assert!(!toc.sections()[1].expanded);

        toc.collapse_all();
        assert!(toc.sections().iter().all(|s| !s.expanded));
    }

    #[test]
    fn test_empty() {
        assert!(TableOfContents::from_headings([item(0, 2)]).is_empty());
        assert!(TableOfContents::default().is_empty());
    }
}
