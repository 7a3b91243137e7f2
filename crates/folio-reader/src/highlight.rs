//! Search-term highlighting and stepping through the highlighted occurrences.

use std::collections::HashSet;

use ego_tree::NodeId;
use folio_core::ElementRole;
use regex::Regex;

use crate::{
    document::{ChapterDocument, DomNode, ElementData},
    query::find_all,
    render::ArticleTarget,
};

/// Class carried by every highlight marker.
pub const HIGHLIGHT_CLASS: &str = "search-highlight";

/// Class the UI adds to the marker the navigator points at.
pub const ACTIVE_HIGHLIGHT_CLASS: &str = "active-highlight";

/// Wrap every match of `regex` inside paragraphs and outline headings.
///
/// Only text nodes are rewritten, so markup and attributes are never matched. Empty
/// matches get empty markers, as they count as search hits. Returns the markers in
/// document order with their DOM ids.
pub fn highlight_matches(document: &mut ChapterDocument, regex: &Regex) -> Vec<(NodeId, String)> {
    let scopes: Vec<NodeId> = document
        .elements()
        .filter(|(_, data)| ElementRole::is_highlight_scope(data.name(), data.classes()))
        .map(|(id, _)| id)
        .collect();

    let mut seen = HashSet::new();
    let mut text_nodes = Vec::new();
    for scope in scopes {
        for node in document.text_nodes_within(scope) {
            if seen.insert(node) && !inside_marker(document, node) {
                text_nodes.push(node);
            }
        }
    }

    let mut markers = Vec::new();
    for node in text_nodes {
        let Some(text) = document.text(node) else {
            continue;
        };
        let ranges: Vec<(usize, usize)> = find_all(regex, text)
            .map(|m| (m.start(), m.end()))
            .collect();

        let first = markers.len();
        let mut n = first;
        let wrapped = document.wrap_text_ranges(node, &ranges, || {
            let marker = ElementData::new("mark")
                .with_attr("class", HIGHLIGHT_CLASS)
                .with_attr("id", marker_id(n));
            n += 1;
            marker
        });
        markers.extend(
            wrapped
                .into_iter()
                .enumerate()
                .map(|(i, id)| (id, marker_id(first + i))),
        );
    }

    markers
}

fn marker_id(n: usize) -> String {
    format!("highlight-{n}")
}

fn inside_marker(document: &ChapterDocument, node: NodeId) -> bool {
    document.node(node).is_some_and(|n| {
        n.ancestors().any(|a| match a.value() {
            DomNode::Element(data) => data.name() == "mark" && data.has_class(HIGHLIGHT_CLASS),
            _ => false,
        })
    })
}

/// Cursor over the highlight markers of the loaded chapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightNavigator {
    markers: Vec<String>,
    current: usize,
}

impl HighlightNavigator {
    /// Start at the first marker at or after `target`.
    ///
    /// The whole-document target, a missing target, or a target with no marker after
    /// it all start at the first marker.
    pub fn new(
        document: &ChapterDocument,
        markers: Vec<(NodeId, String)>,
        target: Option<ArticleTarget>,
    ) -> Self {
        let current = match target {
            Some(ArticleTarget::Heading(heading)) => markers
                .iter()
                .position(|(node, _)| document.is_at_or_after(heading, *node))
                .unwrap_or(0),
            _ => 0,
        };

        Self {
            markers: markers.into_iter().map(|(_, id)| id).collect(),
            current,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Zero-based index of the active marker.
    pub fn position(&self) -> usize {
        self.current
    }

    /// DOM id of the active marker.
    pub fn current_id(&self) -> Option<&str> {
        self.markers.get(self.current).map(String::as_str)
    }

    pub fn can_prev(&self) -> bool {
        self.current > 0
    }

    pub fn can_next(&self) -> bool {
        self.current + 1 < self.markers.len()
    }

    /// Step forward. Returns whether the position moved.
    pub fn next(&mut self) -> bool {
        if !self.can_next() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Step back. Returns whether the position moved.
    pub fn prev(&mut self) -> bool {
        if !self.can_prev() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// `<position>/<total>` with a one-based position.
    pub fn counter(&self) -> String {
        if self.is_empty() {
            return "0/0".to_string();
        }
        format!("{}/{}", self.current + 1, self.markers.len())
    }

    /// Drop all markers.
    pub fn clear(&mut self) {
        self.markers.clear();
        self.current = 0;
    }
}
