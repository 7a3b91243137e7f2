//! Mutable element tree for one rendered chapter.
//!
//! Chapter markup is parsed once with `scraper` and copied into an `ego_tree` arena so
//! that separators, heading ids and highlight markers can be inserted before the
//! markup is handed to the browser.

use ego_tree::{NodeId, NodeMut, NodeRef, Tree};
use folio_core::ElementRole;
use scraper::{Html, Node};

/// Elements that never have children or closing tags.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements whose text is written without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// A node of the chapter tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomNode {
    /// Container for the top-level nodes of the chapter.
    Root,
    /// An element with its attributes.
    Element(ElementData),
    /// A text run.
    Text(String),
    /// A comment, kept so exported conditional comments survive.
    Comment(String),
}

/// Tag name and attributes of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    name: String,
    attrs: Vec<(String, String)>,
}

impl ElementData {
    /// Create an element without attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
        }
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Lower-case tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set or replace an attribute.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    /// Class tokens.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_ascii_whitespace()
    }

    /// Whether the element carries a class token.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Role of the element for outlining and highlighting.
    pub fn role(&self) -> Option<ElementRole> {
        ElementRole::classify(&self.name, self.classes())
    }
}

/// Parsed chapter markup.
#[derive(Debug, Clone)]
pub struct ChapterDocument {
    tree: Tree<DomNode>,
}

impl ChapterDocument {
    /// Parse a chapter fragment the way the browser parses `innerHTML`.
    pub fn parse(html: &str) -> Self {
        let parsed = Html::parse_fragment(html);
        let mut tree = Tree::new(DomNode::Root);
        copy_children(*parsed.root_element(), tree.root_mut());
        Self { tree }
    }

    /// Root node.
    pub fn root(&self) -> NodeRef<'_, DomNode> {
        self.tree.root()
    }

    /// Node by arena id.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, DomNode>> {
        self.tree.get(id)
    }

    /// Element data of a node, if it is an element.
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match self.tree.get(id)?.value() {
            DomNode::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Set an attribute on an element. Returns `false` if `id` is not an element.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        let Some(mut node) = self.tree.get_mut(id) else {
            return false;
        };
        match node.value() {
            DomNode::Element(data) => {
                data.set_attr(name, value);
                true
            }
            _ => false,
        }
    }

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = (NodeId, &ElementData)> {
        self.tree.root().descendants().filter_map(|node| match node.value() {
            DomNode::Element(data) => Some((node.id(), data)),
            _ => None,
        })
    }

    /// Elements with a role, in document order.
    pub fn elements_with_role(&self) -> impl Iterator<Item = (NodeId, ElementRole)> + '_ {
        self.elements()
            .filter_map(|(id, data)| data.role().map(|role| (id, role)))
    }

    /// Concatenated text of a node and its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let Some(node) = self.tree.get(id) else {
            return String::new();
        };
        node.descendants()
            .filter_map(|n| match n.value() {
                DomNode::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Text of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.tree.get(id)?.value() {
            DomNode::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Text nodes under `id` in document order, skipping raw-text elements.
    pub fn text_nodes_within(&self, id: NodeId) -> Vec<NodeId> {
        let Some(node) = self.tree.get(id) else {
            return Vec::new();
        };
        node.descendants()
            .filter(|n| matches!(n.value(), DomNode::Text(_)))
            .filter(|n| {
                !n.ancestors().any(|a| match a.value() {
                    DomNode::Element(data) => RAW_TEXT_ELEMENTS.contains(&data.name()),
                    _ => false,
                })
            })
            .map(|n| n.id())
            .collect()
    }

    /// Wrap byte ranges of a text node in new elements.
    ///
    /// `ranges` must be sorted, non-overlapping and on char boundaries. Empty ranges get
    /// empty wrappers. The text node is replaced by the unwrapped pieces and the
    /// wrappers; the wrapper ids are returned in order.
    pub fn wrap_text_ranges(
        &mut self,
        text_node: NodeId,
        ranges: &[(usize, usize)],
        mut wrapper: impl FnMut() -> ElementData,
    ) -> Vec<NodeId> {
        let Some(text) = self.text(text_node).map(str::to_string) else {
            return Vec::new();
        };
        if ranges.is_empty() {
            return Vec::new();
        }
        let Some(mut node) = self.tree.get_mut(text_node) else {
            return Vec::new();
        };

        let mut wrappers = Vec::with_capacity(ranges.len());
        let mut last = 0;
        for &(start, end) in ranges {
            if start > last {
                node.insert_before(DomNode::Text(text[last..start].to_string()));
            }
            let mut wrapped = node.insert_before(DomNode::Element(wrapper()));
            if end > start {
                wrapped.append(DomNode::Text(text[start..end].to_string()));
            }
            wrappers.push(wrapped.id());
            last = end;
        }
        if last < text.len() {
            node.insert_before(DomNode::Text(text[last..].to_string()));
        }
        node.detach();

        wrappers
    }

    /// Closest preceding sibling that is an element.
    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.tree
            .get(id)?
            .prev_siblings()
            .find(|n| matches!(n.value(), DomNode::Element(_)))
            .map(|n| n.id())
    }

    /// Insert a new element immediately before `id`.
    ///
    /// Returns `None` when `id` is the root, which has no siblings.
    pub fn insert_element_before(&mut self, id: NodeId, data: ElementData) -> Option<NodeId> {
        self.tree.get(id)?.parent()?;
        let mut node = self.tree.get_mut(id)?;
        Some(node.insert_before(DomNode::Element(data)).id())
    }

    /// Whether `node` is `target` or comes after it in document order.
    ///
    /// Descendants of `target` count as following it.
    pub fn is_at_or_after(&self, target: NodeId, node: NodeId) -> bool {
        for n in self.tree.root().descendants() {
            if n.id() == target {
                return true;
            }
            if n.id() == node {
                return false;
            }
        }
        false
    }

    /// Serialize the chapter back to HTML.
    pub fn to_html(&self) -> String {
        let mut output = String::new();
        for child in self.tree.root().children() {
            serialize_node(child, false, &mut output);
        }
        output
    }
}

fn copy_children(src: ego_tree::NodeRef<'_, Node>, mut dst: NodeMut<'_, DomNode>) {
    for child in src.children() {
        match child.value() {
            Node::Element(element) => {
                let data = ElementData {
                    name: element.name().to_string(),
                    attrs: element
                        .attrs()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                };
                copy_children(child, dst.append(DomNode::Element(data)));
            }
            Node::Text(text) => {
                dst.append(DomNode::Text(String::from(&**text)));
            }
            Node::Comment(comment) => {
                dst.append(DomNode::Comment(String::from(&**comment)));
            }
            _ => {}
        }
    }
}

fn serialize_node(node: NodeRef<'_, DomNode>, raw_text: bool, output: &mut String) {
    match node.value() {
        DomNode::Root => {
            for child in node.children() {
                serialize_node(child, false, output);
            }
        }
        DomNode::Text(text) if raw_text => output.push_str(text),
        DomNode::Text(text) => escape_into(text, false, output),
        DomNode::Comment(comment) => {
            output.push_str("<!--");
            output.push_str(comment);
            output.push_str("-->");
        }
        DomNode::Element(data) => {
            output.push('<');
            output.push_str(&data.name);
            for (name, value) in &data.attrs {
                output.push(' ');
                output.push_str(name);
                output.push_str("=\"");
                escape_into(value, true, output);
                output.push('"');
            }
            output.push('>');

            if VOID_ELEMENTS.contains(&data.name.as_str()) {
                return;
            }

            let raw = RAW_TEXT_ELEMENTS.contains(&data.name.as_str());
            for child in node.children() {
                serialize_node(child, raw, output);
            }

            output.push_str("</");
            output.push_str(&data.name);
            output.push('>');
        }
    }
}

fn escape_into(text: &str, attribute: bool, output: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            '"' if attribute => output.push_str("&quot;"),
            '<' if !attribute => output.push_str("&lt;"),
            '>' if !attribute => output.push_str("&gt;"),
            c => output.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_serialize() {
        let html = r#"<h1 class="title">A &amp; B</h1><p>x &lt; y<br>next</p>"#;
        let doc = ChapterDocument::parse(html);
        assert_eq!(doc.to_html(), html);
    }

    #[test]
    fn test_parse_full_document_keeps_body_content() {
        let doc = ChapterDocument::parse(
            "<html><head><title>t</title></head><body><h1>Only</h1></body></html>",
        );
        let names: Vec<_> = doc.elements().map(|(_, e)| e.name().to_string()).collect();
        assert!(names.contains(&"h1".to_string()));
        assert!(!names.contains(&"body".to_string()));
    }

    #[test]
    fn test_style_text_is_not_escaped() {
        let html = "<style>p > b { color: red; }</style><p>a</p>";
        let doc = ChapterDocument::parse(html);
        assert_eq!(doc.to_html(), html);
    }

    #[test]
    fn test_nbsp_round_trips_as_entity() {
        let doc = ChapterDocument::parse("<p>a&nbsp;b</p>");
        assert_eq!(doc.to_html(), "<p>a&nbsp;b</p>");
    }

    #[test]
    fn test_text_content_and_roles() {
        let doc = ChapterDocument::parse(
            r#"<h1>Title <b>bold</b></h1><div><p class="MsoHeading2">Sub</p></div>"#,
        );
        let roles: Vec<_> = doc.elements_with_role().collect();
        assert_eq!(roles.len(), 2);
        assert_eq!(roles[0].1, ElementRole::MainHeading);
        assert_eq!(roles[1].1, ElementRole::Heading(2));
        assert_eq!(doc.text_content(roles[0].0), "Title bold");
    }

    #[test]
    fn test_previous_element_sibling_skips_text() {
        let doc = ChapterDocument::parse("<p>a</p>\n  <h1>b</h1>");
        let (h1, _) = doc.elements().find(|(_, e)| e.name() == "h1").unwrap();
        let prev = doc.previous_element_sibling(h1).unwrap();
        assert_eq!(doc.element(prev).unwrap().name(), "p");
    }

    #[test]
    fn test_insert_and_set_attribute() {
        let mut doc = ChapterDocument::parse("<h1>a</h1>");
        let (h1, _) = doc.elements().next().unwrap();
        doc.insert_element_before(h1, ElementData::new("div").with_attr("id", "sep"))
            .unwrap();
        assert!(doc.set_attribute(h1, "id", "heading-0"));

        assert_eq!(doc.to_html(), r#"<div id="sep"></div><h1 id="heading-0">a</h1>"#);
        assert_eq!(doc.element(h1).unwrap().attr("id"), Some("heading-0"));
        assert!(doc.insert_element_before(doc.root().id(), ElementData::new("div")).is_none());
    }

    #[test]
    fn test_wrap_text_ranges() {
        let mut doc = ChapterDocument::parse("<p>say hello, hello!</p>");
        let (p, _) = doc.elements().next().unwrap();
        let text = doc.text_nodes_within(p)[0];

        let marks = doc.wrap_text_ranges(text, &[(4, 9), (11, 16)], || ElementData::new("mark"));

        assert_eq!(marks.len(), 2);
        assert_eq!(
            doc.to_html(),
            "<p>say <mark>hello</mark>, <mark>hello</mark>!</p>"
        );
        assert_eq!(doc.text_content(p), "say hello, hello!");
    }

    #[test]
    fn test_text_nodes_skip_raw_text() {
        let doc = ChapterDocument::parse("<div><script>var a;</script>text</div>");
        let (div, _) = doc.elements().next().unwrap();
        let nodes = doc.text_nodes_within(div);
        assert_eq!(nodes.len(), 1);
        assert_eq!(doc.text(nodes[0]), Some("text"));
    }

    #[test]
    fn test_document_order() {
        let doc = ChapterDocument::parse("<p>a</p><h1>b<b>c</b></h1><p>d</p>");
        let ids: Vec<_> = doc.elements().map(|(id, _)| id).collect();
        let (p1, h1, b, p2) = (ids[0], ids[1], ids[2], ids[3]);

        assert!(!doc.is_at_or_after(h1, p1));
        assert!(doc.is_at_or_after(h1, h1));
        assert!(doc.is_at_or_after(h1, b));
        assert!(doc.is_at_or_after(h1, p2));
    }
}
