use crate::core::node::XmlNode;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

pub const TEXT_TAG: &str = "文字";
pub const BULLET_TAG: &str = "條列";
pub const SEQUENCE_ATTR: &str = "序號";
pub const PARAGRAPH_TAG: &str = "段落";
pub const SECTION_LABEL_ATTR: &str = "段名";
pub const LABEL_SEPARATOR: char = '：';

/// Shared shape of [`DocumentItem`] and [`Section`]: inline content plus ordered sub-items.
pub trait ItemTree {
    fn content(&self) -> &str;

    fn children(&self) -> &[DocumentItem];

    /// Nothing to render: no content and no sub-items.
    fn is_empty(&self) -> bool {
        self.content().is_empty() && self.children().is_empty()
    }

    /// Sub-items rendered one per line. A bullet override reaches every descendant.
    fn render_children(&self, bullet: Option<&str>) -> String {
        self.children()
            .iter()
            .map(|child| child.stringify(bullet))
            // Empty sub-items take no line at all
            .filter(|rendered| !rendered.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Join two blocks with a newline, unless either one is empty.
fn join_blocks(head: &str, tail: &str) -> String {
    if head.is_empty() || tail.is_empty() {
        format!("{head}{tail}")
    } else {
        format!("{head}\n{tail}")
    }
}

/// Read the `文字` content and `條列` sub-items of a node. The last `文字` child wins.
fn read_body<N: XmlNode>(node: N) -> (String, Vec<DocumentItem>) {
    let mut content = String::new();
    let mut children = Vec::new();

    for child in node.children() {
        match child.tag_name() {
            TEXT_TAG => content = child.text().map(Cow::into_owned).unwrap_or_default(),
            BULLET_TAG => children.push(DocumentItem::from_node(child)),
            _ => {}
        }
    }

    (content, children)
}

/// One bullet or paragraph entry: a sequence label like `一、`, its text and nested entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentItem {
    pub sequence: String,
    pub content: String,
    pub children: Vec<DocumentItem>,
}

impl DocumentItem {
    pub fn new(sequence: &str, content: &str, children: Vec<DocumentItem>) -> Self {
        Self {
            sequence: sequence.trim().to_string(),
            content: content.trim().to_string(),
            children,
        }
    }

    /// Build from a `條列` node, or any node holding `文字` and `條列` children.
    pub fn from_node<N: XmlNode>(node: N) -> Self {
        let sequence = node.attribute(SEQUENCE_ATTR).unwrap_or_default().to_owned();
        let (content, children) = read_body(node);
        Self::new(&sequence, &content, children)
    }

    /// Render this entry and its descendants, replacing every sequence label with `bullet` if given.
    pub fn stringify(&self, bullet: Option<&str>) -> String {
        let line = if self.content.is_empty() {
            String::new()
        } else {
            format!("{} {}", bullet.unwrap_or(&self.sequence), self.content)
        };
        join_blocks(&line, &self.render_children(bullet))
    }
}

impl ItemTree for DocumentItem {
    fn content(&self) -> &str {
        &self.content
    }

    fn children(&self) -> &[DocumentItem] {
        &self.children
    }
}

impl fmt::Display for DocumentItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify(None))
    }
}

/// A labeled paragraph such as `說明` or `擬辦`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub label: String,
    pub content: String,
    pub children: Vec<DocumentItem>,
}

impl Section {
    pub fn new(label: &str, content: &str, children: Vec<DocumentItem>) -> Self {
        Self {
            label: normalize_label(label).to_string(),
            content: content.trim().to_string(),
            children,
        }
    }

    /// Build from a `段落` node.
    ///
    /// # Panics
    ///
    /// If `node` is not a paragraph. Callers dispatch on the tag first.
    pub fn from_node<N: XmlNode>(node: N) -> Self {
        assert_eq!(
            node.tag_name(),
            PARAGRAPH_TAG,
            "section must be built from a paragraph node"
        );
        let label = node.attribute(SECTION_LABEL_ATTR).unwrap_or_default().to_owned();
        let (content, children) = read_body(node);
        Self::new(&label, &content, children)
    }

    /// Render content and sub-items, prefixed by `label：` on its own line unless suppressed.
    pub fn stringify(&self, bullet: Option<&str>, suppress_label: bool) -> String {
        let body = join_blocks(&self.content, &self.render_children(bullet));
        if suppress_label {
            body
        } else {
            format!("{}{}\n{}", self.label, LABEL_SEPARATOR, body)
        }
    }
}

impl ItemTree for Section {
    fn content(&self) -> &str {
        &self.content
    }

    fn children(&self) -> &[DocumentItem] {
        &self.children
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify(None, false))
    }
}

/// `說明：` → `說明`. Only one trailing separator is removed.
pub fn normalize_label(raw: &str) -> &str {
    let raw = raw.trim();
    raw.strip_suffix(LABEL_SEPARATOR).unwrap_or(raw).trim_end()
}
