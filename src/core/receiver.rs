use crate::core::node::XmlNode;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

pub const TITLE_TAG: &str = "全銜";

/// Receiver category: primary (正本) or copy (副本).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReceiverKind {
    #[serde(rename = "正本")]
    Primary,
    #[serde(rename = "副本")]
    Copy,
}

impl ReceiverKind {
    pub const ALL: [ReceiverKind; 2] = [ReceiverKind::Primary, ReceiverKind::Copy];

    /// Tag of the receiver node in the source markup.
    pub fn tag(self) -> &'static str {
        match self {
            ReceiverKind::Primary => "正本",
            ReceiverKind::Copy => "副本",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

impl fmt::Display for ReceiverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// An addressee of a letter. An empty `title` means the source named no one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receiver {
    pub kind: ReceiverKind,
    pub title: String,
}

impl Receiver {
    pub fn new(kind: ReceiverKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into().trim().to_string(),
        }
    }

    /// Build from a `正本` / `副本` node.
    ///
    /// # Panics
    ///
    /// If `node` is not a receiver tag.
    pub fn from_node<N: XmlNode>(node: N) -> Self {
        let Some(kind) = ReceiverKind::from_tag(node.tag_name()) else {
            panic!(
                "receiver must be built from a 正本 or 副本 node, got `{}`",
                node.tag_name()
            );
        };

        let title = node
            .find_first(TITLE_TAG)
            .and_then(|title| title.text().map(Cow::into_owned))
            .unwrap_or_default();

        Self::new(kind, title)
    }

    /// Whether the source named an addressee.
    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }
}

impl fmt::Display for Receiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.kind, self.title)
    }
}
