use crate::core::receiver::ReceiverKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two document schemas the parser understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    /// 函: an official letter with addressees.
    #[serde(rename = "函")]
    Letter,
    /// 簽: an internal memorandum.
    #[serde(rename = "簽")]
    Memo,
}

/// Where each field of a document kind lives, as child-tag paths from the root.
///
/// The organization path points at the container; the name is its first child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentLayout {
    pub kind: DocumentKind,
    pub root_tag: &'static str,
    pub organization: &'static [&'static str],
    pub date: &'static [&'static str],
    pub receivers: &'static [ReceiverKind],
}

/// Path of the subject text, shared by every kind.
pub const SUBJECT_PATH: &[&str] = &["主旨", "文字"];
pub const DESCRIPTION_LABEL: &str = "說明";
pub const ACTION_LABEL: &str = "擬辦";

const LETTER: DocumentLayout = DocumentLayout {
    kind: DocumentKind::Letter,
    root_tag: "函",
    organization: &["發文機關"],
    date: &["發文日期", "年月日"],
    receivers: &[ReceiverKind::Primary, ReceiverKind::Copy],
};

const MEMO: DocumentLayout = DocumentLayout {
    kind: DocumentKind::Memo,
    root_tag: "簽",
    organization: &["機關"],
    date: &["年月日"],
    receivers: &[],
};

/// Every supported kind. A root tag not listed here is rejected.
pub const LAYOUTS: &[DocumentLayout] = &[LETTER, MEMO];

impl DocumentLayout {
    /// Look up the layout whose root tag is `tag`.
    pub fn for_tag(tag: &str) -> Option<&'static DocumentLayout> {
        LAYOUTS.iter().find(|layout| layout.root_tag == tag)
    }

    /// Only kinds that list receiver categories carry receivers.
    pub fn supports_receivers(&self) -> bool {
        !self.receivers.is_empty()
    }
}

impl DocumentKind {
    pub fn layout(self) -> &'static DocumentLayout {
        match self {
            DocumentKind::Letter => &LETTER,
            DocumentKind::Memo => &MEMO,
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        DocumentLayout::for_tag(tag).map(|layout| layout.kind)
    }

    pub fn tag(self) -> &'static str {
        self.layout().root_tag
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_layout() {
        for kind in [DocumentKind::Letter, DocumentKind::Memo] {
            assert_eq!(kind.layout().kind, kind);
            assert_eq!(DocumentKind::from_tag(kind.tag()), Some(kind));
        }
    }

    #[test]
    fn test_unknown_tag_has_no_layout() {
        assert!(DocumentLayout::for_tag("公告").is_none());
        assert_eq!(DocumentKind::from_tag(""), None);
    }

    #[test]
    fn test_only_letters_carry_receivers() {
        assert!(DocumentKind::Letter.layout().supports_receivers());
        assert!(!DocumentKind::Memo.layout().supports_receivers());
        assert_eq!(
            DocumentKind::Letter.layout().receivers,
            &[ReceiverKind::Primary, ReceiverKind::Copy]
        );
    }
}
