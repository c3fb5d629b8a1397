use crate::core::date::parse_issue_date;
use crate::core::item::{ItemTree, Section};
use crate::core::layout::DocumentKind;
use crate::core::receiver::Receiver;
use crate::core::writer::PlainTextWriter;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed 函 or 簽. Built once by the parser and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub kind: DocumentKind,
    pub organization: Option<String>,
    pub date: Option<String>,
    pub subject: String,
    pub description: Section,
    pub action: Option<Section>,
    /// `Some` only for kinds that address receivers, even when none are listed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receivers: Option<Vec<Receiver>>,
}

impl Document {
    /// Receivers in category order. Empty for kinds without receivers.
    pub fn receivers(&self) -> &[Receiver] {
        self.receivers.as_deref().unwrap_or_default()
    }

    /// The action section, if it exists and has something to render.
    pub fn action(&self) -> Option<&Section> {
        self.action.as_ref().filter(|action| !action.is_empty())
    }

    /// Calendar date of issue, when the raw date can be read as one.
    pub fn issued_on(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_issue_date)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&PlainTextWriter::default().format(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::item::DocumentItem;
    use crate::core::receiver::ReceiverKind;

    fn letter() -> Document {
        Document {
            kind: DocumentKind::Letter,
            organization: Some("測試機關".to_string()),
            date: Some("中華民國113年5月1日".to_string()),
            subject: "測試主旨".to_string(),
            description: Section::new("說明", "", vec![DocumentItem::new("一、", "甲", vec![])]),
            action: Some(Section::new("擬辦", "", vec![])),
            receivers: Some(vec![Receiver::new(ReceiverKind::Primary, "XX機關")]),
        }
    }

    #[test]
    fn test_empty_action_is_hidden() {
        let document = letter();
        assert!(document.action.is_some());
        assert!(document.action().is_none());
    }

    #[test]
    fn test_issued_on_reads_roc_date() {
        assert_eq!(letter().issued_on(), NaiveDate::from_ymd_opt(2024, 5, 1));

        let undated = Document { date: None, ..letter() };
        assert_eq!(undated.issued_on(), None);

        let absurd = Document {
            date: Some("2147483000年1月1日".to_string()),
            ..letter()
        };
        assert_eq!(absurd.issued_on(), None);
    }

    #[test]
    fn test_receivers_default_to_empty_slice() {
        let memo = Document {
            kind: DocumentKind::Memo,
            receivers: None,
            ..letter()
        };
        assert!(memo.receivers().is_empty());
        assert_eq!(letter().receivers().len(), 1);
    }

    #[test]
    fn test_json_shape() {
        let memo = Document {
            kind: DocumentKind::Memo,
            receivers: None,
            ..letter()
        };
        let value = serde_json::to_value(&memo).unwrap();

        assert_eq!(value["kind"], "簽");
        assert_eq!(value["description"]["children"][0]["sequence"], "一、");
        assert!(value.get("receivers").is_none());

        let back: Document = serde_json::from_value(value).unwrap();
        assert_eq!(back, memo);
    }
}
