use crate::core::document::Document;
use crate::error::Result;
use crate::utils::text_filter::remove_redundant_words_with;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PLACEHOLDER: &str = "n/a";

/// Writer turns a parsed [`Document`] into display text.
pub trait Writer {
    fn render(&self, document: &Document) -> Result<String>;

    /// File extension used when the output is saved to disk.
    fn extension(&self) -> &'static str;
}

/// Output flavor selected on the command line or in the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Text,
    Json,
}

/// `kind | organization | date`, subject, description, action, one line per receiver.
#[derive(Debug, Clone)]
pub struct PlainTextWriter {
    /// Printed in place of a missing organization or date.
    pub placeholder: String,
}

impl Default for PlainTextWriter {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl PlainTextWriter {
    /// Render without a trailing newline. Labels of both sections are suppressed.
    pub fn format(&self, document: &Document) -> String {
        let mut lines = vec![
            format!(
                "{} | {} | {}",
                document.kind,
                document.organization.as_deref().unwrap_or(&self.placeholder),
                document.date.as_deref().unwrap_or(&self.placeholder),
            ),
            document.subject.clone(),
            document.description.stringify(None, true),
        ];

        // Empty action sections are skipped entirely
        if let Some(action) = document.action() {
            lines.push(action.stringify(None, true));
        }
        lines.extend(document.receivers().iter().map(ToString::to_string));

        lines.join("\n")
    }
}

impl Writer for PlainTextWriter {
    fn render(&self, document: &Document) -> Result<String> {
        Ok(self.format(document))
    }

    fn extension(&self) -> &'static str {
        "txt"
    }
}

/// Markdown with one `##` heading per part of the document.
#[derive(Debug, Clone)]
pub struct MarkdownWriter {
    /// Replaces every sequence label in the description, `None` keeps the originals.
    pub description_bullet: Option<String>,
    /// Shorten the subject with the redundant-word filter.
    pub strip_redundant_words: bool,
    /// Stripped after the built-in word list.
    pub extra_redundant_words: Vec<String>,
}

impl Default for MarkdownWriter {
    fn default() -> Self {
        Self {
            description_bullet: Some("-".to_string()),
            strip_redundant_words: false,
            extra_redundant_words: Vec::new(),
        }
    }
}

impl MarkdownWriter {
    /// Render as Markdown, ending with a single newline.
    pub fn format(&self, document: &Document) -> String {
        let subject = if self.strip_redundant_words {
            remove_redundant_words_with(&document.subject, &self.extra_redundant_words)
        } else {
            document.subject.clone()
        };

        let mut lines = vec![
            format!("# {}", document.kind),
            "## 主旨".to_string(),
            subject,
            "## 說明".to_string(),
            document
                .description
                .stringify(self.description_bullet.as_deref(), true),
        ];

        if let Some(action) = document.action() {
            lines.push("## 擬辦".to_string());
            lines.push(action.stringify(None, true));
        }

        // Receivers without a title are left out, and so is the heading when none remain
        let titled: Vec<_> = document.receivers().iter().filter(|r| r.has_title()).collect();
        if !titled.is_empty() {
            lines.push("## 收文者".to_string());
            lines.extend(titled.iter().map(|r| format!("- {}: {}", r.kind, r.title)));
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

impl Writer for MarkdownWriter {
    fn render(&self, document: &Document) -> Result<String> {
        Ok(self.format(document))
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}

/// Pretty-printed JSON of the whole document model.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWriter;

impl Writer for JsonWriter {
    fn render(&self, document: &Document) -> Result<String> {
        Ok(serde_json::to_string_pretty(document)?)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
