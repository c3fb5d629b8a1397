use crate::core::writer::{
    JsonWriter, MarkdownWriter, OutputFormat, PlainTextWriter, Writer, DEFAULT_PLACEHOLDER,
};
use anyhow::{Context, Result};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Output settings. Every field is optional in the YAML file.
///
/// ```yaml
/// format: markdown
/// placeholder: "n/a"
/// description_bullet: "-"
/// strip_redundant_words: true
/// extra_redundant_words: ["查照"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub format: OutputFormat,
    pub placeholder: String,
    pub description_bullet: Option<String>,
    pub strip_redundant_words: bool,
    pub extra_redundant_words: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            description_bullet: Some("-".to_string()),
            strip_redundant_words: false,
            extra_redundant_words: Vec::new(),
        }
    }
}

impl ParserConfig {
    /// Writer for the configured format. Shared across batch worker threads.
    pub fn writer(&self) -> Box<dyn Writer + Send + Sync> {
        match self.format {
            OutputFormat::Markdown => Box::new(MarkdownWriter {
                description_bullet: self.description_bullet.clone(),
                strip_redundant_words: self.strip_redundant_words,
                extra_redundant_words: self.extra_redundant_words.clone(),
            }),
            OutputFormat::Text => Box::new(PlainTextWriter {
                placeholder: self.placeholder.clone(),
            }),
            OutputFormat::Json => Box::new(JsonWriter),
        }
    }
}

/// Load a YAML config file. An empty file yields the defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ParserConfig> {
    let path = path.as_ref();
    info!("Loading configuration from {}", path.display());

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    match serde_yaml::from_str::<Option<ParserConfig>>(&content) {
        Ok(config) => Ok(config.unwrap_or_default()),
        Err(e) => {
            error!("Failed to parse config {}: {}", path.display(), e);
            Err(anyhow::anyhow!("Failed to parse config YAML: {e}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(yaml: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let file = write_config("format: text\nplaceholder: 無\n");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.placeholder, "無");
        assert_eq!(config.description_bullet.as_deref(), Some("-"));
        assert!(!config.strip_redundant_words);
    }

    #[test]
    fn test_empty_config_is_default() {
        let file = write_config("");
        assert_eq!(load_config(file.path()).unwrap(), ParserConfig::default());
    }

    #[test]
    fn test_null_bullet_keeps_sequence_labels() {
        let file = write_config("description_bullet: null\nextra_redundant_words: [查照]\n");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.description_bullet, None);
        assert_eq!(config.extra_redundant_words, vec!["查照".to_string()]);
    }

    #[test]
    fn test_bad_config_is_an_error() {
        let file = write_config("format: pdf\n");
        assert!(load_config(file.path()).is_err());
        assert!(load_config("does/not/exist.yaml").is_err());
    }

    #[test]
    fn test_writer_matches_format() {
        let mut config = ParserConfig::default();
        assert_eq!(config.writer().extension(), "md");
        config.format = OutputFormat::Text;
        assert_eq!(config.writer().extension(), "txt");
        config.format = OutputFormat::Json;
        assert_eq!(config.writer().extension(), "json");
    }
}
