use crate::core::document::Document;
use crate::core::item::{normalize_label, Section, PARAGRAPH_TAG, SECTION_LABEL_ATTR};
use crate::core::layout::{DocumentLayout, ACTION_LABEL, DESCRIPTION_LABEL, SUBJECT_PATH};
use crate::core::node::{parse_xml, Element, XmlNode};
use crate::core::receiver::Receiver;
use crate::error::{DocumentError, Result};
use log::{debug, info, warn};
use memmap2::Mmap;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Files above this size are memory-mapped instead of read into a string.
const MMAP_THRESHOLD: u64 = 10 * 1024 * 1024;

/// Where a document comes from.
pub enum Source<'a> {
    /// A `.di` / `.xml` file on disk
    Path(&'a Path),
    /// Literal markup
    Markup(&'a str),
    /// Any byte stream, e.g. standard input
    Reader(Box<dyn Read + 'a>),
}

impl<'a> Source<'a> {
    /// Decide whether `input` is markup or a path to a file holding it.
    pub fn detect(input: &'a str) -> Self {
        let trimmed = input.trim_start_matches('\u{feff}').trim_start();
        if trimmed.starts_with('<') {
            return Source::Markup(input);
        }

        let path = Path::new(input);
        if path.exists() {
            Source::Path(path)
        } else {
            Source::Markup(input)
        }
    }

    /// Wrap a byte stream. The whole stream is read before parsing starts.
    pub fn reader(reader: impl Read + 'a) -> Self {
        Source::Reader(Box::new(reader))
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(input: &'a str) -> Self {
        Source::detect(input)
    }
}

impl<'a> From<&'a Path> for Source<'a> {
    fn from(path: &'a Path) -> Self {
        Source::Path(path)
    }
}

impl<'a> From<&'a PathBuf> for Source<'a> {
    fn from(path: &'a PathBuf) -> Self {
        Source::Path(path.as_path())
    }
}

/// Parse a document from a path, a markup string or a reader.
pub fn document_from_xml<'a>(source: impl Into<Source<'a>>) -> Result<Document> {
    match source.into() {
        Source::Path(path) => parse_path(path),
        Source::Markup(markup) => parse_str(markup),
        Source::Reader(reader) => parse_reader(reader),
    }
}

/// Parse markup held in memory.
pub fn parse_str(markup: &str) -> Result<Document> {
    let tree = parse_xml(markup)?;
    Document::from_node(tree.root_element())
}

/// Parse a document file, memory-mapping it when it is larger than 10 MiB.
pub fn parse_path(path: &Path) -> Result<Document> {
    let size = fs::metadata(path)?.len();
    info!("Parsing {} ({} bytes)", path.display(), size);

    if size > MMAP_THRESHOLD {
        let file = File::open(path)?;
        // SAFETY: the mapping is read-only and dropped before this function returns.
        let mmap = unsafe { Mmap::map(&file)? };
        parse_str(std::str::from_utf8(&mmap)?)
    } else {
        parse_str(&fs::read_to_string(path)?)
    }
}

/// Streams are materialized into an owned tree before parsing begins.
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    let root = Element::from_reader(reader)?;
    Document::from_node(&root)
}

/// Trimmed text of `node`; blank text counts as absent.
fn trimmed_text<N: XmlNode>(node: N) -> Option<String> {
    let text = node.text()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_owned())
}

impl Document {
    /// Build a document from its root node, dispatching on the root tag.
    pub fn from_node<N: XmlNode>(root: N) -> Result<Self> {
        let tag = root.tag_name();
        let layout = DocumentLayout::for_tag(tag).ok_or_else(|| DocumentError::unsupported(tag))?;
        debug!("Root tag `{}` parsed as {:?}", tag, layout.kind);

        // Soft fields: absent or blank text becomes None
        let organization = root
            .find_path(layout.organization)
            .and_then(|container| container.first_child())
            .and_then(trimmed_text);
        let date = root.find_path(layout.date).and_then(trimmed_text);

        // Subject is required, but its text may be empty
        let subject = root
            .find_path(SUBJECT_PATH)
            .map(|text| text.text().unwrap_or_default().trim().to_owned())
            .ok_or_else(|| DocumentError::missing("主旨"))?;

        // Sort paragraphs into description and action by their label
        let mut description = None;
        let mut action = None;
        for paragraph in root.find_all(PARAGRAPH_TAG) {
            let label = normalize_label(paragraph.attribute(SECTION_LABEL_ATTR).unwrap_or_default());
            let slot = match label {
                DESCRIPTION_LABEL => &mut description,
                ACTION_LABEL => &mut action,
                _ => {
                    debug!("Ignoring paragraph labeled `{}`", label);
                    continue;
                }
            };
            if slot.is_some() {
                warn!("Duplicate `{}` paragraph, keeping the last one", label);
            }
            *slot = Some(Section::from_node(paragraph));
        }
        let description = description.ok_or_else(|| DocumentError::missing(DESCRIPTION_LABEL))?;

        // At most one receiver per category, in the layout's order
        let receivers = layout.supports_receivers().then(|| {
            layout
                .receivers
                .iter()
                .filter_map(|kind| root.find_first(kind.tag()))
                .map(Receiver::from_node)
                .collect::<Vec<_>>()
        });

        Ok(Self {
            kind: layout.kind,
            organization,
            date,
            subject,
            description,
            action,
            receivers,
        })
    }
}
