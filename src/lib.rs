pub mod core {
    pub mod date;
    pub mod document;
    pub mod item;
    pub mod layout;
    pub mod node;
    pub mod parser;
    pub mod receiver;
    pub mod writer;
}

pub mod utils {
    pub mod document_processor;
    pub mod text_filter;
}

pub mod cli;
pub mod config;
pub mod error;

pub use crate::core::document::Document;
pub use crate::core::item::{DocumentItem, ItemTree, Section};
pub use crate::core::layout::DocumentKind;
pub use crate::core::node::{Element, XmlNode};
pub use crate::core::parser::{document_from_xml, Source};
pub use crate::core::receiver::{Receiver, ReceiverKind};
pub use crate::core::writer::{MarkdownWriter, OutputFormat, PlainTextWriter, Writer};
pub use crate::error::{DocumentError, Result};
pub use crate::utils::text_filter::remove_redundant_words;
