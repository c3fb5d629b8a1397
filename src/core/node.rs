use crate::error::{DocumentError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::{BufReader, Read};

/// Minimal read-only view over a generic markup tree.
///
/// Parsing only ever asks a node for its tag, an attribute, its element children and
/// its own text, so any tree library can feed the document model through this trait.
pub trait XmlNode: Copy {
    /// Local tag name, without any namespace prefix.
    fn tag_name(&self) -> &str;

    fn attribute(&self, name: &str) -> Option<&str>;

    /// Element children in document order. Text and comment nodes are not included.
    fn children(&self) -> Vec<Self>;

    /// Direct text content, concatenated across comments, CDATA and processing
    /// instructions. `None` when the node holds no text at all.
    fn text(&self) -> Option<Cow<'_, str>>;

    /// First element child with the given tag.
    fn find_first(&self, tag: &str) -> Option<Self> {
        self.children().into_iter().find(|child| child.tag_name() == tag)
    }

    /// Every element child with the given tag, in document order.
    fn find_all(&self, tag: &str) -> Vec<Self> {
        self.children()
            .into_iter()
            .filter(|child| child.tag_name() == tag)
            .collect()
    }

    fn first_child(&self) -> Option<Self> {
        self.children().into_iter().next()
    }

    /// Follow `path` one child tag at a time; `None` as soon as any step is missing.
    fn find_path(&self, path: &[&str]) -> Option<Self> {
        path.iter().try_fold(*self, |node, tag| node.find_first(tag))
    }
}

impl<'a, 'input: 'a> XmlNode for roxmltree::Node<'a, 'input> {
    fn tag_name(&self) -> &str {
        roxmltree::Node::tag_name(self).name()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        roxmltree::Node::attribute(self, name)
    }

    fn children(&self) -> Vec<Self> {
        roxmltree::Node::children(self)
            .filter(|n| n.is_element())
            .collect()
    }

    fn text(&self) -> Option<Cow<'_, str>> {
        let mut fragments = roxmltree::Node::children(self)
            .filter(|n| n.is_text())
            .filter_map(|n| n.text());

        // The common case is a single text node, which can be borrowed as is
        let first = fragments.next()?;
        match fragments.next() {
            None => Some(Cow::Borrowed(first)),
            Some(second) => {
                let mut joined = String::from(first);
                joined.push_str(second);
                fragments.for_each(|rest| joined.push_str(rest));
                Some(Cow::Owned(joined))
            }
        }
    }
}

/// Parse markup with roxmltree. `.di` exchange files usually carry a DOCTYPE, so DTDs are allowed.
pub fn parse_xml(text: &str) -> Result<roxmltree::Document<'_>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut options = roxmltree::ParsingOptions::default();
    options.allow_dtd = true;
    Ok(roxmltree::Document::parse_with_options(text, options)?)
}

/// Owned markup tree.
///
/// Built by hand with the builder methods, or from any byte stream through quick-xml
/// when the input does not live in a single borrowed string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<Element>,
    pub text: Option<String>,
}

impl Element {
    /// Empty element with no attributes, children or text.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Element holding only text, e.g. `<文字>...</文字>`.
    pub fn leaf(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    /// Build an owned tree from markup held in memory.
    pub fn parse_str(markup: &str) -> Result<Self> {
        Self::from_reader(markup.as_bytes())
    }

    /// Materialize the whole stream into an owned tree. Namespace prefixes are dropped.
    ///
    /// Text is kept verbatim, whitespace included, so an owned tree holds the same text
    /// as a roxmltree parse of the same markup.
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        let mut reader = Reader::from_reader(BufReader::new(source));

        let mut buf = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut root = None;

        loop {
            // Open elements live on the stack until their end tag attaches them to the parent
            match reader.read_event_into(&mut buf)? {
                Event::Start(start) => stack.push(Self::from_start(&start)?),
                Event::Empty(start) => {
                    let element = Self::from_start(&start)?;
                    Self::attach(&mut stack, &mut root, element);
                }
                Event::End(_) => {
                    if let Some(element) = stack.pop() {
                        Self::attach(&mut stack, &mut root, element);
                    }
                }
                Event::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        current.push_text(&text.unescape()?);
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = stack.last_mut() {
                        current.push_text(&String::from_utf8_lossy(&data));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        // Anything still open means the stream stopped early
        if let Some(open) = stack.pop() {
            return Err(DocumentError::Truncated(open.name));
        }
        root.ok_or(DocumentError::EmptySource)
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let mut element = Self::new(String::from_utf8_lossy(start.local_name().as_ref()));
        for attribute in start.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            if attribute.key.as_ref().starts_with(b"xmlns") {
                continue;
            }
            let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
            let value = attribute.unescape_value()?.into_owned();
            element.attributes.insert(key, value);
        }
        Ok(element)
    }

    fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
        match stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None if root.is_none() => *root = Some(element),
            None => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        match &mut self.text {
            Some(existing) => existing.push_str(text),
            None => self.text = Some(text.to_owned()),
        }
    }
}

impl<'a> XmlNode for &'a Element {
    fn tag_name(&self) -> &str {
        &self.name
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn children(&self) -> Vec<Self> {
        let element: &'a Element = *self;
        element.children.iter().collect()
    }

    fn text(&self) -> Option<Cow<'_, str>> {
        self.text.as_deref().map(Cow::Borrowed)
    }
}
