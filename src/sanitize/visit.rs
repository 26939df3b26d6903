//! Element visitor pass over sanitized HTML.
//!
//! Runs after filtering, so only surviving elements are visited. The
//! sanitizer output is tokenized with html5ever and written back through
//! its HTML serializer, which owns entity decoding and escaping.

use html5ever::buffer_queue::BufferQueue;
use html5ever::serialize::{HtmlSerializer, SerializeOpts, Serializer};
use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts};
use html5ever::{LocalName, QualName, ns};
use std::cell::RefCell;
use std::io;
use tracing::warn;

/// Elements serialized without an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Start tag of a surviving element, open for annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
}

impl Element {
    /// Lowercase tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Decoded attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Sets an attribute, replacing any existing value in place.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes.retain(|(key, _)| key != name);
    }

    /// Adds whitespace separated classes not already present.
    pub fn add_class(&mut self, classes: &str) {
        let mut current: Vec<String> = self
            .attribute("class")
            .map(|value| value.split_whitespace().map(String::from).collect())
            .unwrap_or_default();

        for class in classes.split_whitespace() {
            if !current.iter().any(|existing| existing == class) {
                current.push(class.to_string());
            }
        }

        if !current.is_empty() {
            self.set_attribute("class", current.join(" "));
        }
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    fn from_tag(tag: Tag) -> Self {
        Self {
            name: tag.name.to_string(),
            attributes: tag
                .attrs
                .into_iter()
                .map(|attribute| (attribute.name.local.to_string(), attribute.value.to_string()))
                .collect(),
        }
    }

    fn serialize<S: Serializer>(&self, serializer: &mut S) -> io::Result<()> {
        let name = html_name(&self.name);
        let keys: Vec<QualName> = self
            .attributes
            .iter()
            .map(|(key, _)| QualName::new(None, ns!(), LocalName::from(key.as_str())))
            .collect();
        let values = self.attributes.iter().map(|(_, value)| value.as_str());

        serializer.start_elem(name.clone(), keys.iter().zip(values))?;
        if VOID_ELEMENTS.contains(&self.name.as_str()) {
            serializer.end_elem(name)?;
        }
        Ok(())
    }
}

/// Callback run on every surviving element.
pub trait NodeVisitor {
    fn visit(&mut self, element: &mut Element);
}

impl<F: FnMut(&mut Element)> NodeVisitor for F {
    fn visit(&mut self, element: &mut Element) {
        self(element)
    }
}

/// Visitor that leaves every element untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopVisitor;

impl NodeVisitor for NoopVisitor {
    fn visit(&mut self, _element: &mut Element) {}
}

/// Runs `visitor` over each start tag in document order and re-serializes.
///
/// Text, comments and end tags are written back as tokenized.
pub(crate) fn visit_elements<V: NodeVisitor + ?Sized>(html: &str, visitor: &mut V) -> String {
    let opts = SerializeOpts {
        create_missing_parent: true,
        ..SerializeOpts::default()
    };
    let sink = VisitSink {
        visitor: RefCell::new(visitor),
        serializer: RefCell::new(HtmlSerializer::new(Vec::with_capacity(html.len()), opts)),
    };

    let input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(html));

    let tokenizer = Tokenizer::new(sink, TokenizerOpts::default());
    let _ = tokenizer.feed(&input);
    tokenizer.end();

    let output = tokenizer.sink.serializer.into_inner().writer;
    String::from_utf8_lossy(&output).into_owned()
}

fn html_name(name: &str) -> QualName {
    QualName::new(None, ns!(html), LocalName::from(name))
}

struct VisitSink<'v, V: ?Sized> {
    visitor: RefCell<&'v mut V>,
    serializer: RefCell<HtmlSerializer<Vec<u8>>>,
}

impl<V: NodeVisitor + ?Sized> TokenSink for VisitSink<'_, V> {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        let mut serializer = self.serializer.borrow_mut();

        let written = match token {
            Token::TagToken(tag) => match tag.kind {
                TagKind::StartTag => {
                    let mut element = Element::from_tag(tag);
                    self.visitor.borrow_mut().visit(&mut element);
                    element.serialize(&mut *serializer)
                }
                TagKind::EndTag => serializer.end_elem(html_name(&tag.name)),
            },
            Token::CharacterTokens(text) => serializer.write_text(&text),
            Token::CommentToken(text) => serializer.write_comment(&text),
            _ => Ok(()),
        };

        if let Err(e) = written {
            warn!("Failed to serialize visited HTML: {}", e);
        }
        TokenSinkResult::Continue
    }
}
