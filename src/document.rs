//! README documents and their rendered form.

use crate::classify::{ContentKind, classify};
use crate::source::ReadmePayload;
use crate::ui::{ReadmeView, Target};

/// README content as fetched, with its derived kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeDocument {
    file_name: String,
    raw_content: String,
    kind: ContentKind,
}

impl ReadmeDocument {
    /// Creates a document, classifying it by file name.
    pub fn new(file_name: impl Into<String>, raw_content: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let kind = classify(&file_name);
        Self {
            file_name,
            raw_content: raw_content.into(),
            kind,
        }
    }

    /// File name as reported by the source, unsanitized.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Raw README content, unsanitized.
    pub fn raw_content(&self) -> &str {
        &self.raw_content
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }
}

impl From<ReadmePayload> for ReadmeDocument {
    fn from(payload: ReadmePayload) -> Self {
        Self::new(payload.file_name, payload.content)
    }
}

/// Sanitized HTML ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutput {
    html: String,
    has_code: bool,
}

impl RenderedOutput {
    pub(crate) fn new(html: String, has_code: bool) -> Self {
        Self { html, has_code }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// True when a `code` element survived sanitization.
    pub fn has_code(&self) -> bool {
        self.has_code
    }

    /// Replaces the target's content, then highlights code if present.
    ///
    /// Highlighter assets must already be loaded when `has_code` is set;
    /// no suspension happens between insertion and highlighting.
    pub fn insert_into<V: ReadmeView + ?Sized>(&self, view: &V, target: Target) {
        view.insert_into(target, &self.html);
        if self.has_code {
            view.highlight_all();
        }
    }
}
