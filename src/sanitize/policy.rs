//! Sanitization policies.

use ammonia::{Builder, UrlRelative};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Elements whose content the HTML parser treats as raw text.
///
/// Never admitted by a policy: their content is not escaped on output.
const RAW_TEXT_TAGS: &[&str] = &[
    "script",
    "style",
    "iframe",
    "noscript",
    "xmp",
    "noembed",
    "noframes",
    "plaintext",
];

/// Tags kept in rendered Markdown.
const RICH_TEXT_TAGS: &[&str] = &[
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "p",
    "ul",
    "ol",
    "li",
    "em",
    "strong",
    "italic",
    "code",
    "a",
    "blockquote",
    "pre",
    "hr",
    "img",
];

const URL_SCHEMES: &[&str] = &["http", "https", "mailto", "data"];

/// Value of the `rel` attribute forced onto every kept link.
const LINK_REL: &str = "noopener noreferrer";

/// Tags and attributes that survive sanitization.
///
/// Disallowed markup is removed but its text is always kept, so content
/// degrades to plain text instead of disappearing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizePolicy {
    allowed_tags: BTreeSet<String>,
    tag_attributes: BTreeMap<String, BTreeSet<String>>,
    keep_content: bool,
}

impl SanitizePolicy {
    /// Creates a policy allowing `tags` without any attributes.
    ///
    /// Tag names are lowercased. Raw-text elements such as `script` and
    /// `style` are ignored.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed_tags = tags
            .into_iter()
            .map(|tag| tag.as_ref().to_ascii_lowercase())
            .filter(|tag| !RAW_TEXT_TAGS.contains(&tag.as_str()))
            .collect();

        Self {
            allowed_tags,
            tag_attributes: BTreeMap::new(),
            keep_content: true,
        }
    }

    /// Allows attributes on a tag.
    ///
    /// Event handlers (`on*`) and `rel` are never admitted; `rel` is set on
    /// links by the sanitizer itself.
    pub fn with_attributes<I, S>(mut self, tag: &str, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entry = self
            .tag_attributes
            .entry(tag.to_ascii_lowercase())
            .or_default();

        for attribute in attributes {
            let attribute = attribute.as_ref().to_ascii_lowercase();
            if attribute.starts_with("on") || attribute == "rel" {
                continue;
            }
            entry.insert(attribute);
        }

        self
    }

    /// No tags, keep text. Used for file names and plain text bodies.
    pub fn plain_text() -> Self {
        Self::new(std::iter::empty::<&str>())
    }

    /// Restricted rich text subset kept in rendered Markdown.
    pub fn rich_text() -> Self {
        Self::new(RICH_TEXT_TAGS)
            .with_attributes("a", ["href", "title"])
            .with_attributes("img", ["src", "alt", "title"])
            .with_attributes("code", ["class"])
    }

    pub fn allowed_tags(&self) -> impl Iterator<Item = &str> {
        self.allowed_tags.iter().map(String::as_str)
    }

    pub fn allows_tag(&self, tag: &str) -> bool {
        self.allowed_tags.contains(&tag.to_ascii_lowercase())
    }

    /// Always true: sanitization never drops text.
    pub fn keep_content(&self) -> bool {
        self.keep_content
    }

    /// Builds the ammonia cleaner for this policy.
    pub(super) fn builder(&self) -> Builder<'_> {
        let tags: HashSet<&str> = self.allowed_tags.iter().map(String::as_str).collect();
        let tag_attributes: HashMap<&str, HashSet<&str>> = self
            .tag_attributes
            .iter()
            .map(|(tag, attributes)| {
                (
                    tag.as_str(),
                    attributes.iter().map(String::as_str).collect(),
                )
            })
            .collect();

        let mut builder = Builder::empty();
        builder
            .tags(tags)
            .clean_content_tags(HashSet::new())
            .tag_attributes(tag_attributes)
            .url_schemes(URL_SCHEMES.iter().copied().collect())
            .url_relative(UrlRelative::PassThrough)
            .link_rel(Some(LINK_REL))
            .strip_comments(true)
            .attribute_filter(filter_attribute);
        builder
    }
}

/// Drops `data:` links and keeps only `language-*` classes on code.
fn filter_attribute<'u>(element: &str, attribute: &str, value: &'u str) -> Option<Cow<'u, str>> {
    match (element, attribute) {
        ("a", "href") if value.trim_start().to_ascii_lowercase().starts_with("data:") => None,
        ("code", "class") => {
            let classes: Vec<&str> = value
                .split_whitespace()
                .filter(|class| class.starts_with("language-"))
                .collect();
            if classes.is_empty() {
                None
            } else {
                Some(Cow::Owned(classes.join(" ")))
            }
        }
        _ => Some(Cow::Borrowed(value)),
    }
}
