//! HTML sanitization for untrusted README content.
//!
//! Filtering is done by ammonia under a [`SanitizePolicy`]. A second pass
//! hands each surviving start tag to a [`NodeVisitor`], which can annotate
//! or rewrite it after filtering.

mod policy;
mod visit;

pub use policy::SanitizePolicy;
pub use visit::{Element, NodeVisitor, NoopVisitor};

/// Sanitizes HTML under `policy`, then visits each surviving element.
///
/// Disallowed elements are unwrapped, keeping their text. Disallowed
/// attributes and comments are removed. Never fails and is deterministic.
///
/// # Examples
///
/// ```
/// use readme_render::{NoopVisitor, SanitizePolicy, sanitize};
///
/// let html = sanitize("<b>bold</b> <em>kept</em>", &SanitizePolicy::rich_text(), &mut NoopVisitor);
/// assert_eq!(html, "bold <em>kept</em>");
/// ```
pub fn sanitize<V: NodeVisitor + ?Sized>(html: &str, policy: &SanitizePolicy, visitor: &mut V) -> String {
    let cleaned = policy.builder().clean(html).to_string();
    visit::visit_elements(&cleaned, visitor)
}

/// Strips all markup, leaving escaped text.
pub fn sanitize_text(text: &str) -> String {
    sanitize(text, &SanitizePolicy::plain_text(), &mut NoopVisitor)
}
