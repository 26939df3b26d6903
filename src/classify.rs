//! README content classification.

/// How README content is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// Rendered through the Markdown converter
    Markdown,
    /// Shown as sanitized text
    PlainText,
}

/// Classifies content by file name.
///
/// Markdown is recognized case insensitively by the `.md` and `.markdown`
/// extensions. Everything else, including extensionless READMEs, is plain
/// text.
///
/// # Examples
///
/// ```
/// use readme_render::{ContentKind, classify};
///
/// assert_eq!(classify("README.MD"), ContentKind::Markdown);
/// assert_eq!(classify("README.txt"), ContentKind::PlainText);
/// ```
pub fn classify(file_name: &str) -> ContentKind {
    let lowered = file_name.to_lowercase();

    if lowered.ends_with(".md") || lowered.ends_with(".markdown") {
        ContentKind::Markdown
    } else {
        ContentKind::PlainText
    }
}

/// Checks if a file name names a README
///
/// Matches any name starting with "readme" regardless of case, so
/// README, README.md, readme.rst and Readme.markdown all qualify.
pub fn is_readme(file_name: &str) -> bool {
    file_name.to_lowercase().starts_with("readme")
}
