//! Syntax highlighting for rendered README code blocks.

use anyhow::{Context, Result, anyhow};
use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// CSS class style shared by highlighted spans and the generated stylesheet.
const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hljs-" };

const BLOCK_OPEN: &str = "<pre><code";
const LANGUAGE_CLASS: &str = "class=\"language-";
const CODE_CLOSE: &str = "</code>";

/// Highlights `<pre><code>` blocks with syntect.
///
/// Loading the syntax definitions is the expensive part, so a highlighter
/// is only built once a page is known to contain code.
pub struct Highlighter {
    syntax_set: SyntaxSet,
}

impl Highlighter {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Highlights every code block in `html`.
    ///
    /// The content of each block is decoded, highlighted with CSS classes
    /// (`hljs-` prefix) and written back with the opening tag preserved.
    /// Blocks without a language class are detected from their first line
    /// (shebang, `<?php`, modelines). Blocks whose syntax cannot be found
    /// are left exactly as they were. Inline code is never touched.
    ///
    /// # Errors
    ///
    /// Returns error if syntect fails on a line.
    pub fn highlight_blocks(&self, html: &str) -> Result<String> {
        let mut result = String::with_capacity(html.len());
        let mut last_end = 0;
        let mut search_pos = 0;

        while let Some(block_start) = html[search_pos..].find(BLOCK_OPEN) {
            let block_start = search_pos + block_start;
            let tag_start = block_start + BLOCK_OPEN.len();

            // Skip `<pre><codefoo>` and similar
            if !matches!(html.as_bytes().get(tag_start), Some(b'>' | b' ')) {
                search_pos = tag_start;
                continue;
            }

            let content_start = match html[tag_start..].find('>') {
                Some(pos) => tag_start + pos + 1,
                None => break,
            };

            let content_end = match html[content_start..].find(CODE_CLOSE) {
                Some(pos) => content_start + pos,
                None => break,
            };

            let code = html_decode(&html[content_start..content_end]);
            let language = language_of(&html[tag_start..content_start]);

            let highlighted = self
                .highlight_code(&code, language)
                .with_context(|| {
                    format!("Failed to highlight {} code block", language.unwrap_or("unlabelled"))
                })?;

            if let Some(highlighted) = highlighted {
                result.push_str(&html[last_end..content_start]);
                result.push_str(&highlighted);
                last_end = content_end;
            }

            search_pos = content_end + CODE_CLOSE.len();
        }

        result.push_str(&html[last_end..]);
        Ok(result)
    }

    /// Returns `None` when no syntax matches the block.
    fn highlight_code(&self, code: &str, language: Option<&str>) -> Result<Option<String>> {
        if code.is_empty() {
            return Ok(None);
        }

        let syntax = match language {
            Some(language) => self
                .syntax_set
                .find_syntax_by_token(language)
                .or_else(|| self.syntax_set.find_syntax_by_extension(language)),
            None => self.syntax_set.find_syntax_by_first_line(code),
        };

        let Some(syntax) = syntax else {
            return Ok(None);
        };

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, CLASS_STYLE);

        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .context("Failed to parse line for syntax highlighting")?;
        }

        Ok(Some(generator.finalize()))
    }
}

/// First language token of a `<code ...>` tag's attribute text.
fn language_of(attributes: &str) -> Option<&str> {
    let start = attributes.find(LANGUAGE_CLASS)? + LANGUAGE_CLASS.len();
    let end = start + attributes[start..].find('"')?;

    // Sanitized class may carry several language tokens; use the first
    attributes[start..end].split_whitespace().next()
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates the stylesheet for highlighted spans from a bundled theme.
///
/// # Errors
///
/// Returns error if the theme is unknown or CSS generation fails.
pub fn stylesheet(theme_name: &str) -> Result<String> {
    let themes = ThemeSet::load_defaults();
    let theme = themes.themes.get(theme_name).ok_or_else(|| {
        let mut known: Vec<&str> = themes.themes.keys().map(String::as_str).collect();
        known.sort_unstable();
        anyhow!(
            "Unknown highlight theme '{}' (available: {})",
            theme_name,
            known.join(", ")
        )
    })?;

    css_for_theme_with_class_style(theme, CLASS_STYLE)
        .with_context(|| format!("Failed to generate CSS for theme {}", theme_name))
}

/// Reverses the escaping applied to text inside code elements.
fn html_decode(html: &str) -> String {
    html.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}
