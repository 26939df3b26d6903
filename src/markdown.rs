//! Markdown rendering for README content.
//!
//! Markdown is converted with comrak, then sanitized under the rich text
//! policy while a hook styles headings and images, routes images through
//! the proxy and detects code.

mod hooks;
mod renderer;

pub use hooks::ReadmeHook;
pub use renderer::MarkdownRenderer;
