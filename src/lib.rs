//! README rendering pipeline for Git repositories.
//!
//! Fetches a repository README, renders Markdown or plain text to HTML,
//! sanitizes it, rewrites images through a same-origin proxy and inserts
//! the result through a UI port, loading rendering assets on demand.

mod assets;
mod classify;
mod config;
mod document;
mod error;
mod highlight;
mod loader;
mod markdown;
mod page;
mod proxy;
mod sanitize;
mod source;
mod ui;

pub use assets::{
    AssetHost, AssetKind, AssetLoader, AssetManifest, AssetRegistry, HIGHLIGHT_STYLESHEET,
    PAGE_STYLESHEET, write_stylesheets,
};
pub use classify::{ContentKind, classify, is_readme};
pub use config::Config;
pub use document::{ReadmeDocument, RenderedOutput};
pub use error::{AssetError, FetchError, ProxyUrlError, ReadmeError};
pub use highlight::{Highlighter, stylesheet as highlight_stylesheet};
pub use loader::{LOAD_FAILURE_MESSAGE, LoadOutcome, ReadmeLoader};
pub use markdown::{MarkdownRenderer, ReadmeHook};
pub use page::{Notification, StaticPage};
pub use proxy::{PROXY_PREFIX, decode_proxy_url, proxy_image_url};
pub use sanitize::{Element, NodeVisitor, NoopVisitor, SanitizePolicy, sanitize, sanitize_text};
pub use source::{GitReadmeSource, ReadmePayload, ReadmeRequest, ReadmeSource};
pub use ui::{NotificationKind, ReadmeView, Target};
