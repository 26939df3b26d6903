//! Lazy loading of rendering assets.
//!
//! Scripts and stylesheets are loaded through an [`AssetHost`] at most once
//! per [`AssetRegistry`], and only when a rendering step needs them. Every
//! load is awaited, so dependent steps never run before their asset is
//! ready.

mod bundle;
mod registry;

pub use bundle::{HIGHLIGHT_STYLESHEET, PAGE_STYLESHEET, write_stylesheets};
pub use registry::{AssetKind, AssetRegistry};

use std::future::Future;
use std::sync::Arc;
use tracing::debug;

use crate::error::AssetError;

/// Places that can fetch and initialize external assets.
pub trait AssetHost {
    /// Loads a script and resolves once it is initialized.
    fn load_script(&self, url: &str) -> impl Future<Output = Result<(), AssetError>>;

    /// Loads a stylesheet and resolves once it is applied.
    fn load_style(&self, url: &str) -> impl Future<Output = Result<(), AssetError>>;
}

impl<T: AssetHost + ?Sized> AssetHost for &T {
    fn load_script(&self, url: &str) -> impl Future<Output = Result<(), AssetError>> {
        (**self).load_script(url)
    }

    fn load_style(&self, url: &str) -> impl Future<Output = Result<(), AssetError>> {
        (**self).load_style(url)
    }
}

impl<T: AssetHost + ?Sized> AssetHost for Arc<T> {
    fn load_script(&self, url: &str) -> impl Future<Output = Result<(), AssetError>> {
        (**self).load_script(url)
    }

    fn load_style(&self, url: &str) -> impl Future<Output = Result<(), AssetError>> {
        (**self).load_style(url)
    }
}

/// URLs of the assets the README pipeline loads on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetManifest {
    /// Markdown to HTML converter
    pub markdown_script: String,
    /// HTML sanitizer
    pub sanitizer_script: String,
    /// Syntax highlighter
    pub highlighter_script: String,
    /// Syntax highlighter theme
    pub highlighter_style: String,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            markdown_script: "/static/js/third_party/marked.min.js".to_string(),
            sanitizer_script: "/static/js/third_party/purify.min.js".to_string(),
            highlighter_script: "/static/js/third_party/highlight.min.js".to_string(),
            highlighter_style: "/static/css/third_party/highlight.min.css".to_string(),
        }
    }
}

/// Loads assets exactly once through a host.
pub struct AssetLoader<H> {
    host: H,
    manifest: AssetManifest,
    registry: AssetRegistry,
}

impl<H: AssetHost> AssetLoader<H> {
    /// Creates a loader with a fresh registry.
    pub fn new(host: H, manifest: AssetManifest) -> Self {
        Self::with_registry(host, manifest, AssetRegistry::new())
    }

    /// Creates a loader sharing an existing registry.
    pub fn with_registry(host: H, manifest: AssetManifest, registry: AssetRegistry) -> Self {
        Self {
            host,
            manifest,
            registry,
        }
    }

    pub fn manifest(&self) -> &AssetManifest {
        &self.manifest
    }

    pub fn registry(&self) -> &AssetRegistry {
        &self.registry
    }

    /// Ensures a script is loaded, waiting for an in-flight load if any.
    ///
    /// # Errors
    ///
    /// Returns error if the host fails to load the script. The failure is
    /// not recorded; a later call retries.
    pub async fn ensure_script(&self, url: &str) -> Result<(), AssetError> {
        self.ensure(AssetKind::Script, url).await
    }

    /// Ensures a stylesheet is loaded, waiting for an in-flight load if any.
    ///
    /// # Errors
    ///
    /// Returns error if the host fails to load the stylesheet.
    pub async fn ensure_style(&self, url: &str) -> Result<(), AssetError> {
        self.ensure(AssetKind::Style, url).await
    }

    async fn ensure(&self, kind: AssetKind, url: &str) -> Result<(), AssetError> {
        let slot = self.registry.slot(kind, url);

        slot.get_or_try_init(|| async {
            debug!(?kind, url, "Loading asset");
            match kind {
                AssetKind::Script => self.host.load_script(url).await,
                AssetKind::Style => self.host.load_style(url).await,
            }
        })
        .await?;

        Ok(())
    }
}
