//! Markdown to sanitized HTML rendering.

use comrak::Options;

use super::ReadmeHook;
use crate::assets::{AssetHost, AssetLoader};
use crate::document::RenderedOutput;
use crate::error::AssetError;
use crate::sanitize::{SanitizePolicy, sanitize};
use crate::ui::{ReadmeView, Target};

/// Renders README Markdown to sanitized HTML.
///
/// Conversion uses comrak with GitHub style autolinks, strikethrough,
/// tables and task lists. Raw HTML is passed through by the converter and
/// removed or reduced by the sanitizer, which runs on every render. The
/// converter, sanitizer and highlighter assets are loaded through the
/// [`AssetLoader`] before the step that needs them.
pub struct MarkdownRenderer<'a, H> {
    assets: &'a AssetLoader<H>,
    options: Options<'a>,
}

impl<'a, H: AssetHost> MarkdownRenderer<'a, H> {
    /// Creates a renderer loading its assets through `assets`.
    pub fn new(assets: &'a AssetLoader<H>) -> Self {
        let mut options = Options::default();

        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;

        // Raw HTML is left to the sanitizer
        options.render.unsafe_ = true;

        Self { assets, options }
    }

    /// Converts Markdown to unsanitized HTML.
    ///
    /// Only the conversion step; output must go through [`sanitize`] before
    /// it reaches a page.
    pub fn to_html(&self, markdown: &str) -> String {
        comrak::markdown_to_html(markdown, &self.options)
    }

    /// Renders Markdown to sanitized HTML ready for insertion.
    ///
    /// Loads the converter and sanitizer assets first. If the sanitized
    /// output contains code, the highlighter script and stylesheet are
    /// loaded before returning, so insertion and highlighting can follow
    /// without suspending.
    ///
    /// # Errors
    ///
    /// Returns error if any required asset fails to load.
    pub async fn render(&self, markdown: &str) -> Result<RenderedOutput, AssetError> {
        let manifest = self.assets.manifest();

        tokio::try_join!(
            self.assets.ensure_script(&manifest.markdown_script),
            self.assets.ensure_script(&manifest.sanitizer_script),
        )?;

        let html = self.to_html(markdown);
        let mut hook = ReadmeHook::new();
        let sanitized = sanitize(&html, &SanitizePolicy::rich_text(), &mut hook);

        if hook.has_code() {
            tokio::try_join!(
                self.assets.ensure_script(&manifest.highlighter_script),
                self.assets.ensure_style(&manifest.highlighter_style),
            )?;
        }

        Ok(RenderedOutput::new(sanitized, hook.has_code()))
    }

    /// Renders Markdown and replaces the content of `target` with it.
    ///
    /// Nothing is inserted when rendering fails.
    ///
    /// # Errors
    ///
    /// Returns error if any required asset fails to load.
    pub async fn render_into<V: ReadmeView + ?Sized>(
        &self,
        view: &V,
        target: Target,
        markdown: &str,
    ) -> Result<(), AssetError> {
        let rendered = self.render(markdown).await?;
        rendered.insert_into(view, target);
        Ok(())
    }
}
