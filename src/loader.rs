//! README loading orchestration.

use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

use crate::assets::{AssetHost, AssetLoader, AssetManifest};
use crate::classify::ContentKind;
use crate::document::{ReadmeDocument, RenderedOutput};
use crate::error::ReadmeError;
use crate::markdown::MarkdownRenderer;
use crate::sanitize::sanitize_text;
use crate::source::{ReadmeRequest, ReadmeSource};
use crate::ui::{NotificationKind, ReadmeView, Target};

/// Message shown when a README fails to load for any reason but absence.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load README";

/// Result of a single README load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// README inserted into the page
    Rendered(ContentKind),
    /// No README for the revision; section hidden
    Hidden,
    /// Load failed; error notification shown, placeholder kept
    Failed,
    /// A newer load started before this one finished; page untouched
    Superseded,
}

/// Ready-to-commit README content.
struct Prepared {
    kind: ContentKind,
    body: RenderedOutput,
    file_name: String,
}

/// Fetches, renders and inserts a repository README.
///
/// Loads may overlap. Only the most recently started load commits to the
/// view; older ones finish as [`LoadOutcome::Superseded`] without touching
/// it. Each commit happens without suspending, so the view never shows
/// parts of two loads.
pub struct ReadmeLoader<S, V, H> {
    source: S,
    view: V,
    assets: AssetLoader<H>,
    generation: AtomicU64,
}

impl<S, V, H> ReadmeLoader<S, V, H>
where
    S: ReadmeSource,
    V: ReadmeView,
    H: AssetHost,
{
    pub fn new(source: S, view: V, host: H, manifest: AssetManifest) -> Self {
        Self::with_assets(source, view, AssetLoader::new(host, manifest))
    }

    /// Creates a loader around an existing asset loader.
    pub fn with_assets(source: S, view: V, assets: AssetLoader<H>) -> Self {
        Self {
            source,
            view,
            assets,
            generation: AtomicU64::new(0),
        }
    }

    pub fn assets(&self) -> &AssetLoader<H> {
        &self.assets
    }

    /// Loads the README for `request` into the view.
    ///
    /// Never fails: absence hides the README section, any other failure
    /// shows a single error notification and leaves the page as it was.
    pub async fn load(&self, request: &ReadmeRequest) -> LoadOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, endpoint = %request.endpoint(), "Loading README");

        let prepared = self.prepare(request).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "README load superseded");
            return LoadOutcome::Superseded;
        }

        match prepared {
            Ok(prepared) => {
                prepared.body.insert_into(&self.view, Target::ReadmeBody);
                self.view
                    .insert_into(Target::ReadmeFileName, &prepared.file_name);
                self.view.clear_placeholder(Target::ReadmeBody);
                self.view.toggle_visibility(Target::ReadmeSection, true);

                info!(kind = ?prepared.kind, "README rendered");
                LoadOutcome::Rendered(prepared.kind)
            }
            Err(e) if e.is_not_found() => {
                info!(endpoint = %request.endpoint(), "No README, hiding section");
                self.view.toggle_visibility(Target::ReadmeSection, false);
                LoadOutcome::Hidden
            }
            Err(e) => {
                warn!("Failed to load README: {}", e);
                self.view
                    .notify(NotificationKind::Error, LOAD_FAILURE_MESSAGE);
                LoadOutcome::Failed
            }
        }
    }

    /// Fetches and renders without touching the view.
    async fn prepare(&self, request: &ReadmeRequest) -> Result<Prepared, ReadmeError> {
        let payload = self.source.fetch(request).await?;
        let document = ReadmeDocument::from(payload);

        self.assets
            .ensure_script(&self.assets.manifest().sanitizer_script)
            .await?;

        let body = match document.kind() {
            ContentKind::Markdown => {
                MarkdownRenderer::new(&self.assets)
                    .render(document.raw_content())
                    .await?
            }
            ContentKind::PlainText => {
                RenderedOutput::new(sanitize_text(document.raw_content()), false)
            }
        };

        Ok(Prepared {
            kind: document.kind(),
            body,
            file_name: sanitize_text(document.file_name()),
        })
    }
}
