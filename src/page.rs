//! Generated static page hosting the README section.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

use crate::assets::{AssetHost, AssetManifest};
use crate::error::AssetError;
use crate::highlight::Highlighter;
use crate::ui::{NotificationKind, ReadmeView, Target};

const PLACEHOLDER_CLASSES: &str = "ui fluid placeholder";

/// Notification shown on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Default)]
struct PageState {
    contents: HashMap<Target, String>,
    hidden: HashSet<Target>,
    placeholders: HashSet<Target>,
    notifications: Vec<Notification>,
    scripts: Vec<String>,
    stylesheets: Vec<String>,
    highlighter: Option<Highlighter>,
    highlighted: bool,
    highlight_runs: usize,
}

/// In-memory page that renders to a standalone HTML document.
///
/// Acts as both the [`ReadmeView`] the pipeline writes into and the
/// [`AssetHost`] it loads through. Scripts run in process: loading the
/// highlighter script builds a syntect [`Highlighter`], the converter and
/// sanitizer are linked into the binary and only recorded. Loaded
/// stylesheets are linked from the rendered document.
pub struct StaticPage {
    state: Mutex<PageState>,
    highlighter_script: String,
}

impl StaticPage {
    /// Creates a page with the README body showing its placeholder.
    pub fn new(manifest: &AssetManifest) -> Self {
        let state = PageState {
            placeholders: HashSet::from([Target::ReadmeBody]),
            ..PageState::default()
        };

        Self {
            state: Mutex::new(state),
            highlighter_script: manifest.highlighter_script.clone(),
        }
    }

    /// Current HTML content of a target.
    pub fn content(&self, target: Target) -> String {
        self.state
            .lock()
            .contents
            .get(&target)
            .cloned()
            .unwrap_or_default()
    }

    pub fn body(&self) -> String {
        self.content(Target::ReadmeBody)
    }

    pub fn file_name(&self) -> String {
        self.content(Target::ReadmeFileName)
    }

    pub fn is_visible(&self, target: Target) -> bool {
        !self.state.lock().hidden.contains(&target)
    }

    pub fn has_placeholder(&self, target: Target) -> bool {
        self.state.lock().placeholders.contains(&target)
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.state.lock().notifications.clone()
    }

    /// Scripts loaded so far, in load order.
    pub fn scripts(&self) -> Vec<String> {
        self.state.lock().scripts.clone()
    }

    /// Stylesheets loaded so far, in load order.
    pub fn stylesheets(&self) -> Vec<String> {
        self.state.lock().stylesheets.clone()
    }

    /// Number of times highlighting was requested.
    pub fn highlight_runs(&self) -> usize {
        self.state.lock().highlight_runs
    }

    /// Renders the page as a complete HTML document.
    ///
    /// # Arguments
    ///
    /// * `title`: Page title text (without suffix)
    /// * `stylesheets`: CSS file paths linked before the loaded stylesheets
    pub fn render(&self, title: &str, stylesheets: &[&str]) -> Markup {
        let state = self.state.lock();
        let content = |target: Target| {
            PreEscaped(state.contents.get(&target).map(String::as_str).unwrap_or_default())
        };
        let section_hidden = state.hidden.contains(&Target::ReadmeSection);
        let placeholder = state.placeholders.contains(&Target::ReadmeBody);

        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (title) " - README" }
                    @for stylesheet in stylesheets {
                        link rel="stylesheet" href=(stylesheet);
                    }
                    @for stylesheet in &state.stylesheets {
                        link rel="stylesheet" href=(stylesheet);
                    }
                }
                body {
                    div class="notifications" {
                        @for notification in &state.notifications {
                            div class={ "ui message " (notification.kind.as_str()) } {
                                (notification.message)
                            }
                        }
                    }
                    div class="container" {
                        div id=(Target::ReadmeSection.id()) class=[section_hidden.then_some("hidden")] {
                            div class="readme-header" {
                                span id=(Target::ReadmeFileName.id()) { (content(Target::ReadmeFileName)) }
                            }
                            div id=(Target::ReadmeBody.id()) class=[placeholder.then_some(PLACEHOLDER_CLASSES)] {
                                (content(Target::ReadmeBody))
                            }
                        }
                    }
                }
            }
        }
    }
}

impl Default for StaticPage {
    fn default() -> Self {
        Self::new(&AssetManifest::default())
    }
}

impl ReadmeView for StaticPage {
    fn notify(&self, kind: NotificationKind, message: &str) {
        info!(%kind, text = message, "Notification");
        self.state.lock().notifications.push(Notification {
            kind,
            message: message.to_string(),
        });
    }

    fn insert_into(&self, target: Target, html: &str) {
        let mut state = self.state.lock();
        if target == Target::ReadmeBody {
            state.highlighted = false;
        }
        state.contents.insert(target, html.to_string());
    }

    fn toggle_visibility(&self, target: Target, visible: bool) {
        let mut state = self.state.lock();
        if visible {
            state.hidden.remove(&target);
        } else {
            state.hidden.insert(target);
        }
    }

    fn clear_placeholder(&self, target: Target) {
        self.state.lock().placeholders.remove(&target);
    }

    fn highlight_all(&self) {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        state.highlight_runs += 1;

        if state.highlighted {
            debug!("README body already highlighted");
            return;
        }

        let Some(highlighter) = state.highlighter.as_ref() else {
            warn!("Highlight requested before the highlighter was loaded");
            return;
        };

        let Some(body) = state.contents.get_mut(&Target::ReadmeBody) else {
            return;
        };

        match highlighter.highlight_blocks(body) {
            Ok(highlighted) => {
                *body = highlighted;
                state.highlighted = true;
            }
            Err(e) => warn!("Failed to highlight README: {:#}", e),
        }
    }
}

impl AssetHost for StaticPage {
    async fn load_script(&self, url: &str) -> Result<(), AssetError> {
        if url == self.highlighter_script {
            let highlighter = tokio::task::spawn_blocking(Highlighter::new)
                .await
                .map_err(|e| AssetError::Script {
                    url: url.to_string(),
                    reason: e.to_string(),
                })?;
            self.state.lock().highlighter = Some(highlighter);
        }

        debug!(url, "Script loaded");
        self.state.lock().scripts.push(url.to_string());
        Ok(())
    }

    async fn load_style(&self, url: &str) -> Result<(), AssetError> {
        debug!(url, "Stylesheet linked");
        self.state.lock().stylesheets.push(url.to_string());
        Ok(())
    }
}
