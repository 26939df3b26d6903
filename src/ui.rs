//! UI port the README pipeline renders through.
//!
//! The pipeline never touches a page directly. Notifications, insertion,
//! visibility and highlighting go through [`ReadmeView`], so the same core
//! drives a browser page, a generated static page, or a test double.

use std::fmt;
use std::sync::Arc;

/// Stable page regions addressed by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Container for the rendered README body
    ReadmeBody,
    /// Container for the README file name
    ReadmeFileName,
    /// Section whose visibility tracks README presence
    ReadmeSection,
}

impl Target {
    /// Element id of the target on the page.
    pub fn id(&self) -> &'static str {
        match self {
            Self::ReadmeBody => "readme",
            Self::ReadmeFileName => "readme-file-name",
            Self::ReadmeSection => "readme-parent",
        }
    }
}

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    /// CSS class used for the toast.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page operations used by the README pipeline.
///
/// Implementations mutate synchronously. A caller that performs several
/// operations without awaiting in between sees them applied as one unit.
pub trait ReadmeView {
    /// Shows a user-visible notification.
    fn notify(&self, kind: NotificationKind, message: &str);

    /// Replaces the content of `target` with sanitized HTML.
    fn insert_into(&self, target: Target, html: &str);

    /// Shows or hides `target`.
    fn toggle_visibility(&self, target: Target, visible: bool);

    /// Removes the loading placeholder styling from `target`.
    fn clear_placeholder(&self, target: Target);

    /// Highlights every code block currently on the page.
    fn highlight_all(&self);
}

impl<T: ReadmeView + ?Sized> ReadmeView for &T {
    fn notify(&self, kind: NotificationKind, message: &str) {
        (**self).notify(kind, message)
    }

    fn insert_into(&self, target: Target, html: &str) {
        (**self).insert_into(target, html)
    }

    fn toggle_visibility(&self, target: Target, visible: bool) {
        (**self).toggle_visibility(target, visible)
    }

    fn clear_placeholder(&self, target: Target) {
        (**self).clear_placeholder(target)
    }

    fn highlight_all(&self) {
        (**self).highlight_all()
    }
}

impl<T: ReadmeView + ?Sized> ReadmeView for Arc<T> {
    fn notify(&self, kind: NotificationKind, message: &str) {
        (**self).notify(kind, message)
    }

    fn insert_into(&self, target: Target, html: &str) {
        (**self).insert_into(target, html)
    }

    fn toggle_visibility(&self, target: Target, visible: bool) {
        (**self).toggle_visibility(target, visible)
    }

    fn clear_placeholder(&self, target: Target) {
        (**self).clear_placeholder(target)
    }

    fn highlight_all(&self) {
        (**self).highlight_all()
    }
}
