//! Post-sanitization annotations for rendered Markdown.

use crate::proxy::proxy_image_url;
use crate::sanitize::{Element, NodeVisitor};

/// Classes added to every surviving image.
pub const IMAGE_CLASSES: &str = "ui image";

/// Classes added to every surviving heading.
pub const HEADING_CLASSES: &str = "ui header";

/// Visitor applied to sanitized Markdown output.
///
/// Images are styled, proxied and lazily loaded; headings `h1` to `h5` are
/// styled; the presence of any `code` element is recorded so highlighting
/// only happens when needed.
#[derive(Debug, Default)]
pub struct ReadmeHook {
    has_code: bool,
}

impl ReadmeHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once a `code` element has been visited.
    pub fn has_code(&self) -> bool {
        self.has_code
    }
}

impl NodeVisitor for ReadmeHook {
    fn visit(&mut self, element: &mut Element) {
        let name = element.name().to_owned();

        match name.as_str() {
            "img" => {
                element.add_class(IMAGE_CLASSES);
                if let Some(proxied) = element.attribute("src").map(proxy_image_url) {
                    element.set_attribute("src", proxied);
                    element.set_attribute("loading", "lazy");
                }
            }
            "h1" | "h2" | "h3" | "h4" | "h5" => element.add_class(HEADING_CLASSES),
            "code" => self.has_code = true,
            _ => {}
        }
    }
}
