//! Stylesheet bundling for generated pages

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::highlight;

const BASE: &str = include_str!("../../assets/base.css");
const README: &str = include_str!("../../assets/readme.css");
const NOTIFICATIONS: &str = include_str!("../../assets/notifications.css");

/// File name of the page stylesheet inside the assets directory.
pub const PAGE_STYLESHEET: &str = "readme.css";

/// File name of the highlighter stylesheet inside the assets directory.
pub const HIGHLIGHT_STYLESHEET: &str = "highlight.css";

/// Writes the page stylesheet and the highlighter theme stylesheet.
///
/// # Errors
///
/// Returns error if the theme is unknown or a file cannot be written.
pub fn write_stylesheets(assets_dir: &Path, theme: &str) -> Result<()> {
    write_bundled(assets_dir, PAGE_STYLESHEET, &[BASE, README, NOTIFICATIONS])?;

    let highlight_css = highlight::stylesheet(theme)?;
    write_bundled(assets_dir, HIGHLIGHT_STYLESHEET, &[&highlight_css])?;
    Ok(())
}

fn write_bundled(dir: &Path, name: &str, parts: &[&str]) -> Result<()> {
    let css = parts.join("\n");
    fs::write(dir.join(name), css)
        .with_context(|| format!("Failed to write CSS asset: {}", name))?;
    Ok(())
}
