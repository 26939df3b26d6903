//! Command line configuration.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;

/// Owner shown in the README endpoint when none is configured.
const DEFAULT_OWNER: &str = "local";

/// Command line configuration for readme-render.
#[derive(Debug, Clone, Parser)]
#[command(name = "readme-render", version, about, long_about = None)]
pub struct Config {
    /// Repository path
    #[arg(default_value = ".")]
    pub repo: PathBuf,

    /// Revision whose README is rendered (branch, tag, or commit)
    #[arg(short, long, default_value = "HEAD")]
    pub revision: String,

    /// Output directory
    #[arg(short, long, default_value = "dist")]
    pub output: PathBuf,

    /// Project name
    #[arg(long)]
    pub name: Option<String>,

    /// Project owner
    #[arg(long)]
    pub owner: Option<String>,

    /// Syntax highlighting theme (InspiredGitHub, base16-ocean.light, etc.)
    #[arg(long, default_value = "InspiredGitHub")]
    pub theme: String,

    /// Open the generated page in the default browser
    #[arg(long)]
    pub open: bool,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if repository path does not exist or revision is empty.
    pub fn validate(&self) -> Result<()> {
        if !self.repo.exists() {
            bail!("Repository path does not exist: {}", self.repo.display());
        }

        if self.revision.trim().is_empty() {
            bail!("Revision must not be empty");
        }

        Ok(())
    }

    /// Returns project name from configuration or repository directory.
    ///
    /// # Errors
    ///
    /// Returns error if repository path has no name component or contains invalid UTF8.
    pub fn project_name(&self) -> Result<String> {
        if let Some(name) = &self.name {
            return Ok(name.clone());
        }

        let path = self
            .repo
            .canonicalize()
            .unwrap_or_else(|_| self.repo.clone());

        path.file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("Cannot extract project name from path: {}", path.display()))
            .map(String::from)
    }

    /// Returns configured owner or a placeholder for local repositories.
    pub fn owner_name(&self) -> &str {
        self.owner.as_deref().unwrap_or(DEFAULT_OWNER)
    }
}
