//! README source backed by a local git repository.

use anyhow::{Context, Result};
use gix::bstr::ByteSlice;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{ReadmePayload, ReadmeRequest, ReadmeSource};
use crate::classify::is_readme;
use crate::error::FetchError;

/// Reads the README from the top-level tree of a revision.
///
/// Owner and repository name of the request are ignored; the repository
/// is the one at `path`. The revision accepts anything `git rev-parse`
/// would resolve to a tree (branch, tag, commit hash, `HEAD~2`).
#[derive(Debug, Clone)]
pub struct GitReadmeSource {
    path: PathBuf,
}

impl GitReadmeSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReadmeSource for GitReadmeSource {
    async fn fetch(&self, request: &ReadmeRequest) -> Result<ReadmePayload, FetchError> {
        let path = self.path.clone();
        let revision = request.revision.clone();

        let found = tokio::task::spawn_blocking(move || find_readme(&path, &revision))
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?
            .map_err(|e| FetchError::Transport(format!("{:#}", e)))?;

        found.ok_or(FetchError::NotFound)
    }
}

/// Finds the first README blob in the revision's root tree.
///
/// Returns `None` when the revision does not resolve or the tree has no
/// README.
fn find_readme(repo_path: &Path, revision: &str) -> Result<Option<ReadmePayload>> {
    let repo = gix::open(repo_path)
        .with_context(|| format!("Failed to open repository at {}", repo_path.display()))?;

    let id = match repo.rev_parse_single(revision) {
        Ok(id) => id,
        Err(e) => {
            debug!(revision, "Revision not found: {}", e);
            return Ok(None);
        }
    };

    let tree = id
        .object()
        .context("Failed to read revision object")?
        .peel_to_tree()
        .with_context(|| format!("Revision '{}' does not point to a tree", revision))?;

    let decoded = tree.decode().context("Failed to decode tree")?;
    let Some((file_name, oid)) = decoded
        .entries
        .iter()
        .filter(|entry| entry.mode.is_blob())
        .map(|entry| (entry.filename.to_str_lossy().into_owned(), gix::ObjectId::from(entry.oid)))
        .find(|(name, _)| is_readme(name))
    else {
        debug!(revision, "No README in tree");
        return Ok(None);
    };

    let blob = repo
        .find_object(oid)
        .with_context(|| format!("Failed to find object for {}", file_name))?
        .try_into_blob()
        .map_err(|_| anyhow::anyhow!("README entry is not a blob: {}", file_name))?;

    let content = String::from_utf8_lossy(&blob.data).into_owned();
    debug!(%file_name, bytes = blob.data.len(), "README found");

    Ok(Some(ReadmePayload { file_name, content }))
}
