//! Shared test utilities for integration tests.
//!
//! Provides scripted README sources, failing asset hosts, and helpers for
//! creating temporary git repositories.

#![allow(dead_code)]

use anyhow::Result;
use parking_lot::Mutex;
use readme_render::{AssetError, AssetHost, FetchError, ReadmePayload, ReadmeRequest, ReadmeSource};
use std::collections::HashMap;
use std::path::Path;
use std::process::Command;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::Notify;

/// Source answering every request with the same result.
pub struct FakeSource {
    response: Result<ReadmePayload, FetchError>,
    requests: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn readme(file_name: &str, content: &str) -> Self {
        Self::with_response(Ok(ReadmePayload {
            file_name: file_name.to_string(),
            content: content.to_string(),
        }))
    }

    pub fn failing(error: FetchError) -> Self {
        Self::with_response(Err(error))
    }

    /// Source behaving like the HTTP endpoint answering with `status`.
    pub fn http(status: u16, body: &str) -> Self {
        Self::with_response(ReadmePayload::from_response(status, body.as_bytes()))
    }

    fn with_response(response: Result<ReadmePayload, FetchError>) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Endpoints requested so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

impl ReadmeSource for FakeSource {
    async fn fetch(&self, request: &ReadmeRequest) -> Result<ReadmePayload, FetchError> {
        self.requests.lock().push(request.endpoint());
        tokio::task::yield_now().await;
        self.response.clone()
    }
}

/// Source whose answers per revision are held until released.
#[derive(Default)]
pub struct GatedSource {
    readmes: HashMap<String, ReadmePayload>,
    gates: HashMap<String, Arc<Notify>>,
}

impl GatedSource {
    /// Answers `revision` with a README as soon as it is fetched.
    pub fn with_readme(mut self, revision: &str, file_name: &str, content: &str) -> Self {
        self.readmes.insert(
            revision.to_string(),
            ReadmePayload {
                file_name: file_name.to_string(),
                content: content.to_string(),
            },
        );
        self
    }

    /// Holds the answer for `revision` until the returned handle is notified.
    pub fn gate(&mut self, revision: &str) -> Arc<Notify> {
        self.gates
            .entry(revision.to_string())
            .or_insert_with(|| Arc::new(Notify::new()))
            .clone()
    }
}

impl ReadmeSource for GatedSource {
    async fn fetch(&self, request: &ReadmeRequest) -> Result<ReadmePayload, FetchError> {
        if let Some(gate) = self.gates.get(&request.revision) {
            gate.notified().await;
        }

        self.readmes
            .get(&request.revision)
            .cloned()
            .ok_or(FetchError::NotFound)
    }
}

/// Asset host failing every load of the given URLs.
pub struct FailingHost {
    failing: Vec<String>,
    loaded: Mutex<Vec<String>>,
}

impl FailingHost {
    pub fn new(failing: &[&str]) -> Self {
        Self {
            failing: failing.iter().map(|url| url.to_string()).collect(),
            loaded: Mutex::new(Vec::new()),
        }
    }

    pub fn loaded(&self) -> Vec<String> {
        self.loaded.lock().clone()
    }

    fn load(&self, url: &str) -> std::result::Result<(), String> {
        if self.failing.iter().any(|failing| failing == url) {
            return Err("network error".to_string());
        }
        self.loaded.lock().push(url.to_string());
        Ok(())
    }
}

impl AssetHost for FailingHost {
    async fn load_script(&self, url: &str) -> std::result::Result<(), AssetError> {
        self.load(url).map_err(|reason| AssetError::Script {
            url: url.to_string(),
            reason,
        })
    }

    async fn load_style(&self, url: &str) -> std::result::Result<(), AssetError> {
        self.load(url).map_err(|reason| AssetError::Style {
            url: url.to_string(),
            reason,
        })
    }
}

/// Creates temporary git repository with test configuration.
///
/// # Errors
///
/// Returns error if git commands fail or directory creation fails
pub fn create_test_repo() -> Result<TempDir> {
    let dir = TempDir::new()?;
    let path = dir.path();

    Command::new("git")
        .args(["init"])
        .current_dir(path)
        .output()?;

    Command::new("git")
        .args(["config", "user.name", "Test User"])
        .current_dir(path)
        .output()?;

    Command::new("git")
        .args(["config", "user.email", "test@example.com"])
        .current_dir(path)
        .output()?;

    Ok(dir)
}

/// Commits staged changes and returns commit hash.
///
/// # Errors
///
/// Returns error if commit fails or hash cannot be retrieved
pub fn git_commit(repo_path: &Path, message: &str) -> Result<String> {
    let output = Command::new("git")
        .args(["commit", "-m", message])
        .current_dir(repo_path)
        .output()?;

    if !output.status.success() {
        anyhow::bail!(
            "Git commit failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    let output = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(repo_path)
        .output()?;

    Ok(String::from_utf8(output.stdout)?.trim().to_string())
}

/// Stages files in repository.
///
/// # Errors
///
/// Returns error if git add fails
pub fn git_add(repo_path: &Path, files: &[&str]) -> Result<()> {
    let mut args = vec!["add"];
    args.extend_from_slice(files);

    let output = Command::new("git")
        .args(&args)
        .current_dir(repo_path)
        .output()?;

    if !output.status.success() {
        anyhow::bail!(
            "Git add failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    Ok(())
}

/// Writes file to repository, creating parent directories as needed.
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_file(repo_path: &Path, path: &str, content: &str) -> Result<()> {
    let file_path = repo_path.join(path);
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}
