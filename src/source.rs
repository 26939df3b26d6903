//! README sources.
//!
//! A source resolves a [`ReadmeRequest`] to the README file name and raw
//! content, or reports why it could not. HTTP transport is left to callers;
//! [`ReadmePayload::from_response`] maps a raw endpoint response.

mod git;

pub use git::GitReadmeSource;

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;

use crate::error::FetchError;

/// Repository and revision whose README is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeRequest {
    pub owner: String,
    pub repo: String,
    pub revision: String,
}

impl ReadmeRequest {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        revision: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            revision: revision.into(),
        }
    }

    /// Path of the README resource relative to the API root.
    pub fn resource_path(&self) -> String {
        format!("{}/{}/tree/{}/readme", self.owner, self.repo, self.revision)
    }

    /// Absolute endpoint path of the README resource.
    ///
    /// ```
    /// use readme_render::ReadmeRequest;
    ///
    /// let request = ReadmeRequest::new("alice", "demo", "main");
    /// assert_eq!(request.endpoint(), "/api/repo/alice/demo/tree/main/readme");
    /// ```
    pub fn endpoint(&self) -> String {
        format!("/api/repo/{}", self.resource_path())
    }
}

/// README metadata and content as served by the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadmePayload {
    pub file_name: String,
    pub content: String,
}

impl ReadmePayload {
    /// Interprets an endpoint response.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NotFound`] for 404, [`FetchError::Status`] for
    /// any other non-success status, and [`FetchError::Payload`] if a
    /// success body is not a valid payload.
    pub fn from_response(status: u16, body: &[u8]) -> Result<Self, FetchError> {
        if !(200..300).contains(&status) {
            return Err(FetchError::from_status(status));
        }

        serde_json::from_slice(body).map_err(|e| FetchError::Payload(e.to_string()))
    }
}

/// Anything that can fetch README content for a revision.
pub trait ReadmeSource {
    fn fetch(
        &self,
        request: &ReadmeRequest,
    ) -> impl Future<Output = Result<ReadmePayload, FetchError>>;
}

impl<T: ReadmeSource + ?Sized> ReadmeSource for &T {
    fn fetch(
        &self,
        request: &ReadmeRequest,
    ) -> impl Future<Output = Result<ReadmePayload, FetchError>> {
        (**self).fetch(request)
    }
}

impl<T: ReadmeSource + ?Sized> ReadmeSource for Arc<T> {
    fn fetch(
        &self,
        request: &ReadmeRequest,
    ) -> impl Future<Output = Result<ReadmePayload, FetchError>> {
        (**self).fetch(request)
    }
}
