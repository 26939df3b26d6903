//! Error types for README loading.

use thiserror::Error;

/// Failure to obtain README content for a revision.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// No README exists for the requested revision.
    #[error("README not found")]
    NotFound,
    /// Endpoint answered with a non-success status other than 404.
    #[error("README request failed with status {0}")]
    Status(u16),
    /// Network, repository, or runtime failure before a response existed.
    #[error("README request failed: {0}")]
    Transport(String),
    /// Response body was not a valid README payload.
    #[error("Malformed README payload: {0}")]
    Payload(String),
}

impl FetchError {
    /// Maps a non-success HTTP status code to a fetch error.
    ///
    /// 404 means the repository has no README at that revision and is the
    /// only status treated as [`FetchError::NotFound`].
    pub fn from_status(status: u16) -> Self {
        if status == 404 {
            Self::NotFound
        } else {
            Self::Status(status)
        }
    }
}

/// Failure to load an external script or stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("Failed to load script {url}: {reason}")]
    Script { url: String, reason: String },
    #[error("Failed to load stylesheet {url}: {reason}")]
    Style { url: String, reason: String },
}

/// Failure to decode an image proxy path segment.
#[derive(Debug, Error)]
pub enum ProxyUrlError {
    #[error("Proxy path is empty")]
    Empty,
    #[error("Proxy path is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("Proxy path does not decode to UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Any failure of a single README load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadmeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Asset(#[from] AssetError),
}

impl ReadmeError {
    /// True when the README is simply absent for the revision.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Fetch(FetchError::NotFound))
    }
}
