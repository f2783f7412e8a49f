#![forbid(unsafe_code)]

use thiserror::Error;

/// Failures on the provider side of a lookup.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("dictionary site answered with status {0}")]
    Status(u16),
    #[error("invalid extraction pattern: {0}")]
    Pattern(#[from] regex_lite::Error),
    #[error("invalid selector {0}")]
    Selector(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no definition found for {0:?}")]
    NotFound(String),
    #[error("HTTP support is not compiled in")]
    HttpDisabled,
}

impl ProviderError {
    /// Process exit code for the CLI.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Pattern(_) | Self::Selector(_) => 70,
            Self::Io(_) => 74,
            Self::Json(_) => 65,
            Self::HttpDisabled => 78,
            Self::NotFound(_) => 1,
            _ => 69,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;
