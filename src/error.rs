use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from everything around the transform: file I/O, configuration,
/// the remote preview endpoint and bulk mode. The transform itself is total.
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request failed: {status} (URL: {url})")]
    Status { status: u16, url: String },

    #[error("invalid server URL: {0}")]
    InvalidServerUrl(String),

    #[error("wiki source directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("path is outside the source directory: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),
}

pub type Result<T> = std::result::Result<T, PreviewError>;
