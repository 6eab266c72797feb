//! YAML configuration for the preview tool.
//!
//! ```yaml
//! article_base: /wiki/
//! media_base: https://cdn.example.org/media/
//! server_url: http://localhost:8080
//! timeout_secs: 10
//! toc: true
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PreviewError, Result};
use crate::remote::RemoteOptions;
use crate::transform::RenderOptions;

const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Prefix for internal links.
    pub article_base: String,
    /// Prefix for image sources.
    pub media_base: String,
    /// Base URL of a preview server; `None` renders locally.
    pub server_url: Option<String>,
    /// Request timeout for the preview server.
    pub timeout_secs: u64,
    /// Prepend a table of contents.
    pub toc: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        let render = RenderOptions::default();
        Self {
            article_base: render.article_base,
            media_base: render.media_base,
            server_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            toc: false,
        }
    }
}

impl PreviewConfig {
    /// Read a YAML config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml(&text).map_err(|source| PreviewError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_yaml(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // an empty file deserializes as null rather than an empty mapping.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            article_base: self.article_base.clone(),
            media_base: self.media_base.clone(),
        }
    }

    /// Remote settings, when a server is configured.
    pub fn remote_options(&self) -> Option<RemoteOptions> {
        self.server_url.as_ref().map(|url| RemoteOptions {
            server_url: url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}
