//! Delegate rendering to a preview server, falling back to the local
//! transform when the server cannot be used.

use std::time::Duration;

use log::{debug, warn};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{PreviewError, Result};
use crate::transform::{self, RenderOptions, TransformOutput};

/// Where and how long to wait for the preview server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteOptions {
    /// Server base URL; `api/preview` is resolved against it.
    pub server_url: String,
    pub timeout: Duration,
}

#[derive(Serialize)]
struct PreviewRequest<'a> {
    content: &'a str,
}

#[derive(Deserialize)]
struct PreviewResponse {
    html: String,
}

fn build_preview_url(server: &str) -> Result<Url> {
    let mut base = server.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Url::parse(&base)
        .and_then(|base| base.join("api/preview"))
        .map_err(|e| PreviewError::InvalidServerUrl(format!("{server}: {e}")))
}

/// POST the markup to `{server}/api/preview` and return the server's HTML.
pub fn fetch_preview(markup: &str, opts: &RemoteOptions) -> Result<String> {
    let url = build_preview_url(&opts.server_url)?;
    debug!("requesting preview from {url}");

    let client = reqwest::blocking::Client::builder()
        .timeout(opts.timeout)
        .build()?;
    let resp = client
        .post(url.clone())
        .json(&PreviewRequest { content: markup })
        .send()?;

    if !resp.status().is_success() {
        return Err(PreviewError::Status {
            status: resp.status().as_u16(),
            url: url.to_string(),
        });
    }

    let body: PreviewResponse = resp.json()?;
    Ok(body.html)
}

/// Render through the server, or locally if the server fails.
///
/// The short description is always extracted locally.
pub fn preview(markup: &str, opts: &RemoteOptions, render: &RenderOptions) -> TransformOutput {
    let (_, short_description) = transform::extract_short_description(markup);
    match fetch_preview(markup, opts) {
        Ok(html) => TransformOutput {
            html,
            short_description,
        },
        Err(e) => {
            warn!("remote preview failed, rendering locally: {e}");
            transform::transform_with_options(markup, render)
        }
    }
}
