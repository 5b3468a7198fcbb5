//! HTTP adapters for the record backend and data-series sources.
//!
//! The core is synchronous, so each call spins up a short-lived tokio
//! runtime and blocks on the request.

use crate::domain::traits::{DataSource, VideoBackend};
use crate::domain::{ApiResponse, VideoRecord};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::future::Future;
use std::path::Path;
use std::time::Duration;

fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let rt = tokio::runtime::Runtime::new().context("Failed to start HTTP runtime")?;
    Ok(rt.block_on(future))
}

fn client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}

/// `VideoBackend` speaking the `/api/get-video` and `/api/update-video`
/// endpoints.
pub struct HttpVideoBackend {
    base_url: String,
    timeout: Duration,
}

impl HttpVideoBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// `{base}/api/{action}?id={owner}/{name}` with the id form-encoded, so
    /// names containing `&`, `#` or spaces reach the backend intact.
    pub fn endpoint(&self, action: &str, owner: &str, name: &str) -> Result<reqwest::Url> {
        let base = format!("{}/api/{}", self.base_url, action);
        reqwest::Url::parse_with_params(&base, &[("id", format!("{}/{}", owner, name))])
            .with_context(|| format!("Invalid backend URL: {}", base))
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response, url: &str) -> Result<ApiResponse<T>> {
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("{} returned HTTP {}", url, status);
        }
        response
            .json::<ApiResponse<T>>()
            .await
            .with_context(|| format!("Malformed response from {}", url))
    }
}

impl VideoBackend for HttpVideoBackend {
    fn get_video(&self, owner: &str, name: &str) -> Result<ApiResponse<VideoRecord>> {
        let url = self.endpoint("get-video", owner, name)?;
        let client = client(self.timeout)?;
        tracing::debug!(%url, "GET");
        block_on(async {
            let response = client
                .get(url.clone())
                .send()
                .await
                .with_context(|| format!("Failed to connect: {}", url))?;
            Self::decode(response, url.as_str()).await
        })?
    }

    fn update_video(&self, owner: &str, name: &str, record: &VideoRecord) -> Result<ApiResponse<bool>> {
        let url = self.endpoint("update-video", owner, name)?;
        let client = client(self.timeout)?;
        tracing::debug!(%url, "POST");
        block_on(async {
            let response = client
                .post(url.clone())
                .json(record)
                .send()
                .await
                .with_context(|| format!("Failed to connect: {}", url))?;
            Self::decode(response, url.as_str()).await
        })?
    }
}

/// `DataSource` reading http(s) URLs over the network and anything else
/// from the local filesystem.
pub struct HttpDataSource {
    timeout: Duration,
}

impl HttpDataSource {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

pub fn is_remote(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

impl DataSource for HttpDataSource {
    fn fetch_text(&self, url: &str) -> Result<String> {
        if !is_remote(url) {
            return read_local(Path::new(url));
        }

        let client = client(self.timeout)?;
        block_on(async {
            let response = client
                .get(url)
                .send()
                .await
                .with_context(|| format!("Failed to connect: {}", url))?;
            if !response.status().is_success() {
                anyhow::bail!("{} returned HTTP {}", url, response.status());
            }
            response
                .text()
                .await
                .with_context(|| format!("Failed to read body of {}", url))
        })?
    }
}

fn read_local(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
