//! Figma REST API client
//!
//! A thin, retrying wrapper over `reqwest`. Every request carries the
//! `X-Figma-Token` header and runs through [`request_with_retry`], so rate
//! limits (429) and transient server errors (5xx) are absorbed up to the
//! configured attempt cap. The timeout is generous because file responses
//! for large documents can run to tens of megabytes.

use crate::config::{ImageFormat, RetryConfig};
use crate::error::{Error, Result};
use crate::figma::types::{
    FileImagesResponse, FileResponse, ImageResponse, NodesResponse, StylesResponse,
};
use crate::retry::request_with_retry;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

/// Production base URL of the Figma REST API
pub const FIGMA_API_BASE: &str = "https://api.figma.com/v1";

/// Request timeout, sized for very large file responses
const REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

/// Figma API client with retry and timeout handling
#[derive(Clone, Debug)]
pub struct Client {
    access_token: String,
    base_url: String,
    http: reqwest::Client,
    retry: RetryConfig,
}

impl Client {
    /// Create a client for the production API with the given personal access token
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(access_token, FIGMA_API_BASE)
    }

    /// Create a client against a custom base URL.
    ///
    /// Used to point the client at a mock server in tests or at an API proxy.
    pub fn with_base_url(
        access_token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            access_token: access_token.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            retry: RetryConfig::default(),
        })
    }

    /// Replace the retry configuration (primarily for tests and embedders)
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Retrieve complete file data including the document tree and styles
    /// (`GET /v1/files/:key`)
    pub async fn get_file(&self, file_key: &str) -> Result<FileResponse> {
        let url = format!("{}/files/{}", self.base_url, file_key);
        self.get_json(&url).await
    }

    /// Retrieve specific nodes with their subtrees
    /// (`GET /v1/files/:key/nodes?ids=...`)
    ///
    /// Verifies that every requested node is present in the response; a
    /// response missing any requested ID is an error, not a partial result.
    pub async fn get_file_nodes(
        &self,
        file_key: &str,
        node_ids: &[String],
    ) -> Result<NodesResponse> {
        if node_ids.is_empty() {
            return Err(Error::Config {
                message: "no node IDs provided".to_string(),
                key: Some("node_ids".to_string()),
            });
        }

        let ids_param = node_ids.join(",");
        let url = format!(
            "{}/files/{}/nodes?ids={}",
            self.base_url, file_key, ids_param
        );
        let resp: NodesResponse = self.get_json(&url).await?;

        if resp.nodes.is_empty() {
            return Err(Error::NodesNotFound(ids_param));
        }

        let missing: Vec<&str> = node_ids
            .iter()
            .filter(|id| !resp.nodes.contains_key(*id))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            return Err(Error::NodesNotFound(missing.join(", ")));
        }

        Ok(resp)
    }

    /// Render the given nodes and return their download URLs
    /// (`GET /v1/images/:key?ids=...&format=...&scale=...`)
    ///
    /// The returned map carries `None` for nodes the renderer could not
    /// process — a per-node condition, not a request failure. Callers are
    /// responsible for keeping `node_ids` within the API's 100-ID limit.
    pub async fn get_images(
        &self,
        file_key: &str,
        node_ids: &[String],
        format: ImageFormat,
        scale: f64,
    ) -> Result<HashMap<String, Option<String>>> {
        if node_ids.is_empty() {
            return Err(Error::Config {
                message: "no node IDs provided".to_string(),
                key: Some("node_ids".to_string()),
            });
        }

        let scale = if scale <= 0.0 { 1.0 } else { scale };
        let url = format!(
            "{}/images/{}?ids={}&format={}&scale={}",
            self.base_url,
            file_key,
            node_ids.join(","),
            format,
            scale
        );

        let resp: ImageResponse = self.get_json(&url).await?;
        if let Some(err) = resp.err {
            return Err(Error::Api(err));
        }

        Ok(resp.images)
    }

    /// Retrieve download URLs for all embedded images in a file
    /// (`GET /v1/files/:key/images`)
    ///
    /// Returns a map of image reference to download URL.
    pub async fn get_file_images(&self, file_key: &str) -> Result<HashMap<String, String>> {
        let url = format!("{}/files/{}/images", self.base_url, file_key);
        let resp: FileImagesResponse = self.get_json(&url).await?;

        if resp.error {
            return Err(Error::Api(format!(
                "file images request failed with status {}",
                resp.status.unwrap_or_default()
            )));
        }

        Ok(resp.meta.images)
    }

    /// Retrieve all published styles of a file (`GET /v1/files/:key/styles`)
    pub async fn get_file_styles(&self, file_key: &str) -> Result<StylesResponse> {
        let url = format!("{}/files/{}/styles", self.base_url, file_key);
        self.get_json(&url).await
    }

    /// Perform a GET request with retry, authentication, and JSON decoding
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        request_with_retry(&self.retry, || async move {
            let resp = self
                .http
                .get(url)
                .header("X-Figma-Token", &self.access_token)
                .send()
                .await?;

            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                return Err(Error::ApiStatus {
                    status: status.as_u16(),
                    body,
                });
            }

            Ok(resp.json::<T>().await?)
        })
        .await
    }
}
