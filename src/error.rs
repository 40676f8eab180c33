//! Error types for figma-extractor
//!
//! Two layers of failure exist in this crate:
//! - [`Error`] — fatal, run-aborting failures that unwind to the caller
//!   (invalid configuration, invalid file URL, terminal API failures).
//! - [`ExportError`] — per-asset soft failures recorded during image export.
//!   These accumulate in the pipeline outcome and never abort the run;
//!   partial asset coverage is an expected, tolerated result.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for figma-extractor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for figma-extractor
///
/// Each variant includes enough context to produce a human-readable message
/// without consulting external state.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "image_format")
        key: Option<String>,
    },

    /// The provided URL is not a valid figma.com file URL
    #[error("invalid Figma URL: {0} (must be a figma.com URL with a /file/ or /design/ path)")]
    InvalidUrl(String),

    /// The Figma API responded with a non-success HTTP status
    #[error("API request failed with status {status}: {body}")]
    ApiStatus {
        /// HTTP status code returned by the API
        status: u16,
        /// Response body, included verbatim for diagnosis
        body: String,
    },

    /// The Figma API returned a well-formed response carrying an error message
    #[error("Figma API error: {0}")]
    Api(String),

    /// One or more requested nodes were missing from the nodes response
    #[error("nodes not found: {0}")]
    NodesNotFound(String),

    /// A download responded with a non-success HTTP status
    #[error("unexpected status {status} downloading {url}")]
    DownloadStatus {
        /// HTTP status code returned by the image store
        status: u16,
        /// The URL that was being downloaded
        url: String,
    },

    /// Failed to create the asset output directory
    #[error("failed to create output directory {dir}: {source}")]
    OutputDir {
        /// The directory that could not be created
        dir: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Per-asset soft failure recorded during image export
///
/// These are appended to the export outcome's error list with the node name
/// attached so they read well in logs, and they never stop sibling downloads.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The render API returned no download URL for a node in an otherwise successful batch
    #[error("no image URL returned for node {node_id} ({node_name})")]
    MissingUrl {
        /// The node whose render produced no URL
        node_id: String,
        /// Display name of the node, for log readability
        node_name: String,
    },

    /// Downloading a rendered image failed
    #[error("failed to download {node_name}: {reason}")]
    DownloadFailed {
        /// Display name of the node being downloaded
        node_name: String,
        /// What went wrong (network error, bad status, disk error)
        reason: String,
    },

    /// Downloading an embedded image fill failed
    #[error("failed to download image fill {node_name}: {reason}")]
    FillDownloadFailed {
        /// Display name of the node carrying the fill
        node_name: String,
        /// What went wrong (network error, bad status, disk error)
        reason: String,
    },
}
