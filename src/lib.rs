//! # figma-extractor
//!
//! Extract design tokens and image assets from Figma files via the Figma
//! REST API, and render them as a markdown report.
//!
//! ## Design Philosophy
//!
//! - **Single-shot** - one invocation, no persistence beyond the report and
//!   the downloaded assets; each run starts cold
//! - **Partial success is success** - asset downloads that fail are reported
//!   as warnings, not run failures
//! - **Library-first** - the CLI binary is a thin wrapper over [`extract`]
//!
//! ## Quick Start
//!
//! ```no_run
//! use figma_extractor::{ExtractOptions, extract};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut options = ExtractOptions::new(
//!         "figd_your_token",
//!         "https://www.figma.com/file/ABC123/My-Design",
//!     );
//!     options.export_images = true;
//!
//!     let result = extract(&options).await?;
//!     std::fs::write("DESIGN_SPECS.md", &result.markdown)?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Image-asset export pipeline
pub mod exporter;
/// End-to-end extraction workflow
pub mod extractor;
/// Figma REST API client and wire types
pub mod figma;
/// Markdown report generation
pub mod report;
/// Retry logic with exponential backoff
pub mod retry;
/// Design-token extraction
pub mod tokens;

mod utils;

// Re-export commonly used types
pub use config::{ExtractOptions, ImageExportConfig, ImageFormat, RetryConfig, parse_node_ids, parse_scales};
pub use error::{Error, ExportError, Result};
pub use exporter::{ExportOutcome, ExportedAsset, export_assets};
pub use extractor::{Extraction, extract};
pub use figma::Client;
pub use tokens::DesignSpecs;
