//! Configuration types for figma-extractor

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Image output format supported by the Figma render API
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG raster output (default)
    #[default]
    Png,
    /// SVG vector output
    Svg,
    /// JPEG raster output
    Jpg,
    /// PDF vector output
    Pdf,
}

impl ImageFormat {
    /// The lowercase format string used in API requests and file extensions
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Pdf => "pdf",
        }
    }

    /// Vector formats are resolution-independent; the render API ignores scale for them
    pub fn is_vector(&self) -> bool {
        matches!(self, ImageFormat::Svg | ImageFormat::Pdf)
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ImageFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            "jpg" => Ok(ImageFormat::Jpg),
            "pdf" => Ok(ImageFormat::Pdf),
            other => Err(Error::Config {
                message: format!("invalid image format {other:?} (must be png, svg, jpg, or pdf)"),
                key: Some("image_format".to_string()),
            }),
        }
    }
}

/// Image export settings (format, scales, output directory)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImageExportConfig {
    /// Output format for rendered assets
    #[serde(default)]
    pub format: ImageFormat,

    /// Scale factors for raster formats, e.g. `[1.0, 2.0]` (default: `[1.0]`)
    #[serde(default = "default_scales")]
    pub scales: Vec<f64>,

    /// Local directory assets are written to (default: "figma-assets")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for ImageExportConfig {
    fn default() -> Self {
        Self {
            format: ImageFormat::default(),
            scales: default_scales(),
            output_dir: default_output_dir(),
        }
    }
}

impl ImageExportConfig {
    /// The scales actually rendered for the configured format.
    ///
    /// Vector formats always render at scale 1 regardless of the requested
    /// scales; raster formats use the configured list.
    pub fn effective_scales(&self) -> Vec<f64> {
        if self.format.is_vector() {
            vec![1.0]
        } else {
            self.scales.clone()
        }
    }

    /// Validate scales before any network call is made
    pub fn validate(&self) -> Result<()> {
        for &s in &self.scales {
            if s <= 0.0 {
                return Err(Error::Config {
                    message: format!("scale value must be positive, got {s}"),
                    key: Some("image_scales".to_string()),
                });
            }
        }
        Ok(())
    }
}

/// Options for one extraction run
#[derive(Clone, Debug)]
pub struct ExtractOptions {
    /// Figma personal access token
    pub access_token: String,

    /// Figma file URL (`/file/` or `/design/` form)
    pub file_url: String,

    /// Explicit node IDs to extract; empty means "take node IDs from the URL,
    /// or extract the entire file if the URL carries none"
    pub node_ids: Vec<String>,

    /// Include file-level context (root colors, styles) when extracting specific nodes
    pub inherit_file_context: bool,

    /// Export image assets (screenshot, export-flagged nodes, embedded fills)
    pub export_images: bool,

    /// Image export settings, used when `export_images` is set
    pub image: ImageExportConfig,

    /// Emit the hierarchical component tree in the report
    pub component_tree: bool,
}

impl ExtractOptions {
    /// Create options for a file URL with defaults for everything else
    pub fn new(access_token: impl Into<String>, file_url: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            file_url: file_url.into(),
            node_ids: Vec::new(),
            inherit_file_context: false,
            export_images: false,
            image: ImageExportConfig::default(),
            component_tree: false,
        }
    }
}

/// Retry configuration for Figma API requests
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retries after the initial attempt (default: 3)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry (default: 2s)
    #[serde(default = "default_initial_delay", with = "duration_secs")]
    pub initial_delay: Duration,

    /// Upper bound on any single retry delay (default: 30s)
    #[serde(default = "default_max_delay", with = "duration_secs")]
    pub max_delay: Duration,

    /// Multiplier applied to the delay after each failed attempt (default: 2.0)
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Add random jitter to delays to avoid thundering herd (default: true)
    #[serde(default = "default_true")]
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay: default_initial_delay(),
            max_delay: default_max_delay(),
            backoff_multiplier: default_backoff_multiplier(),
            jitter: true,
        }
    }
}

/// Parse a comma-separated string of scale factors, e.g. `"1,2,3"`.
///
/// Empty segments are skipped; an entirely empty input yields `[1.0]`.
/// Non-numeric or non-positive values are rejected.
pub fn parse_scales(scales_str: &str) -> Result<Vec<f64>> {
    let mut scales = Vec::new();

    for part in scales_str.split(',') {
        let trimmed = part.trim();
        if trimmed.is_empty() {
            continue;
        }

        let s: f64 = trimmed.parse().map_err(|_| Error::Config {
            message: format!("invalid scale value {trimmed:?}"),
            key: Some("image_scales".to_string()),
        })?;
        if s <= 0.0 {
            return Err(Error::Config {
                message: format!("scale value must be positive, got {s}"),
                key: Some("image_scales".to_string()),
            });
        }

        scales.push(s);
    }

    if scales.is_empty() {
        return Ok(vec![1.0]);
    }

    Ok(scales)
}

/// Parse a comma-separated string of node IDs, trimming whitespace and
/// dropping empty segments
pub fn parse_node_ids(node_ids_str: &str) -> Vec<String> {
    node_ids_str
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn default_scales() -> Vec<f64> {
    vec![1.0]
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("figma-assets")
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay() -> Duration {
    Duration::from_secs(2)
}

fn default_max_delay() -> Duration {
    Duration::from_secs(30)
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_true() -> bool {
    true
}

/// Serialize durations as whole seconds for config files
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(d)?))
    }
}
