//! Figma URL parsing: file keys and node IDs
//!
//! Figma file URLs come in `/file/` and `/design/` flavors and may carry node
//! IDs in a query parameter, a hash fragment, or a `/nodes/` path segment.
//! These helpers run once per invocation, so the patterns are compiled at the
//! call site.

use crate::error::{Error, Result};
use regex::Regex;

/// Extract the unique file key from a Figma URL.
///
/// Supports both URL patterns:
/// - `https://www.figma.com/file/ABC123/Design-Name`
/// - `https://www.figma.com/design/ABC123/Design-Name`
///
/// The pattern is anchored so only genuine figma.com URLs match.
pub fn extract_file_key(figma_url: &str) -> Result<String> {
    let re = Regex::new(r"^https?://(?:www\.)?figma\.com/(?:file|design)/([A-Za-z0-9]+)(?:/|$)")
        .map_err(|e| Error::Config {
            message: format!("file key pattern failed to compile: {e}"),
            key: None,
        })?;

    re.captures(figma_url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| Error::InvalidUrl(figma_url.to_string()))
}

/// Extract node IDs from a Figma URL.
///
/// Supported forms, tried in order:
/// - Query parameter: `?node-id=123:456` or `?node-id=123-456` (URL-encoded
///   colon), multiple IDs comma-separated
/// - Hash fragment: `#123:456` or `#123:456,789:012`
/// - Path segment: `/nodes/123:456` or `/nodes/123:456,789:012`
///
/// URL-encoded dashes are normalized to colons (`123-456` → `123:456`) in the
/// query-parameter form. Returns an empty list when the URL carries no node
/// IDs; that is not an error, it selects whole-file extraction.
pub fn extract_node_ids(figma_url: &str) -> Vec<String> {
    // Query parameter form, with dash-to-colon normalization
    if let Ok(re) = Regex::new(r"[?&]node-id=([^&]+)")
        && let Some(caps) = re.captures(figma_url)
        && let Some(m) = caps.get(1)
    {
        let ids = m
            .as_str()
            .split(',')
            .map(|id| id.trim().replace('-', ":"))
            .filter(|id| !id.is_empty())
            .collect();
        return deduplicate_node_ids(ids);
    }

    // Hash fragment form
    if let Ok(re) = Regex::new(r"#([0-9:-]+(?:,[0-9:-]+)*)")
        && let Some(caps) = re.captures(figma_url)
        && let Some(m) = caps.get(1)
    {
        let ids = m
            .as_str()
            .split(',')
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();
        return deduplicate_node_ids(ids);
    }

    // Path form
    if let Ok(re) = Regex::new(r"/nodes/([0-9:-]+(?:,[0-9:-]+)*)")
        && let Some(caps) = re.captures(figma_url)
        && let Some(m) = caps.get(1)
    {
        let ids = m
            .as_str()
            .split(',')
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();
        return deduplicate_node_ids(ids);
    }

    Vec::new()
}

/// Remove duplicate node IDs while preserving order
fn deduplicate_node_ids(node_ids: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    node_ids
        .into_iter()
        .filter(|id| seen.insert(id.clone()))
        .collect()
}
