//! Figma REST API client, wire types, and URL parsing
//!
//! - [`client`] - retrying HTTP client for the `/v1` endpoints
//! - [`types`] - JSON wire types (document tree, render and image responses)
//! - [`urls`] - file-key and node-ID extraction from figma.com URLs

mod client;
pub mod types;
mod urls;

pub use client::{Client, FIGMA_API_BASE};
pub use urls::{extract_file_key, extract_node_ids};
