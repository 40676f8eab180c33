//! End-to-end extraction workflow
//!
//! Wires the pieces together for one run: parse the file URL, fetch the
//! document (whole file or specific nodes), extract design tokens, export
//! image assets when requested, and render the markdown report.

use crate::config::ExtractOptions;
use crate::error::Result;
use crate::exporter;
use crate::figma::{self, Client};
use crate::report;
use crate::tokens::{self, DesignSpecs};

/// Result of one extraction run
#[derive(Clone, Debug)]
pub struct Extraction {
    /// The extracted and normalized design specifications
    pub specs: DesignSpecs,
    /// Display name of the Figma file
    pub file_name: String,
    /// The rendered markdown report
    pub markdown: String,
}

/// Run the full extraction pipeline for the given options.
///
/// Node IDs are taken from `options.node_ids` when present, otherwise from
/// the file URL; with neither, the entire file is extracted.
pub async fn extract(options: &ExtractOptions) -> Result<Extraction> {
    tracing::info!("Extracting file key from URL");
    let file_key = figma::extract_file_key(&options.file_url)?;
    tracing::info!(file_key = %file_key, "File key resolved");

    let target_node_ids: Vec<String> = if !options.node_ids.is_empty() {
        tracing::info!(count = options.node_ids.len(), "Using explicit node IDs");
        options.node_ids.clone()
    } else {
        let url_node_ids = figma::extract_node_ids(&options.file_url);
        if url_node_ids.is_empty() {
            tracing::info!("No node IDs found, extracting entire file");
        } else {
            tracing::info!(count = url_node_ids.len(), "Found node IDs in URL");
        }
        url_node_ids
    };

    let client = Client::new(&options.access_token)?;

    let mut specs;
    let file_name;
    let file_resp;
    let mut nodes_resp = None;

    if target_node_ids.is_empty() {
        tracing::info!("Fetching file data from Figma");
        file_resp = client.get_file(&file_key).await?;
        file_name = file_resp.name.clone();
        tracing::info!(file = %file_name, "File retrieved");

        specs = tokens::extract(&file_resp);
    } else {
        tracing::info!(count = target_node_ids.len(), "Fetching nodes from Figma");
        let resp = client.get_file_nodes(&file_key, &target_node_ids).await?;
        tracing::info!(count = resp.nodes.len(), "Nodes retrieved");

        tracing::info!("Fetching file metadata");
        file_resp = client.get_file(&file_key).await?;
        file_name = file_resp.name.clone();
        tracing::info!(file = %file_name, "File retrieved");

        specs = tokens::extract_nodes(
            &file_resp,
            &resp,
            &target_node_ids,
            options.inherit_file_context,
        );
        nodes_resp = Some(resp);
    }

    if options.export_images {
        let outcome = exporter::export_assets(
            &client,
            &file_key,
            &file_resp,
            nodes_resp
                .as_ref()
                .map(|resp| (resp, target_node_ids.as_slice())),
            &options.image,
        )
        .await?;

        for err in &outcome.errors {
            tracing::warn!(error = %err, "Asset export warning");
        }
        specs.exported_assets.extend(outcome.assets);
    }

    if options.component_tree {
        let assets = specs.exported_assets.clone();
        tokens::attach_assets_to_node_tree(&mut specs.node_tree, &assets);
    } else {
        specs.node_tree.clear();
    }

    tracing::info!("Generating markdown documentation");
    let markdown = report::to_markdown(
        &specs,
        &file_name,
        &options.image.output_dir.to_string_lossy(),
    );

    Ok(Extraction {
        specs,
        file_name,
        markdown,
    })
}
