//! Image-asset export pipeline
//!
//! Reconciles three asset-acquisition strategies against the Figma render
//! and file-images APIs, in four strictly ordered phases per run:
//!
//! 0. **Screenshot** — render the target node(s) (or the document root) plus
//!    their immediate children at scale 1 and rename the result to a fixed,
//!    well-known file name.
//! 1. **Export-flagged nodes** — render every node carrying author-placed
//!    export settings, excluding the screenshot set.
//! 2. **Embedded image fills** — resolve IMAGE fills through the bulk
//!    file-images endpoint and download them directly; **2b** retries
//!    unresolved fills through the render API.
//! 3. **Reconcile** — drop (and delete from disk) any non-screenshot asset
//!    that duplicates a screenshot node by ID or name.
//!
//! A phase's internal failure never skips the machine to a different state;
//! it contributes nothing and the pipeline advances. Partial success is the
//! normal case: per-asset failures accumulate in the outcome's error list
//! and the run still reports success.
//!
//! Submodules:
//! - [`selector`] - pure tree walks picking nodes to export
//! - [`namer`] - file naming and per-run collision tracking
//! - [`download`] - streaming downloads and extension inference

mod download;
mod namer;
pub mod selector;


pub use selector::ImageFillRef;

use crate::config::ImageExportConfig;
use crate::error::{Error, ExportError, Result};
use crate::figma::Client;
use crate::figma::types::{FileResponse, Node, NodesResponse};
use download::{MAX_NODES_PER_REQUEST, MAX_PARALLEL_DOWNLOADS, detect_extension_from_url};
use futures::stream::{self, StreamExt};
use namer::{NameRegistry, build_file_name};
use selector::{collect_exportable, collect_image_fills, fill_refs_to_map};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tokio::sync::Mutex;

/// Download timeout for individual assets, sized for large renders
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(600);

/// A single exported image asset, created only on a confirmed successful
/// download and never mutated afterwards
#[derive(Clone, Debug, PartialEq)]
pub struct ExportedAsset {
    /// Figma node this asset was exported from
    pub node_id: String,
    /// Display name of the node
    pub node_name: String,
    /// File name within the output directory, unique per run
    pub file_name: String,
    /// Format of the written file ("png", "svg", "jpg", "pdf")
    pub format: String,
    /// Scale factor the asset was rendered at (1 for embedded fills)
    pub scale: f64,
    /// True for the complete design screenshot
    pub is_screenshot: bool,
}

/// Final result of one export pipeline run
///
/// The asset list's order is not meaningful — only its contents are a
/// contract. Errors are per-asset soft failures; their presence does not
/// mean the run failed.
#[derive(Debug, Default)]
pub struct ExportOutcome {
    /// Successfully exported assets
    pub assets: Vec<ExportedAsset>,
    /// Per-asset failures (missing render URL, failed transfer)
    pub errors: Vec<ExportError>,
}

/// Result of one render-and-download pass over a node set
#[derive(Debug, Default)]
struct RenderOutcome {
    assets: Vec<ExportedAsset>,
    errors: Vec<ExportError>,
}

/// Result of the embedded-fill download stage.
///
/// Unresolved references are a first-class output, not an error: they signal
/// that the render-API fallback should take over for those nodes.
#[derive(Debug, Default)]
struct FillOutcome {
    assets: Vec<ExportedAsset>,
    errors: Vec<ExportError>,
    unresolved: Vec<ImageFillRef>,
}

/// Per-run pipeline state shared by all phases
struct Pipeline<'a> {
    client: &'a Client,
    /// Plain client for asset downloads; the signed URLs need no auth header
    http: reqwest::Client,
    file_key: &'a str,
    config: &'a ImageExportConfig,
    names: NameRegistry,
}

/// Run the full image export pipeline and return the asset manifest.
///
/// `nodes` selects targeted mode: when present with a non-empty ID list, the
/// requested nodes' subtrees are exported; otherwise the whole document is.
/// The output directory is created up front; failure to create it is the
/// only filesystem error that aborts the run.
pub async fn export_assets(
    client: &Client,
    file_key: &str,
    file: &FileResponse,
    nodes: Option<(&NodesResponse, &[String])>,
    config: &ImageExportConfig,
) -> Result<ExportOutcome> {
    config.validate()?;

    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .map_err(|source| Error::OutputDir {
            dir: config.output_dir.clone(),
            source,
        })?;

    let http = reqwest::Client::builder()
        .timeout(DOWNLOAD_TIMEOUT)
        .build()?;
    let pipeline = Pipeline {
        client,
        http,
        file_key,
        config,
        names: NameRegistry::new(),
    };

    let screenshot_nodes = screenshot_set(file, nodes);
    let roots: Vec<&Node> = match nodes {
        Some((resp, ids)) if !ids.is_empty() => ids
            .iter()
            .filter_map(|id| resp.nodes.get(id))
            .map(|nd| &nd.document)
            .collect(),
        _ => vec![&file.document],
    };

    let mut outcome = ExportOutcome::default();

    // Phase 0 — screenshot
    pipeline
        .capture_screenshot(&screenshot_nodes, &mut outcome)
        .await;

    // Phase 1 — nodes with author-placed export settings
    let mut export_nodes: HashMap<String, String> = HashMap::new();
    for root in &roots {
        export_nodes.extend(collect_exportable(root));
    }
    export_nodes.retain(|id, _| !screenshot_nodes.contains_key(id));

    if export_nodes.is_empty() {
        tracing::info!("No additional exportable nodes");
    } else {
        tracing::info!(
            count = export_nodes.len(),
            dir = %config.output_dir.display(),
            "Exporting rendered images"
        );
        let result = pipeline
            .render_nodes(&export_nodes, &config.effective_scales())
            .await?;
        tracing::info!(count = result.assets.len(), "Exported images");
        for err in &result.errors {
            tracing::warn!(error = %err, "Asset export failed");
        }
        outcome.assets.extend(result.assets);
        outcome.errors.extend(result.errors);
    }

    // Phase 2 — embedded image fills through the bulk endpoint
    let mut fills: Vec<ImageFillRef> = Vec::new();
    for root in &roots {
        for fill in collect_image_fills(root) {
            if screenshot_nodes.contains_key(&fill.node_id) {
                continue;
            }
            fills.push(fill);
        }
    }

    if !fills.is_empty() {
        tracing::info!(count = fills.len(), "Found embedded images, fetching download URLs");

        let unresolved = match client.get_file_images(file_key).await {
            Err(e) => {
                // Treat the whole fill set as unresolved rather than
                // attempting partial recovery from a failed bulk call
                tracing::warn!(error = %e, "File images API failed");
                fills
            }
            Ok(urls_by_ref) => {
                let fill_result = pipeline.download_fills(&urls_by_ref, fills).await;
                if !fill_result.assets.is_empty() {
                    tracing::info!(count = fill_result.assets.len(), "Exported embedded images");
                }
                for err in &fill_result.errors {
                    tracing::warn!(error = %err, "Embedded image download failed");
                }
                outcome.assets.extend(fill_result.assets);
                outcome.errors.extend(fill_result.errors);
                fill_result.unresolved
            }
        };

        // Phase 2b — render fallback for unresolved fills
        if !unresolved.is_empty() {
            tracing::info!(
                count = unresolved.len(),
                "Rendering images via render API (no file image URLs)"
            );
            let mut render_nodes = fill_refs_to_map(&unresolved);
            render_nodes.retain(|id, _| !screenshot_nodes.contains_key(id));

            if !render_nodes.is_empty() {
                match pipeline
                    .render_nodes(&render_nodes, &config.effective_scales())
                    .await
                {
                    Err(e) => tracing::error!(error = %e, "Render fallback failed"),
                    Ok(result) => {
                        tracing::info!(count = result.assets.len(), "Rendered images");
                        for err in &result.errors {
                            tracing::warn!(error = %err, "Fallback download failed");
                        }
                        outcome.assets.extend(result.assets);
                        outcome.errors.extend(result.errors);
                    }
                }
            }
        }
    }

    // Phase 3 — reconcile: a node in the screenshot set must not also appear
    // as a regular asset, even if an earlier phase rendered it
    reconcile_with_screenshots(&screenshot_nodes, config, &mut outcome).await;

    Ok(outcome)
}

/// Determine the screenshot node set: the explicitly targeted nodes (or the
/// document root in whole-file mode) plus their immediate children.
fn screenshot_set(
    file: &FileResponse,
    nodes: Option<(&NodesResponse, &[String])>,
) -> HashMap<String, String> {
    let mut set = HashMap::new();

    match nodes {
        Some((resp, ids)) if !ids.is_empty() => {
            for id in ids {
                if let Some(nd) = resp.nodes.get(id) {
                    set.insert(id.clone(), nd.document.name.clone());
                    for child in &nd.document.children {
                        set.insert(child.id.clone(), child.name.clone());
                    }
                }
            }
        }
        _ => {
            set.insert(file.document.id.clone(), file.document.name.clone());
            for child in &file.document.children {
                set.insert(child.id.clone(), child.name.clone());
            }
        }
    }

    set
}

/// Remove non-screenshot assets whose node ID or name matches a screenshot
/// node, deleting their files from disk.
async fn reconcile_with_screenshots(
    screenshot_nodes: &HashMap<String, String>,
    config: &ImageExportConfig,
    outcome: &mut ExportOutcome,
) {
    if screenshot_nodes.is_empty() {
        return;
    }

    let exclude_names: HashSet<&str> = screenshot_nodes.values().map(String::as_str).collect();
    let mut kept = Vec::with_capacity(outcome.assets.len());

    for asset in std::mem::take(&mut outcome.assets) {
        let duplicates_screenshot = !asset.is_screenshot
            && (screenshot_nodes.contains_key(&asset.node_id)
                || exclude_names.contains(asset.node_name.as_str()));

        if duplicates_screenshot {
            let path = config.output_dir.join(&asset.file_name);
            if let Err(e) = tokio::fs::remove_file(&path).await {
                tracing::debug!(error = %e, file = %asset.file_name, "Could not delete duplicate asset");
            }
            continue;
        }
        kept.push(asset);
    }

    outcome.assets = kept;
}

impl Pipeline<'_> {
    /// Phase 0: render the screenshot set at scale 1 and rename the result
    /// to the fixed well-known file name.
    ///
    /// Total failure is logged and swallowed — a missing screenshot is not
    /// fatal. A failed rename keeps the generated name but still marks the
    /// asset as a screenshot.
    async fn capture_screenshot(
        &self,
        screenshot_nodes: &HashMap<String, String>,
        outcome: &mut ExportOutcome,
    ) {
        if screenshot_nodes.is_empty() {
            return;
        }

        let screenshot_name = format!("complete_design_screenshot.{}", self.config.format);
        tracing::info!(file = %screenshot_name, "Capturing design screenshot");

        // A screenshot is a single reference image, not a multi-density
        // export: always scale 1
        match self.render_nodes(screenshot_nodes, &[1.0]).await {
            Err(e) => tracing::warn!(error = %e, "Screenshot failed"),
            Ok(result) => {
                for err in &result.errors {
                    tracing::warn!(error = %err, "Screenshot download failed");
                }
                for asset in result.assets {
                    let old_path = self.config.output_dir.join(&asset.file_name);
                    let new_path = self.config.output_dir.join(&screenshot_name);
                    match tokio::fs::rename(&old_path, &new_path).await {
                        Ok(()) => outcome.assets.push(ExportedAsset {
                            file_name: screenshot_name.clone(),
                            is_screenshot: true,
                            ..asset
                        }),
                        Err(e) => {
                            tracing::warn!(error = %e, "Could not rename screenshot");
                            outcome.assets.push(ExportedAsset {
                                is_screenshot: true,
                                ..asset
                            });
                        }
                    }
                }
            }
        }
    }

    /// Render a node set at the given scales and download every result.
    ///
    /// Scale is the outer loop, render batches of at most
    /// [`MAX_NODES_PER_REQUEST`] IDs the inner one. A failed batch request is
    /// an error for the whole pass; a missing URL for an individual node in
    /// an otherwise successful batch is a per-node soft error.
    async fn render_nodes(
        &self,
        nodes: &HashMap<String, String>,
        scales: &[f64],
    ) -> Result<RenderOutcome> {
        let outcome = Mutex::new(RenderOutcome::default());
        let node_ids: Vec<String> = nodes.keys().cloned().collect();

        for &scale in scales {
            for batch in node_ids.chunks(MAX_NODES_PER_REQUEST) {
                let urls = self
                    .client
                    .get_images(self.file_key, batch, self.config.format, scale)
                    .await?;

                stream::iter(urls)
                    .for_each_concurrent(MAX_PARALLEL_DOWNLOADS, |(node_id, image_url)| {
                        let outcome = &outcome;
                        async move {
                            let node_name = nodes.get(&node_id).cloned().unwrap_or_default();

                            let Some(url) = image_url.filter(|u| !u.is_empty()) else {
                                outcome.lock().await.errors.push(ExportError::MissingUrl {
                                    node_id,
                                    node_name,
                                });
                                return;
                            };

                            let file_name = self.names.claim(build_file_name(
                                &node_name,
                                &node_id,
                                self.config.format.as_str(),
                                scale,
                            ));
                            let dest = self.config.output_dir.join(&file_name);

                            match download::download_file(&self.http, &url, &dest).await {
                                Ok(()) => outcome.lock().await.assets.push(ExportedAsset {
                                    node_id,
                                    node_name,
                                    file_name,
                                    format: self.config.format.as_str().to_string(),
                                    scale,
                                    is_screenshot: false,
                                }),
                                Err(e) => {
                                    outcome.lock().await.errors.push(ExportError::DownloadFailed {
                                        node_name,
                                        reason: e.to_string(),
                                    })
                                }
                            }
                        }
                    })
                    .await;
            }
        }

        Ok(outcome.into_inner())
    }

    /// Phase 2: download embedded fills whose image reference resolved
    /// through the bulk endpoint. References with no download URL are
    /// returned as unresolved for the render fallback.
    ///
    /// Format is inferred from each URL's extension and scale is fixed at 1;
    /// embedded fills have no meaningful scale concept.
    async fn download_fills(
        &self,
        urls_by_ref: &HashMap<String, String>,
        fills: Vec<ImageFillRef>,
    ) -> FillOutcome {
        let mut resolved = Vec::new();
        let mut unresolved = Vec::new();
        for fill in fills {
            match urls_by_ref.get(&fill.image_ref) {
                Some(url) if !url.is_empty() => resolved.push((fill, url.clone())),
                _ => unresolved.push(fill),
            }
        }

        let outcome = Mutex::new(RenderOutcome::default());

        stream::iter(resolved)
            .for_each_concurrent(MAX_PARALLEL_DOWNLOADS, |(fill, url)| {
                let outcome = &outcome;
                async move {
                    let ext = detect_extension_from_url(&url);
                    let file_name = self.names.claim(build_file_name(
                        &fill.node_name,
                        &fill.node_id,
                        &ext,
                        1.0,
                    ));
                    let dest = self.config.output_dir.join(&file_name);

                    match download::download_file(&self.http, &url, &dest).await {
                        Ok(()) => outcome.lock().await.assets.push(ExportedAsset {
                            node_id: fill.node_id,
                            node_name: fill.node_name,
                            file_name,
                            format: ext,
                            scale: 1.0,
                            is_screenshot: false,
                        }),
                        Err(e) => {
                            outcome.lock().await.errors.push(ExportError::FillDownloadFailed {
                                node_name: fill.node_name,
                                reason: e.to_string(),
                            })
                        }
                    }
                }
            })
            .await;

        let RenderOutcome { assets, errors } = outcome.into_inner();
        FillOutcome {
            assets,
            errors,
            unresolved,
        }
    }
}
