//! Tree walks selecting nodes for export
//!
//! Two independent, read-only depth-first walks over a caller-owned document
//! tree: one collects nodes the document author flagged for export, the
//! other collects nodes carrying an embedded image fill.

use crate::figma::types::Node;
use std::collections::HashMap;

/// A node that displays an embedded image through an IMAGE fill
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageFillRef {
    /// ID of the node carrying the fill
    pub node_id: String,
    /// Display name of the node
    pub node_name: String,
    /// Opaque reference resolvable through the file images endpoint
    pub image_ref: String,
}

/// Collect every node (the root included) that carries at least one export
/// setting, as a map of node ID to node name.
pub fn collect_exportable(root: &Node) -> HashMap<String, String> {
    let mut nodes = HashMap::new();
    walk_exportable(root, &mut nodes);
    nodes
}

fn walk_exportable(node: &Node, nodes: &mut HashMap<String, String>) {
    if !node.export_settings.is_empty() {
        nodes.insert(node.id.clone(), node.name.clone());
    }
    for child in &node.children {
        walk_exportable(child, nodes);
    }
}

/// Collect every node whose fill list contains an IMAGE paint with a
/// non-empty image reference.
///
/// At most one reference is taken per node — the first matching fill wins —
/// and the walk keeps descending into children regardless.
pub fn collect_image_fills(root: &Node) -> Vec<ImageFillRef> {
    let mut nodes = Vec::new();
    walk_image_fills(root, &mut nodes);
    nodes
}

fn walk_image_fills(node: &Node, nodes: &mut Vec<ImageFillRef>) {
    for fill in &node.fills {
        if fill.paint_type == "IMAGE" && !fill.image_ref.is_empty() {
            nodes.push(ImageFillRef {
                node_id: node.id.clone(),
                node_name: node.name.clone(),
                image_ref: fill.image_ref.clone(),
            });
            break; // one entry per node is enough
        }
    }
    for child in &node.children {
        walk_image_fills(child, nodes);
    }
}

/// Convert fill references to a node ID → name map, suitable for the render
/// API fallback path
pub fn fill_refs_to_map(refs: &[ImageFillRef]) -> HashMap<String, String> {
    refs.iter()
        .map(|r| (r.node_id.clone(), r.node_name.clone()))
        .collect()
}
