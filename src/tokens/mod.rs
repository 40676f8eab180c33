//! Design-token extraction from the Figma document tree
//!
//! A recursive walk buckets raw node properties into a [`DesignSpecs`] —
//! colors, typography, spacing, shadows, radii, layout — which is then
//! normalized: colors deduplicated, font sizes mapped onto a standard scale
//! (xs/sm/base/...), spacing and radii likewise. `BTreeMap`s keep the
//! report output deterministic across runs.

use crate::exporter::ExportedAsset;
use crate::figma::types::{Color, FileResponse, Node, NodesResponse};
use std::collections::BTreeMap;

/// The complete set of design specifications extracted from a Figma file
#[derive(Clone, Debug, Default)]
pub struct DesignSpecs {
    /// Color palette, categorized by node-name keywords
    pub colors: ColorPalette,
    /// Font family, sizes, weights, and line heights
    pub typography: Typography,
    /// Spacing scale derived from auto-layout paddings and gaps
    pub spacing: Spacing,
    /// Drop and inner shadows
    pub shadows: Vec<Shadow>,
    /// Border radius scale
    pub radii: BorderRadii,
    /// Layout dimensions detected from node names
    pub layout: LayoutSpecs,
    /// Image assets produced by the export pipeline
    pub exported_assets: Vec<ExportedAsset>,
    /// Hierarchical node descriptions, one root per extracted tree
    pub node_tree: Vec<NodeDescription>,
}

/// Colors organized into semantic categories by node-name keyword
#[derive(Clone, Debug, Default)]
pub struct ColorPalette {
    /// Colors from nodes named "primary..."
    pub primary: BTreeMap<String, String>,
    /// Colors from nodes named "secondary..."
    pub secondary: BTreeMap<String, String>,
    /// Background colors ("background", "bg", and frame backgrounds)
    pub background: BTreeMap<String, String>,
    /// Text colors
    pub text: BTreeMap<String, String>,
    /// Status colors (success/error/warning/info)
    pub status: BTreeMap<String, String>,
    /// Border and stroke colors
    pub border: BTreeMap<String, String>,
}

/// Font-related specifications
#[derive(Clone, Debug, Default)]
pub struct Typography {
    /// Primary font family (first one encountered)
    pub font_family: String,
    /// Font sizes keyed by scale name after normalization
    pub font_sizes: BTreeMap<String, f64>,
    /// Font weights keyed by node name
    pub font_weights: BTreeMap<String, f64>,
    /// Line heights in pixels keyed by node name
    pub line_heights: BTreeMap<String, f64>,
}

/// Spacing values keyed by scale name after normalization
#[derive(Clone, Debug, Default)]
pub struct Spacing {
    /// Spacing scale values in pixels
    pub values: BTreeMap<String, f64>,
}

/// A shadow effect with its positioning, blur, spread, and color
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shadow {
    /// Name of the node carrying the effect
    pub name: String,
    /// DROP_SHADOW or INNER_SHADOW
    pub shadow_type: String,
    /// Horizontal offset in pixels
    pub x: f64,
    /// Vertical offset in pixels
    pub y: f64,
    /// Blur radius in pixels
    pub blur: f64,
    /// Spread in pixels
    pub spread: f64,
    /// Shadow color as #RRGGBB
    pub color: String,
}

/// Border radius values keyed by scale name after normalization
#[derive(Clone, Debug, Default)]
pub struct BorderRadii {
    /// Radius scale values in pixels
    pub values: BTreeMap<String, f64>,
}

/// Layout dimensions detected from nodes with relevant names
#[derive(Clone, Debug, Default)]
pub struct LayoutSpecs {
    /// Height of the node named "header..." (0 when absent)
    pub header_height: f64,
    /// Width of the node named "sidebar..." (0 when absent)
    pub sidebar_width: f64,
    /// Detected content padding (0 when absent)
    pub content_padding: f64,
}

/// A node in the hierarchical description tree with its visual properties
#[derive(Clone, Debug, Default)]
pub struct NodeDescription {
    /// Figma node ID
    pub id: String,
    /// Display name
    pub name: String,
    /// Node type tag (FRAME, TEXT, RECTANGLE, ...)
    pub node_type: String,
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
    /// Hex colors of visible SOLID fills
    pub fill_colors: Vec<String>,
    /// Image references of visible IMAGE fills
    pub image_fills: Vec<String>,
    /// Hex colors of visible SOLID strokes
    pub stroke_colors: Vec<String>,
    /// Stroke thickness in pixels
    pub stroke_weight: f64,
    /// Corner radius in pixels
    pub corner_radius: f64,
    /// Text content (TEXT nodes only)
    pub text_content: String,
    /// Font family
    pub font_family: String,
    /// Font size in pixels
    pub font_size: f64,
    /// Numeric font weight
    pub font_weight: f64,
    /// Line height in pixels
    pub line_height_px: f64,
    /// Horizontal text alignment
    pub text_align_horizontal: String,
    /// Auto-layout direction: "HORIZONTAL", "VERTICAL", or empty
    pub layout_mode: String,
    /// Auto-layout padding, top edge
    pub padding_top: f64,
    /// Auto-layout padding, right edge
    pub padding_right: f64,
    /// Auto-layout padding, bottom edge
    pub padding_bottom: f64,
    /// Auto-layout padding, left edge
    pub padding_left: f64,
    /// Auto-layout gap between children
    pub item_spacing: f64,
    /// Shadows on this node
    pub shadows: Vec<Shadow>,
    /// Assets exported from this node (attached after image export)
    pub exported_assets: Vec<ExportedAsset>,
    /// Child descriptions
    pub children: Vec<NodeDescription>,
}

/// Extract design specifications from a complete file
pub fn extract(file: &FileResponse) -> DesignSpecs {
    let mut specs = DesignSpecs::default();

    extract_from_node(&file.document, &mut specs);
    specs.node_tree = vec![build_node_tree(&file.document)];

    normalize_specs(&mut specs);
    specs
}

/// Extract design specifications from specific nodes.
///
/// `inherit_file_context` additionally folds in properties from the document
/// root and its immediate children — the pages where design-system
/// definitions usually live — without walking the whole file.
pub fn extract_nodes(
    file: &FileResponse,
    nodes: &NodesResponse,
    node_ids: &[String],
    inherit_file_context: bool,
) -> DesignSpecs {
    let mut specs = DesignSpecs::default();

    if inherit_file_context {
        extract_file_context(&file.document, &mut specs);
    }

    for node_id in node_ids {
        if let Some(node_data) = nodes.nodes.get(node_id) {
            extract_from_node(&node_data.document, &mut specs);
        }
    }

    for node_id in node_ids {
        if let Some(node_data) = nodes.nodes.get(node_id) {
            specs.node_tree.push(build_node_tree(&node_data.document));
        }
    }

    normalize_specs(&mut specs);
    specs
}

/// Extract file-level context from the document root and one level of
/// children, without recursing deeper
fn extract_file_context(node: &Node, specs: &mut DesignSpecs) {
    extract_node_properties(node, specs);
    for child in &node.children {
        extract_node_properties(child, specs);
    }
}

/// Extract design properties from a single node without recursing
fn extract_node_properties(node: &Node, specs: &mut DesignSpecs) {
    if let Some(bg) = &node.background_color {
        specs
            .colors
            .background
            .insert(node.name.clone(), color_to_hex(Some(bg)));
    }

    for fill in &node.fills {
        if fill.paint_type == "SOLID" && fill.color.is_some() && fill.visible {
            categorize_color(&node.name, &color_to_hex(fill.color.as_ref()), specs);
        }
    }

    for stroke in &node.strokes {
        if stroke.paint_type == "SOLID" && stroke.color.is_some() && stroke.visible {
            specs
                .colors
                .border
                .insert(node.name.clone(), color_to_hex(stroke.color.as_ref()));
        }
    }

    if let Some(style) = &node.style {
        if !style.font_family.is_empty() && specs.typography.font_family.is_empty() {
            specs.typography.font_family = style.font_family.clone();
        }
        if style.font_size > 0.0 {
            specs
                .typography
                .font_sizes
                .insert(node.name.clone(), style.font_size);
        }
        if style.font_weight > 0.0 {
            specs
                .typography
                .font_weights
                .insert(node.name.clone(), style.font_weight);
        }
        if style.line_height_px > 0.0 {
            specs
                .typography
                .line_heights
                .insert(node.name.clone(), style.line_height_px);
        }
    }

    for effect in &node.effects {
        if (effect.effect_type == "DROP_SHADOW" || effect.effect_type == "INNER_SHADOW")
            && effect.visible
        {
            specs.shadows.push(Shadow {
                name: node.name.clone(),
                shadow_type: effect.effect_type.clone(),
                x: effect.offset.map(|o| o.x).unwrap_or_default(),
                y: effect.offset.map(|o| o.y).unwrap_or_default(),
                blur: effect.radius,
                spread: effect.spread,
                color: color_to_hex(effect.color.as_ref()),
            });
        }
    }

    if node.corner_radius > 0.0 {
        specs
            .radii
            .values
            .insert(node.name.clone(), node.corner_radius);
    }
}

/// Recursively extract design specifications from a node and its subtree
fn extract_from_node(node: &Node, specs: &mut DesignSpecs) {
    extract_node_properties(node, specs);

    // Spacing from auto-layout properties
    if node.padding_left > 0.0
        || node.padding_right > 0.0
        || node.padding_top > 0.0
        || node.padding_bottom > 0.0
    {
        let name = &node.name;
        specs
            .spacing
            .values
            .insert(format!("{name}-paddingLeft"), node.padding_left);
        specs
            .spacing
            .values
            .insert(format!("{name}-paddingRight"), node.padding_right);
        specs
            .spacing
            .values
            .insert(format!("{name}-paddingTop"), node.padding_top);
        specs
            .spacing
            .values
            .insert(format!("{name}-paddingBottom"), node.padding_bottom);
    }

    if node.item_spacing > 0.0 {
        specs
            .spacing
            .values
            .insert(format!("{}-itemSpacing", node.name), node.item_spacing);
    }

    // Layout dimensions detected by name
    if let Some(bbox) = &node.absolute_bounding_box {
        let name = node.name.to_lowercase();
        if name.contains("header") {
            specs.layout.header_height = bbox.height;
        }
        if name.contains("sidebar") {
            specs.layout.sidebar_width = bbox.width;
        }
    }

    for child in &node.children {
        extract_from_node(child, specs);
    }
}

/// Place a color into a palette category based on keywords in the node name
fn categorize_color(node_name: &str, color_hex: &str, specs: &mut DesignSpecs) {
    let name = node_name.to_lowercase();
    let colors = &mut specs.colors;

    if name.contains("primary") {
        colors.primary.insert(node_name.to_string(), color_hex.to_string());
    } else if name.contains("secondary") {
        colors
            .secondary
            .insert(node_name.to_string(), color_hex.to_string());
    } else if name.contains("background") || name.contains("bg") {
        colors
            .background
            .insert(node_name.to_string(), color_hex.to_string());
    } else if name.contains("text") {
        colors.text.insert(node_name.to_string(), color_hex.to_string());
    } else if name.contains("success")
        || name.contains("error")
        || name.contains("warning")
        || name.contains("info")
    {
        colors.status.insert(node_name.to_string(), color_hex.to_string());
    } else if name.contains("border") {
        colors.border.insert(node_name.to_string(), color_hex.to_string());
    }
}

/// Convert a Figma RGBA color (0–1 channels) to #RRGGBB; `None` maps to black
pub(crate) fn color_to_hex(color: Option<&Color>) -> String {
    let Some(color) = color else {
        return "#000000".to_string();
    };

    let r = (color.r * 255.0).round() as u8;
    let g = (color.g * 255.0).round() as u8;
    let b = (color.b * 255.0).round() as u8;

    format!("#{r:02X}{g:02X}{b:02X}")
}

/// Normalize and deduplicate everything that was collected
fn normalize_specs(specs: &mut DesignSpecs) {
    specs.colors.primary = deduplicate_colors(&specs.colors.primary);
    specs.colors.secondary = deduplicate_colors(&specs.colors.secondary);
    specs.colors.background = deduplicate_colors(&specs.colors.background);
    specs.colors.text = deduplicate_colors(&specs.colors.text);
    specs.colors.status = deduplicate_colors(&specs.colors.status);
    specs.colors.border = deduplicate_colors(&specs.colors.border);

    specs.typography.font_sizes = normalize_to_scale(
        &specs.typography.font_sizes,
        &["xs", "sm", "base", "lg", "xl", "2xl", "3xl", "4xl"],
    );
    specs.spacing.values = normalize_to_scale(
        &specs.spacing.values,
        &["1", "2", "3", "4", "5", "6", "8", "10", "12", "16", "20", "24"],
    );
    specs.radii.values =
        normalize_to_scale(&specs.radii.values, &["sm", "md", "lg", "xl", "2xl"]);
}

/// Keep only the first occurrence of each distinct color value
fn deduplicate_colors(colors: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    let mut seen = std::collections::HashSet::new();
    colors
        .iter()
        .filter(|(_, color)| seen.insert((*color).clone()))
        .map(|(name, color)| (name.clone(), color.clone()))
        .collect()
}

/// Map the unique positive values, sorted ascending, onto standard scale
/// names. Values beyond the scale are dropped.
fn normalize_to_scale(
    values: &BTreeMap<String, f64>,
    scale_names: &[&str],
) -> BTreeMap<String, f64> {
    if values.is_empty() {
        return BTreeMap::new();
    }

    let mut unique: Vec<f64> = Vec::new();
    for &value in values.values() {
        if value > 0.0 && !unique.iter().any(|&v| v == value) {
            unique.push(value);
        }
    }
    unique.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    unique
        .into_iter()
        .zip(scale_names)
        .map(|(value, &name)| (name.to_string(), value))
        .collect()
}

/// Build the parallel description tree for a node and its subtree
pub fn build_node_tree(node: &Node) -> NodeDescription {
    let mut nd = NodeDescription {
        id: node.id.clone(),
        name: node.name.clone(),
        node_type: node.node_type.clone(),
        stroke_weight: node.stroke_weight,
        corner_radius: node.corner_radius,
        layout_mode: node.layout_mode.clone(),
        padding_top: node.padding_top,
        padding_right: node.padding_right,
        padding_bottom: node.padding_bottom,
        padding_left: node.padding_left,
        item_spacing: node.item_spacing,
        ..Default::default()
    };

    if let Some(bbox) = &node.absolute_bounding_box {
        nd.width = bbox.width;
        nd.height = bbox.height;
    }

    for fill in &node.fills {
        if !fill.visible {
            continue;
        }
        if fill.paint_type == "SOLID" && fill.color.is_some() {
            nd.fill_colors.push(color_to_hex(fill.color.as_ref()));
        }
        if fill.paint_type == "IMAGE" && !fill.image_ref.is_empty() {
            nd.image_fills.push(fill.image_ref.clone());
        }
    }

    for stroke in &node.strokes {
        if stroke.paint_type == "SOLID" && stroke.color.is_some() && stroke.visible {
            nd.stroke_colors.push(color_to_hex(stroke.color.as_ref()));
        }
    }

    if node.node_type == "TEXT" {
        nd.text_content = node.characters.clone();
    }
    if let Some(style) = &node.style {
        nd.font_family = style.font_family.clone();
        nd.font_size = style.font_size;
        nd.font_weight = style.font_weight;
        nd.line_height_px = style.line_height_px;
        nd.text_align_horizontal = style.text_align_horizontal.clone();
    }

    for effect in &node.effects {
        if (effect.effect_type == "DROP_SHADOW" || effect.effect_type == "INNER_SHADOW")
            && effect.visible
        {
            nd.shadows.push(Shadow {
                name: node.name.clone(),
                shadow_type: effect.effect_type.clone(),
                x: effect.offset.map(|o| o.x).unwrap_or_default(),
                y: effect.offset.map(|o| o.y).unwrap_or_default(),
                blur: effect.radius,
                spread: effect.spread,
                color: color_to_hex(effect.color.as_ref()),
            });
        }
    }

    for child in &node.children {
        nd.children.push(build_node_tree(child));
    }

    nd
}

/// Attach exported assets to the description-tree nodes they came from,
/// matching by node ID. Screenshots stay at the top level.
pub fn attach_assets_to_node_tree(roots: &mut [NodeDescription], assets: &[ExportedAsset]) {
    let mut asset_map: std::collections::HashMap<&str, Vec<&ExportedAsset>> =
        std::collections::HashMap::new();
    for asset in assets {
        if !asset.node_id.is_empty() && !asset.is_screenshot {
            asset_map.entry(asset.node_id.as_str()).or_default().push(asset);
        }
    }

    if asset_map.is_empty() {
        return;
    }

    fn walk(nd: &mut NodeDescription, asset_map: &std::collections::HashMap<&str, Vec<&ExportedAsset>>) {
        if let Some(matched) = asset_map.get(nd.id.as_str()) {
            nd.exported_assets
                .extend(matched.iter().map(|a| (*a).clone()));
        }
        for child in &mut nd.children {
            walk(child, asset_map);
        }
    }

    for root in roots {
        walk(root, &asset_map);
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::figma::types::{Effect, Paint, Rectangle, TypeStyle, Vector};

    fn solid_fill(r: f64, g: f64, b: f64) -> Paint {
        Paint {
            paint_type: "SOLID".to_string(),
            color: Some(Color { r, g, b, a: 1.0 }),
            ..Default::default()
        }
    }

    fn named_node(id: &str, name: &str) -> Node {
        Node {
            id: id.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn color_to_hex_converts_unit_channels() {
        assert_eq!(
            color_to_hex(Some(&Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 })),
            "#FF0000"
        );
        assert_eq!(
            color_to_hex(Some(&Color { r: 0.2, g: 0.4, b: 0.6, a: 1.0 })),
            "#336699"
        );
        assert_eq!(color_to_hex(None), "#000000");
    }

    #[test]
    fn colors_categorize_by_node_name_keyword() {
        let mut specs = DesignSpecs::default();
        categorize_color("Primary Blue", "#0000FF", &mut specs);
        categorize_color("Secondary Gray", "#808080", &mut specs);
        categorize_color("Background Light", "#FFFFFF", &mut specs);
        categorize_color("Text Dark", "#111111", &mut specs);
        categorize_color("Error Red", "#FF0000", &mut specs);
        categorize_color("Border Subtle", "#EEEEEE", &mut specs);
        categorize_color("Decoration", "#123456", &mut specs);

        assert_eq!(specs.colors.primary.len(), 1);
        assert_eq!(specs.colors.secondary.len(), 1);
        assert_eq!(specs.colors.background.len(), 1);
        assert_eq!(specs.colors.text.len(), 1);
        assert_eq!(specs.colors.status.len(), 1);
        assert_eq!(specs.colors.border.len(), 1);
        // Uncategorizable names are dropped rather than guessed
    }

    #[test]
    fn extract_walks_the_whole_tree() {
        let mut text = named_node("1:2", "Primary Label");
        text.node_type = "TEXT".to_string();
        text.fills = vec![solid_fill(0.0, 0.0, 1.0)];
        text.style = Some(TypeStyle {
            font_family: "Inter".to_string(),
            font_size: 16.0,
            font_weight: 500.0,
            line_height_px: 24.0,
            ..Default::default()
        });

        let mut frame = named_node("1:1", "Header Frame");
        frame.corner_radius = 8.0;
        frame.padding_left = 16.0;
        frame.padding_right = 16.0;
        frame.item_spacing = 8.0;
        frame.absolute_bounding_box = Some(Rectangle {
            width: 1440.0,
            height: 64.0,
            ..Default::default()
        });
        frame.children = vec![text];

        let mut doc = named_node("0:0", "Document");
        doc.children = vec![frame];

        let specs = extract(&FileResponse {
            document: doc,
            ..Default::default()
        });

        assert_eq!(specs.typography.font_family, "Inter");
        assert_eq!(specs.typography.font_sizes.get("xs"), Some(&16.0));
        assert_eq!(specs.colors.primary.len(), 1);
        assert_eq!(specs.layout.header_height, 64.0);
        assert!(!specs.spacing.values.is_empty());
        assert_eq!(specs.radii.values.get("sm"), Some(&8.0));
        assert_eq!(specs.node_tree.len(), 1);
    }

    #[test]
    fn invisible_fills_are_ignored() {
        let mut frame = named_node("1:1", "Primary Hidden");
        frame.fills = vec![Paint {
            visible: false,
            ..solid_fill(1.0, 0.0, 0.0)
        }];
        let mut doc = named_node("0:0", "Document");
        doc.children = vec![frame];

        let specs = extract(&FileResponse {
            document: doc,
            ..Default::default()
        });
        assert!(specs.colors.primary.is_empty());
    }

    #[test]
    fn shadows_capture_offset_blur_and_color() {
        let mut card = named_node("1:1", "Card");
        card.effects = vec![Effect {
            effect_type: "DROP_SHADOW".to_string(),
            radius: 12.0,
            spread: 2.0,
            offset: Some(Vector { x: 0.0, y: 4.0 }),
            color: Some(Color { r: 0.0, g: 0.0, b: 0.0, a: 0.25 }),
            ..Default::default()
        }];

        let specs = extract(&FileResponse {
            document: card,
            ..Default::default()
        });

        assert_eq!(specs.shadows.len(), 1);
        let shadow = &specs.shadows[0];
        assert_eq!(shadow.shadow_type, "DROP_SHADOW");
        assert_eq!(shadow.y, 4.0);
        assert_eq!(shadow.blur, 12.0);
        assert_eq!(shadow.color, "#000000");
    }

    #[test]
    fn font_sizes_normalize_onto_the_standard_scale() {
        let mut sizes = BTreeMap::new();
        sizes.insert("Caption".to_string(), 12.0);
        sizes.insert("Body".to_string(), 16.0);
        sizes.insert("Body Copy".to_string(), 16.0);
        sizes.insert("Heading".to_string(), 24.0);

        let normalized =
            normalize_to_scale(&sizes, &["xs", "sm", "base", "lg", "xl", "2xl", "3xl", "4xl"]);
        assert_eq!(normalized.get("xs"), Some(&12.0));
        assert_eq!(normalized.get("sm"), Some(&16.0));
        assert_eq!(normalized.get("base"), Some(&24.0));
        assert_eq!(normalized.len(), 3, "duplicates collapse to one entry");
    }

    #[test]
    fn normalize_drops_values_beyond_the_scale() {
        let mut radii = BTreeMap::new();
        for i in 1..=8 {
            radii.insert(format!("r{i}"), i as f64);
        }
        let normalized = normalize_to_scale(&radii, &["sm", "md", "lg", "xl", "2xl"]);
        assert_eq!(normalized.len(), 5);
        assert_eq!(normalized.get("sm"), Some(&1.0));
        assert_eq!(normalized.get("2xl"), Some(&5.0));
    }

    #[test]
    fn duplicate_color_values_collapse() {
        let mut colors = BTreeMap::new();
        colors.insert("Button A".to_string(), "#FF0000".to_string());
        colors.insert("Button B".to_string(), "#FF0000".to_string());
        colors.insert("Button C".to_string(), "#00FF00".to_string());

        let deduped = deduplicate_colors(&colors);
        assert_eq!(deduped.len(), 2);
    }

    #[test]
    fn extract_nodes_only_walks_the_requested_subtrees() {
        let mut wanted = named_node("1:1", "Primary Button");
        wanted.fills = vec![solid_fill(0.0, 0.5, 1.0)];

        let mut nodes = NodesResponse::default();
        nodes.nodes.insert(
            "1:1".to_string(),
            crate::figma::types::NodeData { document: wanted },
        );

        let mut other = named_node("2:2", "Primary Ignored");
        other.fills = vec![solid_fill(1.0, 0.0, 0.0)];
        let mut doc = named_node("0:0", "Document");
        doc.children = vec![other];
        let file = FileResponse {
            document: doc,
            ..Default::default()
        };

        let specs = extract_nodes(&file, &nodes, &["1:1".to_string()], false);
        assert_eq!(specs.colors.primary.len(), 1);
        assert!(specs.colors.primary.contains_key("Primary Button"));
        assert_eq!(specs.node_tree.len(), 1);
        assert_eq!(specs.node_tree[0].id, "1:1");
    }

    #[test]
    fn inherit_file_context_adds_root_level_properties_one_level_deep() {
        let mut palette_page = named_node("9:0", "Primary Palette");
        palette_page.fills = vec![solid_fill(0.0, 0.0, 1.0)];
        // A deeper node that must NOT be reached by context extraction
        let mut deep = named_node("9:1", "Primary Deep");
        deep.fills = vec![solid_fill(1.0, 0.0, 0.0)];
        palette_page.children = vec![deep];

        let mut doc = named_node("0:0", "Document");
        doc.children = vec![palette_page];
        let file = FileResponse {
            document: doc,
            ..Default::default()
        };

        let target = named_node("1:1", "Plain");
        let mut nodes = NodesResponse::default();
        nodes
            .nodes
            .insert("1:1".to_string(), crate::figma::types::NodeData { document: target });

        let specs = extract_nodes(&file, &nodes, &["1:1".to_string()], true);
        assert!(specs.colors.primary.contains_key("Primary Palette"));
        assert!(
            !specs.colors.primary.contains_key("Primary Deep"),
            "file context must not recurse past the first level"
        );
    }

    #[test]
    fn node_tree_captures_visual_properties() {
        let mut image_node = named_node("2:1", "Hero");
        image_node.fills = vec![Paint {
            paint_type: "IMAGE".to_string(),
            image_ref: "ref-1".to_string(),
            ..Default::default()
        }];

        let mut text_node = named_node("2:2", "Title");
        text_node.node_type = "TEXT".to_string();
        text_node.characters = "Welcome".to_string();
        text_node.style = Some(TypeStyle {
            font_family: "Inter".to_string(),
            font_size: 32.0,
            ..Default::default()
        });

        let mut frame = named_node("2:0", "Section");
        frame.children = vec![image_node, text_node];

        let tree = build_node_tree(&frame);
        assert_eq!(tree.children.len(), 2);
        assert_eq!(tree.children[0].image_fills, vec!["ref-1"]);
        assert_eq!(tree.children[1].text_content, "Welcome");
        assert_eq!(tree.children[1].font_size, 32.0);
    }

    #[test]
    fn assets_attach_to_their_source_nodes() {
        let mut child = named_node("2:1", "Icon");
        child.children = vec![];
        let mut root = named_node("2:0", "Frame");
        root.children = vec![child];
        let mut tree = vec![build_node_tree(&root)];

        let assets = vec![
            ExportedAsset {
                node_id: "2:1".to_string(),
                node_name: "Icon".to_string(),
                file_name: "icon.png".to_string(),
                format: "png".to_string(),
                scale: 1.0,
                is_screenshot: false,
            },
            ExportedAsset {
                node_id: "2:0".to_string(),
                node_name: "Frame".to_string(),
                file_name: "complete_design_screenshot.png".to_string(),
                format: "png".to_string(),
                scale: 1.0,
                is_screenshot: true,
            },
        ];

        attach_assets_to_node_tree(&mut tree, &assets);

        assert_eq!(tree[0].children[0].exported_assets.len(), 1);
        assert_eq!(tree[0].children[0].exported_assets[0].file_name, "icon.png");
        assert!(
            tree[0].exported_assets.is_empty(),
            "screenshots are not attached to tree nodes"
        );
    }
}
