//! Wire types for the Figma REST API
//!
//! These mirror the JSON shapes returned by `api.figma.com/v1`. Fields the
//! extractor never reads are omitted rather than carried along; the API adds
//! fields regularly and `serde` ignores unknown keys by default.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Complete response from the file endpoint (`GET /v1/files/:key`)
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    /// Display name of the Figma file
    #[serde(default)]
    pub name: String,
    /// Last-modified timestamp as reported by the API
    #[serde(default)]
    pub last_modified: String,
    /// File version identifier
    #[serde(default)]
    pub version: String,
    /// Root of the document tree
    pub document: Node,
    /// Published styles keyed by style ID
    #[serde(default)]
    pub styles: HashMap<String, Style>,
    /// Schema version of the file format
    #[serde(default)]
    pub schema_version: i64,
}

/// Response from the nodes endpoint (`GET /v1/files/:key/nodes?ids=...`)
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodesResponse {
    /// Display name of the Figma file
    #[serde(default)]
    pub name: String,
    /// Last-modified timestamp as reported by the API
    #[serde(default)]
    pub last_modified: String,
    /// File version identifier
    #[serde(default)]
    pub version: String,
    /// Requested nodes keyed by node ID
    #[serde(default)]
    pub nodes: HashMap<String, NodeData>,
}

/// A single requested node with its subtree
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    /// The node and its full subtree
    pub document: Node,
}

/// Response from the render endpoint (`GET /v1/images/:key?ids=...`)
///
/// `images` maps node IDs to download URLs; a node the renderer could not
/// process maps to `null`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ImageResponse {
    /// Error message if the render request failed as a whole
    #[serde(default)]
    pub err: Option<String>,
    /// Node ID to download URL, `None` for nodes that failed to render
    #[serde(default)]
    pub images: HashMap<String, Option<String>>,
}

/// Response from the file images endpoint (`GET /v1/files/:key/images`)
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FileImagesResponse {
    /// True when the request failed
    #[serde(default)]
    pub error: bool,
    /// HTTP-like status code embedded in the body
    #[serde(default)]
    pub status: Option<u16>,
    /// Wrapper around the image-reference table
    #[serde(default)]
    pub meta: FileImagesMeta,
}

/// Image-reference table of a file
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FileImagesMeta {
    /// Image reference to download URL for every embedded image in the file
    #[serde(default)]
    pub images: HashMap<String, String>,
}

/// Response from the styles endpoint (`GET /v1/files/:key/styles`)
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StylesResponse {
    /// Wrapper around the published style list
    #[serde(default)]
    pub meta: StylesMeta,
}

/// Published style list of a file
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StylesMeta {
    /// Metadata for every published style
    #[serde(default)]
    pub styles: Vec<StyleMetadata>,
}

/// Metadata for a single published style
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StyleMetadata {
    /// Unique style key
    #[serde(default)]
    pub key: String,
    /// Key of the file the style lives in
    #[serde(default)]
    pub file_key: String,
    /// Node the style is defined on
    #[serde(default)]
    pub node_id: String,
    /// Style type: FILL, TEXT, EFFECT, or GRID
    #[serde(default)]
    pub style_type: String,
    /// Display name of the style
    #[serde(default)]
    pub name: String,
    /// Author-provided description
    #[serde(default)]
    pub description: String,
}

/// A published style referenced from the file response
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Style {
    /// Unique style key
    #[serde(default)]
    pub key: String,
    /// Display name of the style
    #[serde(default)]
    pub name: String,
    /// Author-provided description
    #[serde(default)]
    pub description: String,
    /// Style type: FILL, TEXT, EFFECT, or GRID
    #[serde(default)]
    pub style_type: String,
}

/// A single element in the Figma document tree
///
/// Nodes are frames, groups, text, shapes, or other elements; the type tag
/// is an open set of uppercase strings (FRAME, TEXT, RECTANGLE, ...).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique node identifier within one fetched tree
    #[serde(default)]
    pub id: String,
    /// Display name given by the document author
    #[serde(default)]
    pub name: String,
    /// Node type tag (FRAME, TEXT, RECTANGLE, COMPONENT, INSTANCE, GROUP, ...)
    #[serde(rename = "type", default)]
    pub node_type: String,
    /// Ordered child nodes
    #[serde(default)]
    pub children: Vec<Node>,
    /// Background color of frames and canvases
    #[serde(default)]
    pub background_color: Option<Color>,
    /// Fill paints, in paint order
    #[serde(default)]
    pub fills: Vec<Paint>,
    /// Stroke paints
    #[serde(default)]
    pub strokes: Vec<Paint>,
    /// Stroke thickness in pixels
    #[serde(default)]
    pub stroke_weight: f64,
    /// Corner radius in pixels
    #[serde(default)]
    pub corner_radius: f64,
    /// Export settings placed on the node by the document author; a non-empty
    /// list marks the node as an intended standalone asset
    #[serde(default)]
    pub export_settings: Vec<ExportSetting>,
    /// Visual effects (shadows, blurs)
    #[serde(default)]
    pub effects: Vec<Effect>,
    /// Text content (TEXT nodes only)
    #[serde(default)]
    pub characters: String,
    /// Text styling (TEXT nodes only)
    #[serde(default)]
    pub style: Option<TypeStyle>,
    /// Absolute position and size on the canvas
    #[serde(default)]
    pub absolute_bounding_box: Option<Rectangle>,
    /// Auto-layout direction: "HORIZONTAL", "VERTICAL", or empty
    #[serde(default)]
    pub layout_mode: String,
    /// Auto-layout padding, left edge
    #[serde(default)]
    pub padding_left: f64,
    /// Auto-layout padding, right edge
    #[serde(default)]
    pub padding_right: f64,
    /// Auto-layout padding, top edge
    #[serde(default)]
    pub padding_top: f64,
    /// Auto-layout padding, bottom edge
    #[serde(default)]
    pub padding_bottom: f64,
    /// Auto-layout gap between children
    #[serde(default)]
    pub item_spacing: f64,
}

/// An RGBA color with channel values in the 0–1 range
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Color {
    /// Red channel, 0–1
    #[serde(default)]
    pub r: f64,
    /// Green channel, 0–1
    #[serde(default)]
    pub g: f64,
    /// Blue channel, 0–1
    #[serde(default)]
    pub b: f64,
    /// Alpha channel, 0–1
    #[serde(default)]
    pub a: f64,
}

/// A fill or stroke applied to a node
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    /// Paint type tag: SOLID, IMAGE, GRADIENT_LINEAR, ...
    #[serde(rename = "type", default)]
    pub paint_type: String,
    /// Whether the paint is rendered; the API omits this field when true
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Paint opacity, 0–1
    #[serde(default)]
    pub opacity: f64,
    /// Solid color of SOLID paints
    #[serde(default)]
    pub color: Option<Color>,
    /// Opaque reference to the embedded image of IMAGE paints
    #[serde(default)]
    pub image_ref: String,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            paint_type: String::new(),
            visible: true,
            opacity: 0.0,
            color: None,
            image_ref: String::new(),
        }
    }
}

/// An export setting placed on a node by the document author
///
/// Only the presence of at least one setting matters to the exporter; the
/// suffix/format/constraint hints are informational.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ExportSetting {
    /// File-name suffix hint
    #[serde(default)]
    pub suffix: String,
    /// Format hint (PNG, SVG, JPG, PDF)
    #[serde(default)]
    pub format: String,
}

/// A visual effect applied to a node (drop shadow, inner shadow, blur)
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effect {
    /// Effect type tag: DROP_SHADOW, INNER_SHADOW, LAYER_BLUR, ...
    #[serde(rename = "type", default)]
    pub effect_type: String,
    /// Whether the effect is rendered; the API omits this field when true
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Blur radius in pixels
    #[serde(default)]
    pub radius: f64,
    /// Shadow color
    #[serde(default)]
    pub color: Option<Color>,
    /// Shadow offset
    #[serde(default)]
    pub offset: Option<Vector>,
    /// Shadow spread in pixels
    #[serde(default)]
    pub spread: f64,
    /// Blend mode tag
    #[serde(default)]
    pub blend_mode: String,
}

impl Default for Effect {
    fn default() -> Self {
        Self {
            effect_type: String::new(),
            visible: true,
            radius: 0.0,
            color: None,
            offset: None,
            spread: 0.0,
            blend_mode: String::new(),
        }
    }
}

/// A 2D offset used by shadow effects
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Vector {
    /// Horizontal component
    #[serde(default)]
    pub x: f64,
    /// Vertical component
    #[serde(default)]
    pub y: f64,
}

/// Text styling properties of a TEXT node
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStyle {
    /// Font family name
    #[serde(default)]
    pub font_family: String,
    /// PostScript name of the exact font
    #[serde(default)]
    pub font_post_script_name: String,
    /// Numeric font weight (400, 500, 700, ...)
    #[serde(default)]
    pub font_weight: f64,
    /// Font size in pixels
    #[serde(default)]
    pub font_size: f64,
    /// Line height in pixels
    #[serde(default)]
    pub line_height_px: f64,
    /// Line height as a percentage of the font size
    #[serde(default)]
    pub line_height_percent: f64,
    /// Letter spacing in pixels
    #[serde(default)]
    pub letter_spacing: f64,
    /// Horizontal alignment: LEFT, CENTER, RIGHT, JUSTIFIED
    #[serde(default)]
    pub text_align_horizontal: String,
    /// Vertical alignment: TOP, CENTER, BOTTOM
    #[serde(default)]
    pub text_align_vertical: String,
}

/// A bounding box with position and dimensions
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Rectangle {
    /// Absolute horizontal position
    #[serde(default)]
    pub x: f64,
    /// Absolute vertical position
    #[serde(default)]
    pub y: f64,
    /// Width in pixels
    #[serde(default)]
    pub width: f64,
    /// Height in pixels
    #[serde(default)]
    pub height: f64,
}

fn default_visible() -> bool {
    true
}
