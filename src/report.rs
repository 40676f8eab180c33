//! Markdown report generation
//!
//! Renders a [`DesignSpecs`] as a markdown document: CSS-variable listings
//! for the token categories, the design screenshot at the top (so vision
//! models can reference it), an exported-assets table, and optionally the
//! hierarchical component tree in a compact one-line-per-node format.

use crate::tokens::{DesignSpecs, NodeDescription};
use crate::utils::to_kebab_case;

/// Render the extracted specifications as a markdown document.
///
/// `asset_dir` is the directory prefix used in image links and the asset
/// table; pass an empty string when assets sit next to the report.
pub fn to_markdown(specs: &DesignSpecs, file_name: &str, asset_dir: &str) -> String {
    let asset_dir = if asset_dir.is_empty() {
        String::new()
    } else {
        format!("{}/", asset_dir.trim_end_matches('/'))
    };

    let mut out = String::new();

    out.push_str(&format!("# Figma Design Specifications - {file_name}\n\n"));
    out.push_str(
        "This document contains the complete design specifications extracted from the Figma file.\n\n",
    );

    // The complete design screenshot leads the document
    if let Some(screenshot) = specs.exported_assets.iter().find(|a| a.is_screenshot) {
        out.push_str("## Complete Design Screenshot\n\n");
        out.push_str(&format!(
            "![Complete Design Screenshot]({asset_dir}{})\n\n",
            screenshot.file_name
        ));
    }

    out.push_str("## Design System\n\n");
    out.push_str("### Color Palette\n\n");
    out.push_str("```css\n");
    write_color_section(&mut out, "Primary Colors", "--color-primary-", &specs.colors.primary);
    write_color_section(&mut out, "Secondary Colors", "--color-secondary-", &specs.colors.secondary);
    write_color_section(&mut out, "Background Colors", "--color-bg-", &specs.colors.background);
    write_color_section(&mut out, "Text Colors", "--color-text-", &specs.colors.text);
    write_color_section(&mut out, "Status Colors", "--color-", &specs.colors.status);
    write_color_section(&mut out, "Border Colors", "--color-border-", &specs.colors.border);
    out.push_str("```\n\n");

    out.push_str("### Typography\n\n");
    out.push_str("```css\n");
    if !specs.typography.font_family.is_empty() {
        out.push_str(&format!(
            "/* Font Family */\n--font-primary: '{}', system-ui, -apple-system, sans-serif;\n\n",
            specs.typography.font_family
        ));
    }
    if !specs.typography.font_sizes.is_empty() {
        out.push_str("/* Font Sizes */\n");
        for (name, size) in &specs.typography.font_sizes {
            out.push_str(&format!("--text-{name}: {size:.0}px;\n"));
        }
        out.push('\n');
    }
    if !specs.typography.font_weights.is_empty() {
        out.push_str("/* Font Weights */\n");
        for (name, weight) in &specs.typography.font_weights {
            out.push_str(&format!("--font-{}: {weight:.0};\n", to_kebab_case(name)));
        }
        out.push('\n');
    }
    if !specs.typography.line_heights.is_empty() {
        out.push_str("/* Line Heights */\n");
        for (name, height) in &specs.typography.line_heights {
            out.push_str(&format!("--leading-{}: {height:.0}px;\n", to_kebab_case(name)));
        }
        out.push('\n');
    }
    out.push_str("```\n\n");

    if !specs.spacing.values.is_empty() {
        out.push_str("### Spacing\n\n");
        out.push_str("```css\n");
        out.push_str("/* Spacing Scale */\n");
        for (name, value) in &specs.spacing.values {
            out.push_str(&format!("--space-{name}: {value:.0}px;\n"));
        }
        out.push_str("```\n\n");
    }

    if !specs.radii.values.is_empty() {
        out.push_str("### Border Radius\n\n");
        out.push_str("```css\n");
        for (name, radius) in &specs.radii.values {
            out.push_str(&format!("--radius-{name}: {radius:.0}px;\n"));
        }
        out.push_str("--radius-full: 9999px; /* Full radius (circles) */\n");
        out.push_str("```\n\n");
    }

    if !specs.shadows.is_empty() {
        out.push_str("### Shadows\n\n");
        out.push_str("```css\n");
        for (i, shadow) in specs.shadows.iter().enumerate() {
            let mut shadow_name = to_kebab_case(&shadow.name);
            if shadow_name.is_empty() {
                shadow_name = format!("shadow-{}", i + 1);
            }

            let mut value = format!("{:.0}px {:.0}px {:.0}px", shadow.x, shadow.y, shadow.blur);
            if shadow.spread > 0.0 {
                value.push_str(&format!(" {:.0}px", shadow.spread));
            }
            value.push_str(&format!(" {}", shadow.color));

            out.push_str(&format!("--shadow-{shadow_name}: {value};\n"));
        }
        out.push_str("```\n\n");
    }

    out.push_str("## Layout Specifications\n\n");
    out.push_str("### Main Layout\n\n");
    if specs.layout.header_height > 0.0 {
        out.push_str(&format!("- **Header Height**: {:.0}px\n", specs.layout.header_height));
    }
    if specs.layout.sidebar_width > 0.0 {
        out.push_str(&format!("- **Sidebar Width**: {:.0}px\n", specs.layout.sidebar_width));
    }
    if specs.layout.content_padding > 0.0 {
        out.push_str(&format!(
            "- **Content Padding**: {:.0}px\n",
            specs.layout.content_padding
        ));
    }
    out.push('\n');

    // Exported assets table, screenshots excluded (shown at the top)
    let exported: Vec<_> = specs
        .exported_assets
        .iter()
        .filter(|a| !a.is_screenshot)
        .collect();
    if !exported.is_empty() {
        out.push_str("## Exported Assets\n\n");
        out.push_str("| Asset | File | Format | Scale |\n");
        out.push_str("|-------|------|--------|-------|\n");
        for asset in exported {
            let name = if asset.node_name.is_empty() {
                &asset.file_name
            } else {
                &asset.node_name
            };
            out.push_str(&format!(
                "| {name} | `{asset_dir}{}` | {} | {}x |\n",
                asset.file_name,
                asset.format.to_uppercase(),
                asset.scale
            ));
        }
        out.push('\n');
    }

    if !specs.node_tree.is_empty() {
        out.push_str("## Component Tree\n\n");
        out.push_str("Hierarchical node descriptions. Each indented line is a child.\n");
        out.push_str("Format: `[TYPE] Name WxH | property:value ...`\n\n");
        out.push_str("```\n");
        for root in &specs.node_tree {
            render_node_description(&mut out, root, 0, &asset_dir);
        }
        out.push_str("```\n\n");
    }

    sanitize_line_terminators(&out)
}

/// Write one commented CSS-variable block for a color category
fn write_color_section(
    out: &mut String,
    heading: &str,
    prefix: &str,
    colors: &std::collections::BTreeMap<String, String>,
) {
    if colors.is_empty() {
        return;
    }
    out.push_str(&format!("/* {heading} */\n"));
    for (name, color) in colors {
        out.push_str(&format!("{prefix}{}: {color};\n", to_kebab_case(name)));
    }
    out.push('\n');
}

/// Render one description node as a compact line, then recurse into children.
///
/// DOCUMENT and CANVAS wrapper nodes are skipped without consuming a depth
/// level; their children render in their place.
fn render_node_description(out: &mut String, node: &NodeDescription, depth: usize, asset_dir: &str) {
    if node.node_type == "DOCUMENT" || node.node_type == "CANVAS" {
        for child in &node.children {
            render_node_description(out, child, depth, asset_dir);
        }
        return;
    }

    let mut parts: Vec<String> = Vec::new();

    if node.width > 0.0 || node.height > 0.0 {
        parts.push(format!("{:.0}x{:.0}", node.width, node.height));
    }

    if !node.fill_colors.is_empty() {
        parts.push(format!("fill:{}", node.fill_colors.join(",")));
    }
    if !node.image_fills.is_empty() {
        parts.push(format!("img:{}", node.image_fills.join(",")));
    }

    if !node.stroke_colors.is_empty() {
        let mut s = format!("stroke:{}", node.stroke_colors.join(","));
        if node.stroke_weight > 0.0 {
            s.push_str(&format!(" {:.0}px", node.stroke_weight));
        }
        parts.push(s);
    }

    if node.corner_radius > 0.0 {
        parts.push(format!("radius:{:.0}", node.corner_radius));
    }

    if !node.text_content.is_empty() {
        let mut text: String = node.text_content.chars().take(80).collect();
        if node.text_content.chars().count() > 80 {
            text.push_str("...");
        }
        let text = text.replace('\n', " ");
        parts.push(format!("\"{text}\""));
    }

    if !node.font_family.is_empty() {
        let mut f = format!("font:{}", node.font_family);
        if node.font_size > 0.0 {
            f.push_str(&format!("/{:.0}px", node.font_size));
        }
        if node.font_weight > 0.0 {
            f.push_str(&format!("/w{:.0}", node.font_weight));
        }
        parts.push(f);
    }
    if !node.text_align_horizontal.is_empty() {
        parts.push(format!("align:{}", node.text_align_horizontal));
    }

    if !node.layout_mode.is_empty() {
        parts.push(format!("layout:{}", node.layout_mode));
    }
    if node.padding_top > 0.0
        || node.padding_right > 0.0
        || node.padding_bottom > 0.0
        || node.padding_left > 0.0
    {
        parts.push(format!(
            "pad:{:.0},{:.0},{:.0},{:.0}",
            node.padding_top, node.padding_right, node.padding_bottom, node.padding_left
        ));
    }
    if node.item_spacing > 0.0 {
        parts.push(format!("gap:{:.0}", node.item_spacing));
    }

    for shadow in &node.shadows {
        parts.push(format!(
            "shadow:{}/{:.0},{:.0},{:.0}/{}",
            shadow.shadow_type, shadow.x, shadow.y, shadow.blur, shadow.color
        ));
    }

    for asset in &node.exported_assets {
        parts.push(format!("asset:{asset_dir}{}", asset.file_name));
    }

    let indent = "  ".repeat(depth);
    out.push_str(&format!("{indent}[{}] {}", node.node_type, node.name));
    if !parts.is_empty() {
        out.push_str(&format!(" | {}", parts.join(" | ")));
    }
    out.push('\n');

    for child in &node.children {
        render_node_description(out, child, depth + 1, asset_dir);
    }
}

/// Replace Unicode line and paragraph separators (U+2028, U+2029) with
/// standard newlines; Figma text content can carry them and they trip
/// "unusual line terminators" warnings in editors.
fn sanitize_line_terminators(s: &str) -> String {
    s.replace('\u{2028}', "\n").replace('\u{2029}', "\n")
}
