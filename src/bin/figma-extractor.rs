//! Command-line interface for figma-extractor
//!
//! Fetches a Figma file, extracts design tokens (and optionally image
//! assets), and writes a markdown specification document.

use clap::Parser;
use figma_extractor::{ExtractOptions, ImageExportConfig, extract, parse_node_ids, parse_scales};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "figma-extractor",
    version,
    about = "Extract design specifications from Figma files",
    long_about = "A tool to extract design tokens, colors, typography, and other specifications \
                  from Figma files via the Figma API"
)]
struct Cli {
    /// Figma file URL
    #[arg(short = 'u', long)]
    url: String,

    /// Figma personal access token
    #[arg(short = 't', long)]
    token: String,

    /// Output markdown file
    #[arg(short = 'o', long, default_value = "FIGMA_DESIGN_SPECIFICATIONS.md")]
    output: PathBuf,

    /// Comma-separated node IDs to extract (extracts specific nodes instead of the entire file)
    #[arg(short = 'n', long)]
    node_ids: Option<String>,

    /// Inherit file-level context (colors, styles) when extracting specific nodes
    #[arg(short = 'i', long)]
    inherit_context: bool,

    /// Export images/assets from Figma
    #[arg(long)]
    export_images: bool,

    /// Image format: png, svg, jpg, pdf
    #[arg(long, default_value = "png")]
    image_format: String,

    /// Comma-separated scale factors (e.g. "1,2,3")
    #[arg(long, default_value = "1")]
    image_scales: String,

    /// Output directory for exported images
    #[arg(long, default_value = "figma-assets")]
    image_dir: PathBuf,

    /// Include the hierarchical component tree in the report
    #[arg(long)]
    component_tree: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> figma_extractor::Result<()> {
    let options = ExtractOptions {
        access_token: cli.token,
        file_url: cli.url,
        node_ids: cli
            .node_ids
            .as_deref()
            .map(parse_node_ids)
            .unwrap_or_default(),
        inherit_file_context: cli.inherit_context,
        export_images: cli.export_images,
        image: ImageExportConfig {
            format: cli.image_format.parse()?,
            scales: parse_scales(&cli.image_scales)?,
            output_dir: cli.image_dir,
        },
        component_tree: cli.component_tree,
    };

    let result = extract(&options).await?;

    print_summary(&result.specs);

    tokio::fs::write(&cli.output, &result.markdown).await?;
    println!(
        "\nSuccessfully extracted design specifications to {}",
        cli.output.display()
    );

    Ok(())
}

fn print_summary(specs: &figma_extractor::DesignSpecs) {
    println!("\nExtraction Summary:");
    println!(
        "  - Colors: {} primary, {} background, {} text, {} status",
        specs.colors.primary.len(),
        specs.colors.background.len(),
        specs.colors.text.len(),
        specs.colors.status.len()
    );

    if !specs.typography.font_family.is_empty() {
        println!("  - Font Family: {}", specs.typography.font_family);
    }
    println!("  - Font Sizes: {}", specs.typography.font_sizes.len());
    println!("  - Spacing Values: {}", specs.spacing.values.len());
    println!("  - Border Radii: {}", specs.radii.values.len());
    println!("  - Shadows: {}", specs.shadows.len());

    if specs.layout.header_height > 0.0 {
        println!("  - Header Height: {:.0}px", specs.layout.header_height);
    }
    if specs.layout.sidebar_width > 0.0 {
        println!("  - Sidebar Width: {:.0}px", specs.layout.sidebar_width);
    }
    if !specs.exported_assets.is_empty() {
        println!("  - Exported Assets: {}", specs.exported_assets.len());
    }
}
