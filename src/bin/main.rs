//! Blueprint Drafter CLI
//!
//! Render voxel blueprints as dimensioned floor-plan drawings.

use blueprint_drafter::{
    export_json, export_pdf, export_png_pages, load_blueprint, Blueprint, DraftConfig, Drafter,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "blueprint-drafter")]
#[command(author, version, about = "Render voxel blueprints as dimensioned floor plans", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a blueprint to a paged drawing
    Render {
        /// Input JSON file containing the blueprint
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Floor height; unusable values fall back to the configured default
        #[arg(long)]
        height: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "pdf")]
        format: OutputFormat,

        /// Drafting configuration JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// PNG preview resolution in pixels per point
        #[arg(long, default_value = "2.0")]
        resolution: f32,
    },

    /// Print the materials bill of a blueprint
    Materials {
        /// Input JSON file containing the blueprint
        #[arg(short, long)]
        input: PathBuf,

        /// Floor height; unusable values fall back to the configured default
        #[arg(long)]
        height: Option<String>,

        /// Drafting configuration JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the bill as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show information about a blueprint
    Info {
        /// Input JSON file containing the blueprint
        #[arg(short, long)]
        input: PathBuf,

        /// Drafting configuration JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Paged PDF document
    Pdf,
    /// One PNG preview per layer
    Png,
    /// Raw draw commands as JSON
    Json,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            output,
            height,
            format,
            config,
            resolution,
        } => {
            render_blueprint(
                &input,
                &output,
                height.as_deref(),
                format,
                config.as_deref(),
                resolution,
            )?;
        }
        Commands::Materials {
            input,
            height,
            config,
            json,
        } => {
            show_materials(&input, height.as_deref(), config.as_deref(), json)?;
        }
        Commands::Info { input, config } => {
            show_blueprint_info(&input, config.as_deref())?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<DraftConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            println!("Loading config from {:?}...", path);
            let json = fs::read_to_string(path)?;
            Ok(DraftConfig::from_json(&json)?)
        }
        None => Ok(DraftConfig::default()),
    }
}

fn load_input(path: &Path) -> Result<Blueprint, Box<dyn std::error::Error>> {
    println!("Loading blueprint from {:?}...", path);
    let blueprint = load_blueprint(path)?;
    println!(
        "  Loaded '{}': {} cells on {} layers",
        blueprint.name,
        blueprint.len(),
        blueprint.layer_heights().len()
    );
    Ok(blueprint)
}

fn render_blueprint(
    input_path: &Path,
    output_path: &Path,
    height: Option<&str>,
    format: OutputFormat,
    config_path: Option<&Path>,
    resolution: f32,
) -> Result<(), Box<dyn std::error::Error>> {
    let drafter = Drafter::with_config(load_config(config_path)?);
    let blueprint = load_input(input_path)?;

    let floor_height = drafter.floor_height(height);
    println!("Drafting with floor height {}...", floor_height);
    let output = drafter.draft(&blueprint, floor_height);
    println!(
        "  Generated {} pages, {} draw commands",
        output.page_count(),
        output.drawing.command_count()
    );

    match format {
        OutputFormat::Pdf => {
            let pdf_path = with_default_extension(output_path, "pdf");
            let pdf_data = export_pdf(&output.drawing)?;
            fs::write(&pdf_path, &pdf_data)?;
            println!("Exported PDF ({} bytes) to {:?}", pdf_data.len(), pdf_path);
        }
        OutputFormat::Png => {
            let base = output_path.with_extension("");
            let stem = base
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "blueprint".to_string());
            let images = export_png_pages(&output.drawing, resolution)?;
            for (page, png) in output.drawing.pages.iter().zip(&images) {
                let png_path = base.with_file_name(format!("{}_{}F.png", stem, page.z));
                fs::write(&png_path, png)?;
                println!("Exported PNG ({} bytes) to {:?}", png.len(), png_path);
            }
            if images.is_empty() {
                println!("Nothing to draw, no PNG written");
            }
        }
        OutputFormat::Json => {
            let json_path = with_default_extension(output_path, "json");
            let json = export_json(&output)?;
            fs::write(&json_path, &json)?;
            println!("Exported draw commands to {:?}", json_path);
        }
    }

    Ok(())
}

fn show_materials(
    input_path: &Path,
    height: Option<&str>,
    config_path: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let drafter = Drafter::with_config(load_config(config_path)?);
    let blueprint = load_input(input_path)?;
    let tally = drafter.materials(&blueprint, drafter.floor_height(height));

    if json {
        println!("{}", serde_json::to_string_pretty(&tally)?);
        return Ok(());
    }

    println!("\n{}", tally.legend_header());
    for count in tally.iter() {
        println!("  {}: {}", count.display_name, count.count);
    }
    println!("  Total: {}", tally.total());

    Ok(())
}

fn show_blueprint_info(
    input_path: &Path,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let blueprint = load_input(input_path)?;

    println!("\nBlueprint Info:");
    println!("  Name: {}", blueprint.name);
    println!("  Cells: {}", blueprint.len());
    if let Some(bounds) = blueprint.bounds() {
        let [w, d, h] = bounds.dimensions();
        println!("  Bounds: {:?} to {:?} ({}x{}x{})", bounds.min, bounds.max, w, d, h);
    }

    println!("  Layers:");
    for layer in blueprint.layers() {
        let drawable = layer
            .cells
            .iter()
            .filter(|c| config.palette.recognizes(&c.block))
            .count();
        println!("    {}F: {} cells ({} drawable)", layer.z, layer.len(), drawable);
    }

    let mut unrecognized: BTreeMap<&str, usize> = BTreeMap::new();
    for (_, block) in blueprint.iter_cells() {
        if !config.palette.recognizes(block) {
            *unrecognized.entry(block).or_default() += 1;
        }
    }
    if !unrecognized.is_empty() {
        println!("  Unrecognized types (not drawn):");
        for (block, count) in unrecognized {
            println!("    {}: {}", block, count);
        }
    }

    Ok(())
}

fn with_default_extension(path: &Path, extension: &str) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(extension)
    }
}
