mod scene;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use percept_pixels::{PixelType, traits_of};
use percept_render::RenderPass;
use tracing_subscriber::EnvFilter;

use crate::scene::SceneDescription;

#[derive(Parser)]
#[command(name = "percept-cli", about = "CLI tool for percept render-core inspection")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions
    Info,
    /// Print the pixel taxonomy table
    Taxonomy {
        /// Emit JSON instead of a text table
        #[arg(long)]
        json: bool,
    },
    /// Validate a JSON scene description and report per-pass draw counts
    Scene {
        /// Path to the scene description
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("percept-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", percept_common::crate_info());
            println!("pixels: {}", percept_pixels::crate_info());
            println!("render: {}", percept_render::crate_info());
        }
        Commands::Taxonomy { json } => {
            let entries: Vec<_> = PixelType::ALL.into_iter().map(traits_of).collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                println!(
                    "{:<9} {:<6} {:<4} {:>3} {:>5}  sentinels",
                    "type", "format", "scal", "ch", "B/px"
                );
                for entry in &entries {
                    let sentinels = match entry.depth_sentinels() {
                        Some(s) => format!("too_close={} too_far={}", s.too_close, s.too_far),
                        None => "-".to_string(),
                    };
                    println!(
                        "{:<9} {:<6} {:<4} {:>3} {:>5}  {}",
                        entry.pixel_type(),
                        entry.format(),
                        entry.scalar(),
                        entry.num_channels(),
                        entry.bytes_per_pixel(),
                        sentinels
                    );
                }
            }
        }
        Commands::Scene { path } => {
            let scene = SceneDescription::load(&path)?;
            let (tables, _) = scene.build_tables()?;
            println!(
                "Scene {}: meshes={}, instances={}",
                path.display(),
                tables.geometry_count(),
                tables.instance_count()
            );
            for pass in RenderPass::ALL {
                let draws = tables.draw_list(pass)?;
                let triangles: u64 = draws
                    .iter()
                    .map(|d| u64::from(d.geometry.triangle_count()))
                    .sum();
                let mirrored = draws.iter().filter(|d| d.instance.flips_winding()).count();
                println!(
                    "  {:<5} -> {}: draws={}, triangles={}, mirrored={}",
                    pass,
                    pass.output_pixel_type(),
                    draws.len(),
                    triangles,
                    mirrored
                );
            }
        }
    }

    Ok(())
}
