//! obx-export - mesh export tool
//!
//! Converts OBJ meshes into the .obx vertex stream read by the game's model
//! loader, either one at a time or in batches described by an obx.toml
//! manifest.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

// Use modules from library
use obx_export::manifest::{self, DEFAULT_MANIFEST, TransformConfig};
use obx_export::{ExporterRegistry, ObjScene};

#[derive(Parser)]
#[command(name = "obx-export")]
#[command(about = "Exports meshes to the .obx vertex stream format")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build every mesh listed in a manifest file
    Build {
        /// Path to obx.toml manifest
        #[arg(default_value = DEFAULT_MANIFEST)]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate manifest without building
    Check {
        /// Path to obx.toml manifest
        #[arg(default_value = DEFAULT_MANIFEST)]
        manifest: PathBuf,
    },

    /// Export a single mesh file
    Mesh {
        /// Input mesh file (OBJ)
        input: PathBuf,

        /// Output file (".obx" appended when missing)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format identifier (see `formats`)
        #[arg(short, long, default_value = "obx")]
        format: String,

        /// World translation as x,y,z
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        translate: Option<Vec<f32>>,

        /// World rotation as XYZ Euler degrees x,y,z
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        rotate: Option<Vec<f32>>,

        /// World scale as x,y,z
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        scale: Option<Vec<f32>>,
    },

    /// List available export formats
    Formats,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let registry = ExporterRegistry::new();

    match cli.command {
        Commands::Build {
            manifest,
            output,
            verbose,
        } => {
            if verbose {
                tracing::info!("Building meshes from {:?}", manifest);
            }
            let config = manifest::load_manifest(&manifest)?;
            let manifest_dir = manifest.parent().unwrap_or(Path::new(""));
            let summary = manifest::build_all(&config, manifest_dir, output.as_deref())?;
            tracing::info!(
                "Build complete! {} files, {} triangles",
                summary.files.len(),
                summary.total_triangles()
            );
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            config.validate()?;
            tracing::info!("Manifest is valid! ({} meshes)", config.meshes.len());
        }

        Commands::Mesh {
            input,
            output,
            format,
            translate,
            rotate,
            scale,
        } => {
            let exporter = registry.get(&format).with_context(|| {
                format!("Unknown export format '{}' (run `obx-export formats`)", format)
            })?;

            let transform = TransformConfig {
                translation: vec3_arg("translate", translate)?,
                rotation_degrees: vec3_arg("rotate", rotate)?,
                scale: vec3_arg("scale", scale)?,
                matrix: None,
            };
            transform.validate()?;

            let output = output.unwrap_or_else(|| input.with_extension(exporter.extension));
            tracing::info!("Converting {:?} -> {:?}", input, output);

            let ext = input
                .extension()
                .and_then(|e| e.to_str())
                .map(|s| s.to_lowercase())
                .unwrap_or_default();
            if ext != "obj" {
                anyhow::bail!("Unsupported mesh format: {:?} (use .obj)", input);
            }

            let scene = ObjScene::load(&input, transform.to_mat4())?;
            let exported = (exporter.export)(&scene, &output)
                .with_context(|| format!("Failed to export {:?}", input))?;
            tracing::info!("Done! Wrote {:?}", exported.path);
        }

        Commands::Formats => {
            for entry in registry.iter() {
                println!("{:<8} .{:<8} {}", entry.id, entry.extension, entry.label);
            }
        }
    }

    Ok(())
}

/// Convert an optional `x,y,z` argument into a 3-component array
fn vec3_arg(name: &str, values: Option<Vec<f32>>) -> Result<Option<[f32; 3]>> {
    match values {
        None => Ok(None),
        Some(v) => <[f32; 3]>::try_from(v.as_slice()).map(Some).map_err(|_| {
            anyhow::anyhow!("--{} expects 3 comma-separated values, got {}", name, v.len())
        }),
    }
}
