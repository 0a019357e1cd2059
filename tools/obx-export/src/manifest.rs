//! obx.toml manifest parsing and batch builds
//!
//! A manifest lists the meshes to export and how each one is placed in the
//! world before export:
//!
//! ```toml
//! [output]
//! dir = "build/models"
//!
//! [[meshes]]
//! id = "dwarf"
//! path = "models/dwarf.obj"
//!
//! [meshes.transform]
//! translation = [0.0, 0.0, 1.0]
//! rotation_degrees = [0.0, 0.0, 90.0]
//! ```

use anyhow::{Context, Result};
use glam::{Mat4, Quat, Vec3};
use obx_common::{ExportedFile, write_obx_file};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::mesh::load_obj;

/// Default manifest file name
pub const DEFAULT_MANIFEST: &str = "obx.toml";

/// obx.toml manifest structure
#[derive(Debug, Default, Deserialize)]
pub struct ObxManifest {
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub meshes: Vec<MeshEntry>,
}

/// Output configuration section
#[derive(Debug, Default, Deserialize)]
pub struct OutputSection {
    /// Output directory, relative to the manifest.
    /// Default: the manifest's own directory
    pub dir: Option<String>,
}

/// Single mesh entry
#[derive(Debug, Deserialize)]
pub struct MeshEntry {
    pub id: String,
    pub path: String,

    /// Output file name inside the output directory.
    /// Default: `<id>.obx`. `.obx` is appended when missing.
    #[serde(default)]
    pub output: Option<String>,

    /// World placement of the mesh. Default: identity
    #[serde(default)]
    pub transform: Option<TransformConfig>,
}

/// World transform, either as TRS components or as a raw matrix
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransformConfig {
    pub translation: Option<[f32; 3]>,

    /// XYZ Euler angles in degrees, applied X first, then Y, then Z
    pub rotation_degrees: Option<[f32; 3]>,

    pub scale: Option<[f32; 3]>,

    /// Column-major 4x4 matrix. Cannot be combined with the TRS fields.
    pub matrix: Option<[f32; 16]>,
}

impl TransformConfig {
    /// Build the world matrix
    pub fn to_mat4(&self) -> Mat4 {
        if let Some(m) = &self.matrix {
            return Mat4::from_cols_array(m);
        }

        let translation = self.translation.map(Vec3::from).unwrap_or(Vec3::ZERO);
        let scale = self.scale.map(Vec3::from).unwrap_or(Vec3::ONE);
        let [rx, ry, rz] = self.rotation_degrees.unwrap_or([0.0; 3]);
        let rotation = Quat::from_rotation_z(rz.to_radians())
            * Quat::from_rotation_y(ry.to_radians())
            * Quat::from_rotation_x(rx.to_radians());

        Mat4::from_scale_rotation_translation(scale, rotation, translation)
    }

    /// Validate transform fields
    pub fn validate(&self) -> Result<()> {
        let has_trs =
            self.translation.is_some() || self.rotation_degrees.is_some() || self.scale.is_some();
        if self.matrix.is_some() && has_trs {
            anyhow::bail!("transform.matrix cannot be combined with translation/rotation/scale");
        }

        let values = self
            .translation
            .iter()
            .chain(&self.rotation_degrees)
            .chain(&self.scale)
            .flatten()
            .chain(self.matrix.iter().flatten());
        for v in values {
            if !v.is_finite() {
                anyhow::bail!("transform contains non-finite value {}", v);
            }
        }

        if let Some(scale) = self.scale {
            if scale.contains(&0.0) {
                anyhow::bail!("transform.scale {:?} has a zero component", scale);
            }
        }

        Ok(())
    }
}

impl MeshEntry {
    /// World matrix for this entry
    pub fn world_matrix(&self) -> Mat4 {
        self.transform
            .as_ref()
            .map(TransformConfig::to_mat4)
            .unwrap_or(Mat4::IDENTITY)
    }

    /// Output file name (before `.obx` is ensured)
    pub fn output_name(&self) -> &str {
        self.output.as_deref().unwrap_or(&self.id)
    }
}

impl ObxManifest {
    /// Load manifest from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse manifest from string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse obx.toml")
    }

    /// Validate manifest fields
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for entry in &self.meshes {
            if entry.id.trim().is_empty() {
                anyhow::bail!("Mesh entry with path {:?} has an empty id", entry.path);
            }
            if entry.path.trim().is_empty() {
                anyhow::bail!("Mesh '{}' has an empty path", entry.id);
            }
            if !ids.insert(entry.id.as_str()) {
                anyhow::bail!("Duplicate mesh id '{}' in obx.toml", entry.id);
            }
            if let Some(transform) = &entry.transform {
                transform
                    .validate()
                    .with_context(|| format!("Invalid transform for mesh '{}'", entry.id))?;
            }
        }

        if self.meshes.is_empty() {
            tracing::warn!("obx.toml declares no meshes");
        }

        Ok(())
    }

    /// Resolve the output directory
    pub fn output_dir(&self, manifest_dir: &Path, output_override: Option<&Path>) -> PathBuf {
        match (output_override, &self.output.dir) {
            (Some(dir), _) => dir.to_path_buf(),
            (None, Some(dir)) => manifest_dir.join(dir),
            (None, None) => manifest_dir.to_path_buf(),
        }
    }
}

/// Load a manifest file
pub fn load_manifest(path: &Path) -> Result<ObxManifest> {
    ObxManifest::load(path)
}

/// Files written by [`build_all`]
#[derive(Debug, Default)]
pub struct BuildSummary {
    pub files: Vec<ExportedFile>,
}

impl BuildSummary {
    pub fn total_triangles(&self) -> usize {
        self.files.iter().map(|f| f.stats.triangles).sum()
    }
}

/// Export every mesh in the manifest.
///
/// Paths in the manifest are relative to `manifest_dir`. Stops at the first
/// failing entry; files already written by earlier entries are kept.
pub fn build_all(
    manifest: &ObxManifest,
    manifest_dir: &Path,
    output_override: Option<&Path>,
) -> Result<BuildSummary> {
    manifest.validate()?;

    let out_dir = manifest.output_dir(manifest_dir, output_override);
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    let mut summary = BuildSummary::default();
    for entry in &manifest.meshes {
        let input = manifest_dir.join(&entry.path);
        tracing::info!("Exporting mesh '{}' from {}", entry.id, input.display());

        let mesh = load_obj(&input).with_context(|| format!("Mesh '{}'", entry.id))?;
        let exported = write_obx_file(out_dir.join(entry.output_name()), &mesh, entry.world_matrix())
            .with_context(|| format!("Failed to export mesh '{}'", entry.id))?;
        summary.files.push(exported);
    }

    Ok(summary)
}
