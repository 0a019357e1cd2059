//! obx-export library
//!
//! Provides mesh loading, manifest builds and the exporter table for use by
//! the `obx-export` binary and by host integrations.

pub mod manifest;
pub mod mesh;
pub mod registry;

// Re-export the export core
pub use obx_common::{
    ExportStats, ExportedFile, Face, MeshSource, OBX_EXTENSION, ObxError, SourceMesh,
    ensure_obx_extension, export_mesh, export_selected_mesh, write_obx_file,
};

// Re-export key types for loading and batch export
pub use manifest::{BuildSummary, ObxManifest, TransformConfig, build_all, load_manifest};
pub use mesh::{ObjScene, load_obj};
pub use registry::{ExporterEntry, ExporterRegistry};
