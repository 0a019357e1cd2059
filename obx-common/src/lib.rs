//! Shared mesh export core for the `.obx` vertex stream format
//!
//! Converts a finalized triangle/quad mesh into the flat, text-based vertex
//! stream read by the game's model loader:
//!
//! - [`triangulate`] normalizes faces into triangles with per-corner UVs
//! - [`transform`] maps positions into export space
//! - [`export`] serializes the corner stream and writes files atomically

pub mod error;
pub mod export;
pub mod formats;
pub mod mesh;
pub mod transform;
pub mod triangulate;

pub use error::ObxError;
pub use export::{
    ExportStats, ExportedFile, MeshSource, corner_stream, export_mesh, export_selected_mesh,
    write_obx, write_obx_file,
};
pub use formats::{CORNERS_PER_TRIANGLE, OBX_EXTENSION, ensure_obx_extension, format_corner};
pub use mesh::{FALLBACK_UV, Face, SourceMesh};
pub use transform::{AXIS_CONVERSION, effective_transform};
pub use triangulate::{Corner, Triangle, triangle_count, triangulate};
