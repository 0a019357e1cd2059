//! Error taxonomy for mesh export

use std::io;
use std::path::PathBuf;

/// Errors raised while converting a mesh into an `.obx` stream.
///
/// Every variant aborts the whole export. Input errors are detected before
/// the destination file is touched.
#[derive(Debug, thiserror::Error)]
pub enum ObxError {
    /// Face with a corner count other than 3 or 4
    #[error("face {face} has {corners} corners (only triangles and quads are supported)")]
    MalformedFace { face: usize, corners: usize },

    /// Per-corner UV list does not line up with the face's vertex list
    #[error("face {face} has {vertices} vertices but {uvs} UV coordinates")]
    UvCountMismatch {
        face: usize,
        vertices: usize,
        uvs: usize,
    },

    /// Face references a vertex that is not in the position table
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    VertexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },

    /// Filesystem failure while producing the output file
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failure of a caller-supplied writer
    #[error("failed to write vertex stream: {0}")]
    Write(#[from] io::Error),

    /// Host could not provide a mesh for export
    #[error("no mesh available for export: {0}")]
    NoMesh(String),
}

impl ObxError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
