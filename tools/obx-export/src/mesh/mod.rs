//! Mesh loading (OBJ -> SourceMesh)

mod obj;

// Re-export public API
pub use obj::{ObjScene, load_obj, parse_obj};
