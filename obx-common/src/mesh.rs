//! Source mesh data model
//!
//! A [`SourceMesh`] is the finalized polygon mesh handed over by the host:
//! a vertex position table and an ordered list of triangle or quad faces.
//! UV coordinates belong to face corners, so the same vertex may carry a
//! different UV in each face that uses it.

use glam::{Vec2, Vec3};

use crate::error::ObxError;

/// UV assigned to every corner of a face that has no texture data.
pub const FALLBACK_UV: Vec2 = Vec2::ZERO;

/// One polygon face of the source mesh.
///
/// Only triangles and quads exist; the UV set, when present, has one
/// coordinate per corner in the same order as the vertex indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Face {
    Triangle {
        vertices: [u32; 3],
        uvs: Option<[Vec2; 3]>,
    },
    Quad {
        vertices: [u32; 4],
        uvs: Option<[Vec2; 4]>,
    },
}

impl Face {
    /// Triangle face without texture data
    pub const fn triangle(vertices: [u32; 3]) -> Self {
        Self::Triangle {
            vertices,
            uvs: None,
        }
    }

    /// Quad face without texture data
    pub const fn quad(vertices: [u32; 4]) -> Self {
        Self::Quad {
            vertices,
            uvs: None,
        }
    }

    /// Build a face from parallel corner slices.
    ///
    /// `face` is the position of the face in its mesh and only feeds error
    /// messages. An empty UV slice is treated the same as `None`.
    ///
    /// # Errors
    ///
    /// - [`ObxError::MalformedFace`] when `vertices` has other than 3 or 4 entries
    /// - [`ObxError::UvCountMismatch`] when a non-empty `uvs` differs in length
    pub fn from_corners(
        face: usize,
        vertices: &[u32],
        uvs: Option<&[Vec2]>,
    ) -> Result<Self, ObxError> {
        let uvs = uvs.filter(|uvs| !uvs.is_empty());
        if let Some(uvs) = uvs {
            if uvs.len() != vertices.len() {
                return Err(ObxError::UvCountMismatch {
                    face,
                    vertices: vertices.len(),
                    uvs: uvs.len(),
                });
            }
        }

        match *vertices {
            [v0, v1, v2] => Ok(Self::Triangle {
                vertices: [v0, v1, v2],
                uvs: uvs.map(|t| [t[0], t[1], t[2]]),
            }),
            [v0, v1, v2, v3] => Ok(Self::Quad {
                vertices: [v0, v1, v2, v3],
                uvs: uvs.map(|t| [t[0], t[1], t[2], t[3]]),
            }),
            _ => Err(ObxError::MalformedFace {
                face,
                corners: vertices.len(),
            }),
        }
    }

    /// Vertex indices in winding order
    pub fn vertices(&self) -> &[u32] {
        match self {
            Face::Triangle { vertices, .. } => vertices.as_slice(),
            Face::Quad { vertices, .. } => vertices.as_slice(),
        }
    }

    /// Per-corner UVs, if the face has texture data
    pub fn uvs(&self) -> Option<&[Vec2]> {
        match self {
            Face::Triangle { uvs, .. } => uvs.as_ref().map(|t| t.as_slice()),
            Face::Quad { uvs, .. } => uvs.as_ref().map(|t| t.as_slice()),
        }
    }
}

/// Finalized polygon mesh in object-local space
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceMesh {
    pub positions: Vec<Vec3>,
    pub faces: Vec<Face>,
}

impl SourceMesh {
    pub fn new(positions: Vec<Vec3>, faces: Vec<Face>) -> Self {
        Self { positions, faces }
    }

    /// Check that every face only references existing vertices.
    pub fn validate(&self) -> Result<(), ObxError> {
        let vertex_count = self.positions.len();
        for (face, f) in self.faces.iter().enumerate() {
            if let Some(&index) = f
                .vertices()
                .iter()
                .find(|&&index| index as usize >= vertex_count)
            {
                return Err(ObxError::VertexOutOfRange {
                    face,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Whether any face carries texture data
    pub fn has_uvs(&self) -> bool {
        self.faces.iter().any(|f| f.uvs().is_some())
    }
}
