//! Face triangulation
//!
//! Quads are always split along the v2-v0 diagonal into `(v0, v1, v2)` and
//! `(v2, v3, v0)`. The engine's loader depends on this exact corner order,
//! so the split must not be changed to the v1-v3 diagonal or to a
//! shortest-diagonal heuristic.

use glam::Vec2;
use smallvec::{SmallVec, smallvec};

use crate::mesh::{FALLBACK_UV, Face};

/// One triangle corner: a vertex reference plus the UV used at that corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    pub vertex: u32,
    pub uv: Vec2,
}

impl Corner {
    pub const fn new(vertex: u32, uv: Vec2) -> Self {
        Self { vertex, uv }
    }
}

/// Three corners in input winding order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle(pub [Corner; 3]);

impl Triangle {
    pub fn corners(&self) -> &[Corner; 3] {
        &self.0
    }

    pub fn vertices(&self) -> [u32; 3] {
        self.0.map(|c| c.vertex)
    }

    pub fn uvs(&self) -> [Vec2; 3] {
        self.0.map(|c| c.uv)
    }
}

/// Triangles produced by a single face (one or two)
pub type FaceTriangles = SmallVec<[Triangle; 2]>;

/// Split a face into triangles, pairing each corner with its UV.
///
/// Faces without texture data get [`FALLBACK_UV`] on every corner.
pub fn triangulate(face: &Face) -> FaceTriangles {
    match *face {
        Face::Triangle { vertices, uvs } => {
            let t = uvs.unwrap_or([FALLBACK_UV; 3]);
            smallvec![tri(vertices, t, [0, 1, 2])]
        }
        Face::Quad { vertices, uvs } => {
            let t = uvs.unwrap_or([FALLBACK_UV; 4]);
            smallvec![tri(vertices, t, [0, 1, 2]), tri(vertices, t, [2, 3, 0])]
        }
    }
}

/// Number of triangles [`triangulate`] yields for `face`
pub fn triangle_count(face: &Face) -> usize {
    match face {
        Face::Triangle { .. } => 1,
        Face::Quad { .. } => 2,
    }
}

fn tri<const N: usize>(vertices: [u32; N], uvs: [Vec2; N], order: [usize; 3]) -> Triangle {
    Triangle(order.map(|i| Corner::new(vertices[i], uvs[i])))
}
