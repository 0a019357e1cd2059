//! OBJ mesh loading
//!
//! Reads positions, texture coordinates and faces from a Wavefront OBJ file
//! into a [`SourceMesh`]. Faces keep their arity: triangles and quads pass
//! through untouched so the exporter's fixed quad split applies, and any
//! other polygon is rejected rather than fan-triangulated here.

use anyhow::{Context, Result, bail};
use glam::{Mat4, Vec2, Vec3};
use obx_common::{Face, MeshSource, ObxError, SourceMesh};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// An OBJ mesh placed in the world, standing in for the host's active object
#[derive(Debug, Clone)]
pub struct ObjScene {
    pub mesh: SourceMesh,
    pub world: Mat4,
}

impl ObjScene {
    /// Load an OBJ file and place it with `world`
    pub fn load(input: &Path, world: Mat4) -> Result<Self> {
        Ok(Self {
            mesh: load_obj(input)?,
            world,
        })
    }
}

impl MeshSource for ObjScene {
    fn evaluated_mesh(&self) -> Result<SourceMesh, ObxError> {
        Ok(self.mesh.clone())
    }

    fn world_matrix(&self) -> Mat4 {
        self.world
    }
}

/// Load an OBJ file into a [`SourceMesh`]
pub fn load_obj(input: &Path) -> Result<SourceMesh> {
    let file = File::open(input).with_context(|| format!("Failed to open OBJ: {:?}", input))?;
    let mesh = parse_obj(BufReader::new(file))
        .with_context(|| format!("Failed to parse OBJ: {:?}", input))?;

    tracing::debug!(
        "Loaded OBJ {:?}: {} vertices, {} faces, uvs={}",
        input,
        mesh.positions.len(),
        mesh.faces.len(),
        mesh.has_uvs()
    );
    Ok(mesh)
}

/// Parse OBJ text into a [`SourceMesh`]
pub fn parse_obj<R: BufRead>(reader: R) -> Result<SourceMesh> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut tex_coords: Vec<Vec2> = Vec::new();
    let mut faces: Vec<Face> = Vec::new();
    let mut skipped_records = 0usize;

    for (line_idx, line) in reader.lines().enumerate() {
        let line_no = line_idx + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "v" => {
                let [x, y, z] = parse_floats::<3>(&parts[1..], 3)
                    .with_context(|| format!("line {}: invalid vertex", line_no))?;
                positions.push(Vec3::new(x, y, z));
            }
            "vt" => {
                // `v` is optional and defaults to 0
                let [u, v] = parse_floats::<2>(&parts[1..], 1)
                    .with_context(|| format!("line {}: invalid texture coordinate", line_no))?;
                tex_coords.push(Vec2::new(u, v));
            }
            "f" => {
                let mut vertices = Vec::with_capacity(4);
                let mut uvs = Vec::with_capacity(4);
                for corner in &parts[1..] {
                    let (vi, vti) = parse_obj_vertex(corner, positions.len(), tex_coords.len())
                        .with_context(|| {
                            format!("line {}: invalid face corner {:?}", line_no, corner)
                        })?;
                    vertices.push(
                        vertex_index(vi).with_context(|| format!("line {}", line_no))?,
                    );
                    if let Some(ti) = vti {
                        uvs.push(tex_coords[ti]);
                    }
                }

                if !uvs.is_empty() && uvs.len() != vertices.len() {
                    bail!(
                        "line {}: face mixes corners with and without texture coordinates",
                        line_no
                    );
                }

                let face = Face::from_corners(faces.len(), &vertices, Some(uvs.as_slice()))
                    .with_context(|| format!("line {}: unsupported face", line_no))?;
                faces.push(face);
            }
            _ => skipped_records += 1,
        }
    }

    if skipped_records > 0 {
        tracing::warn!("Ignored {} unsupported OBJ records", skipped_records);
    }

    Ok(SourceMesh::new(positions, faces))
}

/// Parse up to `N` floats; fields after the first `required` default to 0
fn parse_floats<const N: usize>(fields: &[&str], required: usize) -> Result<[f32; N]> {
    if fields.len() < required {
        bail!("expected at least {} values, found {}", required, fields.len());
    }
    let mut out = [0.0f32; N];
    for (slot, field) in out.iter_mut().zip(fields) {
        *slot = field
            .parse()
            .with_context(|| format!("not a number: {:?}", field))?;
    }
    Ok(out)
}

/// Parse OBJ vertex reference: "v", "v/vt", "v/vt/vn", or "v//vn"
///
/// Returns 0-based (position, texcoord) indices. Negative references count
/// back from the most recently declared element.
fn parse_obj_vertex(
    s: &str,
    vertex_count: usize,
    uv_count: usize,
) -> Result<(usize, Option<usize>)> {
    let mut parts = s.split('/');

    let vi = parts
        .next()
        .filter(|p| !p.is_empty())
        .context("missing vertex index")?;
    let vi = resolve_index(vi, vertex_count)?;

    let vti = match parts.next().filter(|p| !p.is_empty()) {
        Some(p) => Some(resolve_index(p, uv_count)?),
        None => None,
    };

    Ok((vi, vti))
}

/// Narrow a resolved position index to the mesh's `u32` index type
fn vertex_index(vi: usize) -> Result<u32> {
    u32::try_from(vi).with_context(|| format!("vertex index {} exceeds u32 range", vi))
}

fn resolve_index(field: &str, count: usize) -> Result<usize> {
    let raw: i64 = field
        .parse()
        .with_context(|| format!("not an index: {:?}", field))?;

    let resolved = match raw {
        0 => None,
        r if r > 0 => usize::try_from(r - 1).ok(),
        r => count.checked_sub(r.unsigned_abs() as usize),
    };

    match resolved {
        Some(i) if i < count => Ok(i),
        _ => bail!("index {} out of range ({} declared)", raw, count),
    }
}
