//! Mesh -> .obx stream export
//!
//! Faces are triangulated in mesh order into one flat corner stream; every
//! corner is then transformed into export space and written as one line.
//! Face order and the order of triangles within a face fix the line order,
//! so exporting the same mesh and world matrix twice is byte-identical.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use glam::{Mat4, Vec2, Vec3};

use crate::error::ObxError;
use crate::formats::obx::{CORNERS_PER_TRIANGLE, ensure_obx_extension, format_corner, write_corner};
use crate::mesh::SourceMesh;
use crate::transform::{effective_transform, to_export_space};
use crate::triangulate::{Corner, triangle_count, triangulate};

/// Host-side provider of the object being exported.
///
/// Implemented by whatever owns the scene: it hands over the evaluated
/// (modifier-applied) mesh of the active object and that object's world
/// matrix.
pub trait MeshSource {
    /// Finalized mesh of the active object
    fn evaluated_mesh(&self) -> Result<SourceMesh, ObxError>;

    /// World matrix of the active object
    fn world_matrix(&self) -> Mat4;
}

/// Counts describing one exported stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportStats {
    pub faces: usize,
    pub triangles: usize,
    pub corners: usize,
}

/// Result of writing an `.obx` file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// Final path, with `.obx` appended when it was missing
    pub path: PathBuf,
    pub stats: ExportStats,
}

/// Triangulate every face, in order, into a single corner stream.
///
/// Fails before producing anything if a face references a missing vertex.
pub fn corner_stream(mesh: &SourceMesh) -> Result<Vec<Corner>, ObxError> {
    mesh.validate()?;

    let triangles: usize = mesh.faces.iter().map(triangle_count).sum();
    let mut corners = Vec::with_capacity(triangles * CORNERS_PER_TRIANGLE);
    for face in &mesh.faces {
        for triangle in triangulate(face) {
            corners.extend_from_slice(triangle.corners());
        }
    }
    Ok(corners)
}

/// Export a mesh to its `.obx` lines, one per triangle corner.
pub fn export_mesh(mesh: &SourceMesh, world: Mat4) -> Result<Vec<String>, ObxError> {
    Ok(export_space_corners(mesh, world)?
        .map(|(position, uv)| format_corner(position, uv))
        .collect())
}

/// Stream a mesh as `.obx` text into `w`.
pub fn write_obx<W: Write>(
    w: &mut W,
    mesh: &SourceMesh,
    world: Mat4,
) -> Result<ExportStats, ObxError> {
    let mut corners = 0;
    for (position, uv) in export_space_corners(mesh, world)? {
        write_corner(w, position, uv)?;
        corners += 1;
    }

    Ok(ExportStats {
        faces: mesh.faces.len(),
        triangles: corners / CORNERS_PER_TRIANGLE,
        corners,
    })
}

/// Corner stream with positions already mapped into export space
fn export_space_corners(
    mesh: &SourceMesh,
    world: Mat4,
) -> Result<impl Iterator<Item = (Vec3, Vec2)> + '_, ObxError> {
    let corners = corner_stream(mesh)?;
    let effective = effective_transform(world);
    tracing::debug!("Effective export transform: {:?}", effective);

    Ok(corners.into_iter().map(move |c| {
        let position = to_export_space(&effective, mesh.positions[c.vertex as usize]);
        (position, c.uv)
    }))
}

/// Write a mesh to an `.obx` file.
///
/// `.obx` is appended to `path` when missing. The mesh is validated before
/// the filesystem is touched. Output goes to a sibling `.tmp` file which is
/// renamed over the target only once fully written and synced, so a failed
/// export never leaves a truncated model behind.
pub fn write_obx_file(
    path: impl AsRef<Path>,
    mesh: &SourceMesh,
    world: Mat4,
) -> Result<ExportedFile, ObxError> {
    let path = ensure_obx_extension(path);
    mesh.validate()?;

    let tmp_path = temp_path_for(&path)?;
    tracing::debug!("Writing {} via {}", path.display(), tmp_path.display());

    let result = write_to_temp(&tmp_path, mesh, world).and_then(|stats| {
        fs::rename(&tmp_path, &path)
            .map(|_| stats)
            .map_err(|e| ObxError::io(&path, e))
    });

    match result {
        Ok(stats) => {
            tracing::info!(
                "Exported {}: {} faces, {} triangles, {} corners",
                path.display(),
                stats.faces,
                stats.triangles,
                stats.corners
            );
            Ok(ExportedFile { path, stats })
        }
        Err(e) => {
            // Best effort: the temp file may never have been created
            let _ = fs::remove_file(&tmp_path);
            Err(e)
        }
    }
}

/// Export the host's active object to `path`.
///
/// Single synchronous entry point for host integrations (menu actions,
/// file-dialog callbacks, CLI commands).
pub fn export_selected_mesh(
    source: &dyn MeshSource,
    path: &Path,
) -> Result<ExportedFile, ObxError> {
    let mesh = source.evaluated_mesh()?;
    write_obx_file(path, &mesh, source.world_matrix())
}

fn write_to_temp(tmp_path: &Path, mesh: &SourceMesh, world: Mat4) -> Result<ExportStats, ObxError> {
    let file = File::create(tmp_path).map_err(|e| ObxError::io(tmp_path, e))?;
    let mut writer = BufWriter::new(file);

    let stats = write_obx(&mut writer, mesh, world).map_err(|e| match e {
        ObxError::Write(source) => ObxError::io(tmp_path, source),
        other => other,
    })?;

    let file = writer
        .into_inner()
        .map_err(|e| ObxError::io(tmp_path, e.into_error()))?;
    file.sync_all().map_err(|e| ObxError::io(tmp_path, e))?;
    Ok(stats)
}

fn temp_path_for(path: &Path) -> Result<PathBuf, ObxError> {
    match path.file_name() {
        Some(name) => {
            let mut tmp_name = OsString::from(name);
            tmp_name.push(".tmp");
            Ok(path.with_file_name(tmp_name))
        }
        None => Err(ObxError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "output path has no file name"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Face;

    fn quad_mesh() -> SourceMesh {
        SourceMesh::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![Face::Quad {
                vertices: [0, 1, 2, 3],
                uvs: Some([
                    Vec2::new(0.0, 0.0),
                    Vec2::new(1.0, 0.0),
                    Vec2::new(1.0, 1.0),
                    Vec2::new(0.0, 1.0),
                ]),
            }],
        )
    }

    #[test]
    fn test_corner_stream_preserves_face_then_triangle_order() {
        let mesh = SourceMesh::new(
            vec![Vec3::ZERO; 6],
            vec![Face::triangle([5, 4, 3]), Face::quad([0, 1, 2, 3])],
        );
        let vertices: Vec<u32> = corner_stream(&mesh).unwrap().iter().map(|c| c.vertex).collect();
        assert_eq!(vertices, [5, 4, 3, 0, 1, 2, 2, 3, 0]);
    }

    #[test]
    fn test_quad_exports_two_triangle_fan() {
        let lines = export_mesh(&quad_mesh(), Mat4::IDENTITY).unwrap();
        assert_eq!(lines.len(), 6);

        let uvs: Vec<String> = lines
            .iter()
            .map(|l| l.split_whitespace().skip(3).collect::<Vec<_>>().join(" "))
            .collect();
        assert_eq!(
            uvs,
            [
                "0.0000 0.0000",
                "1.0000 0.0000",
                "1.0000 1.0000",
                "1.0000 1.0000",
                "0.0000 1.0000",
                "0.0000 0.0000",
            ]
        );
    }

    #[test]
    fn test_write_obx_matches_export_mesh() {
        let mesh = quad_mesh();
        let world = Mat4::from_translation(Vec3::new(0.5, -2.0, 3.25));

        let mut buf = Vec::new();
        let stats = write_obx(&mut buf, &mesh, world).unwrap();

        assert_eq!(
            stats,
            ExportStats {
                faces: 1,
                triangles: 2,
                corners: 6
            }
        );
        assert_eq!(String::from_utf8(buf).unwrap(), export_mesh(&mesh, world).unwrap().concat());
    }

    #[test]
    fn test_empty_mesh_writes_nothing() {
        let mut buf = Vec::new();
        let stats = write_obx(&mut buf, &SourceMesh::default(), Mat4::IDENTITY).unwrap();
        assert!(buf.is_empty());
        assert_eq!(stats, ExportStats::default());
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let tmp = temp_path_for(Path::new("out/dwarf.obx")).unwrap();
        assert_eq!(tmp, PathBuf::from("out/dwarf.obx.tmp"));
    }
}
