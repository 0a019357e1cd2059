//! Test asset generators for obx-export integration tests

use std::io::Write;
use std::path::Path;

/// Unit cube built from six quads, with one UV square per face
pub fn generate_cube_obj(path: &Path) -> std::io::Result<()> {
    let mut f = std::fs::File::create(path)?;
    writeln!(f, "# Unit cube")?;
    writeln!(f, "o Cube")?;
    for (x, y, z) in [
        (-0.5, -0.5, -0.5),
        (0.5, -0.5, -0.5),
        (0.5, 0.5, -0.5),
        (-0.5, 0.5, -0.5),
        (-0.5, -0.5, 0.5),
        (0.5, -0.5, 0.5),
        (0.5, 0.5, 0.5),
        (-0.5, 0.5, 0.5),
    ] {
        writeln!(f, "v {} {} {}", x, y, z)?;
    }
    for (u, v) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
        writeln!(f, "vt {} {}", u, v)?;
    }
    for [a, b, c, d] in [
        [1, 4, 3, 2],
        [5, 6, 7, 8],
        [1, 2, 6, 5],
        [2, 3, 7, 6],
        [3, 4, 8, 7],
        [4, 1, 5, 8],
    ] {
        writeln!(f, "f {}/1 {}/2 {}/3 {}/4", a, b, c, d)?;
    }
    Ok(())
}

/// Single untextured triangle in the XY plane
pub fn generate_triangle_obj(path: &Path) -> std::io::Result<()> {
    std::fs::write(path, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n")
}

/// Pentagon face, which the exporter must refuse
pub fn generate_pentagon_obj(path: &Path) -> std::io::Result<()> {
    std::fs::write(
        path,
        "v 0 0 0\nv 1 0 0\nv 1.5 1 0\nv 0.5 2 0\nv -0.5 1 0\nf 1 2 3 4 5\n",
    )
}
