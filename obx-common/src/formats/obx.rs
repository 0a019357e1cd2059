//! Extended OBJ vertex stream (.obx)
//!
//! Plain text, one line per triangle corner. Every three consecutive lines
//! form one triangle. No header, version tag or count prefix; readers
//! consume lines until EOF.
//!
//! # Layout
//! ```text
//! <x> <y> <z> <u> <v>\n
//! ```
//!
//! - `x y z`: export-space position, fixed-point with 6 fractional digits
//! - `u v`: texture coordinate, fixed-point with 4 fractional digits

use std::ffi::OsString;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use glam::{Vec2, Vec3};

/// File extension without dot
pub const OBX_EXTENSION: &str = "obx";

/// Lines per triangle
pub const CORNERS_PER_TRIANGLE: usize = 3;

/// One corner line, formatted on display
struct CornerLine {
    position: Vec3,
    uv: Vec2,
}

impl fmt::Display for CornerLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { position: p, uv } = self;
        writeln!(f, "{:.6} {:.6} {:.6} {:.4} {:.4}", p.x, p.y, p.z, uv.x, uv.y)
    }
}

/// Format a single corner line, including the trailing newline.
pub fn format_corner(position: Vec3, uv: Vec2) -> String {
    CornerLine { position, uv }.to_string()
}

/// Write a single corner line.
pub fn write_corner<W: Write>(w: &mut W, position: Vec3, uv: Vec2) -> std::io::Result<()> {
    write!(w, "{}", CornerLine { position, uv })
}

/// Append `.obx` unless the file name already ends with it (any case).
///
/// Compares the raw name, so a file called `.obx` counts as having the
/// extension.
pub fn ensure_obx_extension(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let suffix = format!(".{}", OBX_EXTENSION);
    let bytes = path.as_os_str().as_encoded_bytes();
    let has_ext = bytes.len() >= suffix.len()
        && bytes[bytes.len() - suffix.len()..].eq_ignore_ascii_case(suffix.as_bytes());
    if has_ext {
        return path.to_path_buf();
    }

    let mut name = OsString::from(path.as_os_str());
    name.push(&suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_line_uses_fixed_precision() {
        let line = format_corner(Vec3::new(1.0, 2.5, -3.333333), Vec2::new(0.1, 0.25));
        assert_eq!(line, "1.000000 2.500000 -3.333333 0.1000 0.2500\n");
    }

    #[test]
    fn test_corner_line_never_uses_scientific_notation() {
        let line = format_corner(Vec3::new(1.0e7, 1.0e-7, -2.5e-9), Vec2::new(1.0e-5, 123.0));
        assert_eq!(line, "10000000.000000 0.000000 -0.000000 0.0000 123.0000\n");
    }

    #[test]
    fn test_write_corner_matches_format_corner() {
        let (p, uv) = (Vec3::new(-0.5, 0.125, 42.0), Vec2::new(0.75, 1.0));
        let mut buf = Vec::new();
        write_corner(&mut buf, p, uv).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), format_corner(p, uv));
    }

    #[test]
    fn test_extension_appended_when_missing() {
        assert_eq!(ensure_obx_extension("models/dwarf"), PathBuf::from("models/dwarf.obx"));
        assert_eq!(
            ensure_obx_extension("models/dwarf.obj"),
            PathBuf::from("models/dwarf.obj.obx")
        );
    }

    #[test]
    fn test_extension_not_duplicated_in_any_case() {
        for name in ["dwarf.obx", "dwarf.OBX", "dwarf.Obx"] {
            assert_eq!(ensure_obx_extension(name), PathBuf::from(name));
        }
    }

    #[test]
    fn test_bare_extension_file_name_kept() {
        for name in ["out/.obx", "out/.OBX", ".obx"] {
            assert_eq!(ensure_obx_extension(name), PathBuf::from(name));
        }
        assert_eq!(ensure_obx_extension("out/obx"), PathBuf::from("out/obx.obx"));
    }
}
