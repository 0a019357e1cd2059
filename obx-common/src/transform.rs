//! Export-space transform
//!
//! Positions are written in world space, reoriented for the engine's Y-up
//! convention by a fixed 90° rotation about +X:
//!
//! ```text
//! effective = world * Rx(90°)
//! p'        = effective * p      (column vectors, p as a point)
//! ```
//!
//! `Rx(90°)` maps `(x, y, z)` to `(x, -z, y)`.

use glam::{Mat4, Vec3, Vec4};

/// Exact 90° rotation about +X, stored with 0/±1 entries.
///
/// `Mat4::from_rotation_x(FRAC_PI_2)` would leave `cos` residue around
/// `-4.4e-8`, which prints as `-0.000000` in the stream.
pub const AXIS_CONVERSION: Mat4 = Mat4::from_cols(Vec4::X, Vec4::Z, Vec4::NEG_Y, Vec4::W);

/// Compose the object's world matrix with the axis conversion.
///
/// Computed once per export.
pub fn effective_transform(world: Mat4) -> Mat4 {
    world * AXIS_CONVERSION
}

/// Map a mesh-local position into export space.
#[inline]
pub fn to_export_space(effective: &Mat4, position: Vec3) -> Vec3 {
    effective.transform_point3(position)
}
