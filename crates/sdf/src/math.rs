//! Rotation and blending primitives shared by the scene function.
//!
//! The rotation matrix is laid out column by column in exactly the order the
//! WGSL shader constructs its `mat4x4`, so a point rotated on the CPU lands
//! where the GPU puts it.

use glam::{Mat4, Vec3};

/// Homogeneous rotation about `axis` by `angle` radians.
///
/// The axis is normalized here, callers may pass any non-zero vector.
#[must_use]
pub fn rotation_matrix(axis: Vec3, angle: f32) -> Mat4 {
    let a = axis.normalize();
    let (s, c) = angle.sin_cos();
    let oc = 1.0 - c;

    Mat4::from_cols_array(&[
        oc * a.x * a.x + c,
        oc * a.x * a.y - a.z * s,
        oc * a.z * a.x + a.y * s,
        0.0,
        oc * a.x * a.y + a.z * s,
        oc * a.y * a.y + c,
        oc * a.y * a.z - a.x * s,
        0.0,
        oc * a.z * a.x - a.y * s,
        oc * a.y * a.z + a.x * s,
        oc * a.z * a.z + c,
        0.0,
        0.0,
        0.0,
        0.0,
        1.0,
    ])
}

/// Rotate `v` about `axis` by `angle` radians.
#[must_use]
pub fn rotate(v: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    (rotation_matrix(axis, angle) * v.extend(1.0)).truncate()
}

/// Cubic polynomial smooth minimum.
///
/// Never larger than `min(a, b)`; the two inputs only influence each other
/// when they are within `6k` of one another. A non-positive `k` degenerates
/// to the hard minimum.
#[must_use]
pub fn smooth_min(a: f32, b: f32, k: f32) -> f32 {
    if k <= 0.0 {
        return a.min(b);
    }
    let k = k * 6.0;
    let h = (k - (a - b).abs()).max(0.0) / k;
    a.min(b) - h * h * h * k * (1.0 / 6.0)
}
