//! The lava scene: five spheres carried by four independent spins, merged
//! with a smooth minimum.

use glam::Vec3;

use crate::math::{rotate, smooth_min};

/// Blend radius used between every pair of folded distances.
pub const BLEND_RADIUS: f32 = 0.1;

/// Implicit sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    #[must_use]
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Signed distance from `p` to the sphere surface.
    #[must_use]
    pub fn distance(&self, p: Vec3) -> f32 {
        (p - self.center).length() - self.radius
    }
}

/// A rotation group. The angle at `time` is `time / divisor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    pub axis: Vec3,
    pub divisor: f32,
}

impl Spin {
    #[must_use]
    pub const fn new(axis: Vec3, divisor: f32) -> Self {
        Self { axis, divisor }
    }

    #[must_use]
    pub fn angle(&self, time: f32) -> f32 {
        time / self.divisor
    }

    /// `p` expressed in this group's rotating frame.
    #[must_use]
    pub fn apply(&self, p: Vec3, time: f32) -> Vec3 {
        rotate(p, self.axis, self.angle(time))
    }
}

pub const SPINS: [Spin; 4] = [
    Spin::new(Vec3::new(0.0, 0.0, 1.0), 5.0),
    Spin::new(Vec3::new(1.0, 1.0, 1.0), -5.0),
    Spin::new(Vec3::new(1.0, 1.0, 0.0), -4.5),
    Spin::new(Vec3::new(0.0, 1.0, 0.0), -4.0),
];

/// A sphere and the index of the spin that carries it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blob {
    pub sphere: Sphere,
    pub spin: usize,
}

/// Fold order matters: the smooth minimum is not associative.
pub const BLOBS: [Blob; 5] = [
    Blob {
        sphere: Sphere::new(Vec3::new(-0.5, 0.0, 0.0), 0.35),
        spin: 0,
    },
    Blob {
        sphere: Sphere::new(Vec3::new(0.55, 0.0, 0.0), 0.3),
        spin: 1,
    },
    Blob {
        sphere: Sphere::new(Vec3::new(-0.8, 0.0, 0.0), 0.2),
        spin: 1,
    },
    Blob {
        sphere: Sphere::new(Vec3::new(1.0, 0.0, 0.0), 0.15),
        spin: 2,
    },
    Blob {
        sphere: Sphere::new(Vec3::new(0.45, -0.45, 0.0), 0.15),
        spin: 3,
    },
];

/// Scene distance at `p` and simulated `time` (seconds).
#[must_use]
pub fn distance(p: Vec3, time: f32) -> f32 {
    let frames = SPINS.map(|spin| spin.apply(p, time));
    fold(BLOBS.iter().map(|blob| blob.sphere.distance(frames[blob.spin])))
}

/// Scene distance with every sphere at its rest position.
#[must_use]
pub fn static_distance(p: Vec3) -> f32 {
    fold(BLOBS.iter().map(|blob| blob.sphere.distance(p)))
}

fn fold(mut distances: impl Iterator<Item = f32>) -> f32 {
    let first = distances.next().unwrap_or(f32::INFINITY);
    distances.fold(first, |acc, d| smooth_min(acc, d, BLEND_RADIUS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_distance_sign() {
        let s = Sphere::new(Vec3::new(1.0, 0.0, 0.0), 0.5);
        assert!(s.distance(Vec3::new(1.0, 0.0, 0.0)) < 0.0);
        assert!((s.distance(Vec3::new(1.5, 0.0, 0.0))).abs() < 1e-6);
        assert!((s.distance(Vec3::new(3.0, 0.0, 0.0)) - 1.5).abs() < 1e-6);
    }

    #[test]
    fn rest_pose_matches_time_zero() {
        for p in [
            Vec3::ZERO,
            Vec3::new(0.3, -0.2, 0.1),
            Vec3::new(-1.0, 1.0, 2.0),
            Vec3::new(0.0, 0.0, 5.0),
        ] {
            assert!((distance(p, 0.0) - static_distance(p)).abs() < 1e-7, "at {p:?}");
        }
    }

    #[test]
    fn inside_the_largest_blob_is_negative() {
        // Rest centre of the first sphere.
        assert!(distance(Vec3::new(-0.5, 0.0, 0.0), 0.0) < -0.3);
    }

    #[test]
    fn spins_desynchronize() {
        let t = 3.0;
        let angles: Vec<f32> = SPINS.iter().map(|s| s.angle(t)).collect();
        assert!((angles[0] - 0.6).abs() < 1e-6);
        assert!((angles[1] + 0.6).abs() < 1e-6);
        assert!((angles[2] + 3.0 / 4.5).abs() < 1e-6);
        assert!((angles[3] + 0.75).abs() < 1e-6);
    }

    #[test]
    fn field_moves_with_time() {
        let p = Vec3::new(0.55, 0.3, 0.0);
        assert_ne!(distance(p, 0.0), distance(p, 2.0));
    }
}
