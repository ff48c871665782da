//! Sphere tracing and surface normals.

use glam::Vec3;

use crate::field::distance;

pub const MAX_STEPS: usize = 100;
pub const HIT_EPSILON: f32 = 0.001;
pub const MAX_DISTANCE: f32 = 100.0;
pub const NORMAL_EPSILON: f32 = 0.001;

/// Ray with a unit-length direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Walk `ray` through the scene at `time`.
///
/// Returns the travel distance of the first point closer than
/// [`HIT_EPSILON`] to the surface, or `None` once the ray has gone past
/// [`MAX_DISTANCE`] or used up [`MAX_STEPS`]. An origin inside geometry
/// reports a hit at `t = 0`.
#[must_use]
pub fn march(ray: &Ray, time: f32) -> Option<f32> {
    let mut t = 0.0;
    for _ in 0..MAX_STEPS {
        let d = distance(ray.at(t), time);
        if d < HIT_EPSILON {
            return Some(t);
        }
        t += d;
        if t > MAX_DISTANCE {
            break;
        }
    }
    None
}

/// Unit surface normal at `p` from central differences of the field.
#[must_use]
pub fn normal(p: Vec3, time: f32) -> Vec3 {
    let dx = Vec3::new(NORMAL_EPSILON, 0.0, 0.0);
    let dy = Vec3::new(0.0, NORMAL_EPSILON, 0.0);
    let dz = Vec3::new(0.0, 0.0, NORMAL_EPSILON);
    Vec3::new(
        distance(p + dx, time) - distance(p - dx, time),
        distance(p + dy, time) - distance(p - dy, time),
        distance(p + dz, time) - distance(p - dz, time),
    )
    .normalize()
}
