//! Camera, aspect mapping and per-pixel coloring.

use glam::{Vec2, Vec3, Vec4};

use crate::march::{march, normal, Ray};

/// Linear RGBA color, alpha always 1.
pub type Rgba = Vec4;

pub const BACKGROUND: Vec3 = Vec3::new(0.02, 0.02, 0.02);
pub const LAVA_DEEP: Vec3 = Vec3::new(1.0, 0.3, 0.1);
pub const LAVA_GLOW: Vec3 = Vec3::new(1.0, 0.8, 0.2);

/// Fixed camera looking down `-Z` at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
        }
    }
}

impl Camera {
    /// Ray through the aspect-corrected image-plane `offset`.
    #[must_use]
    pub fn ray(&self, offset: Vec2) -> Ray {
        Ray {
            origin: self.eye,
            direction: offset.extend(-1.0).normalize(),
        }
    }
}

/// Per-axis scale keeping the unit-square scene unstretched.
///
/// The larger component is always 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aspect {
    pub x: f32,
    pub y: f32,
}

impl Aspect {
    #[must_use]
    pub fn from_size(width: u32, height: u32) -> Self {
        let w = width.max(1) as f32;
        let h = height.max(1) as f32;
        if h / w > 1.0 {
            Self { x: w / h, y: 1.0 }
        } else {
            Self { x: 1.0, y: h / w }
        }
    }

    /// Image-plane offset for a viewport coordinate.
    #[must_use]
    pub fn offset(&self, uv: Vec2) -> Vec2 {
        (uv - Vec2::splat(0.5)) * Vec2::new(self.x, self.y)
    }
}

/// Viewport size and its derived aspect pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
    pub aspect: Aspect,
}

impl Resolution {
    /// Zero dimensions are treated as one pixel.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            aspect: Aspect::from_size(width, height),
        }
    }

    /// `(width, height, aspect.x, aspect.y)`, the layout of the shader uniform.
    #[must_use]
    pub fn uniform(&self) -> [f32; 4] {
        [
            self.width as f32,
            self.height as f32,
            self.aspect.x,
            self.aspect.y,
        ]
    }
}

/// Viewport coordinate of the centre of pixel `(x, y)`.
///
/// Row 0 is the top of the image; `uv` has its origin bottom-left.
#[must_use]
pub fn pixel_uv(x: u32, y: u32, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        (x as f32 + 0.5) / width as f32,
        1.0 - (y as f32 + 0.5) / height as f32,
    )
}

/// Color of the viewport coordinate `uv` at `time`.
#[must_use]
pub fn shade(uv: Vec2, time: f32, aspect: Aspect) -> Rgba {
    let ray = Camera::default().ray(aspect.offset(uv));
    let Some(t) = march(&ray, time) else {
        return BACKGROUND.extend(1.0);
    };
    let n = normal(ray.at(t), time);
    // Not clamped: values past 1 give the hot rim.
    let fresnel = (1.0 + ray.direction.dot(n)).powi(3);
    let lava = LAVA_DEEP.lerp(LAVA_GLOW, fresnel);
    (lava * fresnel).extend(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_aspect() {
        let a = Aspect::from_size(1920, 1080);
        assert_eq!(a.x, 1.0);
        assert!((a.y - 1080.0 / 1920.0).abs() < 1e-6);
    }

    #[test]
    fn portrait_aspect() {
        let a = Aspect::from_size(1080, 1920);
        assert!((a.x - 1080.0 / 1920.0).abs() < 1e-6);
        assert_eq!(a.y, 1.0);
    }

    #[test]
    fn square_aspect() {
        assert_eq!(Aspect::from_size(512, 512), Aspect { x: 1.0, y: 1.0 });
    }

    #[test]
    fn degenerate_size_does_not_divide_by_zero() {
        let r = Resolution::new(0, 0);
        assert_eq!((r.width, r.height), (1, 1));
        assert!(r.aspect.x.is_finite() && r.aspect.y.is_finite());
    }

    #[test]
    fn uniform_layout() {
        let r = Resolution::new(800, 600);
        assert_eq!(r.uniform(), [800.0, 600.0, 1.0, 0.75]);
    }

    #[test]
    fn centre_ray_looks_down_negative_z() {
        let ray = Camera::default().ray(Aspect::from_size(800, 600).offset(Vec2::splat(0.5)));
        assert_eq!(ray.direction, Vec3::NEG_Z);
        assert_eq!(ray.origin, Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn pixel_uv_flips_rows() {
        let top_left = pixel_uv(0, 0, 4, 2);
        assert!((top_left.x - 0.125).abs() < 1e-6);
        assert!((top_left.y - 0.75).abs() < 1e-6);
        let bottom_right = pixel_uv(3, 1, 4, 2);
        assert!((bottom_right.x - 0.875).abs() < 1e-6);
        assert!((bottom_right.y - 0.25).abs() < 1e-6);
    }

    #[test]
    fn miss_is_opaque_background() {
        let c = shade(Vec2::ZERO, 0.0, Aspect::from_size(800, 600));
        assert_eq!(c, Vec4::new(0.02, 0.02, 0.02, 1.0));
    }

    #[test]
    fn hit_is_warm_and_opaque() {
        // Crosses the z = 0 plane at x = -0.5, the rest centre of the
        // largest blob.
        let c = shade(Vec2::new(0.4, 0.5), 0.0, Aspect::from_size(1, 1));
        assert_eq!(c.w, 1.0);
        assert!(c.x >= c.y && c.y >= c.z, "lava ramp ordering broken: {c:?}");
    }
}
