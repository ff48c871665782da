//! Software rasterisation of the lava scene.

use rayon::prelude::*;

use crate::shade::{pixel_uv, shade, Resolution, Rgba};

/// A rendered image, row-major with the top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Rgba>,
}

impl Frame {
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.pixels.get(index).copied()
    }

    /// 8-bit RGBA bytes, channels clamped to `[0, 1]` before quantising.
    #[must_use]
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|c| c.to_array())
            .map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect()
    }
}

/// Shade every pixel of `resolution` at `time`.
#[must_use]
pub fn render(time: f32, resolution: &Resolution) -> Frame {
    let Resolution { width, height, aspect } = *resolution;
    // A hand-built resolution may skip the clamp in `Resolution::new`.
    let (width, height) = (width.max(1), height.max(1));
    let mut pixels = vec![Rgba::ZERO; width as usize * height as usize];

    pixels
        .par_chunks_exact_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = shade(pixel_uv(x as u32, y as u32, width, height), time, aspect);
            }
        });

    tracing::trace!(width, height, time, "rasterised frame");
    Frame { width, height, pixels }
}
