#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::module_name_repetitions
)]

//! # Lava SDF
//!
//! The scene behind the lava background: five spheres on four spins, blended
//! with a cubic smooth minimum and raymarched from a fixed camera. Everything
//! here is a pure function of `(point or pixel, time, resolution)`; the GPU
//! shader in the `render` crate is a port of these functions.
//!
//! - [`field`]: the scene distance function.
//! - [`march`]: sphere tracing and normals.
//! - [`shade`]: camera, aspect mapping and coloring.
//! - [`raster`]: a parallel CPU rasteriser over [`shade::shade`].

pub mod field;
pub mod march;
pub mod math;
pub mod raster;
pub mod shade;

pub use field::{distance, static_distance, Sphere, Spin, BLEND_RADIUS, BLOBS, SPINS};
pub use march::{march, normal, Ray};
pub use math::{rotate, rotation_matrix, smooth_min};
pub use raster::{render, Frame};
pub use shade::{pixel_uv, shade, Aspect, Camera, Resolution, Rgba, BACKGROUND};
