//! GPU-compatible data layouts shared with `lava.wgsl`.

use bytemuck::{Pod, Zeroable};
use sdf::Resolution;

/// Uniform block read by the fragment shader.
///
/// Matches `struct Uniforms` in `lava.wgsl`: a `vec4<f32>` followed by an
/// `f32`, padded to the 16-byte struct alignment.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LavaUniforms {
    /// `(width, height, aspect.x, aspect.y)`
    pub resolution: [f32; 4],
    /// Seconds since the render loop started.
    pub time: f32,
    pub _pad: [f32; 3],
}

impl LavaUniforms {
    #[must_use]
    pub fn new(resolution: &Resolution) -> Self {
        Self {
            resolution: resolution.uniform(),
            time: 0.0,
            _pad: [0.0; 3],
        }
    }
}
