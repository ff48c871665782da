//! Render pipeline creation and management
//!
//! This module handles the creation of the WGPU render pipeline for the lava
//! shader, including WGSL validation and the fullscreen quad it draws.

use wgpu::util::DeviceExt;

use crate::error::RenderError;

/// Built-in lava shader source.
pub const SHADER_SOURCE: &str = include_str!("lava.wgsl");

/// Vertices in the fullscreen quad, drawn as a triangle strip.
pub const QUAD_VERTEX_COUNT: u32 = 4;

/// Create the fullscreen quad vertex buffer
///
/// Returns a buffer containing 4 vertices for a fullscreen triangle strip
pub fn create_fullscreen_quad(device: &wgpu::Device) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Fullscreen Quad Vertex Buffer"),
        contents: bytemuck::cast_slice(&[
            -1.0_f32, -1.0, 0.0, // Bottom-left
            1.0, -1.0, 0.0, // Bottom-right
            -1.0, 1.0, 0.0, // Top-left
            1.0, 1.0, 0.0, // Top-right
        ]),
        usage: wgpu::BufferUsages::VERTEX,
    })
}

/// Create the bind group layout for the lava shader
///
/// A single uniform buffer holding [`crate::gpu_types::LavaUniforms`].
pub fn create_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Lava Bind Group Layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

pub fn create_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    uniform_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Lava Bind Group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    })
}

/// Parse and validate WGSL with naga.
///
/// wgpu treats an invalid shader module as a device error, so sources from
/// outside the binary go through here first.
///
/// # Errors
///
/// Returns [`RenderError::Shader`] with naga's formatted diagnostic.
pub fn validate_wgsl(source: &str) -> Result<(), RenderError> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| RenderError::Shader(e.emit_to_string(source)))?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|e| RenderError::Shader(e.emit_to_string(source)))?;
    Ok(())
}

/// Create the lava render pipeline
///
/// Sets up the vertex and fragment shaders from `source` over the
/// fullscreen quad layout.
///
/// # Errors
///
/// Returns [`RenderError::Shader`] if `source` fails validation.
pub fn create_render_pipeline(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    surface_format: wgpu::TextureFormat,
    source: &str,
) -> Result<wgpu::RenderPipeline, RenderError> {
    validate_wgsl(source)?;

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Lava Shader"),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Lava Pipeline Layout"),
        bind_group_layouts: &[bind_group_layout],
        push_constant_ranges: &[],
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Lava Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: "vs_main",
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: (3 * std::mem::size_of::<f32>()) as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x3],
            }],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: "fs_main",
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
    });

    Ok(pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_shader_validates() {
        validate_wgsl(SHADER_SOURCE).expect("lava.wgsl should validate");
    }

    #[test]
    fn broken_shader_reports_diagnostic() {
        let err = validate_wgsl("fn fs_main( -> {").unwrap_err();
        assert!(matches!(err, RenderError::Shader(ref msg) if !msg.is_empty()), "{err:?}");
    }
}
