//! wgpu implementation of [`FrameBackend`].

use std::sync::Arc;

use sdf::Resolution;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::backend::FrameBackend;
use crate::error::RenderError;
use crate::gpu_types::LavaUniforms;
use crate::pipeline;

/// Buffers, bind group and pipeline. Dropped as a unit on release.
struct Resources {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    quad: wgpu::Buffer,
}

pub struct GpuBackend {
    window: Arc<Window>,
    surface: Option<wgpu::Surface<'static>>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    resources: Option<Resources>,
    uniforms: LavaUniforms,
}

impl GpuBackend {
    /// Create a surface on `window` and compile the built-in lava shader.
    ///
    /// # Errors
    ///
    /// [`RenderError::Context`] when no surface, adapter or device is
    /// available, [`RenderError::Shader`] if the shader is rejected.
    pub fn new(window: Arc<Window>, resolution: &Resolution) -> Result<Self, RenderError> {
        pollster::block_on(Self::new_async(window, resolution, pipeline::SHADER_SOURCE))
    }

    async fn new_async(
        window: Arc<Window>,
        resolution: &Resolution,
        source: &str,
    ) -> Result<Self, RenderError> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(Arc::clone(&window))
            .map_err(|e| RenderError::Context(format!("failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| RenderError::Context("failed to get adapter".to_string()))?;
        let info = adapter.get_info();
        tracing::info!(adapter = ?info.name, backend = ?info.backend, "using adapter");

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Lava Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                },
                None,
            )
            .await
            .map_err(|e| RenderError::Context(format!("failed to request device: {e}")))?;

        // The shader writes final display values, so avoid a second sRGB encode.
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|format| !format.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| RenderError::Context("surface reports no formats".to_string()))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        tracing::debug!(?format, ?alpha_mode, "surface format");

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: resolution.width,
            height: resolution.height,
            desired_maximum_frame_latency: 2,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let uniforms = LavaUniforms::new(resolution);
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Lava Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let quad = pipeline::create_fullscreen_quad(&device);
        let bind_group_layout = pipeline::create_bind_group_layout(&device);
        let bind_group = pipeline::create_bind_group(&device, &bind_group_layout, &uniform_buffer);
        let render_pipeline =
            pipeline::create_render_pipeline(&device, &bind_group_layout, format, source)?;

        Ok(Self {
            window,
            surface: Some(surface),
            device,
            queue,
            config,
            resources: Some(Resources {
                pipeline: render_pipeline,
                bind_group_layout,
                bind_group,
                uniform_buffer,
                quad,
            }),
            uniforms,
        })
    }

    /// Swap in a new fragment program. On failure the current one stays.
    ///
    /// # Errors
    ///
    /// [`RenderError::Shader`] with naga's diagnostic, or
    /// [`RenderError::Released`].
    pub fn reload_shader(&mut self, source: &str) -> Result<(), RenderError> {
        let resources = self.resources.as_mut().ok_or(RenderError::Released)?;
        let pipeline = pipeline::create_render_pipeline(
            &self.device,
            &resources.bind_group_layout,
            self.config.format,
            source,
        )?;
        resources.pipeline = pipeline;
        tracing::info!("shader reloaded");
        Ok(())
    }

    fn configure(&self) {
        if let Some(surface) = &self.surface {
            surface.configure(&self.device, &self.config);
        }
    }
}

impl FrameBackend for GpuBackend {
    fn resize(&mut self, resolution: &Resolution) -> Result<(), RenderError> {
        self.config.width = resolution.width;
        self.config.height = resolution.height;
        self.uniforms.resolution = resolution.uniform();
        self.configure();
        Ok(())
    }

    fn draw(&mut self, time: f32) -> Result<(), RenderError> {
        let resources = self.resources.as_ref().ok_or(RenderError::Released)?;
        let surface = self.surface.as_ref().ok_or(RenderError::Detached)?;

        self.uniforms.time = time;
        self.queue.write_buffer(
            &resources.uniform_buffer,
            0,
            bytemuck::cast_slice(&[self.uniforms]),
        );

        let output = match surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                surface.configure(&self.device, &self.config);
                return Err(RenderError::Surface("surface lost, reconfigured".to_string()));
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Surface(e.to_string())),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Lava Encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Lava Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&resources.pipeline);
            rpass.set_bind_group(0, &resources.bind_group, &[]);
            rpass.set_vertex_buffer(0, resources.quad.slice(..));
            rpass.draw(0..pipeline::QUAD_VERTEX_COUNT, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
        self.window.pre_present_notify();
        output.present();
        Ok(())
    }

    fn detach(&mut self) -> Result<(), RenderError> {
        if self.surface.take().is_some() {
            tracing::debug!("surface detached");
        }
        Ok(())
    }

    fn release(&mut self) -> Result<(), RenderError> {
        if let Some(resources) = self.resources.take() {
            resources.uniform_buffer.destroy();
            resources.quad.destroy();
            tracing::debug!("GPU resources released");
        }
        Ok(())
    }
}
