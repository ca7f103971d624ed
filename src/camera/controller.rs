use glam::{Vec2, Vec3};
use wgpu::util::DeviceExt;

use super::core::{Camera, CameraUniform};
use super::orbit::OrbitControls;
use crate::gpu::pipeline_helpers::uniform_buffer;
use crate::gpu::render_context::RenderContext;
use crate::options::CameraOptions;

/// Orbit camera plus the GPU uniform it feeds.
pub struct CameraController {
    /// Damped orbit state.
    pub controls: OrbitControls,
    /// Camera rebuilt from `controls` on every [`update`](Self::update).
    pub camera: Camera,
    /// CPU mirror of the uniform buffer.
    pub uniform: CameraUniform,
    /// Uniform buffer bound at group 0.
    pub buffer: wgpu::Buffer,
    /// Layout of the camera bind group.
    pub layout: wgpu::BindGroupLayout,
    /// Camera bind group.
    pub bind_group: wgpu::BindGroup,
}

impl CameraController {
    /// Create the camera and its GPU resources at the surface's size.
    #[must_use]
    pub fn new(context: &RenderContext, options: &CameraOptions) -> Self {
        let width = context.render_width();
        let height = context.render_height();
        let controls = OrbitControls::new(options, width, height);

        let camera = Camera {
            eye: controls.eye(),
            target: controls.target(),
            up: Vec3::Y,
            aspect: controls.aspect(),
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        };

        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera);

        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[uniform_buffer(
                    0,
                    wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                )],
            },
        );

        let bind_group =
            context.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Camera Bind Group"),
                layout: &layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });

        Self {
            controls,
            camera,
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Advance the damped controls one step and copy the result into the
    /// camera.
    pub fn update(&mut self) {
        let _ = self.controls.update();
        self.camera.eye = self.controls.eye();
        self.camera.target = self.controls.target();
    }

    /// Upload the current camera to the uniform buffer.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue) {
        self.uniform.update_view_proj(&self.camera);
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }

    /// Track a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.controls.set_viewport(width, height);
        self.camera.aspect = self.controls.aspect();
    }

    /// Apply projection and orbit settings.
    pub fn apply_options(&mut self, options: &CameraOptions) {
        self.controls.set_options(options);
        self.camera.fovy = options.fovy;
        self.camera.znear = options.znear;
        self.camera.zfar = options.zfar;
    }

    /// Queue an orbit drag in pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        self.controls.rotate(delta);
    }

    /// Queue a pan drag in pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.controls.pan(delta);
    }

    /// Queue a dolly step (positive = closer).
    pub fn zoom(&mut self, delta: f32) {
        self.controls.zoom(delta);
    }

    /// Snap back to the initial view.
    pub fn reset(&mut self) {
        self.controls.reset();
        self.camera.eye = self.controls.eye();
        self.camera.target = self.controls.target();
    }
}
