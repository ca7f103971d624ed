//! Composite pass: adds bloom to the HDR scene, tone maps, and writes the
//! presentable image.

use wgpu::util::DeviceExt;

use super::screen_pass::ScreenPass;
use crate::error::AtomVizError;
use crate::gpu::pipeline_helpers::{
    create_screen_space_pipeline, draw_fullscreen, filtering_sampler,
    linear_sampler, texture_2d, uniform_buffer,
};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::options::PostProcessingOptions;

/// Tone-mapping parameters; must match WGSL struct.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CompositeParams {
    /// Exposure multiplier applied before tone mapping.
    pub exposure: f32,
    /// Gamma correction exponent (1.0 on sRGB surfaces).
    pub gamma: f32,
    /// [`ToneMapping`](crate::options::ToneMapping) selector.
    pub tone_mapping: u32,
    /// Non-zero when the bloom image should be added.
    pub bloom_enabled: u32,
}

impl CompositeParams {
    /// Params for the given options and output format.
    ///
    /// If sRGB, hardware does gamma correction so gamma = 1.0; if linear,
    /// the shader applies 1/2.2.
    #[must_use]
    pub fn new(
        options: &PostProcessingOptions,
        bloom_enabled: bool,
        srgb_output: bool,
    ) -> Self {
        Self {
            exposure: options.exposure,
            gamma: if srgb_output { 1.0 } else { 1.0 / 2.2 },
            tone_mapping: options.tone_mapping.as_u32(),
            bloom_enabled: u32::from(bloom_enabled),
        }
    }
}

/// Final fullscreen pass into the swapchain.
pub struct CompositePass {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,

    scene_view: wgpu::TextureView,
    bloom_view: wgpu::TextureView,
    /// Output view (swapchain image), set before render.
    output_view: Option<wgpu::TextureView>,

    /// Tone-mapping parameters.
    pub params: CompositeParams,
    params_buffer: wgpu::Buffer,
}

impl CompositePass {
    /// Create the composite pipeline targeting the surface format.
    ///
    /// # Errors
    ///
    /// Returns [`AtomVizError::Shader`] if the composite shader fails to
    /// compose.
    pub fn new(
        context: &RenderContext,
        scene_view: &wgpu::TextureView,
        bloom_view: &wgpu::TextureView,
        params: CompositeParams,
        shader_composer: &mut ShaderComposer,
    ) -> Result<Self, AtomVizError> {
        let device = &context.device;
        let sampler = linear_sampler(device, "Composite Sampler");

        let params_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Composite Params Buffer"),
                contents: bytemuck::cast_slice(&[params]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Composite Bind Group Layout"),
                entries: &[
                    texture_2d(0),
                    texture_2d(1),
                    filtering_sampler(2),
                    uniform_buffer(3, wgpu::ShaderStages::FRAGMENT),
                ],
            });

        let shader = shader_composer.compose(
            device,
            "Composite Shader",
            "screen/composite.wgsl",
        )?;
        let pipeline = create_screen_space_pipeline(
            device,
            "Composite",
            &shader,
            context.format(),
            &[&bind_group_layout],
        );

        let bind_group = Self::create_bind_group(
            device,
            &bind_group_layout,
            scene_view,
            bloom_view,
            &sampler,
            &params_buffer,
        );

        Ok(Self {
            pipeline,
            bind_group_layout,
            bind_group,
            sampler,
            scene_view: scene_view.clone(),
            bloom_view: bloom_view.clone(),
            output_view: None,
            params,
            params_buffer,
        })
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        scene_view: &wgpu::TextureView,
        bloom_view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
        params_buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Composite Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(scene_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(bloom_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: params_buffer.as_entire_binding(),
                },
            ],
        })
    }

    /// Set the output view (swapchain image) for this frame.
    pub fn set_output_view(&mut self, view: &wgpu::TextureView) {
        self.output_view = Some(view.clone());
    }

    /// Update the input views used in bind group recreation.
    pub fn set_input_views(
        &mut self,
        scene_view: &wgpu::TextureView,
        bloom_view: &wgpu::TextureView,
    ) {
        self.scene_view = scene_view.clone();
        self.bloom_view = bloom_view.clone();
    }

    /// Flush the current params to the GPU buffer.
    pub fn flush_params(&self, queue: &wgpu::Queue) {
        queue.write_buffer(
            &self.params_buffer,
            0,
            bytemuck::cast_slice(&[self.params]),
        );
    }
}

impl ScreenPass for CompositePass {
    fn render(&self, encoder: &mut wgpu::CommandEncoder) {
        let Some(output_view) = &self.output_view else {
            return;
        };
        draw_fullscreen(
            encoder,
            "Composite Pass",
            output_view,
            &self.pipeline,
            &self.bind_group,
        );
    }

    fn resize(&mut self, context: &RenderContext) {
        self.bind_group = Self::create_bind_group(
            &context.device,
            &self.bind_group_layout,
            &self.scene_view,
            &self.bloom_view,
            &self.sampler,
            &self.params_buffer,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ToneMapping;

    #[test]
    fn params_are_16_bytes() {
        assert_eq!(size_of::<CompositeParams>(), 16);
    }

    #[test]
    fn gamma_depends_on_surface_format() {
        let opts = PostProcessingOptions::default();
        assert_eq!(CompositeParams::new(&opts, true, true).gamma, 1.0);
        let linear = CompositeParams::new(&opts, true, false);
        assert!((linear.gamma - 1.0 / 2.2).abs() < 1e-7);
    }

    #[test]
    fn params_carry_tone_mapping_and_bloom_flag() {
        let mut opts = PostProcessingOptions::default();
        let params = CompositeParams::new(&opts, true, true);
        assert_eq!(params.exposure, 1.5);
        assert_eq!(params.tone_mapping, ToneMapping::Reinhard.as_u32());
        assert_eq!(params.bloom_enabled, 1);

        opts.tone_mapping = ToneMapping::None;
        let params = CompositeParams::new(&opts, false, true);
        assert_eq!(params.tone_mapping, 0);
        assert_eq!(params.bloom_enabled, 0);
    }
}
