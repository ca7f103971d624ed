//! Owns the offscreen targets and runs bloom then the composite pass.

use super::bloom::BloomPass;
use super::composite::{CompositeParams, CompositePass};
use super::screen_pass::ScreenPass;
use crate::error::AtomVizError;
use crate::gpu::pipeline_helpers::hdr_texture;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::options::Options;
use crate::renderer::pipeline_util::DEPTH_FORMAT;

/// Owns the full post-processing pipeline: the HDR scene target and its
/// depth buffer, the bloom chain, and the composite pass.
pub struct PostProcessStack {
    depth_view: wgpu::TextureView,
    scene_view: wgpu::TextureView,
    /// Bloom chain over the scene target.
    pub bloom_pass: BloomPass,
    /// Final tone-mapping pass.
    pub composite_pass: CompositePass,
    srgb_output: bool,
    width: u32,
    height: u32,
}

impl PostProcessStack {
    /// Build every target and pass at the surface's current size.
    ///
    /// # Errors
    ///
    /// Returns [`AtomVizError::Shader`] if a post-process shader fails to
    /// compose.
    pub fn new(
        context: &RenderContext,
        options: &Options,
        shader_composer: &mut ShaderComposer,
    ) -> Result<Self, AtomVizError> {
        let width = context.render_width();
        let height = context.render_height();
        let depth_view = create_depth_view(context);
        let (_, scene_view) =
            hdr_texture(&context.device, "Scene Color", width, height);

        let mut bloom_pass = BloomPass::new(
            context,
            &scene_view,
            &options.post_processing,
            shader_composer,
        )?;
        bloom_pass.enabled = options.display.bloom;

        let srgb_output = context.is_srgb();
        let composite_pass = CompositePass::new(
            context,
            &scene_view,
            bloom_pass.output_view(),
            CompositeParams::new(
                &options.post_processing,
                bloom_pass.is_active(),
                srgb_output,
            ),
            shader_composer,
        )?;

        Ok(Self {
            depth_view,
            scene_view,
            bloom_pass,
            composite_pass,
            srgb_output,
            width,
            height,
        })
    }

    /// HDR color target the scene renders into.
    #[must_use]
    pub fn scene_view(&self) -> &wgpu::TextureView {
        &self.scene_view
    }

    /// Depth target for the scene pass.
    #[must_use]
    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    /// Size the targets were last built for.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Recreate all resolution-dependent resources. No-op when the surface
    /// size is unchanged.
    pub fn resize(&mut self, context: &RenderContext) {
        let width = context.render_width();
        let height = context.render_height();
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;

        self.depth_view = create_depth_view(context);
        let (_, scene_view) =
            hdr_texture(&context.device, "Scene Color", width, height);
        self.scene_view = scene_view;

        self.bloom_pass.set_input_view(&self.scene_view);
        self.bloom_pass.resize(context);
        self.composite_pass
            .set_input_views(&self.scene_view, self.bloom_pass.output_view());
        self.composite_pass.resize(context);
    }

    /// Run bloom then composite into `final_view`.
    pub fn render(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        final_view: &wgpu::TextureView,
    ) {
        self.bloom_pass.render(encoder);
        self.composite_pass.set_output_view(final_view);
        self.composite_pass.render(encoder);
    }

    /// Push post-processing option values to GPU.
    pub fn apply_options(&mut self, options: &Options, queue: &wgpu::Queue) {
        self.bloom_pass.enabled = options.display.bloom;
        self.bloom_pass.apply_options(queue, &options.post_processing);
        self.composite_pass.params = CompositeParams::new(
            &options.post_processing,
            self.bloom_pass.is_active(),
            self.srgb_output,
        );
        self.composite_pass.flush_params(queue);
    }
}

fn create_depth_view(context: &RenderContext) -> wgpu::TextureView {
    let texture = context.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: context.render_width(),
            height: context.render_height(),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
