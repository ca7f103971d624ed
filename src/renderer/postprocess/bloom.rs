//! Bloom post-processing pass: extracts bright pixels and spreads them into
//! a soft glow.
//!
//! Pipeline: luminosity threshold at half resolution, then a chain of
//! [`MIP_LEVELS`] progressively halved targets, each blurred with a
//! separable Gaussian whose radius grows with the level, then one combine
//! pass that sums the levels with radius-dependent weights. The composite
//! pass adds the result to the scene before tone mapping.

use wgpu::util::DeviceExt;

use super::screen_pass::ScreenPass;
use crate::error::AtomVizError;
use crate::gpu::pipeline_helpers::{
    create_screen_space_pipeline, draw_fullscreen, filtering_sampler,
    hdr_texture, linear_sampler, texture_2d, uniform_buffer, HDR_FORMAT,
};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::options::PostProcessingOptions;

/// Number of blur levels in the bloom chain.
pub const MIP_LEVELS: usize = 5;

/// Gaussian kernel radius per level; sigma equals the radius.
const KERNEL_RADII: [u32; MIP_LEVELS] = [3, 5, 7, 9, 11];

/// Base contribution of each level before the radius is applied.
const MIP_FACTORS: [f32; MIP_LEVELS] = [1.0, 0.8, 0.6, 0.4, 0.2];

/// Width of the smoothstep ramp above the threshold.
const SMOOTH_WIDTH: f32 = 0.01;

/// Threshold params; must match WGSL struct.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct ThresholdParams {
    threshold: f32,
    smooth_width: f32,
    _pad: [f32; 2],
}

/// Blur params; must match WGSL struct.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct BlurParams {
    texel_size: [f32; 2],
    direction: [f32; 2],
    kernel_radius: u32,
    sigma: f32,
    _pad: [f32; 2],
}

/// Combine params; must match WGSL struct.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct CombineParams {
    weights: [f32; 4],
    weight_last: f32,
    _pad: [f32; 3],
}

/// Per-level combine weights: each base factor is pushed toward
/// `1.2 - factor` by `radius`, then scaled by `strength`.
///
/// With radius above 1 the sharpest level goes negative and the widest
/// levels dominate.
#[must_use]
pub fn bloom_mip_weights(radius: f32, strength: f32) -> [f32; MIP_LEVELS] {
    MIP_FACTORS.map(|f| (f + (1.2 - 2.0 * f) * radius) * strength)
}

/// Target sizes of every level: half the viewport, then halved again per
/// level, never below 1.
#[must_use]
pub fn mip_sizes(width: u32, height: u32) -> [(u32, u32); MIP_LEVELS] {
    let mut sizes = [(1, 1); MIP_LEVELS];
    let mut w = width;
    let mut h = height;
    for size in &mut sizes {
        w = (w / 2).max(1);
        h = (h / 2).max(1);
        *size = (w, h);
    }
    sizes
}

struct Level {
    /// Horizontal blur output.
    ping_view: wgpu::TextureView,
    /// Vertical blur output, the blurred level.
    mip_view: wgpu::TextureView,
    h_bind_group: wgpu::BindGroup,
    v_bind_group: wgpu::BindGroup,
}

/// Multi-level bloom over the HDR scene color.
pub struct BloomPass {
    threshold_pipeline: wgpu::RenderPipeline,
    threshold_layout: wgpu::BindGroupLayout,
    threshold_bind_group: wgpu::BindGroup,
    threshold_buffer: wgpu::Buffer,

    blur_pipeline: wgpu::RenderPipeline,
    blur_layout: wgpu::BindGroupLayout,

    combine_pipeline: wgpu::RenderPipeline,
    combine_layout: wgpu::BindGroupLayout,
    combine_bind_group: wgpu::BindGroup,
    combine_buffer: wgpu::Buffer,

    bright_view: wgpu::TextureView,
    levels: Vec<Level>,
    output_view: wgpu::TextureView,

    input_view: wgpu::TextureView,
    sampler: wgpu::Sampler,

    /// Skip the pass entirely when false.
    pub enabled: bool,
    strength: f32,
}

impl BloomPass {
    /// Create the bloom chain reading from `input_view`.
    ///
    /// # Errors
    ///
    /// Returns [`AtomVizError::Shader`] if a bloom shader fails to compose.
    pub fn new(
        context: &RenderContext,
        input_view: &wgpu::TextureView,
        options: &PostProcessingOptions,
        shader_composer: &mut ShaderComposer,
    ) -> Result<Self, AtomVizError> {
        let device = &context.device;
        let sampler = linear_sampler(device, "Bloom Sampler");

        let threshold_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Bloom Threshold Buffer"),
                contents: bytemuck::cast_slice(&[threshold_params(options)]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let combine_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Bloom Combine Buffer"),
                contents: bytemuck::cast_slice(&[combine_params(options)]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        // --- Threshold pipeline ---
        let threshold_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Bloom Threshold Layout"),
                entries: &[
                    texture_2d(0),
                    filtering_sampler(1),
                    uniform_buffer(2, wgpu::ShaderStages::FRAGMENT),
                ],
            });
        let threshold_shader = shader_composer.compose(
            device,
            "Bloom Threshold Shader",
            "screen/bloom_threshold.wgsl",
        )?;
        let threshold_pipeline = create_screen_space_pipeline(
            device,
            "Bloom Threshold",
            &threshold_shader,
            HDR_FORMAT,
            &[&threshold_layout],
        );

        // --- Blur pipeline (shared by every level and direction) ---
        let blur_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Bloom Blur Layout"),
                entries: &[
                    texture_2d(0),
                    filtering_sampler(1),
                    uniform_buffer(2, wgpu::ShaderStages::FRAGMENT),
                ],
            });
        let blur_shader = shader_composer.compose(
            device,
            "Bloom Blur Shader",
            "screen/bloom_blur.wgsl",
        )?;
        let blur_pipeline = create_screen_space_pipeline(
            device,
            "Bloom Blur",
            &blur_shader,
            HDR_FORMAT,
            &[&blur_layout],
        );

        // --- Combine pipeline ---
        let mut combine_entries: Vec<wgpu::BindGroupLayoutEntry> =
            (0..MIP_LEVELS as u32).map(texture_2d).collect();
        combine_entries.push(filtering_sampler(MIP_LEVELS as u32));
        combine_entries.push(uniform_buffer(
            MIP_LEVELS as u32 + 1,
            wgpu::ShaderStages::FRAGMENT,
        ));
        let combine_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Bloom Combine Layout"),
                entries: &combine_entries,
            });
        let combine_shader = shader_composer.compose(
            device,
            "Bloom Combine Shader",
            "screen/bloom_composite.wgsl",
        )?;
        let combine_pipeline = create_screen_space_pipeline(
            device,
            "Bloom Combine",
            &combine_shader,
            HDR_FORMAT,
            &[&combine_layout],
        );

        let targets = Targets::new(
            context,
            &blur_layout,
            &combine_layout,
            &threshold_layout,
            input_view,
            &sampler,
            &threshold_buffer,
            &combine_buffer,
        );

        Ok(Self {
            threshold_pipeline,
            threshold_layout,
            threshold_bind_group: targets.threshold_bind_group,
            threshold_buffer,
            blur_pipeline,
            blur_layout,
            combine_pipeline,
            combine_layout,
            combine_bind_group: targets.combine_bind_group,
            combine_buffer,
            bright_view: targets.bright_view,
            levels: targets.levels,
            output_view: targets.output_view,
            input_view: input_view.clone(),
            sampler,
            enabled: true,
            strength: options.bloom_strength,
        })
    }

    /// Whether this frame's render will produce a bloom image.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.enabled && self.strength > 0.0
    }

    /// Bloom image for the composite pass (half resolution).
    #[must_use]
    pub fn output_view(&self) -> &wgpu::TextureView {
        &self.output_view
    }

    /// Set the scene color view to read from. Call [`ScreenPass::resize`]
    /// afterwards to rebind.
    pub fn set_input_view(&mut self, view: &wgpu::TextureView) {
        self.input_view = view.clone();
    }

    /// Push threshold, strength, and radius to the GPU.
    pub fn apply_options(
        &mut self,
        queue: &wgpu::Queue,
        options: &PostProcessingOptions,
    ) {
        self.strength = options.bloom_strength;
        queue.write_buffer(
            &self.threshold_buffer,
            0,
            bytemuck::cast_slice(&[threshold_params(options)]),
        );
        queue.write_buffer(
            &self.combine_buffer,
            0,
            bytemuck::cast_slice(&[combine_params(options)]),
        );
    }
}

impl ScreenPass for BloomPass {
    fn render(&self, encoder: &mut wgpu::CommandEncoder) {
        if !self.is_active() {
            return;
        }

        draw_fullscreen(
            encoder,
            "Bloom Threshold",
            &self.bright_view,
            &self.threshold_pipeline,
            &self.threshold_bind_group,
        );

        for level in &self.levels {
            draw_fullscreen(
                encoder,
                "Bloom Blur H",
                &level.ping_view,
                &self.blur_pipeline,
                &level.h_bind_group,
            );
            draw_fullscreen(
                encoder,
                "Bloom Blur V",
                &level.mip_view,
                &self.blur_pipeline,
                &level.v_bind_group,
            );
        }

        draw_fullscreen(
            encoder,
            "Bloom Combine",
            &self.output_view,
            &self.combine_pipeline,
            &self.combine_bind_group,
        );
    }

    fn resize(&mut self, context: &RenderContext) {
        let targets = Targets::new(
            context,
            &self.blur_layout,
            &self.combine_layout,
            &self.threshold_layout,
            &self.input_view,
            &self.sampler,
            &self.threshold_buffer,
            &self.combine_buffer,
        );
        self.threshold_bind_group = targets.threshold_bind_group;
        self.combine_bind_group = targets.combine_bind_group;
        self.bright_view = targets.bright_view;
        self.levels = targets.levels;
        self.output_view = targets.output_view;
    }
}

fn threshold_params(options: &PostProcessingOptions) -> ThresholdParams {
    ThresholdParams {
        threshold: options.bloom_threshold,
        smooth_width: SMOOTH_WIDTH,
        _pad: [0.0; 2],
    }
}

fn combine_params(options: &PostProcessingOptions) -> CombineParams {
    let w = bloom_mip_weights(options.bloom_radius, options.bloom_strength);
    CombineParams {
        weights: [w[0], w[1], w[2], w[3]],
        weight_last: w[4],
        _pad: [0.0; 3],
    }
}

/// Resolution-dependent textures and the bind groups that reference them.
struct Targets {
    bright_view: wgpu::TextureView,
    levels: Vec<Level>,
    output_view: wgpu::TextureView,
    threshold_bind_group: wgpu::BindGroup,
    combine_bind_group: wgpu::BindGroup,
}

impl Targets {
    #[allow(clippy::too_many_arguments)]
    fn new(
        context: &RenderContext,
        blur_layout: &wgpu::BindGroupLayout,
        combine_layout: &wgpu::BindGroupLayout,
        threshold_layout: &wgpu::BindGroupLayout,
        input_view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
        threshold_buffer: &wgpu::Buffer,
        combine_buffer: &wgpu::Buffer,
    ) -> Self {
        let device = &context.device;
        let sizes = mip_sizes(context.render_width(), context.render_height());
        let (half_w, half_h) = sizes[0];

        let (_, bright_view) =
            hdr_texture(device, "Bloom Bright", half_w, half_h);
        let (_, output_view) =
            hdr_texture(device, "Bloom Output", half_w, half_h);

        let threshold_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Bloom Threshold Bind Group"),
                layout: threshold_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(
                            input_view,
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: threshold_buffer.as_entire_binding(),
                    },
                ],
            });

        let mut levels: Vec<Level> = Vec::with_capacity(MIP_LEVELS);
        for (i, &(w, h)) in sizes.iter().enumerate() {
            let (_, ping_view) =
                hdr_texture(device, &format!("Bloom Ping {i}"), w, h);
            let (_, mip_view) =
                hdr_texture(device, &format!("Bloom Mip {i}"), w, h);

            let texel_size = [1.0 / w as f32, 1.0 / h as f32];
            let radius = KERNEL_RADII[i];
            let source = if i == 0 {
                &bright_view
            } else {
                &levels[i - 1].mip_view
            };

            let h_bind_group = blur_bind_group(
                device,
                blur_layout,
                &format!("Bloom Blur H {i}"),
                source,
                sampler,
                BlurParams {
                    texel_size,
                    direction: [1.0, 0.0],
                    kernel_radius: radius,
                    sigma: radius as f32,
                    _pad: [0.0; 2],
                },
            );
            let v_bind_group = blur_bind_group(
                device,
                blur_layout,
                &format!("Bloom Blur V {i}"),
                &ping_view,
                sampler,
                BlurParams {
                    texel_size,
                    direction: [0.0, 1.0],
                    kernel_radius: radius,
                    sigma: radius as f32,
                    _pad: [0.0; 2],
                },
            );

            levels.push(Level {
                ping_view,
                mip_view,
                h_bind_group,
                v_bind_group,
            });
        }

        let mut entries: Vec<wgpu::BindGroupEntry> = levels
            .iter()
            .enumerate()
            .map(|(i, level)| wgpu::BindGroupEntry {
                binding: i as u32,
                resource: wgpu::BindingResource::TextureView(&level.mip_view),
            })
            .collect();
        entries.push(wgpu::BindGroupEntry {
            binding: MIP_LEVELS as u32,
            resource: wgpu::BindingResource::Sampler(sampler),
        });
        entries.push(wgpu::BindGroupEntry {
            binding: MIP_LEVELS as u32 + 1,
            resource: combine_buffer.as_entire_binding(),
        });
        let combine_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Bloom Combine Bind Group"),
                layout: combine_layout,
                entries: &entries,
            });

        log::debug!("bloom chain resized: {sizes:?}");

        Self {
            bright_view,
            levels,
            output_view,
            threshold_bind_group,
            combine_bind_group,
        }
    }
}

fn blur_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    label: &str,
    source: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
    params: BlurParams,
) -> wgpu::BindGroup {
    // Params are fixed per level and size, so each bind group owns its own
    // immutable buffer.
    let buffer =
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Params")),
            contents: bytemuck::cast_slice(&[params]),
            usage: wgpu::BufferUsages::UNIFORM,
        });
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(source),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: buffer.as_entire_binding(),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_structs_match_wgsl_sizes() {
        assert_eq!(size_of::<ThresholdParams>(), 16);
        assert_eq!(size_of::<BlurParams>(), 32);
        assert_eq!(size_of::<CombineParams>(), 32);
    }

    #[test]
    fn weights_at_zero_radius_are_base_factors() {
        let w = bloom_mip_weights(0.0, 1.0);
        for (got, want) in w.iter().zip(MIP_FACTORS) {
            assert!((got - want).abs() < 1e-6);
        }
    }

    #[test]
    fn weights_for_default_glow() {
        let w = bloom_mip_weights(1.5, 1.2);
        let want = [-0.2, 0.2, 0.6, 1.0, 1.4].map(|x: f32| x * 1.2);
        for (got, want) in w.iter().zip(want) {
            assert!((got - want).abs() < 1e-5, "{got} vs {want}");
        }
    }

    #[test]
    fn radius_one_mirrors_factors() {
        let w = bloom_mip_weights(1.0, 1.0);
        let want = [0.2, 0.4, 0.6, 0.8, 1.0];
        for (got, want) in w.iter().zip(want) {
            assert!((got - want).abs() < 1e-6);
        }
    }

    #[test]
    fn mip_chain_halves_per_level() {
        let sizes = mip_sizes(1920, 1080);
        assert_eq!(
            sizes,
            [(960, 540), (480, 270), (240, 135), (120, 67), (60, 33)]
        );
        assert!(mip_sizes(3, 3).iter().all(|&(w, h)| w >= 1 && h >= 1));
    }
}
