//! Raster pass for the scene graph.
//!
//! Every drawable node gets its own object uniform and bind group at build
//! time; the graph never changes shape after construction, so per-frame work
//! is limited to rewriting those uniforms and the trail vertices.

use glam::Mat4;
use wgpu::util::DeviceExt;

use super::pipeline_util::{depth_stencil_state, hdr_fragment_targets};
use crate::error::AtomVizError;
use crate::gpu::pipeline_helpers::uniform_buffer;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::scene::{Material, NodeId, NodeKind, Scene, Vertex};

/// Per-draw uniform; must match `ObjectUniform` in the raster shaders
/// (112 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    /// Model-to-world matrix.
    pub model: [[f32; 4]; 4],
    /// Linear base color.
    pub color: [f32; 3],
    /// Alpha.
    pub opacity: f32,
    /// Linear emissive color.
    pub emissive: [f32; 3],
    /// Emissive multiplier.
    pub emissive_intensity: f32,
    /// Surface roughness.
    pub roughness: f32,
    /// Surface metalness.
    pub metalness: f32,
    /// Padding for GPU alignment.
    pub(crate) _pad: [f32; 2],
}

impl ObjectUniform {
    /// Uniform for a node drawn with `material` at `model`.
    #[must_use]
    pub fn new(model: Mat4, material: &Material) -> Self {
        let mut uniform = Self {
            model: model.to_cols_array_2d(),
            color: [0.0; 3],
            opacity: 1.0,
            emissive: [0.0; 3],
            emissive_intensity: 0.0,
            roughness: 1.0,
            metalness: 0.0,
            _pad: [0.0; 2],
        };
        match *material {
            Material::Standard {
                color,
                emissive,
                emissive_intensity,
                roughness,
                metalness,
            } => {
                uniform.color = color.to_array();
                uniform.emissive = emissive.to_array();
                uniform.emissive_intensity = emissive_intensity;
                uniform.roughness = roughness;
                uniform.metalness = metalness;
            }
            Material::Basic { color, opacity }
            | Material::Line { color, opacity } => {
                uniform.color = color.to_array();
                uniform.opacity = opacity;
            }
        }
        uniform
    }
}

/// Which pipeline a draw uses; also its position in the draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DrawPass {
    /// Lit, depth-writing meshes.
    Opaque,
    /// Unlit blended meshes.
    Translucent,
    /// Unlit blended line segments.
    Line,
}

/// Pass for a node, `None` if the node draws nothing.
#[must_use]
pub fn draw_pass(scene: &Scene, kind: &NodeKind) -> Option<DrawPass> {
    match *kind {
        NodeKind::Mesh { material, .. } => {
            Some(match scene.material(material) {
                Material::Standard { .. } => DrawPass::Opaque,
                Material::Basic { .. } | Material::Line { .. } => {
                    DrawPass::Translucent
                }
            })
        }
        NodeKind::Line { .. } => Some(DrawPass::Line),
        NodeKind::Group
        | NodeKind::AmbientLight { .. }
        | NodeKind::PointLight { .. } => None,
    }
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

enum DrawSource {
    Mesh(usize),
    Line(wgpu::Buffer),
}

struct DrawItem {
    node: NodeId,
    pass: DrawPass,
    source: DrawSource,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    visible: bool,
}

/// Shared per-frame bind groups (camera at 0, lighting at 1).
pub struct FrameBindings<'a> {
    /// Camera bind group.
    pub camera: &'a wgpu::BindGroup,
    /// Lighting bind group.
    pub lighting: &'a wgpu::BindGroup,
}

/// Draws the scene graph into the HDR target.
pub struct SceneRenderer {
    standard_pipeline: wgpu::RenderPipeline,
    basic_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    meshes: Vec<GpuMesh>,
    draws: Vec<DrawItem>,
    /// Linear clear color.
    pub clear_color: wgpu::Color,
}

impl SceneRenderer {
    /// Upload every geometry and create a draw per drawable node.
    ///
    /// # Errors
    ///
    /// Returns [`AtomVizError::Shader`] if a raster shader fails to compose.
    pub fn new(
        context: &RenderContext,
        scene: &Scene,
        camera_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
        clear_color: glam::Vec3,
        shader_composer: &mut ShaderComposer,
    ) -> Result<Self, AtomVizError> {
        let device = &context.device;

        let object_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Object Bind Group Layout"),
                entries: &[uniform_buffer(
                    0,
                    wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                )],
            });
        let layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Scene Pipeline Layout"),
                bind_group_layouts: &[
                    camera_layout,
                    lighting_layout,
                    &object_layout,
                ],
                push_constant_ranges: &[],
            });

        let standard_shader = shader_composer.compose(
            device,
            "Standard Shader",
            "raster/standard.wgsl",
        )?;
        let basic_shader =
            shader_composer.compose(device, "Basic Shader", "raster/basic.wgsl")?;

        let standard_pipeline = create_pipeline(
            device,
            "Standard",
            &layout,
            &standard_shader,
            wgpu::PrimitiveTopology::TriangleList,
            true,
        );
        let basic_pipeline = create_pipeline(
            device,
            "Basic",
            &layout,
            &basic_shader,
            wgpu::PrimitiveTopology::TriangleList,
            false,
        );
        let line_pipeline = create_pipeline(
            device,
            "Line",
            &layout,
            &basic_shader,
            wgpu::PrimitiveTopology::LineList,
            false,
        );

        let meshes = scene
            .geometries()
            .iter()
            .enumerate()
            .map(|(i, geometry)| {
                let data = geometry.tessellate();
                GpuMesh {
                    vertex_buffer: device.create_buffer_init(
                        &wgpu::util::BufferInitDescriptor {
                            label: Some(&format!("Mesh {i} Vertices")),
                            contents: bytemuck::cast_slice(&data.vertices),
                            usage: wgpu::BufferUsages::VERTEX,
                        },
                    ),
                    index_buffer: device.create_buffer_init(
                        &wgpu::util::BufferInitDescriptor {
                            label: Some(&format!("Mesh {i} Indices")),
                            contents: bytemuck::cast_slice(&data.indices),
                            usage: wgpu::BufferUsages::INDEX,
                        },
                    ),
                    index_count: data.indices.len() as u32,
                }
            })
            .collect();

        let world = scene.world_matrices();
        let mut draws = Vec::new();
        for (id, node) in scene.iter() {
            let Some(pass) = draw_pass(scene, &node.kind) else {
                continue;
            };
            let (source, material) = match node.kind {
                NodeKind::Mesh { geometry, material } => {
                    (DrawSource::Mesh(geometry.index()), material)
                }
                NodeKind::Line { points, material } => {
                    let vertices = points.map(Vertex::point);
                    let buffer = device.create_buffer_init(
                        &wgpu::util::BufferInitDescriptor {
                            label: Some(&format!("{} Vertices", node.name)),
                            contents: bytemuck::cast_slice(&vertices),
                            usage: wgpu::BufferUsages::VERTEX
                                | wgpu::BufferUsages::COPY_DST,
                        },
                    );
                    (DrawSource::Line(buffer), material)
                }
                _ => continue,
            };

            let uniform =
                ObjectUniform::new(world[id.index()], scene.material(material));
            let uniform_buffer = device.create_buffer_init(
                &wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{} Object Buffer", node.name)),
                    contents: bytemuck::cast_slice(&[uniform]),
                    usage: wgpu::BufferUsages::UNIFORM
                        | wgpu::BufferUsages::COPY_DST,
                },
            );
            let bind_group =
                device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(&format!("{} Object Bind Group", node.name)),
                    layout: &object_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniform_buffer.as_entire_binding(),
                    }],
                });

            draws.push(DrawItem {
                node: id,
                pass,
                source,
                uniform_buffer,
                bind_group,
                visible: scene.is_visible(id),
            });
        }
        // Stable: node order is kept within each pass.
        draws.sort_by_key(|d| d.pass);

        log::debug!(
            "scene renderer: {} meshes, {} draws",
            scene.geometries().len(),
            draws.len()
        );

        Ok(Self {
            standard_pipeline,
            basic_pipeline,
            line_pipeline,
            meshes,
            draws,
            clear_color: wgpu::Color {
                r: f64::from(clear_color.x),
                g: f64::from(clear_color.y),
                b: f64::from(clear_color.z),
                a: 1.0,
            },
        })
    }

    /// Upload this frame's transforms, materials, trail endpoints, and
    /// visibility. `world` comes from [`Scene::world_matrices`].
    pub fn prepare(&mut self, queue: &wgpu::Queue, scene: &Scene, world: &[Mat4]) {
        for draw in &mut self.draws {
            draw.visible = scene.is_visible(draw.node);
            if !draw.visible {
                continue;
            }
            let node = scene.node(draw.node);
            let material = match node.kind {
                NodeKind::Mesh { material, .. } => material,
                NodeKind::Line { points, material } => {
                    if let DrawSource::Line(buffer) = &draw.source {
                        let vertices = points.map(Vertex::point);
                        queue.write_buffer(
                            buffer,
                            0,
                            bytemuck::cast_slice(&vertices),
                        );
                    }
                    material
                }
                _ => continue,
            };
            let uniform = ObjectUniform::new(
                world[draw.node.index()],
                scene.material(material),
            );
            queue.write_buffer(
                &draw.uniform_buffer,
                0,
                bytemuck::cast_slice(&[uniform]),
            );
        }
    }

    /// Clear the targets and draw opaque meshes, then translucent meshes,
    /// then lines.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
        bindings: &FrameBindings<'_>,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_view,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(
                wgpu::RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                },
            ),
            ..Default::default()
        });
        pass.set_bind_group(0, bindings.camera, &[]);
        pass.set_bind_group(1, bindings.lighting, &[]);

        let mut current: Option<DrawPass> = None;
        for draw in self.draws.iter().filter(|d| d.visible) {
            if current != Some(draw.pass) {
                pass.set_pipeline(match draw.pass {
                    DrawPass::Opaque => &self.standard_pipeline,
                    DrawPass::Translucent => &self.basic_pipeline,
                    DrawPass::Line => &self.line_pipeline,
                });
                current = Some(draw.pass);
            }
            pass.set_bind_group(2, &draw.bind_group, &[]);
            match &draw.source {
                DrawSource::Mesh(index) => {
                    let mesh = &self.meshes[*index];
                    pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    pass.set_index_buffer(
                        mesh.index_buffer.slice(..),
                        wgpu::IndexFormat::Uint32,
                    );
                    pass.draw_indexed(0..mesh.index_count, 0, 0..1);
                }
                DrawSource::Line(buffer) => {
                    pass.set_vertex_buffer(0, buffer.slice(..));
                    pass.draw(0..2, 0..1);
                }
            }
        }
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    topology: wgpu::PrimitiveTopology,
    depth_write_enabled: bool,
) -> wgpu::RenderPipeline {
    let cull_mode = match topology {
        wgpu::PrimitiveTopology::TriangleList => Some(wgpu::Face::Back),
        _ => None,
    };
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{label} Pipeline")),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::layout()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &hdr_fragment_targets(),
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode,
            ..Default::default()
        },
        depth_stencil: Some(depth_stencil_state(depth_write_enabled)),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::options::Options;
    use crate::scene::build_atom;

    #[test]
    fn object_uniform_is_112_bytes() {
        assert_eq!(size_of::<ObjectUniform>(), 112);
    }

    #[test]
    fn standard_material_fills_pbr_fields() {
        let material = Material::Standard {
            color: Vec3::new(1.0, 0.5, 0.25),
            emissive: Vec3::X,
            emissive_intensity: 3.5,
            roughness: 0.2,
            metalness: 0.5,
        };
        let u = ObjectUniform::new(Mat4::IDENTITY, &material);
        assert_eq!(u.color, [1.0, 0.5, 0.25]);
        assert_eq!(u.opacity, 1.0);
        assert_eq!(u.emissive_intensity, 3.5);
        assert_eq!(u.roughness, 0.2);
        assert_eq!(u.metalness, 0.5);
    }

    #[test]
    fn unlit_material_carries_opacity() {
        let material = Material::Line {
            color: Vec3::ONE,
            opacity: 0.35,
        };
        let u = ObjectUniform::new(Mat4::from_scale(Vec3::splat(2.0)), &material);
        assert_eq!(u.opacity, 0.35);
        assert_eq!(u.emissive_intensity, 0.0);
        assert_eq!(u.model[0][0], 2.0);
    }

    #[test]
    fn atom_nodes_sort_into_passes() {
        let (scene, rig) = build_atom(&Options::default());
        let pass_of = |id| draw_pass(&scene, &scene.node(id).kind);

        assert_eq!(pass_of(rig.atom), None);
        assert_eq!(pass_of(rig.nucleus), Some(DrawPass::Opaque));
        for body in &rig.bodies {
            assert_eq!(pass_of(body.electron), Some(DrawPass::Opaque));
            assert_eq!(pass_of(body.ring), Some(DrawPass::Translucent));
            assert_eq!(pass_of(body.trail), Some(DrawPass::Line));
            assert_eq!(pass_of(body.group), None);
        }
        assert!(DrawPass::Opaque < DrawPass::Translucent);
        assert!(DrawPass::Translucent < DrawPass::Line);
    }
}
