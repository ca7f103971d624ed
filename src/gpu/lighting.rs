use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use crate::gpu::pipeline_helpers::uniform_buffer;
use crate::gpu::render_context::RenderContext;
use crate::scene::{NodeKind, Scene};

/// Light data shared by the lit shaders.
/// NOTE: Must match WGSL struct layout exactly (48 bytes)
///
/// WGSL layout:
///   ambient: vec3<f32>         (offset 0,  align 16)
///   point_decay: f32           (offset 12)
///   point_position: vec3<f32>  (offset 16, align 16)
///   point_distance: f32        (offset 28)
///   point_color: vec3<f32>     (offset 32, align 16)
///   point_enabled: f32         (offset 44)
///   Total: 48 bytes
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Sum of ambient light colors, premultiplied by intensity.
    pub ambient: [f32; 3],
    /// Inverse-power falloff exponent of the point light.
    pub point_decay: f32,
    /// World-space point light position.
    pub point_position: [f32; 3],
    /// Cutoff distance (0 = infinite).
    pub point_distance: f32,
    /// Point light color premultiplied by intensity.
    pub point_color: [f32; 3],
    /// 1.0 when the scene has a visible point light.
    pub point_enabled: f32,
}

impl Default for LightingUniform {
    fn default() -> Self {
        Self {
            ambient: [0.0; 3],
            point_decay: 2.0,
            point_position: [0.0; 3],
            point_distance: 0.0,
            point_color: [0.0; 3],
            point_enabled: 0.0,
        }
    }
}

impl LightingUniform {
    /// Gather the scene's lights. `world` is indexed by node index, as
    /// returned by [`Scene::world_matrices`].
    ///
    /// Ambient lights add up; the first visible point light wins.
    #[must_use]
    pub fn from_scene(scene: &Scene, world: &[Mat4]) -> Self {
        let mut uniform = Self::default();
        let mut ambient = Vec3::ZERO;

        for (id, node) in scene.iter() {
            match node.kind {
                NodeKind::AmbientLight { color, intensity }
                    if scene.is_visible(id) =>
                {
                    ambient += color * intensity;
                }
                NodeKind::PointLight {
                    color,
                    intensity,
                    distance,
                } if uniform.point_enabled == 0.0 && scene.is_visible(id) => {
                    let position =
                        world[id.index()].transform_point3(Vec3::ZERO);
                    uniform.point_position = position.to_array();
                    uniform.point_distance = distance;
                    uniform.point_color = (color * intensity).to_array();
                    uniform.point_enabled = 1.0;
                }
                _ => {}
            }
        }

        uniform.ambient = ambient.to_array();
        uniform
    }
}

/// Lighting uniform buffer and its bind group (group 1 in the lit passes).
pub struct Lighting {
    /// CPU mirror of the buffer.
    pub uniform: LightingUniform,
    /// Uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group.
    pub bind_group: wgpu::BindGroup,
}

impl Lighting {
    /// Create the lighting buffer with no lights.
    #[must_use]
    pub fn new(context: &RenderContext) -> Self {
        let uniform = LightingUniform::default();

        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Lighting Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Lighting Bind Group Layout"),
                entries: &[uniform_buffer(0, wgpu::ShaderStages::FRAGMENT)],
            },
        );

        let bind_group =
            context.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Lighting Bind Group"),
                layout: &layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });

        Self {
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Re-gather lights from the scene. The point light rides the tumbling
    /// atom, so this runs every frame.
    pub fn update(&mut self, scene: &Scene, world: &[Mat4]) {
        self.uniform = LightingUniform::from_scene(scene, world);
    }

    /// Upload the uniform.
    pub fn update_gpu(&self, queue: &wgpu::Queue) {
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::scene::build_atom;

    #[test]
    fn uniform_is_48_bytes() {
        assert_eq!(size_of::<LightingUniform>(), 48);
    }

    #[test]
    fn gathers_atom_lights() {
        let (scene, _) = build_atom(&Options::default());
        let uniform = LightingUniform::from_scene(&scene, &scene.world_matrices());

        assert_eq!(uniform.point_enabled, 1.0);
        assert_eq!(uniform.point_position, [0.0, 0.0, 10.0]);
        assert_eq!(uniform.point_distance, 30.0);
        assert!(uniform.ambient.iter().all(|c| *c > 0.0));
        // 0x3366ff is blue-dominant.
        assert!(uniform.point_color[2] > uniform.point_color[0]);
    }

    #[test]
    fn point_light_follows_root_rotation() {
        let (mut scene, rig) = build_atom(&Options::default());
        scene.transform_mut(rig.atom).rotation.y = std::f32::consts::FRAC_PI_2;
        let uniform = LightingUniform::from_scene(&scene, &scene.world_matrices());
        let p = Vec3::from(uniform.point_position);
        assert!((p - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn empty_scene_is_dark() {
        let scene = Scene::new();
        let uniform = LightingUniform::from_scene(&scene, &[]);
        assert_eq!(uniform, LightingUniform::default());
    }
}
