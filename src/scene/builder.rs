#[cfg(test)]
use std::f32::consts::TAU;

use glam::Vec3;

use super::{
    Geometry, Material, MaterialId, NodeId, NodeKind, Scene, Transform,
};
use crate::options::Options;
use crate::util::color::srgb_hex_to_linear;

/// One electron: its angular state plus handles into the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitingBody {
    /// Current angle in the orbit plane, radians in `[0, 2π)`.
    pub angular_position: f32,
    /// Angle at tick 0.
    pub angle_offset: f64,
    /// Angle added per tick.
    pub angular_speed: f64,
    /// Distance from the nucleus. Fixed once built.
    pub orbit_radius: f32,
    /// Tilted group carrying the electron and its trail.
    pub group: NodeId,
    /// Electron mesh.
    pub electron: NodeId,
    /// Trail line.
    pub trail: NodeId,
    /// Ring guide, a sibling of the group sharing its tilt.
    pub ring: NodeId,
}

/// Handles the animator needs to mutate the atom each tick.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRig {
    /// Root wrapper tumbled every tick.
    pub atom: NodeId,
    /// Nucleus mesh, pulsed every tick.
    pub nucleus: NodeId,
    /// Nucleus material, its emissive intensity is rewritten every tick.
    pub nucleus_material: MaterialId,
    /// Electrons in build order.
    pub bodies: Vec<OrbitingBody>,
}

impl AtomRig {
    /// Apply the ring/trail visibility toggles to the scene.
    pub fn apply_visibility(
        &self,
        scene: &mut Scene,
        show_rings: bool,
        show_trails: bool,
    ) {
        for body in &self.bodies {
            scene.node_mut(body.ring).visible = show_rings;
            scene.node_mut(body.trail).visible = show_trails;
        }
    }
}

/// Initial angle of body `index` out of `count`, evenly spaced.
#[must_use]
pub fn angle_offset(index: u32, count: u32) -> f64 {
    std::f64::consts::TAU * f64::from(index) / f64::from(count.max(1))
}

/// Euler XYZ tilt of orbit plane `index` out of `count`.
///
/// X grows by `step` per body from `base`, Y spreads the planes around the
/// vertical axis at the same spacing as the initial angles.
#[must_use]
pub fn orbit_tilt(index: u32, count: u32, base: f32, step: f32) -> Vec3 {
    Vec3::new(
        base + index as f32 * step,
        angle_offset(index, count) as f32,
        0.0,
    )
}

/// Build the atom scene from options.
///
/// Node layout, all under the `atom` root:
/// ambient light, point light, nucleus, then per body its orbit group
/// (electron, trail) followed by its ring.
#[must_use]
pub fn build_atom(options: &Options) -> (Scene, AtomRig) {
    let scene_opts = &options.scene;
    let colors = &options.materials;
    let lights = &options.lighting;

    let mut scene = Scene::new();

    let nucleus_geometry = scene.add_geometry(Geometry::Sphere {
        radius: scene_opts.nucleus_radius,
        width_segments: scene_opts.nucleus_segments,
        height_segments: scene_opts.nucleus_segments,
    });
    let electron_geometry = scene.add_geometry(Geometry::Sphere {
        radius: scene_opts.electron_radius,
        width_segments: scene_opts.electron_segments,
        height_segments: scene_opts.electron_segments,
    });
    let ring_geometry = scene.add_geometry(Geometry::Torus {
        radius: scene_opts.orbit_radius,
        tube: scene_opts.ring_tube,
        radial_segments: scene_opts.ring_radial_segments,
        tubular_segments: scene_opts.ring_tubular_segments,
    });

    let nucleus_material = scene.add_material(Material::Standard {
        color: srgb_hex_to_linear(colors.nucleus_color),
        emissive: srgb_hex_to_linear(colors.nucleus_emissive),
        emissive_intensity: colors.nucleus_emissive_intensity,
        roughness: colors.nucleus_roughness,
        metalness: colors.nucleus_metalness,
    });
    let electron_material = scene.add_material(Material::Standard {
        color: srgb_hex_to_linear(colors.electron_color),
        emissive: srgb_hex_to_linear(colors.electron_emissive),
        emissive_intensity: colors.electron_emissive_intensity,
        roughness: colors.electron_roughness,
        metalness: colors.electron_metalness,
    });
    let trail_material = scene.add_material(Material::Line {
        color: srgb_hex_to_linear(colors.trail_color),
        opacity: colors.trail_opacity,
    });
    let ring_material = scene.add_material(Material::Basic {
        color: srgb_hex_to_linear(colors.ring_color),
        opacity: colors.ring_opacity,
    });

    let atom =
        scene.add_node("atom", NodeKind::Group, Transform::default(), None);

    let _ = scene.add_node(
        "ambient",
        NodeKind::AmbientLight {
            color: srgb_hex_to_linear(lights.ambient_color),
            intensity: lights.ambient_intensity,
        },
        Transform::default(),
        Some(atom),
    );
    let _ = scene.add_node(
        "point-light",
        NodeKind::PointLight {
            color: srgb_hex_to_linear(lights.point_color),
            intensity: lights.point_intensity,
            distance: lights.point_distance,
        },
        Transform::from_position(Vec3::from(lights.point_position)),
        Some(atom),
    );

    let nucleus = scene.add_node(
        "nucleus",
        NodeKind::Mesh {
            geometry: nucleus_geometry,
            material: nucleus_material,
        },
        Transform::default(),
        Some(atom),
    );

    let count = scene_opts.body_count;
    let radius = scene_opts.orbit_radius;
    let mut bodies = Vec::with_capacity(count as usize);

    for i in 0..count {
        let offset = angle_offset(i, count);
        let angle = offset as f32;
        let tilt =
            orbit_tilt(i, count, scene_opts.tilt_base, scene_opts.tilt_step);

        let group = scene.add_node(
            format!("orbit-{i}"),
            NodeKind::Group,
            Transform::from_rotation(tilt),
            Some(atom),
        );
        let electron = scene.add_node(
            format!("electron-{i}"),
            NodeKind::Mesh {
                geometry: electron_geometry,
                material: electron_material,
            },
            Transform::from_position(Vec3::new(
                radius * angle.cos(),
                radius * angle.sin(),
                0.0,
            )),
            Some(group),
        );
        // Degenerate until the first tick writes real endpoints.
        let trail = scene.add_node(
            format!("trail-{i}"),
            NodeKind::Line {
                points: [Vec3::ZERO; 2],
                material: trail_material,
            },
            Transform::default(),
            Some(group),
        );
        let ring = scene.add_node(
            format!("ring-{i}"),
            NodeKind::Mesh {
                geometry: ring_geometry,
                material: ring_material,
            },
            Transform::from_rotation(tilt),
            Some(atom),
        );

        bodies.push(OrbitingBody {
            angular_position: angle,
            angle_offset: offset,
            angular_speed: scene_opts.angular_speed,
            orbit_radius: radius,
            group,
            electron,
            trail,
            ring,
        });
    }

    let rig = AtomRig {
        atom,
        nucleus,
        nucleus_material,
        bodies,
    };
    rig.apply_visibility(
        &mut scene,
        options.display.show_rings,
        options.display.show_trails,
    );

    log::debug!(
        "built atom: {} nodes, {} bodies, {} geometries",
        scene.len(),
        rig.bodies.len(),
        scene.geometries().len()
    );

    (scene, rig)
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_4;

    use super::*;

    #[test]
    fn initial_angles_are_evenly_spaced() {
        let (_, rig) = build_atom(&Options::default());
        let angles: Vec<f32> =
            rig.bodies.iter().map(|b| b.angular_position).collect();
        assert_eq!(angles.len(), 3);
        assert!(angles[0].abs() < 1e-6);
        assert!((angles[1] - TAU / 3.0).abs() < 1e-6);
        assert!((angles[2] - 2.0 * TAU / 3.0).abs() < 1e-6);
    }

    #[test]
    fn orbit_planes_are_tilted_per_body() {
        let (scene, rig) = build_atom(&Options::default());
        for (i, body) in rig.bodies.iter().enumerate() {
            let expected = Vec3::new(
                FRAC_PI_4 + i as f32 * 0.4,
                TAU * i as f32 / 3.0,
                0.0,
            );
            let group = scene.node(body.group).transform.rotation;
            let ring = scene.node(body.ring).transform.rotation;
            assert!((group - expected).length() < 1e-6);
            assert_eq!(group, ring);
        }
    }

    #[test]
    fn hierarchy_matches_layout() {
        let (scene, rig) = build_atom(&Options::default());
        // atom, 2 lights, nucleus, 3 x (group, electron, trail, ring)
        assert_eq!(scene.len(), 4 + 3 * 4);
        assert_eq!(scene.node(rig.atom).parent(), None);
        assert_eq!(scene.node(rig.nucleus).parent(), Some(rig.atom));

        for body in &rig.bodies {
            assert_eq!(scene.node(body.group).parent(), Some(rig.atom));
            assert_eq!(scene.node(body.ring).parent(), Some(rig.atom));
            assert_eq!(
                scene.node(body.group).children(),
                &[body.electron, body.trail]
            );
        }
    }

    #[test]
    fn electrons_start_on_their_circle() {
        let (scene, rig) = build_atom(&Options::default());
        for body in &rig.bodies {
            let p = scene.node(body.electron).transform.position;
            assert!((p.length() - 3.5).abs() < 1e-5);
            assert_eq!(p.z, 0.0);
            assert_eq!(body.orbit_radius, 3.5);
        }
    }

    #[test]
    fn body_count_is_configurable() {
        let mut options = Options::default();
        options.scene.body_count = 5;
        let (_, rig) = build_atom(&options);
        assert_eq!(rig.bodies.len(), 5);
        assert!((rig.bodies[1].angular_position - TAU / 5.0).abs() < 1e-6);
    }

    #[test]
    fn display_toggles_hide_rings_and_trails() {
        let mut options = Options::default();
        options.display.show_rings = false;
        let (mut scene, rig) = build_atom(&options);
        assert!(!scene.is_visible(rig.bodies[0].ring));
        assert!(scene.is_visible(rig.bodies[0].trail));

        rig.apply_visibility(&mut scene, true, false);
        assert!(scene.is_visible(rig.bodies[0].ring));
        assert!(!scene.is_visible(rig.bodies[0].trail));
    }

    #[test]
    fn nucleus_material_glows() {
        let (scene, rig) = build_atom(&Options::default());
        assert_eq!(
            scene.material(rig.nucleus_material).emissive_intensity(),
            Some(3.5)
        );
    }
}
