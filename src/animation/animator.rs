use std::f64::consts::TAU;

use super::motion::{
    angle_at_tick, orbit_position, pulse_emissive, pulse_scale, trail_points,
};
use crate::options::AnimationOptions;
use crate::scene::{AtomRig, Scene};

/// Drives the atom one fixed step per frame.
///
/// Time is a tick counter, not wall clock: every call to
/// [`advance`](Self::advance) moves time forward by
/// [`AnimationOptions::time_step`], so playback speed follows the display
/// refresh rate.
#[derive(Debug, Clone)]
pub struct AtomAnimator {
    tick: u64,
    options: AnimationOptions,
    /// Root X/Y rotation at `spin_epoch`, where the current spin rates
    /// took over.
    spin_base: [f64; 2],
    spin_epoch: u64,
}

impl AtomAnimator {
    /// Animator at tick 0.
    #[must_use]
    pub fn new(options: AnimationOptions) -> Self {
        Self {
            tick: 0,
            options,
            spin_base: [0.0; 2],
            spin_epoch: 0,
        }
    }

    /// Number of completed ticks.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Animation time after the last tick (`tick * time_step`).
    #[must_use]
    pub fn time(&self) -> f64 {
        self.tick as f64 * self.options.time_step
    }

    /// Current animation constants.
    #[must_use]
    pub fn options(&self) -> &AnimationOptions {
        &self.options
    }

    /// Swap animation constants. The tick counter is kept and the root
    /// tumble continues from its current rotation at the new rates.
    pub fn set_options(&mut self, options: AnimationOptions) {
        self.spin_base = self.spin_angles();
        self.spin_epoch = self.tick;
        self.options = options;
    }

    /// Root X/Y rotation at the current tick, in `[0, 2π)`.
    fn spin_angles(&self) -> [f64; 2] {
        let ticks = (self.tick - self.spin_epoch) as f64;
        let [x, y] = self.spin_base;
        [
            (x + ticks * self.options.spin_x).rem_euclid(TAU),
            (y + ticks * self.options.spin_y).rem_euclid(TAU),
        ]
    }

    /// Run one tick: pulse the nucleus, move every electron and its trail,
    /// then tumble the root.
    pub fn advance(&mut self, scene: &mut Scene, rig: &mut AtomRig) {
        self.tick += 1;
        let time = self.time();
        let opts = &self.options;

        let glow = pulse_emissive(
            time,
            opts.emissive_intensity,
            opts.emissive_pulse,
            opts.pulse_frequency,
        );
        scene
            .material_mut(rig.nucleus_material)
            .set_emissive_intensity(glow);
        let scale = pulse_scale(time, opts.pulse_amplitude, opts.pulse_frequency);
        scene.transform_mut(rig.nucleus).scale = glam::Vec3::splat(scale);

        for body in &mut rig.bodies {
            body.angular_position =
                angle_at_tick(body.angle_offset, body.angular_speed, self.tick);
            let position =
                orbit_position(body.orbit_radius, body.angular_position);
            scene.transform_mut(body.electron).position = position;
            scene.set_line_points(
                body.trail,
                trail_points(position, opts.trail_pullback),
            );
        }

        let root = scene.transform_mut(rig.atom);
        let ticks = self.tick - self.spin_epoch;
        let [base_x, base_y] = self.spin_base;
        root.rotation.x = angle_at_tick(base_x, opts.spin_x, ticks);
        root.rotation.y = angle_at_tick(base_y, opts.spin_y, ticks);
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::TAU;

    use glam::Vec3;

    use super::*;
    use crate::options::Options;
    use crate::scene::{build_atom, NodeKind};

    fn setup() -> (Scene, AtomRig, AtomAnimator) {
        let options = Options::default();
        let (scene, rig) = build_atom(&options);
        (scene, rig, AtomAnimator::new(options.animation))
    }

    fn angle_diff(a: f32, b: f32) -> f32 {
        let d = (a - b).rem_euclid(TAU);
        d.min(TAU - d)
    }

    #[test]
    fn nucleus_scale_follows_pulse() {
        let (mut scene, mut rig, mut animator) = setup();
        for t in 1..=500_u32 {
            animator.advance(&mut scene, &mut rig);
            let time = 0.02 * f64::from(t);
            let expected = 1.0 + 0.02 * (2.0 * time).sin() as f32;
            let scale = scene.node(rig.nucleus).transform.scale;
            assert!((scale.x - expected).abs() < 1e-5, "tick {t}");
            assert!((0.98..=1.02).contains(&scale.x));
            assert_eq!(scale, Vec3::splat(scale.x));
        }
    }

    #[test]
    fn emissive_is_steady_by_default() {
        let (mut scene, mut rig, mut animator) = setup();
        for _ in 0..10 {
            animator.advance(&mut scene, &mut rig);
            assert_eq!(
                scene.material(rig.nucleus_material).emissive_intensity(),
                Some(3.556)
            );
        }
    }

    #[test]
    fn hundred_ticks_scenario() {
        let (mut scene, mut rig, mut animator) = setup();
        for _ in 0..100 {
            animator.advance(&mut scene, &mut rig);
        }
        assert_eq!(animator.tick_count(), 100);

        let expected = 9.0_f32.rem_euclid(TAU);
        assert!((expected - 2.717).abs() < 1e-3);
        let body = &rig.bodies[0];
        assert!(angle_diff(body.angular_position, expected) < 1e-4);

        let p = scene.node(body.electron).transform.position;
        let want = Vec3::new(3.5 * expected.cos(), 3.5 * expected.sin(), 0.0);
        assert!((p - want).length() < 1e-3);
    }

    #[test]
    fn every_body_advances_from_its_offset() {
        let (mut scene, mut rig, mut animator) = setup();
        let ticks = 250_u32;
        for _ in 0..ticks {
            animator.advance(&mut scene, &mut rig);
        }
        for (i, body) in rig.bodies.iter().enumerate() {
            let offset = TAU * i as f32 / 3.0;
            let expected = (offset + ticks as f32 * 0.09).rem_euclid(TAU);
            assert!(angle_diff(body.angular_position, expected) < 1e-3);
            assert!((0.0..TAU).contains(&body.angular_position));

            let p = scene.node(body.electron).transform.position;
            assert!((p.length() - 3.5).abs() < 1e-5);
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn trail_tail_is_95_percent_of_head() {
        let (mut scene, mut rig, mut animator) = setup();
        for _ in 0..37 {
            animator.advance(&mut scene, &mut rig);
            for body in &rig.bodies {
                let head = scene.node(body.electron).transform.position;
                let NodeKind::Line { points, .. } = scene.node(body.trail).kind
                else {
                    panic!("trail is not a line");
                };
                assert_eq!(points[0], head);
                assert_eq!(points[1], head * 0.95);
            }
        }
    }

    #[test]
    fn root_rotation_accumulates_and_wraps() {
        let (mut scene, mut rig, mut animator) = setup();
        for _ in 0..1000 {
            animator.advance(&mut scene, &mut rig);
        }
        let rotation = scene.node(rig.atom).transform.rotation;
        assert!((rotation.x - 1.0).abs() < 1e-4);
        assert!((rotation.y - 2.0).abs() < 1e-4);
        assert_eq!(rotation.z, 0.0);

        // 0.002 * 4000 = 8 rad, past one full turn
        for _ in 0..3000 {
            animator.advance(&mut scene, &mut rig);
        }
        let rotation = scene.node(rig.atom).transform.rotation;
        assert!((0.0..TAU).contains(&rotation.y));
        assert!(angle_diff(rotation.y, 8.0 - TAU) < 1e-3);
    }

    #[test]
    fn million_ticks_stay_on_closed_form() {
        let (mut scene, mut rig, mut animator) = setup();
        let ticks = 1_000_000_u32;
        for _ in 0..ticks {
            animator.advance(&mut scene, &mut rig);
        }
        let n = f64::from(ticks);
        for (i, body) in rig.bodies.iter().enumerate() {
            let offset = std::f64::consts::TAU * i as f64 / 3.0;
            let exact = (offset + n * 0.09).rem_euclid(std::f64::consts::TAU);
            assert!(
                angle_diff(body.angular_position, exact as f32) < 1e-4,
                "body {i}: {} vs {exact}",
                body.angular_position
            );
        }

        let rotation = scene.node(rig.atom).transform.rotation;
        let exact_x = (n * 0.001).rem_euclid(std::f64::consts::TAU) as f32;
        let exact_y = (n * 0.002).rem_euclid(std::f64::consts::TAU) as f32;
        assert!(angle_diff(rotation.x, exact_x) < 1e-4);
        assert!(angle_diff(rotation.y, exact_y) < 1e-4);
    }

    #[test]
    fn spin_change_continues_from_current_rotation() {
        let (mut scene, mut rig, mut animator) = setup();
        for _ in 0..500 {
            animator.advance(&mut scene, &mut rig);
        }
        let before = scene.node(rig.atom).transform.rotation;

        let mut options = animator.options().clone();
        options.spin_y = 0.01;
        animator.set_options(options);
        animator.advance(&mut scene, &mut rig);

        let after = scene.node(rig.atom).transform.rotation;
        assert!(angle_diff(after.y, before.y + 0.01) < 1e-5);
        assert!(angle_diff(after.x, before.x + 0.001) < 1e-5);
        assert_eq!(animator.tick_count(), 501);
    }

    #[test]
    fn time_is_tick_times_step() {
        let (mut scene, mut rig, mut animator) = setup();
        assert_eq!(animator.time(), 0.0);
        for _ in 0..50 {
            animator.advance(&mut scene, &mut rig);
        }
        assert!((animator.time() - 1.0).abs() < 1e-6);
    }
}
