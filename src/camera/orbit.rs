use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{Vec2, Vec3};

use crate::options::CameraOptions;

const PHI_EPSILON: f32 = 1e-6;
const ZOOM_BASE: f32 = 0.95;

/// Position on a sphere around the orbit target, Y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    /// Distance from the target.
    pub radius: f32,
    /// Polar angle from +Y.
    pub phi: f32,
    /// Azimuth around Y, measured from +Z toward +X.
    pub theta: f32,
}

impl Spherical {
    /// Spherical coordinates of `offset`.
    #[must_use]
    pub fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self {
                radius,
                phi: 0.0,
                theta: 0.0,
            };
        }
        Self {
            radius,
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            theta: offset.x.atan2(offset.z),
        }
    }

    /// Cartesian offset from the target.
    #[must_use]
    pub fn to_offset(self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.radius * Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
    }
}

/// Damped orbit controls.
///
/// Input queues motion (`rotate`, `pan`, `zoom`); [`update`](Self::update)
/// applies a `damping` fraction of the pending rotation and pan each call
/// and decays what remains, so the camera eases to a stop after input ends.
/// Dolly is applied in full on the next update.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    target: Vec3,
    spherical: Spherical,
    pending_rotation: Vec2,
    pending_pan: Vec3,
    pending_scale: f32,

    home_target: Vec3,
    home: Spherical,

    viewport: Vec2,
    options: CameraOptions,
}

impl OrbitControls {
    /// Controls looking at the origin from `+Z` at `options.distance`.
    #[must_use]
    pub fn new(options: &CameraOptions, width: u32, height: u32) -> Self {
        let home = Spherical {
            radius: options.distance,
            phi: FRAC_PI_2,
            theta: 0.0,
        };
        Self {
            target: Vec3::ZERO,
            spherical: home,
            pending_rotation: Vec2::ZERO,
            pending_pan: Vec3::ZERO,
            pending_scale: 1.0,
            home_target: Vec3::ZERO,
            home,
            viewport: Vec2::new(width.max(1) as f32, height.max(1) as f32),
            options: options.clone(),
        }
    }

    /// Replace sensitivity/damping settings. The current view is kept.
    pub fn set_options(&mut self, options: &CameraOptions) {
        self.options = options.clone();
        self.home.radius = options.distance;
        self.spherical.radius = self
            .spherical
            .radius
            .clamp(options.min_distance, options.max_distance);
    }

    /// Record the viewport size used to scale pointer deltas.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Vec2::new(width.max(1) as f32, height.max(1) as f32);
    }

    /// Viewport aspect ratio (width / height).
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y
    }

    /// Queue an orbit drag of `delta` pixels.
    ///
    /// A drag across the full viewport height turns the camera once around
    /// the target.
    pub fn rotate(&mut self, delta: Vec2) {
        let per_pixel = TAU / self.viewport.y * self.options.rotate_speed;
        // Dragging right/down swings the camera left/up around the target.
        self.pending_rotation -= delta * per_pixel;
    }

    /// Queue a pan drag of `delta` pixels.
    ///
    /// Scaled so the point under the cursor tracks the cursor at the target's
    /// depth.
    pub fn pan(&mut self, delta: Vec2) {
        let offset = self.spherical.to_offset();
        let half_fov = (self.options.fovy.to_radians() / 2.0).tan();
        let world_per_pixel =
            2.0 * offset.length() * half_fov / self.viewport.y * self.options.pan_speed;

        let forward = -offset.normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);

        self.pending_pan +=
            -right * delta.x * world_per_pixel + up * delta.y * world_per_pixel;
    }

    /// Queue a dolly step. Positive `delta` moves toward the target.
    pub fn zoom(&mut self, delta: f32) {
        if delta == 0.0 {
            return;
        }
        let step = ZOOM_BASE.powf(self.options.zoom_speed * delta.abs());
        if delta > 0.0 {
            self.pending_scale *= step;
        } else {
            self.pending_scale /= step;
        }
    }

    /// Return to the initial view and drop pending motion.
    pub fn reset(&mut self) {
        self.target = self.home_target;
        self.spherical = self.home;
        self.pending_rotation = Vec2::ZERO;
        self.pending_pan = Vec3::ZERO;
        self.pending_scale = 1.0;
    }

    /// Advance the damped state by one step. Returns `true` while motion is
    /// still being applied.
    pub fn update(&mut self) -> bool {
        let damping = self.options.damping.clamp(0.0, 1.0);

        self.spherical.theta += self.pending_rotation.x * damping;
        self.spherical.phi = (self.spherical.phi
            + self.pending_rotation.y * damping)
            .clamp(PHI_EPSILON, PI - PHI_EPSILON);
        self.spherical.radius = (self.spherical.radius * self.pending_scale)
            .clamp(self.options.min_distance, self.options.max_distance);
        self.target += self.pending_pan * damping;

        let moving = self.pending_rotation.length_squared() > 1e-12
            || self.pending_pan.length_squared() > 1e-12
            || self.pending_scale != 1.0;

        self.pending_rotation *= 1.0 - damping;
        self.pending_pan *= 1.0 - damping;
        self.pending_scale = 1.0;
        moving
    }

    /// Current orbit target.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Current spherical position relative to the target.
    #[must_use]
    pub fn spherical(&self) -> Spherical {
        self.spherical
    }

    /// Current eye position.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.target + self.spherical.to_offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls() -> OrbitControls {
        OrbitControls::new(&CameraOptions::default(), 800, 600)
    }

    fn settle(controls: &mut OrbitControls) {
        for _ in 0..600 {
            let _ = controls.update();
        }
    }

    #[test]
    fn starts_on_positive_z() {
        let c = controls();
        assert!((c.eye() - Vec3::new(0.0, 0.0, 12.0)).length() < 1e-5);
        assert_eq!(c.target(), Vec3::ZERO);
    }

    #[test]
    fn spherical_round_trip() {
        let offset = Vec3::new(1.0, 2.0, -3.0);
        let back = Spherical::from_offset(offset).to_offset();
        assert!((back - offset).length() < 1e-5);
    }

    #[test]
    fn rotation_is_damped_then_converges() {
        let mut c = controls();
        // Full-height drag = one full turn.
        c.rotate(Vec2::new(150.0, 0.0));
        let expected = -TAU * 150.0 / 600.0;

        assert!(c.update());
        let first = c.spherical().theta;
        assert!((first - expected * 0.05).abs() < 1e-5);

        settle(&mut c);
        assert!((c.spherical().theta - expected).abs() < 1e-3);
        assert!(!c.update());
        assert!((c.eye().length() - 12.0).abs() < 1e-4);
    }

    #[test]
    fn polar_angle_is_clamped() {
        let mut c = controls();
        c.rotate(Vec2::new(0.0, -10_000.0));
        settle(&mut c);
        let phi = c.spherical().phi;
        assert!(phi > 0.0 && phi < PI);
        assert!(phi >= PI - 1e-3);
    }

    #[test]
    fn zoom_respects_distance_limits() {
        let mut c = controls();
        c.zoom(1.0);
        let _ = c.update();
        assert!((c.spherical().radius - 12.0 * 0.95).abs() < 1e-4);

        for _ in 0..500 {
            c.zoom(5.0);
            let _ = c.update();
        }
        assert_eq!(c.spherical().radius, 1.0);

        for _ in 0..500 {
            c.zoom(-5.0);
            let _ = c.update();
        }
        assert_eq!(c.spherical().radius, 200.0);
    }

    #[test]
    fn pan_moves_target_in_view_plane() {
        let mut c = controls();
        c.pan(Vec2::new(100.0, 0.0));
        settle(&mut c);
        let target = c.target();
        // Dragging right drags the scene right, so the target moves left.
        assert!(target.x < 0.0);
        assert!(target.y.abs() < 1e-4 && target.z.abs() < 1e-4);
    }

    #[test]
    fn reset_restores_home_view() {
        let mut c = controls();
        c.rotate(Vec2::new(40.0, 25.0));
        c.pan(Vec2::new(10.0, 10.0));
        c.zoom(3.0);
        settle(&mut c);
        c.reset();
        assert!((c.eye() - Vec3::new(0.0, 0.0, 12.0)).length() < 1e-5);
        assert!(!c.update());
    }

    #[test]
    fn viewport_sets_aspect() {
        let mut c = controls();
        c.set_viewport(1920, 1080);
        assert!((c.aspect() - 16.0 / 9.0).abs() < 1e-6);
        c.set_viewport(0, 0);
        assert_eq!(c.aspect(), 1.0);
    }
}
