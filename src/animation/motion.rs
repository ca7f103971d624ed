//! Closed-form motion helpers shared by the animator and its tests.

use std::f32::consts::TAU;

use glam::Vec3;

/// Wrap an angle into `[0, 2π)`.
#[must_use]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Angle reached after `tick` steps of `speed` from `offset`, wrapped into
/// `[0, 2π)`.
///
/// Evaluated in f64 from the tick count rather than accumulated, so the
/// result does not drift however long the animation runs.
#[must_use]
pub fn angle_at_tick(offset: f64, speed: f64, tick: u64) -> f32 {
    let angle = (offset + tick as f64 * speed).rem_euclid(std::f64::consts::TAU);
    wrap_angle(angle as f32)
}

/// Uniform nucleus scale at `time`: `1 + amplitude * sin(frequency * time)`.
#[must_use]
pub fn pulse_scale(time: f64, amplitude: f32, frequency: f32) -> f32 {
    1.0 + amplitude * (f64::from(frequency) * time).sin() as f32
}

/// Nucleus emissive intensity at `time`.
///
/// With `swing == 0` the glow is constant at `base`; otherwise it rides the
/// same sine as [`pulse_scale`].
#[must_use]
pub fn pulse_emissive(time: f64, base: f32, swing: f32, frequency: f32) -> f32 {
    if swing == 0.0 {
        return base;
    }
    base * (1.0 + swing * (f64::from(frequency) * time).sin() as f32)
}

/// Point on the orbit circle in the body's local plane (z = 0).
#[must_use]
pub fn orbit_position(radius: f32, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3::new(radius * cos, radius * sin, 0.0)
}

/// Trail endpoints: the electron itself and a point pulled toward the
/// nucleus by `pullback`.
#[must_use]
pub fn trail_points(position: Vec3, pullback: f32) -> [Vec3; 2] {
    [position, position * pullback]
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;

    #[test]
    fn wrap_angle_stays_in_range() {
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!((wrap_angle(TAU + 0.5) - 0.5).abs() < 1e-6);
        assert!((wrap_angle(-0.5) - (TAU - 0.5)).abs() < 1e-6);
        let tiny = wrap_angle(-1e-9);
        assert!((0.0..TAU).contains(&tiny));
    }

    #[test]
    fn angle_at_tick_wraps_from_offset() {
        assert_eq!(angle_at_tick(0.0, 0.09, 0), 0.0);
        assert!((angle_at_tick(1.0, 0.5, 4) - 3.0).abs() < 1e-6);
        let wrapped = angle_at_tick(0.0, 0.09, 100);
        assert!((wrapped - (9.0 - TAU)).abs() < 1e-5);
        assert!((0.0..TAU).contains(&angle_at_tick(0.0, 0.09, 1 << 40)));
    }

    #[test]
    fn pulse_scale_is_bounded() {
        for tick in 0..2000_u32 {
            let time = f64::from(tick) * 0.02;
            let s = pulse_scale(time, 0.02, 2.0);
            assert!((0.98..=1.02).contains(&s), "tick {tick}: {s}");
        }
        assert_eq!(pulse_scale(0.0, 0.02, 2.0), 1.0);
        let peak = pulse_scale(f64::from(PI) / 4.0, 0.02, 2.0);
        assert!((peak - 1.02).abs() < 1e-6);
    }

    #[test]
    fn steady_glow_without_swing() {
        assert_eq!(pulse_emissive(1.234, 3.556, 0.0, 2.0), 3.556);
        let lit = pulse_emissive(f64::from(PI) / 4.0, 2.0, 0.5, 2.0);
        assert!((lit - 3.0).abs() < 1e-5);
    }

    #[test]
    fn orbit_position_lies_on_circle() {
        for i in 0..64 {
            let angle = i as f32 * 0.37;
            let p = orbit_position(3.5, angle);
            assert!((p.length() - 3.5).abs() < 1e-5);
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn trail_tail_is_pulled_back() {
        let head = Vec3::new(2.0, -1.0, 0.0);
        let [first, second] = trail_points(head, 0.95);
        assert_eq!(first, head);
        assert_eq!(second, Vec3::new(1.9, -0.95, 0.0));
    }
}
