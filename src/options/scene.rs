use std::f32::consts::FRAC_PI_4;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Shape of the atom: body count, orbit geometry, tessellation.
///
/// These values are read once when the scene is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
pub struct SceneOptions {
    /// Number of orbiting electrons.
    #[schemars(title = "Electrons", range(min = 1, max = 12))]
    pub body_count: u32,
    /// Orbit radius shared by every electron.
    #[schemars(title = "Orbit Radius", range(min = 1.0, max = 10.0))]
    pub orbit_radius: f32,
    /// Angular advance per tick, in radians.
    #[schemars(title = "Orbit Speed", range(min = 0.0, max = 0.5))]
    pub angular_speed: f64,
    /// X tilt of the first orbit plane.
    #[schemars(skip)]
    pub tilt_base: f32,
    /// Additional X tilt per subsequent orbit.
    #[schemars(skip)]
    pub tilt_step: f32,
    /// Nucleus sphere radius.
    #[schemars(title = "Nucleus Radius", range(min = 0.1, max = 2.0))]
    pub nucleus_radius: f32,
    /// Nucleus sphere segments (both directions).
    #[schemars(skip)]
    pub nucleus_segments: u32,
    /// Electron sphere radius.
    #[schemars(title = "Electron Radius", range(min = 0.05, max = 1.0))]
    pub electron_radius: f32,
    /// Electron sphere segments (both directions).
    #[schemars(skip)]
    pub electron_segments: u32,
    /// Ring guide tube radius.
    #[schemars(skip)]
    pub ring_tube: f32,
    /// Ring guide cross-section segments.
    #[schemars(skip)]
    pub ring_radial_segments: u32,
    /// Ring guide segments along the orbit.
    #[schemars(skip)]
    pub ring_tubular_segments: u32,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            body_count: 3,
            orbit_radius: 3.5,
            angular_speed: 0.09,
            tilt_base: FRAC_PI_4,
            tilt_step: 0.4,
            nucleus_radius: 0.6,
            nucleus_segments: 32,
            electron_radius: 0.25,
            electron_segments: 16,
            ring_tube: 0.02,
            ring_radial_segments: 8,
            ring_tubular_segments: 100,
        }
    }
}
