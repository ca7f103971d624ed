use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-tick animation constants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
pub struct AnimationOptions {
    /// Time advance per tick. Playback speed follows the display refresh
    /// rate because every frame is one tick.
    #[schemars(skip)]
    pub time_step: f64,
    /// Relative amplitude of the nucleus scale pulse.
    #[schemars(title = "Pulse Amplitude", range(min = 0.0, max = 0.2))]
    pub pulse_amplitude: f32,
    /// Angular frequency of the pulse, in radians per time unit.
    #[schemars(title = "Pulse Frequency", range(min = 0.0, max = 10.0))]
    pub pulse_frequency: f32,
    /// Nucleus emissive intensity at rest.
    #[schemars(title = "Glow", range(min = 0.0, max = 10.0))]
    pub emissive_intensity: f32,
    /// Relative emissive swing synced to the scale pulse (0 = steady glow).
    #[schemars(title = "Glow Pulse", range(min = 0.0, max = 1.0))]
    pub emissive_pulse: f32,
    /// Trail tail position as a fraction of the electron position.
    #[schemars(title = "Trail Pullback", range(min = 0.5, max = 1.0))]
    pub trail_pullback: f32,
    /// Atom tumble around X per tick, in radians.
    #[schemars(skip)]
    pub spin_x: f64,
    /// Atom tumble around Y per tick, in radians.
    #[schemars(skip)]
    pub spin_y: f64,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            time_step: 0.02,
            pulse_amplitude: 0.02,
            pulse_frequency: 2.0,
            emissive_intensity: 3.556,
            emissive_pulse: 0.0,
            trail_pullback: 0.95,
            spin_x: 0.001,
            spin_y: 0.002,
        }
    }
}
