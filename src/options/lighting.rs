use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Ambient + point light setup. Colors are sRGB `0xRRGGBB`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
pub struct LightingOptions {
    /// Ambient light color.
    #[schemars(skip)]
    pub ambient_color: u32,
    /// Ambient light intensity.
    #[schemars(title = "Ambient", range(min = 0.0, max = 5.0), extend("step" = 0.1))]
    pub ambient_intensity: f32,
    /// Point light color.
    #[schemars(skip)]
    pub point_color: u32,
    /// Point light intensity.
    #[schemars(title = "Point Light", range(min = 0.0, max = 20.0), extend("step" = 0.5))]
    pub point_intensity: f32,
    /// Distance at which the point light fades out (0 = never).
    #[schemars(skip)]
    pub point_distance: f32,
    /// Point light position in the atom's frame.
    #[schemars(skip)]
    pub point_position: [f32; 3],
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            ambient_color: 0x40_4040,
            ambient_intensity: 1.5,
            point_color: 0x33_66ff,
            point_intensity: 6.0,
            point_distance: 30.0,
            point_position: [0.0, 0.0, 10.0],
        }
    }
}
