use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Tone-mapping curve applied by the composite pass.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ToneMapping {
    /// Exposure only, values above 1 clip.
    None,
    /// `c / (1 + c)` after exposure.
    #[default]
    Reinhard,
}

impl ToneMapping {
    /// Shader-side selector.
    #[must_use]
    pub fn as_u32(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Reinhard => 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Effects", inline)]
#[serde(default)]
/// Bloom and tone-mapping parameters.
pub struct PostProcessingOptions {
    /// Bloom contribution multiplier.
    #[schemars(title = "Bloom Strength", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub bloom_strength: f32,
    /// Spread of the bloom across the mip chain. Values above 1 push the
    /// weight further toward the widest blur levels.
    #[schemars(title = "Bloom Radius", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub bloom_radius: f32,
    /// Luminance above which pixels bloom.
    #[schemars(title = "Bloom Threshold", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub bloom_threshold: f32,
    /// Exposure multiplier applied before tone mapping.
    #[schemars(title = "Exposure", range(min = 0.1, max = 4.0), extend("step" = 0.05))]
    pub exposure: f32,
    /// Tone-mapping curve.
    #[schemars(title = "Tone Mapping")]
    pub tone_mapping: ToneMapping,
}

impl Default for PostProcessingOptions {
    fn default() -> Self {
        Self {
            bloom_strength: 1.2,
            bloom_radius: 1.5,
            bloom_threshold: 0.9,
            exposure: 1.5,
            tone_mapping: ToneMapping::Reinhard,
        }
    }
}
