use serde::{Deserialize, Serialize};

/// Material palette. Colors are sRGB `0xRRGGBB` and converted to linear
/// when the scene is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MaterialOptions {
    /// Clear color behind the atom.
    pub background: u32,
    /// Nucleus base color.
    pub nucleus_color: u32,
    /// Nucleus emissive color.
    pub nucleus_emissive: u32,
    /// Nucleus emissive intensity before the first tick.
    pub nucleus_emissive_intensity: f32,
    /// Nucleus roughness.
    pub nucleus_roughness: f32,
    /// Nucleus metalness.
    pub nucleus_metalness: f32,
    /// Electron base color.
    pub electron_color: u32,
    /// Electron emissive color.
    pub electron_emissive: u32,
    /// Electron emissive intensity.
    pub electron_emissive_intensity: f32,
    /// Electron roughness.
    pub electron_roughness: f32,
    /// Electron metalness.
    pub electron_metalness: f32,
    /// Trail line color.
    pub trail_color: u32,
    /// Trail line opacity.
    pub trail_opacity: f32,
    /// Ring guide color.
    pub ring_color: u32,
    /// Ring guide opacity.
    pub ring_opacity: f32,
}

impl Default for MaterialOptions {
    fn default() -> Self {
        Self {
            background: 0x00_0000,
            nucleus_color: 0xff_aa66,
            nucleus_emissive: 0xff_4400,
            nucleus_emissive_intensity: 3.5,
            nucleus_roughness: 0.2,
            nucleus_metalness: 0.5,
            electron_color: 0x33_66ff,
            electron_emissive: 0x00_0066,
            electron_emissive_intensity: 1.5,
            electron_roughness: 0.1,
            electron_metalness: 0.8,
            trail_color: 0x99_ccff,
            trail_opacity: 0.35,
            ring_color: 0x99_ccff,
            ring_opacity: 0.5,
        }
    }
}
