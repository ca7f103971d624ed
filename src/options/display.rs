use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Visibility toggles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
pub struct DisplayOptions {
    /// Draw the orbit ring guides.
    #[schemars(title = "Show Rings")]
    pub show_rings: bool,
    /// Draw the electron trails.
    #[schemars(title = "Show Trails")]
    pub show_trails: bool,
    /// Run the bloom pass.
    #[schemars(title = "Bloom")]
    pub bloom: bool,
    /// Sync presentation to the display refresh. The animation advances
    /// once per frame, so this also fixes its speed.
    #[schemars(title = "VSync")]
    pub vsync: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_rings: true,
            show_trails: true,
            bloom: true,
            vsync: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_section_keeps_vsync() {
        let opts: DisplayOptions = toml::from_str("bloom = false").unwrap();
        assert!(!opts.bloom);
        assert!(opts.vsync);
        assert!(opts.show_rings);
    }
}
