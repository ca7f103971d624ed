//! Centralized scene/animation/rendering options with TOML preset support.
//!
//! Every tweakable constant of the atom (orbit shape, pulse, materials,
//! lighting, bloom, camera, key bindings, display toggles) lives here.
//! Defaults reproduce the stock scene; options serialize to/from TOML so
//! presets can be stored next to the binary.

mod animation;
mod camera;
mod display;
mod lighting;
mod materials;
mod post_processing;
mod scene;

use std::path::Path;

pub use animation::AnimationOptions;
pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use lighting::LightingOptions;
pub use materials::MaterialOptions;
pub use post_processing::{PostProcessingOptions, ToneMapping};
pub use scene::SceneOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::AtomVizError;
use crate::input::KeyBindings;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[post_processing]`) work.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Atom shape and tessellation.
    pub scene: SceneOptions,
    /// Per-tick animation constants.
    pub animation: AnimationOptions,
    /// Camera projection and orbit controls.
    pub camera: CameraOptions,
    /// Ambient and point light.
    pub lighting: LightingOptions,
    /// Material palette.
    #[schemars(skip)]
    pub materials: MaterialOptions,
    /// Bloom and tone mapping.
    pub post_processing: PostProcessingOptions,
    /// Visibility toggles.
    pub display: DisplayOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeyBindings,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AtomVizError::OptionsParse`] on malformed TOML.
    pub fn from_toml(content: &str) -> Result<Self, AtomVizError> {
        toml::from_str(content)
            .map_err(|e| AtomVizError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AtomVizError::Io`] if the file cannot be read and
    /// [`AtomVizError::OptionsParse`] on malformed TOML.
    pub fn load(path: &Path) -> Result<Self, AtomVizError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`AtomVizError::OptionsParse`] if serialization fails and
    /// [`AtomVizError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), AtomVizError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| AtomVizError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::AtomCommand;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[post_processing]
bloom_strength = 0.4
tone_mapping = 'none'
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.post_processing.bloom_strength, 0.4);
        assert_eq!(opts.post_processing.tone_mapping, ToneMapping::None);
        // Everything else should be default
        assert_eq!(opts.post_processing.bloom_threshold, 0.9);
        assert_eq!(opts.scene.body_count, 3);
        assert_eq!(opts.materials.nucleus_emissive, 0xff_4400);
    }

    #[test]
    fn hex_colors_parse_from_toml() {
        let opts = Options::from_toml("[materials]\nring_color = 0xff0000\n")
            .unwrap();
        assert_eq!(opts.materials.ring_color, 0xff_0000);
    }

    #[test]
    fn malformed_toml_is_reported() {
        let err = Options::from_toml("[scene\nbody_count = 3").unwrap_err();
        assert!(matches!(err, AtomVizError::OptionsParse(_)));
    }

    #[test]
    fn defaults_match_stock_scene() {
        let opts = Options::default();
        assert_eq!(opts.scene.orbit_radius, 3.5);
        assert!((opts.scene.angular_speed - 0.015 * 6.0).abs() < 1e-7);
        assert_eq!(opts.animation.time_step, 0.02);
        assert_eq!(opts.animation.trail_pullback, 0.95);
        assert_eq!(opts.post_processing.bloom_strength, 1.2);
        assert_eq!(opts.post_processing.bloom_radius, 1.5);
        assert_eq!(opts.post_processing.exposure, 1.5);
        assert_eq!(opts.camera.fovy, 75.0);
        assert_eq!(opts.camera.distance, 12.0);
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("KeyR"),
            Some(AtomCommand::ResetCamera)
        );
        assert_eq!(
            opts.keybindings.lookup("KeyB"),
            Some(AtomCommand::ToggleBloom)
        );
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn save_then_load_preserves_options() {
        let dir = std::env::temp_dir()
            .join(format!("atomviz-options-{}", std::process::id()));
        let path = dir.join("glow.toml");

        let mut opts = Options::default();
        opts.animation.emissive_pulse = 0.25;
        opts.save(&path).unwrap();

        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(Options::list_presets(&dir), vec!["glow".to_owned()]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("scene"));
        assert!(props.contains_key("animation"));
        assert!(props.contains_key("post_processing"));
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("display"));

        assert!(!props.contains_key("materials"));
        assert!(!props.contains_key("keybindings"));

        let effects = &props["post_processing"]["properties"];
        assert!(effects.get("bloom_strength").is_some());
        let camera = &props["camera"]["properties"];
        assert!(camera.get("znear").is_none());
    }
}
