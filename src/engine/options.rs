//! Options methods for AtomEngine

use std::path::Path;

use super::AtomEngine;
use crate::animation::AtomAnimator;
use crate::error::AtomVizError;
use crate::options::Options;
use crate::renderer::SceneRenderer;
use crate::scene::build_atom;
use crate::util::color::srgb_hex_to_linear;

/// Whether switching from `old` to `new` changes the scene graph itself
/// (shape, materials, or lights) rather than just runtime parameters.
#[must_use]
pub(crate) fn needs_rebuild(old: &Options, new: &Options) -> bool {
    old.scene != new.scene
        || old.materials != new.materials
        || old.lighting != new.lighting
}

/// Replace `current` with `new`, running `rebuild` first when the change
/// reshapes the scene. `current` is left untouched if `rebuild` fails.
///
/// Returns whether a rebuild ran.
pub(crate) fn commit_options<E>(
    current: &mut Options,
    new: Options,
    rebuild: impl FnOnce(&Options) -> Result<(), E>,
) -> Result<bool, E> {
    let rebuilt = needs_rebuild(current, &new);
    if rebuilt {
        rebuild(&new)?;
    }
    *current = new;
    Ok(rebuilt)
}

impl AtomEngine {
    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace options and apply all changes to subsystems.
    ///
    /// Shape, material, and lighting changes rebuild the scene and restart
    /// the animation clock.
    ///
    /// # Errors
    ///
    /// Returns [`AtomVizError::Shader`] if the rebuilt scene renderer fails
    /// to compose its shaders; the previous scene and options stay in
    /// place.
    pub fn set_options(&mut self, new: Options) -> Result<(), AtomVizError> {
        let mut options = std::mem::take(&mut self.options);
        let committed =
            commit_options(&mut options, new, |next| self.rebuild_scene(next));
        self.options = options;
        let _ = committed?;
        self.apply_options();
        Ok(())
    }

    /// Push current option values to the animator, camera, input
    /// bindings, visibility toggles, and post-processing passes.
    pub fn apply_options(&mut self) {
        self.animator.set_options(self.options.animation.clone());
        self.camera_controller.apply_options(&self.options.camera);
        self.input.set_key_bindings(self.options.keybindings.clone());
        self.context.set_vsync(self.options.display.vsync);
        self.apply_display();
        self.apply_post_processing();
    }

    /// Push the ring/trail toggles into the scene graph.
    pub(super) fn apply_display(&mut self) {
        let display = &self.options.display;
        self.rig.apply_visibility(
            &mut self.scene,
            display.show_rings,
            display.show_trails,
        );
    }

    /// Push bloom and tone-mapping values to the GPU.
    pub(super) fn apply_post_processing(&mut self) {
        self.post_process
            .apply_options(&self.options, &self.context.queue);
    }

    fn rebuild_scene(&mut self, options: &Options) -> Result<(), AtomVizError> {
        let (scene, rig) = build_atom(options);
        let scene_renderer = SceneRenderer::new(
            &self.context,
            &scene,
            &self.camera_controller.layout,
            &self.lighting.layout,
            srgb_hex_to_linear(options.materials.background),
            &mut self.shader_composer,
        )?;
        self.scene = scene;
        self.rig = rig;
        self.scene_renderer = scene_renderer;
        self.animator = AtomAnimator::new(options.animation.clone());
        log::info!("scene rebuilt with {} nodes", self.scene.len());
        Ok(())
    }

    /// Load a named preset from `presets_dir`. Returns true on success.
    pub fn load_preset(&mut self, name: &str, presets_dir: &Path) -> bool {
        let path = presets_dir.join(format!("{name}.toml"));
        match Options::load(&path).and_then(|opts| self.set_options(opts)) {
            Ok(()) => {
                log::info!("loaded preset '{name}'");
                true
            }
            Err(e) => {
                log::error!("failed to load preset '{name}': {e}");
                false
            }
        }
    }

    /// Save the current options as a named preset. Returns true on
    /// success.
    pub fn save_preset(&self, name: &str, presets_dir: &Path) -> bool {
        let path = presets_dir.join(format!("{name}.toml"));
        match self.options.save(&path) {
            Ok(()) => {
                log::info!("saved preset '{name}'");
                true
            }
            Err(e) => {
                log::error!("failed to save preset '{name}': {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_sections_do_not_rebuild() {
        let old = Options::default();
        let mut new = old.clone();
        new.display.bloom = false;
        new.post_processing.bloom_strength = 2.0;
        new.camera.damping = 0.2;
        new.animation.spin_y = 0.01;
        assert!(!needs_rebuild(&old, &new));
    }

    #[test]
    fn shape_material_and_light_changes_rebuild() {
        let old = Options::default();

        let mut new = old.clone();
        new.scene.body_count = 5;
        assert!(needs_rebuild(&old, &new));

        let mut new = old.clone();
        new.materials.ring_opacity = 0.25;
        assert!(needs_rebuild(&old, &new));

        let mut new = old.clone();
        new.lighting.point_intensity = 10.0;
        assert!(needs_rebuild(&old, &new));
    }

    #[test]
    fn failed_rebuild_keeps_previous_options() {
        let mut current = Options::default();
        let mut new = current.clone();
        new.scene.body_count = 5;

        let err = commit_options(&mut current, new.clone(), |_| Err("shader"))
            .unwrap_err();
        assert_eq!(err, "shader");
        assert_eq!(current, Options::default());

        // Resubmitting the same options still rebuilds.
        let mut built = Vec::new();
        let rebuilt = commit_options(&mut current, new.clone(), |next| {
            built.push(next.scene.body_count);
            Ok::<(), &str>(())
        })
        .unwrap();
        assert!(rebuilt);
        assert_eq!(built, [5]);
        assert_eq!(current, new);
    }

    #[test]
    fn runtime_change_commits_without_rebuild() {
        let mut current = Options::default();
        let mut new = current.clone();
        new.display.bloom = false;

        let rebuilt = commit_options(&mut current, new.clone(), |_| {
            Err("rebuild should not run")
        })
        .unwrap();
        assert!(!rebuilt);
        assert_eq!(current, new);
    }
}
