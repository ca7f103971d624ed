//! Input and command dispatch for AtomEngine

use super::{AtomCommand, AtomEngine};
use crate::input::InputEvent;

impl AtomEngine {
    /// Process a platform-agnostic input event.
    ///
    /// Drags and scrolls become camera commands and are executed
    /// immediately. Returns `true` if the event produced a command.
    ///
    /// ```ignore
    /// engine.handle_input(InputEvent::CursorMoved { x, y });
    /// engine.handle_input(InputEvent::Scroll { delta: 1.0 });
    /// ```
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        let Some(command) = self.input.handle_event(event) else {
            return false;
        };
        self.execute(command);
        true
    }

    /// Look up a key (winit `KeyCode` debug name) in the bindings and run
    /// the bound command. Returns `true` if the key was bound.
    pub fn handle_key_press(&mut self, key: &str) -> bool {
        let Some(command) = self.input.handle_key_press(key) else {
            return false;
        };
        self.execute(command);
        true
    }

    /// Run a single command.
    pub fn execute(&mut self, command: AtomCommand) {
        match command {
            AtomCommand::RotateCamera { delta } => {
                self.camera_controller.rotate(delta);
            }
            AtomCommand::PanCamera { delta } => {
                self.camera_controller.pan(delta);
            }
            AtomCommand::Zoom { delta } => self.camera_controller.zoom(delta),
            AtomCommand::ResetCamera => {
                self.camera_controller.reset();
                log::debug!("camera reset");
            }
            AtomCommand::ToggleRings => {
                self.options.display.show_rings =
                    !self.options.display.show_rings;
                self.apply_display();
            }
            AtomCommand::ToggleTrails => {
                self.options.display.show_trails =
                    !self.options.display.show_trails;
                self.apply_display();
            }
            AtomCommand::ToggleBloom => {
                self.options.display.bloom = !self.options.display.bloom;
                self.apply_post_processing();
                log::debug!("bloom: {}", self.options.display.bloom);
            }
        }
    }
}
