//! Converts raw platform events into engine commands.
//!
//! The `InputProcessor` owns the transient pointer state (cursor position,
//! held button, pan modifier) and the key-binding map. It is the only thing
//! that sits between raw window events and the engine's
//! [`execute`](crate::engine::AtomEngine::execute) method.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::event::{InputEvent, MouseButton};
use crate::engine::AtomCommand;

/// Pixel-to-notch scale for middle-button dolly and pixel scroll deltas.
pub const DOLLY_PER_PIXEL: f32 = 0.01;

/// Maps physical key strings to [`AtomCommand`] variants.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format:
/// `"KeyR"`, `"Space"`, `"Escape"`, etc.
///
/// Only discrete commands can be key-bound; orbit commands come from the
/// pointer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeyBindings {
    /// Forward map: key string → command tag.
    bindings: HashMap<String, KeyCommandTag>,
}

/// Serializable tag for the key-bindable subset of [`AtomCommand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommandTag {
    /// Return the camera to its initial view.
    ResetCamera,
    /// Show or hide the orbit rings.
    ToggleRings,
    /// Show or hide the electron trails.
    ToggleTrails,
    /// Turn the bloom pass on or off.
    ToggleBloom,
}

impl KeyCommandTag {
    fn to_command(self) -> AtomCommand {
        match self {
            Self::ResetCamera => AtomCommand::ResetCamera,
            Self::ToggleRings => AtomCommand::ToggleRings,
            Self::ToggleTrails => AtomCommand::ToggleTrails,
            Self::ToggleBloom => AtomCommand::ToggleBloom,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("KeyR".into(), KeyCommandTag::ResetCamera),
            ("KeyO".into(), KeyCommandTag::ToggleRings),
            ("KeyT".into(), KeyCommandTag::ToggleTrails),
            ("KeyB".into(), KeyCommandTag::ToggleBloom),
        ]);
        Self { bindings }
    }
}

impl KeyBindings {
    /// Look up the command for a physical key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<AtomCommand> {
        self.bindings.get(key).map(|tag| tag.to_command())
    }

    /// Bind `key` to `tag`, replacing any previous binding for that key.
    pub fn bind(&mut self, key: impl Into<String>, tag: KeyCommandTag) {
        let _ = self.bindings.insert(key.into(), tag);
    }
}

/// Converts raw window events into [`AtomCommand`]s.
///
/// # Usage
///
/// ```ignore
/// if let Some(cmd) = input_processor.handle_event(event) {
///     engine.execute(cmd);
/// }
/// if let Some(cmd) = input_processor.handle_key_press("KeyR") {
///     engine.execute(cmd);
/// }
/// ```
pub struct InputProcessor {
    /// Last cursor position, `None` until the first move.
    cursor: Option<Vec2>,
    /// Button currently dragging.
    held: Option<MouseButton>,
    /// Whether shift/ctrl/meta is held.
    pan_modifier: bool,
    /// Key string → command mapping.
    key_bindings: KeyBindings,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_key_bindings(KeyBindings::default())
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeyBindings) -> Self {
        Self {
            cursor: None,
            held: None,
            pan_modifier: false,
            key_bindings,
        }
    }

    /// Button currently held for a drag, if any.
    #[must_use]
    pub fn held_button(&self) -> Option<MouseButton> {
        self.held
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeyBindings {
        &self.key_bindings
    }

    /// Replace the key bindings.
    pub fn set_key_bindings(&mut self, key_bindings: KeyBindings) {
        self.key_bindings = key_bindings;
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<AtomCommand> {
        self.key_bindings.lookup(key)
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<AtomCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(x, y),
            InputEvent::MouseButton { button, pressed } => {
                if pressed {
                    // First button down owns the drag.
                    if self.held.is_none() {
                        self.held = Some(button);
                    }
                } else if self.held == Some(button) {
                    self.held = None;
                }
                None
            }
            InputEvent::Scroll { delta } => {
                (delta != 0.0).then_some(AtomCommand::Zoom { delta })
            }
            InputEvent::ModifiersChanged { pan_modifier } => {
                self.pan_modifier = pan_modifier;
                None
            }
            InputEvent::CursorLeft => {
                self.held = None;
                self.cursor = None;
                None
            }
        }
    }

    fn handle_cursor_moved(&mut self, x: f32, y: f32) -> Option<AtomCommand> {
        let position = Vec2::new(x, y);
        let previous = self.cursor.replace(position)?;
        let delta = position - previous;
        if delta == Vec2::ZERO {
            return None;
        }

        match self.held? {
            MouseButton::Left if self.pan_modifier => {
                Some(AtomCommand::PanCamera { delta })
            }
            MouseButton::Left => Some(AtomCommand::RotateCamera { delta }),
            MouseButton::Right => Some(AtomCommand::PanCamera { delta }),
            // Dragging down moves away from the target.
            MouseButton::Middle => Some(AtomCommand::Zoom {
                delta: -delta.y * DOLLY_PER_PIXEL,
            }),
        }
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(p: &mut InputProcessor, button: MouseButton) {
        assert_eq!(
            p.handle_event(InputEvent::MouseButton {
                button,
                pressed: true
            }),
            None
        );
    }

    fn release(p: &mut InputProcessor, button: MouseButton) {
        let _ = p.handle_event(InputEvent::MouseButton {
            button,
            pressed: false,
        });
    }

    fn move_to(p: &mut InputProcessor, x: f32, y: f32) -> Option<AtomCommand> {
        p.handle_event(InputEvent::CursorMoved { x, y })
    }

    #[test]
    fn hover_without_button_does_nothing() {
        let mut p = InputProcessor::new();
        assert_eq!(move_to(&mut p, 10.0, 10.0), None);
        assert_eq!(move_to(&mut p, 20.0, 15.0), None);
    }

    #[test]
    fn left_drag_rotates() {
        let mut p = InputProcessor::new();
        let _ = move_to(&mut p, 100.0, 100.0);
        press(&mut p, MouseButton::Left);
        assert_eq!(
            move_to(&mut p, 110.0, 95.0),
            Some(AtomCommand::RotateCamera {
                delta: Vec2::new(10.0, -5.0)
            })
        );
        release(&mut p, MouseButton::Left);
        assert_eq!(move_to(&mut p, 120.0, 95.0), None);
    }

    #[test]
    fn modifier_or_right_button_pans() {
        let mut p = InputProcessor::new();
        let _ = move_to(&mut p, 0.0, 0.0);
        let _ = p.handle_event(InputEvent::ModifiersChanged {
            pan_modifier: true,
        });
        press(&mut p, MouseButton::Left);
        assert!(matches!(
            move_to(&mut p, 5.0, 0.0),
            Some(AtomCommand::PanCamera { .. })
        ));
        release(&mut p, MouseButton::Left);

        let _ = p.handle_event(InputEvent::ModifiersChanged {
            pan_modifier: false,
        });
        press(&mut p, MouseButton::Right);
        assert_eq!(
            move_to(&mut p, 5.0, 7.0),
            Some(AtomCommand::PanCamera {
                delta: Vec2::new(0.0, 7.0)
            })
        );
    }

    #[test]
    fn middle_drag_dollies() {
        let mut p = InputProcessor::new();
        let _ = move_to(&mut p, 0.0, 100.0);
        press(&mut p, MouseButton::Middle);
        let Some(AtomCommand::Zoom { delta }) = move_to(&mut p, 0.0, 50.0)
        else {
            panic!("expected zoom");
        };
        assert!((delta - 0.5).abs() < 1e-6);
    }

    #[test]
    fn second_button_does_not_steal_drag() {
        let mut p = InputProcessor::new();
        let _ = move_to(&mut p, 0.0, 0.0);
        press(&mut p, MouseButton::Left);
        press(&mut p, MouseButton::Right);
        assert_eq!(p.held_button(), Some(MouseButton::Left));
        release(&mut p, MouseButton::Right);
        assert_eq!(p.held_button(), Some(MouseButton::Left));
    }

    #[test]
    fn scroll_zooms() {
        let mut p = InputProcessor::new();
        assert_eq!(
            p.handle_event(InputEvent::Scroll { delta: 1.0 }),
            Some(AtomCommand::Zoom { delta: 1.0 })
        );
        assert_eq!(p.handle_event(InputEvent::Scroll { delta: 0.0 }), None);
    }

    #[test]
    fn cursor_leaving_ends_drag() {
        let mut p = InputProcessor::new();
        let _ = move_to(&mut p, 0.0, 0.0);
        press(&mut p, MouseButton::Left);
        let _ = p.handle_event(InputEvent::CursorLeft);
        assert_eq!(p.held_button(), None);
        assert_eq!(move_to(&mut p, 50.0, 50.0), None);
    }

    #[test]
    fn default_keys() {
        let p = InputProcessor::new();
        assert_eq!(p.handle_key_press("KeyR"), Some(AtomCommand::ResetCamera));
        assert_eq!(p.handle_key_press("KeyO"), Some(AtomCommand::ToggleRings));
        assert_eq!(p.handle_key_press("KeyT"), Some(AtomCommand::ToggleTrails));
        assert_eq!(p.handle_key_press("KeyB"), Some(AtomCommand::ToggleBloom));
        assert_eq!(p.handle_key_press("KeyQ"), None);
    }

    #[test]
    fn bindings_round_trip_through_toml() {
        let mut bindings = KeyBindings::default();
        bindings.bind("Space", KeyCommandTag::ToggleBloom);
        let text = toml::to_string(&bindings).unwrap();
        assert!(text.contains("toggle_bloom"));
        let parsed: KeyBindings = toml::from_str(&text).unwrap();
        assert_eq!(parsed.lookup("Space"), Some(AtomCommand::ToggleBloom));
    }
}
