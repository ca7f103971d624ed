//! The engine's complete interactive vocabulary.
//!
//! Every user-facing operation, whether it comes from a key press, a mouse
//! gesture, or a programmatic call, is an `AtomCommand`. Consumers
//! construct commands and pass them to
//! [`AtomEngine::execute`](super::AtomEngine::execute).

use glam::Vec2;

/// A single interactive operation on the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AtomCommand {
    /// Orbit the camera by a pointer drag in physical pixels.
    RotateCamera {
        /// Cursor movement since the last event.
        delta: Vec2,
    },
    /// Move the orbit target by a pointer drag in physical pixels.
    PanCamera {
        /// Cursor movement since the last event.
        delta: Vec2,
    },
    /// Dolly toward (positive) or away from (negative) the target.
    Zoom {
        /// Wheel notches.
        delta: f32,
    },
    /// Return the camera to its initial view.
    ResetCamera,
    /// Show or hide the orbit rings.
    ToggleRings,
    /// Show or hide the electron trails.
    ToggleTrails,
    /// Turn the bloom pass on or off.
    ToggleBloom,
}
