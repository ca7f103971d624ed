//! Input handling: platform-agnostic event types and the processor that
//! converts them into [`AtomCommand`](crate::engine::AtomCommand)s.

/// Platform-agnostic input events.
pub mod event;
/// Converts raw events into engine commands.
pub mod processor;

pub use event::{InputEvent, MouseButton};
pub use processor::{
    InputProcessor, KeyBindings, KeyCommandTag, DOLLY_PER_PIXEL,
};
