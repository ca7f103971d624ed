/// Platform-agnostic input events.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor) which
/// converts drags and scrolls into orbit commands for the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute screen position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Scroll wheel in notches (positive = zoom in).
    Scroll {
        /// Scroll amount.
        delta: f32,
    },
    /// Modifier key state changed.
    ModifiersChanged {
        /// Whether shift, ctrl, or meta is held (turns a rotate drag into
        /// a pan).
        pan_modifier: bool,
    },
    /// The cursor left the window; any drag in progress ends.
    CursorLeft,
}

/// Platform-agnostic mouse button identifier.
///
/// Left drags orbit, right drags pan, middle drags dolly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

#[cfg(feature = "viewer")]
impl MouseButton {
    /// Map a winit button. Back, forward, and extra buttons have no
    /// gesture and map to `None`.
    #[must_use]
    pub fn from_winit(button: winit::event::MouseButton) -> Option<Self> {
        match button {
            winit::event::MouseButton::Left => Some(Self::Left),
            winit::event::MouseButton::Right => Some(Self::Right),
            winit::event::MouseButton::Middle => Some(Self::Middle),
            winit::event::MouseButton::Back
            | winit::event::MouseButton::Forward
            | winit::event::MouseButton::Other(_) => None,
        }
    }
}

#[cfg(all(test, feature = "viewer"))]
mod tests {
    use super::*;

    #[test]
    fn side_buttons_are_ignored() {
        use winit::event::MouseButton as Winit;

        assert_eq!(
            MouseButton::from_winit(Winit::Left),
            Some(MouseButton::Left)
        );
        assert_eq!(
            MouseButton::from_winit(Winit::Middle),
            Some(MouseButton::Middle)
        );
        assert_eq!(MouseButton::from_winit(Winit::Back), None);
        assert_eq!(MouseButton::from_winit(Winit::Forward), None);
        assert_eq!(MouseButton::from_winit(Winit::Other(7)), None);
    }
}
