/// Window size mirrored from the platform, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportState {
    /// Width in pixels, never zero.
    pub width: u32,
    /// Height in pixels, never zero.
    pub height: u32,
}

impl ViewportState {
    /// Viewport of the given size; zero dimensions are clamped to 1.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Record a new size. Returns `false` when nothing changed.
    pub fn update(&mut self, width: u32, height: u32) -> bool {
        let next = Self::new(width, height);
        if next == *self {
            return false;
        }
        *self = next;
        true
    }

    /// Width over height.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_resize_is_noop() {
        let mut vp = ViewportState::new(800, 600);
        assert!(vp.update(1920, 1080));
        assert!(!vp.update(1920, 1080));
        assert_eq!((vp.width, vp.height), (1920, 1080));
        assert!((vp.aspect() - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn zero_dimensions_clamp_to_one() {
        let mut vp = ViewportState::new(0, 0);
        assert_eq!((vp.width, vp.height), (1, 1));
        assert!(!vp.update(0, 1));
        assert!(vp.update(640, 0));
        assert_eq!(vp.height, 1);
    }
}
