//! Shared utilities: color conversion and frame timing.

/// sRGB hex colors to linear RGB.
pub mod color;
/// Smoothed frame-rate tracking.
pub mod frame_timing;
