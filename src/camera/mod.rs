//! Camera system for 3D scene viewing.
//!
//! Provides a perspective camera, damped orbit controls, and the GPU-side
//! controller that uploads the view-projection each frame.

/// GPU camera controller owning the uniform buffer and bind group.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;
/// Damped orbit controls (rotate, pan, dolly around a target).
pub mod orbit;
