//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, the lighting uniform,
//! shared pipeline helpers, and shader composition.

/// Lighting uniform gathered from the scene's light nodes.
pub mod lighting;
/// Shared wgpu boilerplate helpers for screen-space post-process pipelines.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
