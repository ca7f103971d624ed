//! Post-processing effect passes.
//!
//! The lit scene renders into an HDR target; a multi-level bloom extracts
//! and blurs its bright regions, and the composite pass adds the bloom back,
//! tone maps, and writes the swapchain image.

pub mod bloom;
pub mod composite;
pub mod post_process;
pub mod screen_pass;
