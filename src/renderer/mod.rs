//! Rendering subsystems: the scene raster pass and the post-processing
//! chain (bloom, tone-mapping composite).

pub(crate) mod pipeline_util;
pub mod postprocess;
pub mod scene_renderer;

pub use postprocess::post_process::PostProcessStack;
pub use scene_renderer::{FrameBindings, SceneRenderer};
