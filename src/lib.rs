// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Animated glowing atom visualization built on wgpu.
//!
//! A pulsing nucleus sits at the center of a slowly spinning group of
//! tilted orbits. Each orbit carries an electron with a short trail and a
//! faint ring, and the whole image runs through a threshold bloom and
//! Reinhard tone mapping.
//!
//! # Key entry points
//!
//! - [`AtomEngine`] - owns the GPU context, scene, camera, and passes
//! - [`scene::build_atom`] - builds the scene graph and its animation rig
//! - [`animation::AtomAnimator`] - advances the atom one tick at a time
//! - [`Options`] - runtime configuration with TOML presets
//! - `Viewer` (feature `viewer`) - a ready-made winit window
//!
//! # Frame flow
//!
//! Each redraw advances the animator, steps the damped orbit camera,
//! renders the scene graph into an HDR target, then runs bloom and the
//! tone-mapping composite into the swapchain image.

pub mod animation;
pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
mod viewer;

pub use engine::{AtomCommand, AtomEngine};
pub use error::AtomVizError;
pub use input::{InputEvent, InputProcessor, KeyBindings, MouseButton};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
