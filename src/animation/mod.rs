//! Per-tick animation of the atom.
//!
//! - `motion`: pure per-tick formulas (pulse, orbit position, trail)
//! - `animator`: [`AtomAnimator`], the tick counter that applies them to a
//!   [`Scene`](crate::scene::Scene)

mod animator;
pub mod motion;

pub use animator::AtomAnimator;
