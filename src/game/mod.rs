//! The run loop core: physics, pipe spawning, collision, scoring, and the
//! difficulty ramp. Pure state + step functions with no rendering surface.

pub mod logic;
pub mod types;

pub use logic::{aabb_overlap, apply_input, check_collision, tick, Aabb, RunInput};
pub use types::{Bird, Pipe, RunConfig, RunPhase, RunState};
