//! Profile-driven partitioning of a manifest's active set.
//!
//! The usual call sequence is [`enable_all`] to reach the everything-on
//! baseline, then [`disable_profiles`] to carve out what should not run.
//! Neither function enforces that order; it is up to the caller.

mod expand;
mod partition;

pub use expand::*;
pub use partition::*;
