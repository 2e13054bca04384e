mod graph;
mod reverse;

pub use graph::*;
pub use reverse::*;
