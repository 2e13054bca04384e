//! Manifest model and loading.
//!
//! This module provides the structured manifest this crate operates on,
//! organized into focused submodules:
//!
//! - `manifest` - The [`Manifest`] with its active/disabled service split
//! - `service` - Service definitions (`Service`)
//! - `dependency` - `depends_on` edges (`ServiceDependency`, `DependencyCondition`)
//! - `resources` - Network and volume definitions
//! - `parser` - YAML loading and manifest discovery
//! - `validation` - Manifest validation
//! - `labels` - Runtime correlation labels
//! - `compare` - Image comparison between two manifests

mod compare;
mod dependency;
mod labels;
mod manifest;
mod parser;
mod resources;
mod service;
mod validation;

pub use compare::*;
pub use dependency::*;
pub use labels::*;
pub use manifest::*;
pub use parser::*;
pub use resources::*;
pub use service::*;
