#![allow(unused_assignments)]

//! # Compose Control
//!
//! Programmatic control over a multi-container project manifest, without
//! shelling out to the compose CLI for every decision.
//!
//! ## Features
//!
//! - **Profile partitioning**: Enable every service, then disable the ones
//!   carrying selected profiles
//! - **Dependency-aware selection**: Narrow a manifest to a set of services,
//!   with or without their `depends_on` closure
//! - **Reversal**: Compute the complement of a narrowed manifest so two
//!   partitions cover every service exactly once
//! - **Progress decoding**: Turn the compose CLI's progress lines into typed
//!   events
//! - **Runtime labels**: Stamp services with the labels containers carry
//!
//! ## Quick Start
//!
//! ```no_run
//! use compose_control::{DecodePolicy, Parser, Project};
//!
//! # fn example() -> Result<(), compose_control::Error> {
//! let parser = Parser::new();
//! let manifest = parser.load_manifest("compose.yaml", None, &[])?;
//! let project = Project::new(manifest);
//!
//! project.enable_all()?;
//! project.disable_profiles(&["debug".to_string()]);
//!
//! let output = project.parse_output(" Container demo-web-1  Started\n", "", DecodePolicy::Lenient)?;
//! for event in output.events() {
//!     println!("{} {}", event.name, event.state);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency Model
//!
//! [`Project`] is `Clone + Send + Sync`. All mutations and decodes of one
//! project are serialized on a single lock. Separate projects do not share
//! state.

pub mod config;
pub mod dependency;
pub mod error;
pub mod profile;
pub mod progress;
pub mod project;

// Re-export commonly used types
pub use config::{Activation, DependencyOption, Manifest, Parser, Service};
pub use error::{Error, Result};
pub use progress::{ComposeOutput, DecodePolicy, DecodedEvent, ResourceType, StateType};
pub use project::Project;
