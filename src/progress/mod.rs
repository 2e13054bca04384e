//! Decoding of compose progress output.
//!
//! The progress reporter writes one human-readable line per resource state
//! change, e.g.
//!
//! ```text
//! DRY-RUN MODE -  Container myproj-web-1  Starting
//!  Volume "myproj_data"  Created
//! ```
//!
//! There is no formal grammar for these lines. [`decode_line`] recovers a
//! [`DecodedEvent`] by prefix matching against the fixed vocabulary in
//! [`grammar`](self::grammar) and against the names defined in the manifest.

mod batch;
mod decoder;
pub mod grammar;

pub use batch::*;
pub use decoder::*;
pub use grammar::{ResourceType, StateType};
