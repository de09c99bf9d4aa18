//! Drill save/load
//!
//! Features:
//! - Versioned JSON envelope around the drill library
//! - Typed errors for decode, version and storage failures

pub mod envelope;
pub mod error;

pub use envelope::{Envelope, FORMAT_VERSION};
pub use error::DrillError;
