//! Shared types for the percept render core.
//!
//! # Invariants
//! - A `RigidTransform` never carries scale or shear; its rotation is unit length.
//! - Textual names and stable hashes of enumerations never depend on variant order.

mod error;
mod text;
mod types;

pub use error::PoseError;
pub use text::{Named, StableHash, stable_hash_of};
pub use types::{ObjectId, RigidTransform};

pub fn crate_info() -> &'static str {
    "percept-common v0.1.0"
}
