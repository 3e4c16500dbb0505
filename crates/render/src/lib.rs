//! GPU resource records for a multi-pass rasterizer (color, label, depth).
//!
//! # Invariants
//! - A `GeometryRecord` is fully defined or fully undefined, never partial.
//! - An `InstanceRecord` exists only with a valid shader id for every pass.
//! - Per-pass data is a dense array indexed by `RenderPass`.
//!
//! This crate stores and validates handles issued by the GPU context; it never
//! calls the driver. All mutation and drawing against one set of tables must
//! be serialized on the thread that owns that context.

mod error;
mod geometry;
mod instance;
mod pass;
mod shader;
mod tables;

pub use error::RenderError;
pub use geometry::{GeometryRecord, GlHandle, MeshUpload, POSITION_NORMAL_FLOATS, TEX_COORD_FLOATS};
pub use instance::InstanceRecord;
pub use pass::{PerPass, RenderPass};
pub use shader::{ShaderBinding, ShaderId, UniformValue};
pub use tables::{DrawItem, RenderTables};

pub fn crate_info() -> &'static str {
    "percept-render v0.1.0"
}
