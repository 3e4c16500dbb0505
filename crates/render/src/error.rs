use percept_common::ObjectId;

use crate::RenderPass;

/// Invariant violations raised by the render records and tables.
///
/// Every variant is a caller-contract violation. The operation that raised it
/// produced nothing; there is no partially-built record to clean up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("index buffer size must be non-negative, got {0}")]
    NegativeIndexCount(i32),
    #[error("vertex count must be non-negative, got {0}")]
    NegativeVertexCount(i32),
    #[error("{what} of {value} does not fit a 32-bit count")]
    CountTooLarge { what: &'static str, value: usize },
    #[error(
        "geometry handles must be all valid or all invalid \
         (vertex_array={vertex_array}, vertex_buffer={vertex_buffer}, index_buffer={index_buffer})"
    )]
    PartiallyDefined {
        vertex_array: u32,
        vertex_buffer: u32,
        index_buffer: u32,
    },
    #[error("{0}")]
    UndefinedGeometry(String),
    #[error(
        "vertex buffer holds {actual} floats but {vertex_count} vertices of stride {stride} need {expected}"
    )]
    VertexBufferSize {
        actual: usize,
        expected: usize,
        vertex_count: usize,
        stride: usize,
    },
    #[error("index count {0} does not describe whole triangles")]
    PartialTriangle(usize),
    #[error("{pass} shader binding does not carry a valid shader id")]
    InvalidShader { pass: RenderPass },
    #[error("geometry index {index} is out of range for a table of {len}")]
    GeometryOutOfRange { index: usize, len: usize },
    #[error("object {0:?} already has an instance")]
    DuplicateInstance(ObjectId),
    #[error("object {0:?} has no instance")]
    UnknownInstance(ObjectId),
}
