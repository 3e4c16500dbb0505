use crate::RenderError;

/// An object name in the GPU context (vertex array, buffer, ...).
pub type GlHandle = u32;

/// Floats per vertex for position and normal.
pub const POSITION_NORMAL_FLOATS: usize = 6;
/// Extra floats per vertex when texture coordinates are present.
pub const TEX_COORD_FLOATS: usize = 2;

/// One mesh resident on the GPU, described by the handles of its objects.
///
/// A record is either undefined (all three handles are
/// [`INVALID_HANDLE`](Self::INVALID_HANDLE), as produced by `Default`) or
/// defined (none of them is). Handles are only meaningful for the context
/// that issued them; this type cannot tell whether they still exist there.
///
/// Not checked here, and owed by whoever fills the buffers: the vertex array
/// references the current vertex buffer, the vertex buffer holds
/// `vertex_count` vertices, and `has_tex_coord` matches its contents.
/// [`GeometryRecord::from_upload`] checks the parts that upload metadata can
/// express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryRecord {
    vertex_array: GlHandle,
    vertex_buffer: GlHandle,
    index_buffer: GlHandle,
    index_count: u32,
    has_tex_coord: bool,
    vertex_count: u32,
}

impl Default for GeometryRecord {
    fn default() -> Self {
        Self {
            vertex_array: Self::INVALID_HANDLE,
            vertex_buffer: Self::INVALID_HANDLE,
            index_buffer: Self::INVALID_HANDLE,
            index_count: 0,
            has_tex_coord: false,
            vertex_count: 0,
        }
    }
}

impl GeometryRecord {
    /// Handle value that never names a live object.
    pub const INVALID_HANDLE: GlHandle = GlHandle::MAX;

    /// Builds a record from raw handles and counts.
    ///
    /// Fails if either count is negative, or if some but not all handles are
    /// [`INVALID_HANDLE`](Self::INVALID_HANDLE). When all handles are
    /// invalid the counts are dropped and the result equals `Default`.
    pub fn new(
        vertex_array: GlHandle,
        vertex_buffer: GlHandle,
        index_buffer: GlHandle,
        index_count: i32,
        has_tex_coord: bool,
        vertex_count: i32,
    ) -> Result<Self, RenderError> {
        let index_count =
            u32::try_from(index_count).map_err(|_| RenderError::NegativeIndexCount(index_count))?;
        let vertex_count = u32::try_from(vertex_count)
            .map_err(|_| RenderError::NegativeVertexCount(vertex_count))?;
        Self::build(
            vertex_array,
            vertex_buffer,
            index_buffer,
            index_count,
            has_tex_coord,
            vertex_count,
        )
    }

    /// Builds a defined record from the metadata of a completed upload.
    ///
    /// Checks what the upload can prove: all handles are valid, the vertex
    /// buffer length matches `vertex_count` at the layout's stride, and the
    /// index buffer holds whole triangles.
    pub fn from_upload(upload: &MeshUpload) -> Result<Self, RenderError> {
        let expected = upload
            .vertex_count
            .checked_mul(upload.stride())
            .ok_or(RenderError::CountTooLarge {
                what: "vertex count",
                value: upload.vertex_count,
            })?;
        if upload.vertex_buffer_len != expected {
            return Err(RenderError::VertexBufferSize {
                actual: upload.vertex_buffer_len,
                expected,
                vertex_count: upload.vertex_count,
                stride: upload.stride(),
            });
        }
        if upload.index_count % 3 != 0 {
            return Err(RenderError::PartialTriangle(upload.index_count));
        }
        let index_count = u32::try_from(upload.index_count).map_err(|_| RenderError::CountTooLarge {
            what: "index count",
            value: upload.index_count,
        })?;
        let vertex_count =
            u32::try_from(upload.vertex_count).map_err(|_| RenderError::CountTooLarge {
                what: "vertex count",
                value: upload.vertex_count,
            })?;
        let record = Self::build(
            upload.vertex_array,
            upload.vertex_buffer,
            upload.index_buffer,
            index_count,
            upload.has_tex_coord,
            vertex_count,
        )?;
        record.ensure_defined("uploaded mesh has invalid handles")?;
        Ok(record)
    }

    fn build(
        vertex_array: GlHandle,
        vertex_buffer: GlHandle,
        index_buffer: GlHandle,
        index_count: u32,
        has_tex_coord: bool,
        vertex_count: u32,
    ) -> Result<Self, RenderError> {
        let invalid = [vertex_array, vertex_buffer, index_buffer]
            .iter()
            .filter(|h| **h == Self::INVALID_HANDLE)
            .count();
        if invalid != 0 && invalid != 3 {
            return Err(RenderError::PartiallyDefined {
                vertex_array,
                vertex_buffer,
                index_buffer,
            });
        }
        if invalid == 3 {
            return Ok(Self::default());
        }
        Ok(Self {
            vertex_array,
            vertex_buffer,
            index_buffer,
            index_count,
            has_tex_coord,
            vertex_count,
        })
    }

    /// True if the handles have been set. Says nothing about whether the GPU
    /// context still owns them.
    pub fn is_defined(&self) -> bool {
        self.vertex_array != Self::INVALID_HANDLE
            && self.vertex_buffer != Self::INVALID_HANDLE
            && self.index_buffer != Self::INVALID_HANDLE
    }

    /// Fails with `message` if the record is undefined.
    pub fn ensure_defined(&self, message: &str) -> Result<(), RenderError> {
        if self.is_defined() {
            Ok(())
        } else {
            Err(RenderError::UndefinedGeometry(message.to_string()))
        }
    }

    pub fn vertex_array(&self) -> GlHandle {
        self.vertex_array
    }

    pub fn vertex_buffer(&self) -> GlHandle {
        self.vertex_buffer
    }

    pub fn index_buffer(&self) -> GlHandle {
        self.index_buffer
    }

    /// Number of indices in the index buffer.
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn triangle_count(&self) -> u32 {
        self.index_count / 3
    }

    /// True if the vertex buffer carries meaningful texture coordinates.
    pub fn has_tex_coord(&self) -> bool {
        self.has_tex_coord
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}

/// What the uploader knows after filling the GPU buffers for one mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshUpload {
    pub vertex_array: GlHandle,
    pub vertex_buffer: GlHandle,
    pub index_buffer: GlHandle,
    pub vertex_count: usize,
    /// Floats written to the vertex buffer.
    pub vertex_buffer_len: usize,
    pub index_count: usize,
    pub has_tex_coord: bool,
}

impl MeshUpload {
    /// Floats per vertex: position and normal, plus texture coordinates when present.
    pub fn stride(&self) -> usize {
        if self.has_tex_coord {
            POSITION_NORMAL_FLOATS + TEX_COORD_FLOATS
        } else {
            POSITION_NORMAL_FLOATS
        }
    }
}
