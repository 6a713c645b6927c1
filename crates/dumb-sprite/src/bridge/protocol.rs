//! Vertex attribute layout of the sprite cell buffer.
//! Must stay in sync with the sprite vertex shader inputs.
//!
//! Layout of one cell (offsets in bytes):
//! ```text
//! [ 0] position       2 x f32
//! [ 8] offset         2 x f32
//! [16] size           2 x f32
//! [24] top_uv         2 x f32
//! [32] bottom_uv      2 x f32
//! [40] angle          1 x f32
//! [44] scale          1 x f32
//! [48] texture_layer  1 x u32
//! ```
//! The buffer is `count` cells packed back to back, drawn as one
//! instanced call.

/// Layout version. Bump whenever [`CELL_ATTRIBUTES`] changes.
pub const PROTOCOL_VERSION: u32 = 1;

/// Bytes per cell (wire format).
pub const CELL_STRIDE_BYTES: usize = 52;

/// Scalar type of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Float32,
    Uint32,
}

/// One vertex attribute of the cell record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAttribute {
    /// Shader location, in declaration order.
    pub location: u32,
    pub name: &'static str,
    /// Number of scalar components.
    pub components: u32,
    pub kind: AttributeKind,
    /// Byte offset inside the cell.
    pub offset: usize,
}

impl CellAttribute {
    pub const fn size_bytes(&self) -> usize {
        self.components as usize * 4
    }
}

const fn attribute(
    location: u32,
    name: &'static str,
    components: u32,
    kind: AttributeKind,
    offset: usize,
) -> CellAttribute {
    CellAttribute { location, name, components, kind, offset }
}

pub const CELL_ATTRIBUTES: [CellAttribute; 8] = [
    attribute(0, "position", 2, AttributeKind::Float32, 0),
    attribute(1, "offset", 2, AttributeKind::Float32, 8),
    attribute(2, "size", 2, AttributeKind::Float32, 16),
    attribute(3, "top_uv", 2, AttributeKind::Float32, 24),
    attribute(4, "bottom_uv", 2, AttributeKind::Float32, 32),
    attribute(5, "angle", 1, AttributeKind::Float32, 40),
    attribute(6, "scale", 1, AttributeKind::Float32, 44),
    attribute(7, "texture_layer", 1, AttributeKind::Uint32, 48),
];

/// Bytes a buffer needs to hold `count` cells.
pub fn cell_buffer_bytes(count: usize) -> usize {
    count * CELL_STRIDE_BYTES
}
