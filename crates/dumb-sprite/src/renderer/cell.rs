use bytemuck::{Pod, Zeroable};

use crate::components::sprite::SpriteDefinition;

/// Per-instance sprite record copied verbatim into the GPU vertex buffer.
/// Field order is the vertex attribute layout, see [`crate::bridge::protocol`].
/// 13 four-byte fields = 52 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Cell {
    /// Position in world space.
    pub pos_x: f32,
    pub pos_y: f32,
    /// Offset from position to the quad's top-left corner (negated anchor).
    pub offset_x: f32,
    pub offset_y: f32,
    /// Quad size in pixels.
    pub size_x: f32,
    pub size_y: f32,
    /// Upper-left texture coordinate.
    pub top_u: f32,
    pub top_v: f32,
    /// Lower-right texture coordinate.
    pub bottom_u: f32,
    pub bottom_v: f32,
    /// Rotation in radians.
    pub angle: f32,
    /// Uniform scale factor.
    pub scale: f32,
    /// Layer of the texture array holding the image.
    pub texture_layer: u32,
}

impl Cell {
    pub const STRIDE_BYTES: usize = 52;

    /// Overwrite the image-dependent fields from a definition.
    /// `None` clears them, which leaves an invisible zero-sized quad.
    pub fn apply_definition(&mut self, definition: Option<&SpriteDefinition>) {
        let def = definition.copied().unwrap_or_default();
        self.offset_x = -def.anchor.x;
        self.offset_y = -def.anchor.y;
        self.size_x = def.size.x;
        self.size_y = def.size.y;
        self.top_u = def.top.x;
        self.top_v = def.top.y;
        self.bottom_u = def.bottom.x;
        self.bottom_v = def.bottom.y;
        self.texture_layer = def.layer;
    }
}
