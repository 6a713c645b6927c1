use glam::{UVec2, Vec2};

/// Rectangle in atlas pixel space, measured from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn min(&self) -> UVec2 {
        UVec2::new(self.x, self.y)
    }

    pub fn max(&self) -> UVec2 {
        UVec2::new(
            self.x.saturating_add(self.width),
            self.y.saturating_add(self.height),
        )
    }
}

/// Immutable description of one image in the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpriteDefinition {
    /// Upper-left texture coordinate, normalized to [0, 1].
    pub top: Vec2,
    /// Lower-right texture coordinate, normalized to [0, 1].
    pub bottom: Vec2,
    /// Footprint in pixels.
    pub size: Vec2,
    /// Logical origin, relative to the top-left corner, in pixels.
    pub anchor: Vec2,
    /// Index into the layered texture array.
    pub layer: u32,
}

impl SpriteDefinition {
    /// Build a definition from a pixel rectangle of an atlas of `atlas_size` pixels.
    pub fn from_pixels(rect: PixelRect, anchor: Vec2, layer: u32, atlas_size: UVec2) -> Self {
        let extent = atlas_size.max(UVec2::ONE).as_vec2();
        Self {
            top: rect.min().as_vec2() / extent,
            bottom: rect.max().as_vec2() / extent,
            size: Vec2::new(rect.width as f32, rect.height as f32),
            anchor,
            layer,
        }
    }
}

/// Placement of a sprite instance: where it is, how it is turned and
/// sized, and which sort layer it lives in.
///
/// Sort layers are depths: bigger values are further back and are drawn
/// first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteState {
    /// Position in world space.
    pub position: Vec2,
    /// Rotation in radians.
    pub angle: f32,
    /// Uniform scale factor.
    pub scale: f32,
    /// Sort layer.
    pub layer: u32,
}

impl Default for SpriteState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            angle: 0.0,
            scale: 1.0,
            layer: 0,
        }
    }
}

impl SpriteState {
    /// State at `position` with no rotation, unit scale, layer 0.
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    // -- Builder pattern --

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_layer(mut self, layer: u32) -> Self {
        self.layer = layer;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_rect_is_normalized_by_atlas_size() {
        let def = SpriteDefinition::from_pixels(
            PixelRect::new(64, 32, 32, 16),
            Vec2::new(16.0, 8.0),
            2,
            UVec2::new(256, 128),
        );
        assert_eq!(def.top, Vec2::new(0.25, 0.25));
        assert_eq!(def.bottom, Vec2::new(0.375, 0.375));
        assert_eq!(def.size, Vec2::new(32.0, 16.0));
        assert_eq!(def.anchor, Vec2::new(16.0, 8.0));
        assert_eq!(def.layer, 2);
    }

    #[test]
    fn zero_sized_atlas_does_not_divide_by_zero() {
        let def = SpriteDefinition::from_pixels(PixelRect::new(0, 0, 4, 4), Vec2::ZERO, 0, UVec2::ZERO);
        assert!(def.bottom.is_finite());
    }

    #[test]
    fn state_defaults_match_create_defaults() {
        let state = SpriteState::at(Vec2::new(1.0, 2.0));
        assert_eq!(state.angle, 0.0);
        assert_eq!(state.scale, 1.0);
        assert_eq!(state.layer, 0);
    }

    #[test]
    fn pixel_rect_max_saturates() {
        let rect = PixelRect::new(u32::MAX, 0, 1, 1);
        assert_eq!(rect.max(), UVec2::new(u32::MAX, 1));
    }
}
