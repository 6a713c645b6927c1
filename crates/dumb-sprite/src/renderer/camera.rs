use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

use crate::api::config::EngineConfig;

/// Smallest accepted zoom factor.
const MIN_SCALE: f32 = 1.0e-4;

/// Orthographic 2D view over the sprite world.
/// Screen space has its origin at the top-left corner and Y pointing down;
/// world space follows the same orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// World position shown at the center of the screen.
    pub center: Vec2,
    /// Screen width in pixels.
    pub width: f32,
    /// Screen height in pixels.
    pub height: f32,
    /// Screen pixels per world unit.
    pub scale: f32,
}

/// GPU-side uniform data for the view.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ViewUniform {
    pub projection: [[f32; 4]; 4],
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl Viewport {
    /// View of `width` x `height` pixels centered on the world origin.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            center: Vec2::ZERO,
            width,
            height,
            scale: 1.0,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        let mut view = Self::new(config.viewport_width, config.viewport_height);
        view.scale = config.viewport_scale.max(MIN_SCALE);
        view
    }

    pub fn set(&mut self, center: Vec2, width: f32, height: f32, scale: f32) {
        self.center = center;
        self.width = width;
        self.height = height;
        self.scale = scale.max(MIN_SCALE);
    }

    /// Screen size in pixels.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Visible area in world units.
    pub fn world_size(&self) -> Vec2 {
        self.size() / self.scale
    }

    /// Move the view by a world-space offset.
    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    /// Move the view by a screen-space offset, e.g. a mouse drag.
    pub fn translate_pixels(&mut self, delta: Vec2) {
        self.center += delta / self.scale;
    }

    /// Change the zoom factor, keeping the world point under `pixel` fixed.
    pub fn zoom_at(&mut self, pixel: Vec2, scale: f32) {
        let anchor = self.screen_to_world(pixel);
        self.scale = scale.max(MIN_SCALE);
        self.center = anchor - (pixel - self.size() * 0.5) / self.scale;
    }

    pub fn screen_to_world(&self, pixel: Vec2) -> Vec2 {
        self.center + (pixel - self.size() * 0.5) / self.scale
    }

    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        (point - self.center) * self.scale + self.size() * 0.5
    }

    /// Orthographic projection, Y-down, Z in [0, 1].
    pub fn projection_matrix(&self) -> Mat4 {
        let half = self.world_size() * 0.5;
        let left = self.center.x - half.x;
        let right = self.center.x + half.x;
        let top = self.center.y - half.y;
        let bottom = self.center.y + half.y;
        Mat4::orthographic_rh(left, right, bottom, top, 0.0, 1.0)
    }

    pub fn uniform(&self) -> ViewUniform {
        ViewUniform {
            projection: self.projection_matrix().to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).abs().max_element() < 1e-3
    }

    fn clip(view: &Viewport, world: Vec2) -> Vec2 {
        let p = view.projection_matrix() * Vec4::new(world.x, world.y, 0.0, 1.0);
        Vec2::new(p.x, p.y)
    }

    #[test]
    fn projection_is_y_down() {
        let view = Viewport::new(800.0, 600.0);
        // Top of the world (negative y) maps to the top of clip space.
        assert!(close(clip(&view, Vec2::new(-400.0, -300.0)), Vec2::new(-1.0, 1.0)));
        assert!(close(clip(&view, Vec2::new(400.0, 300.0)), Vec2::new(1.0, -1.0)));
        assert!(close(clip(&view, Vec2::ZERO), Vec2::ZERO));
    }

    #[test]
    fn projection_follows_center_and_scale() {
        let mut view = Viewport::new(100.0, 100.0);
        view.set(Vec2::new(50.0, 50.0), 100.0, 100.0, 2.0);
        // 2x zoom shows 50 world units.
        assert!(close(clip(&view, Vec2::new(75.0, 50.0)), Vec2::new(1.0, 0.0)));
        assert!(close(clip(&view, Vec2::new(50.0, 25.0)), Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn translate_pixels_accounts_for_scale() {
        let mut view = Viewport::new(100.0, 100.0);
        view.scale = 4.0;
        view.translate_pixels(Vec2::new(8.0, -4.0));
        assert!(close(view.center, Vec2::new(2.0, -1.0)));
        view.translate(Vec2::new(1.0, 1.0));
        assert!(close(view.center, Vec2::new(3.0, 0.0)));
    }

    #[test]
    fn zoom_keeps_point_under_cursor() {
        let mut view = Viewport::new(800.0, 600.0);
        let cursor = Vec2::new(600.0, 150.0);
        let before = view.screen_to_world(cursor);
        view.zoom_at(cursor, 3.0);
        assert!(close(view.screen_to_world(cursor), before));
        assert_eq!(view.scale, 3.0);
        assert!(close(view.world_to_screen(before), cursor));
    }

    #[test]
    fn screen_center_is_view_center() {
        let mut view = Viewport::new(640.0, 480.0);
        view.center = Vec2::new(10.0, 20.0);
        assert!(close(view.screen_to_world(Vec2::new(320.0, 240.0)), view.center));
    }

    #[test]
    fn scale_is_clamped_positive() {
        let mut view = Viewport::new(10.0, 10.0);
        view.zoom_at(Vec2::ZERO, 0.0);
        assert!(view.scale > 0.0);
        assert!(view.projection_matrix().is_finite());
    }

    #[test]
    fn from_config_uses_viewport_settings() {
        let config = EngineConfig {
            viewport_width: 320.0,
            viewport_height: 200.0,
            viewport_scale: 2.0,
            ..Default::default()
        };
        let view = Viewport::from_config(&config);
        assert_eq!(view.size(), Vec2::new(320.0, 200.0));
        assert_eq!(view.world_size(), Vec2::new(160.0, 100.0));
    }

    #[test]
    fn uniform_is_column_major() {
        let view = Viewport::new(200.0, 100.0);
        let uniform = view.uniform();
        assert_eq!(uniform.projection, view.projection_matrix().to_cols_array_2d());
        assert_eq!(bytemuck::bytes_of(&uniform).len(), 64);
    }
}
