use std::collections::HashMap;

use glam::{UVec2, Vec2};

use crate::api::types::{AnimationId, DefinitionId, TextureId};
use crate::assets::manifest::AtlasManifest;
use crate::components::animation::{AnimationDef, AnimationFrame};
use crate::components::sprite::{PixelRect, SpriteDefinition};

/// Sprite atlas: a fixed number of definition slots over a layered texture.
///
/// Definitions are written once per id and read many times. There is no
/// removal; redefining an id overwrites it.
#[derive(Debug, Clone)]
pub struct Atlas {
    definitions: Vec<Option<SpriteDefinition>>,
    animations: HashMap<AnimationId, AnimationDef>,
    /// Size of one texture page in pixels.
    size: UVec2,
    images: Vec<String>,
    texture: Option<TextureId>,
}

impl Atlas {
    /// Create an empty atlas with `capacity` definition slots.
    pub fn new(size: UVec2, capacity: usize, images: Vec<String>) -> Self {
        Self {
            definitions: vec![None; capacity],
            animations: HashMap::new(),
            size,
            images,
            texture: None,
        }
    }

    /// Attach the GPU texture created from `images`.
    pub fn with_texture(mut self, texture: TextureId) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Build an atlas from a parsed manifest.
    /// Entries whose id does not fit are logged and skipped.
    pub fn from_manifest(manifest: &AtlasManifest) -> Self {
        let mut atlas = Self::new(
            UVec2::new(manifest.width, manifest.height),
            manifest.definition_capacity(),
            manifest.images.clone(),
        );

        for desc in &manifest.sprites {
            let [x, y, w, h] = desc.rect;
            if desc.layer as usize >= manifest.images.len().max(1) {
                log::warn!(
                    "sprite {} uses texture layer {} but the atlas has {} image(s)",
                    desc.id,
                    desc.layer,
                    manifest.images.len()
                );
            }
            atlas.define(
                DefinitionId(desc.id),
                PixelRect::new(x, y, w, h),
                Vec2::from(desc.anchor),
                desc.layer,
            );
        }

        for desc in &manifest.animations {
            let frames = desc
                .frames
                .iter()
                .map(|f| AnimationFrame {
                    definition: DefinitionId(f.sprite),
                    duration: f.duration,
                })
                .collect();
            atlas.define_animation(AnimationId(desc.id), AnimationDef::new(frames));
        }

        log::info!(
            "atlas {}x{}: {} definition(s), {} animation(s)",
            manifest.width,
            manifest.height,
            atlas.len(),
            atlas.animations.len()
        );
        atlas
    }

    /// Parse a JSON manifest and build the atlas from it.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        AtlasManifest::from_json(json).map(|m| Self::from_manifest(&m))
    }

    /// Store a definition built from a pixel rectangle.
    /// Returns the stored definition, or `None` if `id` is out of range.
    pub fn define(
        &mut self,
        id: DefinitionId,
        rect: PixelRect,
        anchor: Vec2,
        layer: u32,
    ) -> Option<&SpriteDefinition> {
        let size = self.size;
        let capacity = self.definitions.len();
        let Some(slot) = self.definitions.get_mut(id.0 as usize) else {
            log::warn!("sprite definition {} out of range (capacity {})", id.0, capacity);
            return None;
        };
        *slot = Some(SpriteDefinition::from_pixels(rect, anchor, layer, size));
        slot.as_ref()
    }

    /// Look up a definition. `None` if out of range or never defined.
    pub fn get(&self, id: DefinitionId) -> Option<&SpriteDefinition> {
        self.definitions.get(id.0 as usize).and_then(Option::as_ref)
    }

    /// Register an animation. Frames naming undefined sprites are kept but
    /// logged; they render as empty quads.
    pub fn define_animation(&mut self, id: AnimationId, def: AnimationDef) {
        for frame in &def.frames {
            if self.get(frame.definition).is_none() {
                log::warn!(
                    "animation {} references undefined sprite {}",
                    id.0,
                    frame.definition.0
                );
            }
        }
        self.animations.insert(id, def);
    }

    pub fn animation(&self, id: AnimationId) -> Option<&AnimationDef> {
        self.animations.get(&id)
    }

    /// Number of definition slots.
    pub fn capacity(&self) -> usize {
        self.definitions.len()
    }

    /// Number of defined slots.
    pub fn len(&self) -> usize {
        self.definitions.iter().filter(|d| d.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    /// Iterate over defined slots.
    pub fn iter(&self) -> impl Iterator<Item = (DefinitionId, &SpriteDefinition)> {
        self.definitions
            .iter()
            .enumerate()
            .filter_map(|(i, d)| d.as_ref().map(|d| (DefinitionId(i as u32), d)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atlas() -> Atlas {
        Atlas::new(UVec2::new(128, 64), 4, vec!["page0.png".into()])
    }

    #[test]
    fn define_normalizes_and_stores() {
        let mut atlas = atlas();
        let def = *atlas
            .define(DefinitionId(1), PixelRect::new(32, 16, 32, 16), Vec2::new(4.0, 2.0), 0)
            .expect("in range");
        assert_eq!(def.top, Vec2::new(0.25, 0.25));
        assert_eq!(def.bottom, Vec2::new(0.5, 0.5));
        assert_eq!(atlas.get(DefinitionId(1)), Some(&def));
        assert_eq!(atlas.len(), 1);
    }

    #[test]
    fn define_out_of_range_is_rejected() {
        let mut atlas = atlas();
        assert!(atlas
            .define(DefinitionId(4), PixelRect::new(0, 0, 1, 1), Vec2::ZERO, 0)
            .is_none());
        assert!(atlas.is_empty());
    }

    #[test]
    fn get_unknown_returns_none() {
        let atlas = atlas();
        assert!(atlas.get(DefinitionId(0)).is_none());
        assert!(atlas.get(DefinitionId(99)).is_none());
    }

    #[test]
    fn redefine_overwrites() {
        let mut atlas = atlas();
        atlas.define(DefinitionId(0), PixelRect::new(0, 0, 8, 8), Vec2::ZERO, 0);
        atlas.define(DefinitionId(0), PixelRect::new(0, 0, 16, 16), Vec2::ZERO, 1);
        let def = atlas.get(DefinitionId(0)).unwrap();
        assert_eq!(def.size, Vec2::new(16.0, 16.0));
        assert_eq!(def.layer, 1);
    }

    #[test]
    fn loads_from_json() {
        let json = r#"{
            "width": 64, "height": 64,
            "images": ["a.png", "b.png"],
            "sprites": [
                { "id": 0, "rect": [0, 0, 16, 16], "anchor": [8, 8] },
                { "id": 1, "rect": [16, 0, 16, 16], "layer": 1 },
                { "id": 2, "rect": [32, 0, 16, 16] }
            ],
            "animations": [
                { "id": 0, "frames": [ { "sprite": 0 }, { "sprite": 1 }, { "sprite": 2 } ] }
            ]
        }"#;
        let atlas = Atlas::from_json(json).unwrap();
        assert_eq!(atlas.capacity(), 3);
        assert_eq!(atlas.len(), 3);
        assert_eq!(atlas.get(DefinitionId(0)).unwrap().anchor, Vec2::new(8.0, 8.0));
        assert_eq!(atlas.get(DefinitionId(1)).unwrap().layer, 1);
        assert_eq!(atlas.animation(AnimationId(0)).unwrap().frame_count(), 3);
        assert!(atlas.animation(AnimationId(1)).is_none());
        assert_eq!(atlas.images().len(), 2);
    }

    #[test]
    fn manifest_entries_beyond_capacity_are_skipped() {
        let json = r#"{
            "width": 64, "height": 64, "capacity": 1,
            "sprites": [
                { "id": 0, "rect": [0, 0, 16, 16] },
                { "id": 5, "rect": [16, 0, 16, 16] }
            ]
        }"#;
        let atlas = Atlas::from_json(json).unwrap();
        assert_eq!(atlas.len(), 1);
        assert!(atlas.get(DefinitionId(5)).is_none());
    }

    #[test]
    fn iter_skips_empty_slots() {
        let mut atlas = atlas();
        atlas.define(DefinitionId(2), PixelRect::new(0, 0, 8, 8), Vec2::ZERO, 0);
        let ids: Vec<_> = atlas.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![DefinitionId(2)]);
    }

    #[test]
    fn texture_handle_is_attached() {
        let atlas = atlas().with_texture(TextureId(7));
        assert_eq!(atlas.texture(), Some(TextureId(7)));
    }

    #[test]
    fn manifest_rect_at_u32_edge_does_not_overflow() {
        let json = r#"{
            "width": 64, "height": 64,
            "sprites": [ { "id": 0, "rect": [4294967295, 0, 1, 1] } ]
        }"#;
        let atlas = Atlas::from_json(json).unwrap();
        let def = atlas.get(DefinitionId(0)).unwrap();
        assert_eq!(def.size, Vec2::new(1.0, 1.0));
        assert_eq!(def.top.x, def.bottom.x);
    }
}
