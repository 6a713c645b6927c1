//! Animation system: advances every playing instance and swaps in the
//! definition of its current frame.

use crate::core::cache::SpriteCache;

/// Advance all animations by `dt` seconds.
///
/// Call this once per frame before rendering. Returns the number of
/// instances whose displayed frame changed.
pub fn tick_animations(cache: &mut SpriteCache, dt: f32) -> usize {
    let (atlas, instances, cells) = cache.parts_mut();
    let mut changed = 0;

    for (instance, cell) in instances.iter_mut().zip(cells.iter_mut()) {
        let Some(playback) = instance.playback.as_mut() else {
            continue;
        };
        let Some(def) = atlas.animation(playback.animation) else {
            continue;
        };
        if !playback.advance(def, dt) {
            continue;
        }

        let shown = playback
            .current(def)
            .and_then(|id| atlas.get(id).map(|d| (id, d)));
        instance.definition = shown.map(|(id, _)| id);
        cell.apply_definition(shown.map(|(_, d)| d));
        changed += 1;
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{AnimationId, DefinitionId};
    use crate::assets::atlas::Atlas;
    use crate::components::animation::AnimationDef;
    use crate::components::sprite::{PixelRect, SpriteState};
    use glam::{UVec2, Vec2};

    fn atlas() -> Atlas {
        let mut atlas = Atlas::new(UVec2::new(64, 16), 4, Vec::new());
        for i in 0..4 {
            atlas.define(DefinitionId(i), PixelRect::new(i * 16, 0, 16, 16), Vec2::ZERO, 0);
        }
        // 4 frames at 10 fps.
        atlas.define_animation(AnimationId(0), AnimationDef::strip(DefinitionId(0), 4, 10.0));
        atlas
    }

    #[test]
    fn tick_updates_cell_frame() {
        let atlas = atlas();
        let mut cache = SpriteCache::new(&atlas, 2);
        let id = cache.create(DefinitionId(0), SpriteState::default()).unwrap();
        cache.play(id, AnimationId(0), true);

        assert_eq!(tick_animations(&mut cache, 0.15), 1);
        assert_eq!(cache.definition(id), Some(DefinitionId(1)));
        assert_eq!(cache.cell(id).unwrap().top_u, 0.25);

        assert_eq!(tick_animations(&mut cache, 0.01), 0);
    }

    #[test]
    fn looping_animation_wraps() {
        let atlas = atlas();
        let mut cache = SpriteCache::new(&atlas, 2);
        let id = cache.create(DefinitionId(0), SpriteState::default()).unwrap();
        cache.play(id, AnimationId(0), true);

        tick_animations(&mut cache, 0.45);
        assert_eq!(cache.definition(id), Some(DefinitionId(0)));
        assert!(cache.is_playing(id));
    }

    #[test]
    fn one_shot_animation_holds_last_frame() {
        let atlas = atlas();
        let mut cache = SpriteCache::new(&atlas, 2);
        let id = cache.create(DefinitionId(0), SpriteState::default()).unwrap();
        cache.play(id, AnimationId(0), false);

        tick_animations(&mut cache, 1.0);
        assert_eq!(cache.definition(id), Some(DefinitionId(3)));
        assert!(!cache.is_playing(id));
        assert_eq!(tick_animations(&mut cache, 1.0), 0);
    }

    #[test]
    fn still_instances_are_untouched() {
        let atlas = atlas();
        let mut cache = SpriteCache::new(&atlas, 2);
        let id = cache.create(DefinitionId(2), SpriteState::default()).unwrap();
        let before = *cache.cell(id).unwrap();

        assert_eq!(tick_animations(&mut cache, 5.0), 0);
        assert_eq!(*cache.cell(id).unwrap(), before);
    }

    #[test]
    fn animation_follows_instance_through_reordering() {
        let atlas = atlas();
        let mut cache = SpriteCache::new(&atlas, 4);
        let a = cache.create(DefinitionId(0), SpriteState::default()).unwrap();
        let b = cache.create(DefinitionId(0), SpriteState::default()).unwrap();
        cache.play(a, AnimationId(0), true);
        cache.set_layer(a, 3);
        cache.destroy(b);

        tick_animations(&mut cache, 0.25);
        assert_eq!(cache.definition(a), Some(DefinitionId(2)));
    }
}
