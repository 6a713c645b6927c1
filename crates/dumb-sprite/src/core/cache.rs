//! Sprite instance cache.
//!
//! Live sprites are stored in two parallel dense arrays, [`Instance`]
//! (CPU bookkeeping) and [`Cell`] (GPU record), always sorted by
//! non-increasing sort layer so the first `count()` cells can be drawn in one
//! contiguous call. Callers hold [`SpriteId`]s which go through the
//! [`LookupTable`] and survive any reshuffling of the dense arrays.
//!
//! Operations on stale or unknown handles are no-ops returning `false` /
//! `None`; nothing here panics on a bad handle.

use glam::Vec2;

use crate::api::config::EngineConfig;
use crate::api::types::{AnimationId, DefinitionId, SpriteId};
use crate::assets::atlas::Atlas;
use crate::components::animation::Playback;
use crate::components::sprite::SpriteState;
use crate::core::lookup::LookupTable;
use crate::renderer::cell::Cell;

/// CPU-side record, parallel to the cell at the same dense index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instance {
    /// Definition currently displayed. `None` if it was not found in the atlas.
    pub definition: Option<DefinitionId>,
    /// Sort layer.
    pub layer: u32,
    /// Lookup slot pointing at this instance.
    pub reverse: u32,
    pub playback: Option<Playback>,
}

/// Fixed-capacity store of sprite instances backed by an [`Atlas`].
///
/// Not thread safe; drive it from a single update/render loop.
pub struct SpriteCache<'a> {
    atlas: &'a Atlas,
    lookup: LookupTable,
    instances: Vec<Instance>,
    cells: Vec<Cell>,
}

impl<'a> SpriteCache<'a> {
    pub fn new(atlas: &'a Atlas, capacity: usize) -> Self {
        Self {
            atlas,
            lookup: LookupTable::new(capacity),
            instances: Vec::with_capacity(capacity),
            cells: Vec::with_capacity(capacity),
        }
    }

    pub fn from_config(atlas: &'a Atlas, config: &EngineConfig) -> Self {
        Self::new(atlas, config.max_sprites)
    }

    pub fn atlas(&self) -> &'a Atlas {
        self.atlas
    }

    // -- Lifecycle --

    /// Create a sprite instance. Returns `None` when the cache is full.
    ///
    /// An unknown `definition` is tolerated: the instance exists but has no
    /// image until [`set`](Self::set) gives it one.
    pub fn create(&mut self, definition: DefinitionId, state: SpriteState) -> Option<SpriteId> {
        let id = self.allocate()?;
        self.set(id, definition, state);
        log::trace!("created sprite {:?} ({} live)", id, self.count());
        Some(id)
    }

    /// Destroy a sprite instance. Returns `false` for stale handles.
    pub fn destroy(&mut self, id: SpriteId) -> bool {
        let Some(target) = self.lookup.release(id) else {
            return false;
        };

        // Keep the dense arrays contiguous: the last entry fills the hole.
        self.instances.swap_remove(target);
        self.cells.swap_remove(target);
        if target < self.instances.len() {
            let moved = self.instances[target].reverse;
            self.lookup.retarget(moved, target);
            self.settle(target);
        }

        log::trace!("destroyed sprite {:?} ({} live)", id, self.count());
        true
    }

    /// Destroy every instance.
    pub fn clear(&mut self) {
        let ids: Vec<SpriteId> = self.lookup.ids().collect();
        for id in ids {
            self.lookup.release(id);
        }
        self.instances.clear();
        self.cells.clear();
    }

    // -- Mutation --

    /// Replace definition and placement of a sprite, moving it to its sorted
    /// position if the layer changed. Stops any running animation.
    pub fn set(&mut self, id: SpriteId, definition: DefinitionId, state: SpriteState) -> bool {
        let Some(index) = self.lookup.target(id) else {
            return false;
        };
        let definition = self.resolve(definition);

        let instance = &mut self.instances[index];
        instance.definition = definition;
        instance.playback = None;
        instance.layer = state.layer;
        let index = self.settle(index);

        let atlas = self.atlas;
        let cell = &mut self.cells[index];
        cell.pos_x = state.position.x;
        cell.pos_y = state.position.y;
        cell.angle = state.angle;
        cell.scale = state.scale;
        cell.apply_definition(definition.and_then(|d| atlas.get(d)));
        true
    }

    pub fn move_to(&mut self, id: SpriteId, position: Vec2) -> bool {
        self.with_cell(id, |cell| {
            cell.pos_x = position.x;
            cell.pos_y = position.y;
        })
    }

    pub fn rotate(&mut self, id: SpriteId, angle: f32) -> bool {
        self.with_cell(id, |cell| cell.angle = angle)
    }

    pub fn scale(&mut self, id: SpriteId, factor: f32) -> bool {
        self.with_cell(id, |cell| cell.scale = factor)
    }

    /// Change the sort layer, keeping everything else.
    pub fn set_layer(&mut self, id: SpriteId, layer: u32) -> bool {
        let Some(index) = self.lookup.target(id) else {
            return false;
        };
        self.instances[index].layer = layer;
        self.settle(index);
        true
    }

    /// Overwrite `destination` with the state of `source`.
    /// `destination` keeps its own handle and is moved to its sorted
    /// position for the copied layer, so its dense index may change.
    pub fn copy(&mut self, destination: SpriteId, source: SpriteId) -> bool {
        let (Some(dst), Some(src)) = (self.lookup.target(destination), self.lookup.target(source))
        else {
            return false;
        };
        if dst == src {
            return true;
        }

        let reverse = self.instances[dst].reverse;
        self.instances[dst] = Instance {
            reverse,
            ..self.instances[src]
        };
        self.cells[dst] = self.cells[src];
        self.settle(dst);
        true
    }

    /// Create a new instance with the same state as `source`.
    pub fn clone_sprite(&mut self, source: SpriteId) -> Option<SpriteId> {
        if !self.lookup.contains(source) {
            return None;
        }
        let id = self.allocate()?;
        self.copy(id, source);
        Some(id)
    }

    // -- Animation --

    /// Start playing an atlas animation from its first frame.
    pub fn play(&mut self, id: SpriteId, animation: AnimationId, looping: bool) -> bool {
        let Some(index) = self.lookup.target(id) else {
            return false;
        };
        let Some(def) = self.atlas.animation(animation) else {
            log::warn!("animation {} not found in atlas", animation.0);
            return false;
        };

        let playback = Playback::new(animation, looping);
        let shown = playback.current(def).and_then(|d| self.resolve_quiet(d));
        self.instances[index].playback = Some(playback);
        self.instances[index].definition = shown;
        self.cells[index].apply_definition(shown.and_then(|d| self.atlas.get(d)));
        true
    }

    /// Detach the animation, freezing the current frame.
    pub fn stop(&mut self, id: SpriteId) -> bool {
        match self.lookup.target(id) {
            Some(index) => {
                self.instances[index].playback = None;
                true
            }
            None => false,
        }
    }

    pub fn is_playing(&self, id: SpriteId) -> bool {
        self.instance(id)
            .and_then(|i| i.playback)
            .is_some_and(|p| !p.finished)
    }

    // -- Queries --

    /// Number of live instances; also the length of [`cells`](Self::cells).
    pub fn count(&self) -> usize {
        self.cells.len()
    }

    pub fn capacity(&self) -> usize {
        self.lookup.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.count() == self.capacity()
    }

    pub fn contains(&self, id: SpriteId) -> bool {
        self.lookup.contains(id)
    }

    /// Current position of `id` in the dense arrays.
    pub fn dense_index(&self, id: SpriteId) -> Option<usize> {
        self.lookup.target(id)
    }

    pub fn cell(&self, id: SpriteId) -> Option<&Cell> {
        self.cells.get(self.lookup.target(id)?)
    }

    pub fn instance(&self, id: SpriteId) -> Option<&Instance> {
        self.instances.get(self.lookup.target(id)?)
    }

    pub fn layer(&self, id: SpriteId) -> Option<u32> {
        self.instance(id).map(|i| i.layer)
    }

    pub fn definition(&self, id: SpriteId) -> Option<DefinitionId> {
        self.instance(id).and_then(|i| i.definition)
    }

    /// Draw-ready cells, sorted by non-increasing layer.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// Cells as raw bytes, ready to be copied into a mapped vertex buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.cells)
    }

    /// Copy the leading cells into `dst`. Returns the number copied.
    pub fn copy_cells(&self, dst: &mut [Cell]) -> usize {
        let n = dst.len().min(self.cells.len());
        dst[..n].copy_from_slice(&self.cells[..n]);
        n
    }

    /// Live handles, most recently created first.
    pub fn ids(&self) -> impl Iterator<Item = SpriteId> + '_ {
        self.lookup.ids()
    }

    /// Handle of the instance at a dense index.
    pub fn id_at(&self, index: usize) -> Option<SpriteId> {
        let instance = self.instances.get(index)?;
        self.lookup.id_of_slot(instance.reverse)
    }

    pub(crate) fn parts_mut(&mut self) -> (&'a Atlas, &mut [Instance], &mut [Cell]) {
        (self.atlas, &mut self.instances, &mut self.cells)
    }

    // -- Internals --

    /// Reserve a slot and append a blank layer-0 entry at the end of the
    /// dense arrays. Layer 0 sorts last, so the arrays stay ordered.
    fn allocate(&mut self) -> Option<SpriteId> {
        let inside = self.instances.len();
        let Some(id) = self.lookup.allocate(inside) else {
            log::warn!("sprite cache full ({} instances)", self.capacity());
            return None;
        };
        self.instances.push(Instance {
            definition: None,
            layer: 0,
            reverse: id.index,
            playback: None,
        });
        self.cells.push(Cell::default());
        Some(id)
    }

    fn resolve(&self, definition: DefinitionId) -> Option<DefinitionId> {
        let found = self.resolve_quiet(definition);
        if found.is_none() {
            log::warn!("sprite definition {} not found in atlas", definition.0);
        }
        found
    }

    fn resolve_quiet(&self, definition: DefinitionId) -> Option<DefinitionId> {
        self.atlas.get(definition).map(|_| definition)
    }

    fn with_cell(&mut self, id: SpriteId, f: impl FnOnce(&mut Cell)) -> bool {
        match self.lookup.target(id) {
            Some(index) => {
                f(&mut self.cells[index]);
                true
            }
            None => false,
        }
    }

    /// Move the entry at `index` to its sorted position, assuming everything
    /// else is sorted. Equal layers are never swapped. Returns the new index.
    fn settle(&mut self, mut index: usize) -> usize {
        let layer = self.instances[index].layer;
        while index > 0 && self.instances[index - 1].layer < layer {
            self.swap(index - 1, index);
            index -= 1;
        }
        while index + 1 < self.instances.len() && self.instances[index + 1].layer > layer {
            self.swap(index, index + 1);
            index += 1;
        }
        index
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.instances.swap(a, b);
        self.cells.swap(a, b);
        self.lookup.retarget(self.instances[a].reverse, a);
        self.lookup.retarget(self.instances[b].reverse, b);
    }
}
