/// Handle to a live sprite instance in a [`SpriteCache`](crate::SpriteCache).
///
/// `index` is the lookup-table slot. It stays the same for the lifetime of
/// the instance, no matter where the instance currently sits in the dense
/// cell array. `generation` is bumped every time the slot is released, so a
/// handle to a destroyed sprite never resolves to whatever reuses its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl SpriteId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Lookup-table slot this handle points at.
    pub fn index(self) -> u32 {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

/// Index of a sprite definition inside an [`Atlas`](crate::Atlas).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DefinitionId(pub u32);

/// Index of an animation inside an [`Atlas`](crate::Atlas).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AnimationId(pub u32);

/// Opaque handle to the layered texture backing an atlas.
/// Created and owned by the GPU back end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureId(pub u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_with_same_slot_differ_by_generation() {
        let a = SpriteId::new(3, 0);
        let b = SpriteId::new(3, 1);
        assert_eq!(a.index(), b.index());
        assert_ne!(a, b);
    }
}
