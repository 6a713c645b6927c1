pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::config::EngineConfig;
pub use api::types::{AnimationId, DefinitionId, SpriteId, TextureId};
pub use assets::atlas::Atlas;
pub use assets::manifest::AtlasManifest;
pub use bridge::protocol::{CellAttribute, CELL_ATTRIBUTES, CELL_STRIDE_BYTES, PROTOCOL_VERSION};
pub use components::animation::{AnimationDef, AnimationFrame, Playback};
pub use components::sprite::{PixelRect, SpriteDefinition, SpriteState};
pub use core::cache::{Instance, SpriteCache};
pub use core::lookup::LookupTable;
pub use renderer::camera::{Viewport, ViewUniform};
pub use renderer::cell::Cell;
pub use renderer::traits::SpriteBackend;
pub use systems::animation::tick_animations;
pub use systems::render::submit_frame;
