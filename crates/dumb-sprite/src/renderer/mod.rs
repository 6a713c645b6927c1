pub mod camera;
pub mod cell;
pub mod traits;

pub use traits::SpriteBackend;
