pub mod atlas;
pub mod manifest;
