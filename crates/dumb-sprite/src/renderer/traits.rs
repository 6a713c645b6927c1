//! Contract for GPU back ends.
//!
//! The engine never touches a graphics API itself. A back end owns the
//! pipeline, the atlas texture and a vertex buffer laid out as described in
//! [`crate::bridge::protocol`]; each frame it receives the sorted cells and a
//! view uniform and draws them as one instanced call.

use super::camera::ViewUniform;
use super::cell::Cell;

pub trait SpriteBackend {
    /// Copy `cells` into the instance buffer, starting at instance 0.
    fn upload(&mut self, cells: &[Cell]);

    /// Draw the first `count` uploaded instances with the given view.
    fn draw(&mut self, count: u32, view: &ViewUniform);
}

/// Backend that records what it was asked to do. Used by tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingBackend {
    pub uploaded: Vec<Cell>,
    pub uploads: usize,
    pub draws: Vec<(u32, ViewUniform)>,
}

#[cfg(test)]
impl SpriteBackend for RecordingBackend {
    fn upload(&mut self, cells: &[Cell]) {
        self.uploaded.clear();
        self.uploaded.extend_from_slice(cells);
        self.uploads += 1;
    }

    fn draw(&mut self, count: u32, view: &ViewUniform) {
        self.draws.push((count, *view));
    }
}
