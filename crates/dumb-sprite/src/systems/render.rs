use crate::core::cache::SpriteCache;
use crate::renderer::camera::Viewport;
use crate::renderer::traits::SpriteBackend;

/// Hand the live cells to `backend` and issue one instanced draw.
///
/// Cells are already sorted back to front, so no per-frame sorting happens
/// here. Nothing is drawn for an empty cache. Returns the instance count
/// drawn.
pub fn submit_frame<B: SpriteBackend + ?Sized>(
    cache: &SpriteCache,
    viewport: &Viewport,
    backend: &mut B,
) -> u32 {
    let cells = cache.cells();
    if cells.is_empty() {
        return 0;
    }

    let count = cells.len() as u32;
    backend.upload(cells);
    backend.draw(count, &viewport.uniform());
    log::trace!("submitted {} sprite(s)", count);
    count
}
