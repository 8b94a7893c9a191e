//! Scene decomposition: export item model, mask-pair extraction, the frame
//! walker, and the background compositor.

/// Clean-background resolution (smart color or hide/capture/restore).
pub mod background;
/// Export item and slide data model.
pub mod item;
/// Mask+image pair detection and crop math.
pub mod mask;
/// Pre-order frame walker and deferred capture queue.
pub mod walker;
