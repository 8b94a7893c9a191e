//! Pure geometry, paint, and text extractors.

/// Frame-relative bounding boxes.
pub mod geometry;
/// Solid fill/stroke detection.
pub mod paint;
/// First-run text style sampling.
pub mod text;
