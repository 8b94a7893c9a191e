//! Framedeck decomposes a design-tool frame into editable slide primitives.
//!
//! The engine walks a retained scene graph and classifies every node into
//! "safely re-creatable as a native vector/text primitive" versus "must be
//! rasterized", extracts mask/crop relationships, computes a clean background
//! with all overlay content hidden, and assigns a stable z-order — without
//! ever corrupting the live document being walked: every visibility flip is
//! reverted on success, failure, and cancellation alike.
//!
//! # Pipeline overview
//!
//! 1. **Walk**: [`walk_frame`] classifies nodes and emits text/shape items plus
//!    a deferred capture queue (what must become a bitmap, at which z).
//! 2. **Capture**: [`rasterize_pending`] runs the queue against the host
//!    rasterizer; single-node failures are dropped, not fatal.
//! 3. **Background**: [`resolve_background`] derives a flat "smart" color or
//!    performs the hide/capture/restore transaction.
//! 4. **Batch**: [`export_batch`] sequences frames, reports progress, and
//!    computes the shared canvas with per-slide letterboxing.
//!
//! The output ([`ExportBatch`] of [`ExportSlide`]s) is a pure data contract:
//! downstream PPTX/PDF serializers consume it without feeding anything back.
//!
//! Key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Restore-always**: the hide/restore visibility transaction runs its
//!   restore on every exit path, including cancellation.
//! - **Strictly sequential**: one frame fully completes (including background
//!   capture and restore) before the next begins; visibility is shared mutable
//!   state on the live document and is never touched concurrently.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod classify;
mod decompose;
mod export;
mod extract;
mod foundation;
mod scene;

pub use classify::safety::{
    GRADIENT_CONTAINER_MAX, GRADIENT_RECT_MAX, MASK_RADIUS_EPS,
    NEAR_FULL_COVERAGE, NEAR_FULL_ORIGIN_FRAC, ROTATION_EPS, SMALL_OVERLAY_MAX_PX,
    has_text_descendant, is_effectively_unrotated, is_gradient_container_candidate,
    is_gradient_rect_candidate, is_near_full_frame, is_raster_overlay_candidate,
    is_safe_container_background, is_safe_editable_shape, is_safe_line,
};
pub use decompose::background::{resolve_background, smart_background};
pub use decompose::item::{
    CropRect, ExportItem, ExportSlide, MaskedImageItem, RasterItem, ShapeItem, ShapeKind,
    ShapeStroke, SlideBackground, TextItem,
};
pub use decompose::mask::{MaskPair, MaskPairKind, crop_rect, detect_mask_pair};
pub use decompose::walker::{
    CaptureMode, EXPORT_SCALE, PendingCapture, WalkOutput, rasterize_pending, walk_frame,
};
pub use export::batch::{
    DocumentKind, ExportBatch, ExportOptions, PX_PER_INCH, SlidePlacement, TEXT_HEIGHT_PAD_PX,
    TEXT_NUDGE_X_PX, TEXT_NUDGE_Y_PX, decompose_frame, export_batch, letterbox_placement,
    px_to_inches, shared_canvas,
};
pub use export::progress::{
    ExportEvent, ExportPhase, MemoryProgress, NullProgress, Progress, ProgressSink,
};
pub use extract::geometry::bounds_relative_to;
pub use extract::paint::{SolidFill, SolidStroke, solid_fill, solid_stroke};
pub use extract::text::{
    FALLBACK_FONT_FAMILY, FALLBACK_FONT_SIZE, FALLBACK_TEXT_COLOR, TextSample, line_height_px,
    sample_first_run,
};
pub use foundation::cancel::CancelToken;
pub use foundation::core::{Bounds, Color, PixelSize};
pub use foundation::error::{ExportError, ExportResult};
pub use scene::host::{DocumentHost, RasterOptions};
pub use scene::memory::MemoryDocument;
pub use scene::node::{
    Effect, EffectList, LineHeight, NodeId, NodeKind, Paint, PaintList, SceneNode, TextAlign,
    TextBlock, TextRun,
};
pub use scene::visibility::with_hidden;
