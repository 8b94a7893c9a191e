use crate::decompose::background::resolve_background;
use crate::decompose::item::ExportSlide;
use crate::decompose::walker::{EXPORT_SCALE, rasterize_pending, walk_frame};
use crate::export::progress::{ExportEvent, ExportPhase, Progress, ProgressSink};
use crate::foundation::cancel::CancelToken;
use crate::foundation::core::PixelSize;
use crate::foundation::error::{ExportError, ExportResult};
use crate::scene::host::{DocumentHost, require_node};
use crate::scene::node::{NodeId, NodeKind};

/// Pixels per document inch (CSS reference pixel), used by serializers for
/// unit conversion.
pub const PX_PER_INCH: f64 = 96.0;
/// Horizontal text placement calibration applied by serializers, in pixels.
pub const TEXT_NUDGE_X_PX: f64 = -2.0;
/// Vertical text placement calibration applied by serializers, in pixels.
pub const TEXT_NUDGE_Y_PX: f64 = -2.0;
/// Extra text box height applied by serializers, in pixels.
pub const TEXT_HEIGHT_PAD_PX: f64 = 4.0;

/// Convert pixels to document inches at 96 dpi.
pub fn px_to_inches(px: f64) -> f64 {
    px / PX_PER_INCH
}

/// Target document container. The decomposition itself is identical for both;
/// only the default filename extension differs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DocumentKind {
    /// OOXML presentation.
    #[default]
    Pptx,
    /// Portable document.
    Pdf,
}

impl DocumentKind {
    /// Default filename extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pptx => "pptx",
            Self::Pdf => "pdf",
        }
    }
}

/// Batch export options.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ExportOptions {
    /// Explicit output filename. When absent, derived from the first frame's
    /// name plus the document extension.
    pub filename: Option<String>,
    /// Target document container.
    pub document: DocumentKind,
}

/// Uniform letterbox transform placing one slide on the shared canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SlidePlacement {
    /// Uniform scale: `min(canvas_w / frame_w, canvas_h / frame_h)`.
    pub scale: f64,
    /// Horizontal centering offset in canvas pixels.
    pub offset_x: f64,
    /// Vertical centering offset in canvas pixels.
    pub offset_y: f64,
}

/// Complete batch payload handed to a serializer.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ExportBatch {
    /// Output filename.
    pub filename: String,
    /// Shared canvas: maximum width and height over all frames.
    pub canvas: PixelSize,
    /// Decomposed slides, in selection order.
    pub slides: Vec<ExportSlide>,
    /// Letterbox placement per slide, parallel to `slides`.
    pub placements: Vec<SlidePlacement>,
}

impl ExportBatch {
    /// Serialize the whole payload as JSON, the interchange format consumed
    /// by out-of-process PPTX/PDF serializers.
    pub fn to_json(&self) -> ExportResult<String> {
        Ok(serde_json::to_string(self).map_err(anyhow::Error::new)?)
    }
}

/// Decompose a single frame into a complete slide: walk, capture queue,
/// background.
#[tracing::instrument(skip(host, cancel))]
pub fn decompose_frame<H: DocumentHost + ?Sized>(
    host: &mut H,
    frame_id: NodeId,
    cancel: &CancelToken,
) -> ExportResult<ExportSlide> {
    let frame = require_node(&*host, frame_id)?;
    let (name, width, height) = (frame.name.clone(), frame.width, frame.height);

    let walk = walk_frame(&*host, frame_id, cancel)?;
    let mut items = walk.items;
    items.extend(rasterize_pending(host, &walk.pending, cancel)?);
    let background = resolve_background(host, frame_id, &walk.to_hide, cancel)?;

    Ok(ExportSlide {
        name,
        width,
        height,
        scale: EXPORT_SCALE,
        background,
        items,
    })
}

/// Export a batch of frames, sequentially, emitting progress and exactly one
/// terminal event to `sink`.
///
/// Frames are fully processed one at a time (walk, captures, background with
/// its hide/restore transaction) before the next begins, so one frame's hidden
/// set can never bleed into another's capture. Cancellation unwinds with a
/// distinct `Cancelled` terminal event and produces no payload.
#[tracing::instrument(skip(host, frame_ids, options, cancel, sink))]
pub fn export_batch<H: DocumentHost + ?Sized>(
    host: &mut H,
    frame_ids: &[NodeId],
    options: &ExportOptions,
    cancel: &CancelToken,
    sink: &mut dyn ProgressSink,
) -> ExportResult<ExportBatch> {
    let result = run_batch(host, frame_ids, options, cancel, sink);
    match &result {
        Ok(batch) => sink.emit(ExportEvent::Done {
            slide_count: batch.slides.len(),
        }),
        Err(e) if e.is_cancelled() => sink.emit(ExportEvent::Cancelled),
        Err(e) => sink.emit(ExportEvent::Error {
            message: e.to_string(),
        }),
    }
    result
}

fn run_batch<H: DocumentHost + ?Sized>(
    host: &mut H,
    frame_ids: &[NodeId],
    options: &ExportOptions,
    cancel: &CancelToken,
    sink: &mut dyn ProgressSink,
) -> ExportResult<ExportBatch> {
    validate_selection(&*host, frame_ids)?;

    let total = frame_ids.len();
    let mut slides = Vec::with_capacity(total);

    for (index, &frame_id) in frame_ids.iter().enumerate() {
        cancel.checkpoint()?;
        let current = index + 1;

        let frame = require_node(&*host, frame_id)?;
        let (name, width, height) = (frame.name.clone(), frame.width, frame.height);

        emit_progress(sink, ExportPhase::Scanning, current, total, Some(name.clone()));
        let walk = walk_frame(&*host, frame_id, cancel)?;

        emit_progress(
            sink,
            ExportPhase::Masks,
            current,
            total,
            Some(format!("{} mask pairs", walk.mask_pair_count())),
        );

        emit_progress(
            sink,
            ExportPhase::Rasterizing,
            current,
            total,
            Some(format!("{} captures", walk.pending.len())),
        );
        let mut items = walk.items;
        items.extend(rasterize_pending(host, &walk.pending, cancel)?);

        emit_progress(sink, ExportPhase::Background, current, total, Some(name.clone()));
        let background = resolve_background(host, frame_id, &walk.to_hide, cancel)?;

        // A slide joins the batch only once background and items are final.
        slides.push(ExportSlide {
            name,
            width,
            height,
            scale: EXPORT_SCALE,
            background,
            items,
        });
    }

    cancel.checkpoint()?;
    let canvas = shared_canvas(&slides);
    let placements = slides
        .iter()
        .map(|s| letterbox_placement(canvas, s))
        .collect();

    Ok(ExportBatch {
        filename: resolve_filename(options, &slides),
        canvas,
        slides,
        placements,
    })
}

fn validate_selection<H: DocumentHost + ?Sized>(
    host: &H,
    frame_ids: &[NodeId],
) -> ExportResult<()> {
    if frame_ids.is_empty() {
        return Err(ExportError::selection("no frame selected"));
    }
    for &id in frame_ids {
        let node = host
            .node(id)
            .ok_or_else(|| ExportError::selection(format!("selected node {} not found", id.0)))?;
        if node.kind != NodeKind::Frame {
            return Err(ExportError::selection(format!(
                "selected node {} is not a frame",
                id.0
            )));
        }
        if !node.visible {
            return Err(ExportError::selection(format!(
                "selected frame {} is hidden",
                id.0
            )));
        }
    }
    Ok(())
}

/// Shared canvas size: the maximum width and height across all slides.
pub fn shared_canvas(slides: &[ExportSlide]) -> PixelSize {
    let mut canvas = PixelSize {
        width: 0.0,
        height: 0.0,
    };
    for slide in slides {
        canvas.width = canvas.width.max(slide.width);
        canvas.height = canvas.height.max(slide.height);
    }
    canvas
}

/// Uniform letterbox placement of one slide on the shared canvas: scale to
/// fit without distortion, centered both ways.
pub fn letterbox_placement(canvas: PixelSize, slide: &ExportSlide) -> SlidePlacement {
    if slide.width <= 0.0 || slide.height <= 0.0 {
        return SlidePlacement {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        };
    }
    let scale = (canvas.width / slide.width).min(canvas.height / slide.height);
    SlidePlacement {
        scale,
        offset_x: (canvas.width - slide.width * scale) / 2.0,
        offset_y: (canvas.height - slide.height * scale) / 2.0,
    }
}

fn resolve_filename(options: &ExportOptions, slides: &[ExportSlide]) -> String {
    if let Some(name) = &options.filename {
        return name.clone();
    }
    let stem = slides
        .first()
        .map(|s| s.name.trim())
        .filter(|n| !n.is_empty())
        .unwrap_or("export");
    format!("{stem}.{}", options.document.extension())
}

fn emit_progress(
    sink: &mut dyn ProgressSink,
    phase: ExportPhase,
    current: usize,
    total: usize,
    label: Option<String>,
) {
    tracing::debug!(?phase, current, total, "export phase");
    sink.emit(ExportEvent::Progress(Progress {
        phase,
        current,
        total,
        label,
    }));
}

#[cfg(test)]
#[path = "../../tests/unit/export/batch.rs"]
mod tests;
