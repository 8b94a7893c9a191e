use std::collections::HashSet;

use crate::classify::safety::{
    is_gradient_container_candidate, is_gradient_rect_candidate, is_near_full_frame,
    is_raster_overlay_candidate, is_safe_container_background, is_safe_editable_shape,
    is_safe_line,
};
use crate::decompose::item::{CropRect, ExportItem, MaskedImageItem, RasterItem, ShapeItem, ShapeKind, ShapeStroke, TextItem};
use crate::decompose::mask::{MaskPairKind, detect_mask_pair};
use crate::extract::geometry::bounds_relative_to;
use crate::extract::paint::{solid_fill, solid_stroke};
use crate::extract::text::{line_height_px, sample_first_run};
use crate::foundation::cancel::CancelToken;
use crate::foundation::core::Bounds;
use crate::foundation::error::{ExportError, ExportResult};
use crate::scene::host::{DocumentHost, RasterOptions, require_node};
use crate::scene::node::{NodeId, NodeKind, SceneNode, TextAlign};
use crate::scene::visibility::with_hidden;

/// Fixed capture scale for every raster payload.
pub const EXPORT_SCALE: f64 = 2.0;

/// How a deferred capture is performed once the walk has completed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CaptureMode {
    /// Capture the node as-is.
    Overlay,
    /// Capture the node with its visible text descendants temporarily hidden,
    /// so the text can be emitted separately as editable items on top.
    GradientBackdrop,
    /// Capture the underlying image node of a rectangular mask pair; the crop
    /// window re-creates the clip.
    MaskedImage {
        /// Normalized crop window into the captured image.
        crop: CropRect,
    },
}

/// A rasterization queued during the walk. The z slot is reserved at detection
/// time so deferred captures keep their traversal-order paint position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingCapture {
    /// Node to capture.
    pub node: NodeId,
    /// Reserved paint-order index.
    pub z: u32,
    /// Frame-relative placement of the resulting item.
    pub bounds: Bounds,
    /// Capture strategy.
    pub mode: CaptureMode,
}

/// Result of walking one frame: emitted items, the full must-hide set for the
/// background capture, and the deferred rasterization queue.
#[derive(Clone, Debug, Default)]
pub struct WalkOutput {
    /// Items emitted directly by the walk (text and shapes).
    pub items: Vec<ExportItem>,
    /// Every node that must be hidden for the clean background capture.
    pub to_hide: Vec<NodeId>,
    /// Deferred captures, in traversal order.
    pub pending: Vec<PendingCapture>,
}

impl WalkOutput {
    /// Number of queued captures that came from mask-pair extraction.
    pub fn mask_pair_count(&self) -> usize {
        self.pending
            .iter()
            .filter(|p| matches!(p.mode, CaptureMode::MaskedImage { .. }))
            .count()
    }
}

/// Pre-order depth-first decomposition of one frame.
///
/// The frame node itself is never emitted as an item, only walked into. The
/// walk performs no host mutation and no rasterization; it only classifies,
/// emits vector items, and queues captures. Cancellation is checked at the
/// start of every node visit.
#[tracing::instrument(skip(host, cancel))]
pub fn walk_frame<H: DocumentHost + ?Sized>(
    host: &H,
    frame_id: NodeId,
    cancel: &CancelToken,
) -> ExportResult<WalkOutput> {
    let frame = require_node(host, frame_id)?;
    if frame.kind != NodeKind::Frame {
        return Err(ExportError::validation(format!(
            "node {} is not a frame",
            frame_id.0
        )));
    }

    let mut ctx = WalkCtx {
        host,
        frame,
        cancel,
        next_z: 0,
        consumed: HashSet::new(),
        out: WalkOutput::default(),
    };

    // The frame is a container too: its own first two children may form a
    // mask pair.
    ctx.extract_mask_pair(None, frame);
    for &child in &frame.children {
        visit(&mut ctx, child)?;
    }

    Ok(ctx.out)
}

struct WalkCtx<'a, H: ?Sized> {
    host: &'a H,
    frame: &'a SceneNode,
    cancel: &'a CancelToken,
    next_z: u32,
    consumed: HashSet<NodeId>,
    out: WalkOutput,
}

impl<'a, H: DocumentHost + ?Sized> WalkCtx<'a, H> {
    fn bump_z(&mut self) -> u32 {
        let z = self.next_z;
        self.next_z += 1;
        z
    }

    /// Convert a detected mask pair on `container`, marking the consumed nodes
    /// hidden.
    ///
    /// `container_id` is `None` for the frame root: the frame can host a
    /// rectangular crop pair, but is never flattened whole (that is the
    /// background capture's job), so a rounded pair at the root is left to
    /// generic classification.
    fn extract_mask_pair(&mut self, container_id: Option<NodeId>, container: &SceneNode) -> PairTaken {
        let Some(pair) = detect_mask_pair(self.host, container, self.frame) else {
            return PairTaken::No;
        };

        match pair.kind {
            MaskPairKind::RectangularCrop(crop) => {
                self.consumed.insert(pair.mask);
                self.consumed.insert(pair.image);
                self.out.to_hide.push(pair.mask);
                self.out.to_hide.push(pair.image);
                let z = self.bump_z();
                self.out.pending.push(PendingCapture {
                    node: pair.image,
                    z,
                    bounds: pair.mask_bounds,
                    mode: CaptureMode::MaskedImage { crop },
                });
                PairTaken::Cropped
            }
            MaskPairKind::RoundedFlatten => {
                let Some(id) = container_id else {
                    return PairTaken::No;
                };
                self.consumed.insert(pair.mask);
                self.consumed.insert(pair.image);
                self.consumed.insert(id);
                self.out.to_hide.push(id);
                let z = self.bump_z();
                let bounds = bounds_relative_to(container, self.frame);
                self.out.pending.push(PendingCapture {
                    node: id,
                    z,
                    bounds,
                    mode: CaptureMode::Overlay,
                });
                PairTaken::Flattened
            }
        }
    }
}

/// Outcome of mask-pair conversion on one container.
enum PairTaken {
    /// No pair detected (or a rounded pair at the frame root).
    No,
    /// A rectangular pair was converted to a cropped-image capture; the
    /// container itself keeps walking.
    Cropped,
    /// The whole container was queued as one flattened capture.
    Flattened,
}

fn visit<H: DocumentHost + ?Sized>(ctx: &mut WalkCtx<'_, H>, id: NodeId) -> ExportResult<()> {
    ctx.cancel.checkpoint()?;
    if ctx.consumed.contains(&id) {
        return Ok(());
    }
    let host = ctx.host;
    let frame = ctx.frame;
    let node = require_node(host, id)?;
    if !node.visible {
        return Ok(());
    }

    let bounds = bounds_relative_to(node, frame);

    if node.kind.is_container() {
        match ctx.extract_mask_pair(Some(id), node) {
            // Rounded mask: the whole container flattened to one capture.
            PairTaken::Flattened => return Ok(()),
            // Cropped pair already queued. Capturing the container now would
            // render the extracted image a second time, so only the remaining
            // children are walked.
            PairTaken::Cropped => {
                for &child in &node.children {
                    visit(ctx, child)?;
                }
                return Ok(());
            }
            PairTaken::No => {}
        }

        if is_safe_container_background(node) {
            let z = ctx.bump_z();
            if let Some(shape) = shape_item(node, bounds, ShapeKind::Rect, z) {
                ctx.out.items.push(ExportItem::Shape(shape));
                ctx.out.to_hide.push(id);
            }
            // A background shape does not stop recursion.
            for &child in &node.children {
                visit(ctx, child)?;
            }
            return Ok(());
        }

        if is_gradient_container_candidate(node) && !is_near_full_frame(bounds, frame) {
            let z = ctx.bump_z();
            ctx.out.pending.push(PendingCapture {
                node: id,
                z,
                bounds,
                mode: CaptureMode::GradientBackdrop,
            });
            ctx.out.to_hide.push(id);
            for &child in &node.children {
                visit(ctx, child)?;
            }
            return Ok(());
        }

        if is_raster_overlay_candidate(host, node, frame) {
            let z = ctx.bump_z();
            ctx.out.pending.push(PendingCapture {
                node: id,
                z,
                bounds,
                mode: CaptureMode::Overlay,
            });
            ctx.out.to_hide.push(id);
            return Ok(());
        }

        for &child in &node.children {
            visit(ctx, child)?;
        }
        return Ok(());
    }

    if node.kind == NodeKind::Rectangle
        && is_gradient_rect_candidate(node)
        && !is_near_full_frame(bounds, frame)
    {
        let z = ctx.bump_z();
        ctx.out.pending.push(PendingCapture {
            node: id,
            z,
            bounds,
            mode: CaptureMode::Overlay,
        });
        ctx.out.to_hide.push(id);
        return Ok(());
    }

    if node.kind == NodeKind::Text {
        let z = ctx.bump_z();
        ctx.out.items.push(ExportItem::Text(text_item(node, bounds, z)));
        ctx.out.to_hide.push(id);
        return Ok(());
    }

    let shape_kind = match node.kind {
        NodeKind::Rectangle => Some(ShapeKind::Rect),
        NodeKind::Ellipse => Some(ShapeKind::Ellipse),
        NodeKind::Line => Some(ShapeKind::Line),
        _ => None,
    };
    if let Some(kind) = shape_kind {
        let safe = match kind {
            ShapeKind::Line => is_safe_line(node),
            _ => is_safe_editable_shape(node),
        };
        if safe {
            let z = ctx.bump_z();
            if let Some(shape) = shape_item(node, bounds, kind, z) {
                ctx.out.items.push(ExportItem::Shape(shape));
                ctx.out.to_hide.push(id);
                return Ok(());
            }
        }
    }

    if is_raster_overlay_candidate(host, node, frame) {
        let z = ctx.bump_z();
        ctx.out.pending.push(PendingCapture {
            node: id,
            z,
            bounds,
            mode: CaptureMode::Overlay,
        });
        ctx.out.to_hide.push(id);
    }

    Ok(())
}

fn shape_item(node: &SceneNode, bounds: Bounds, kind: ShapeKind, z: u32) -> Option<ShapeItem> {
    let fill = solid_fill(node).map(|f| f.color.to_hex());
    let stroke = solid_stroke(node).map(|s| ShapeStroke {
        color: s.color.to_hex(),
        width: s.width,
    });
    ShapeItem::new(
        z,
        bounds,
        kind,
        fill,
        stroke,
        node.corner_radius,
        node.opacity.clamp(0.0, 1.0),
    )
}

fn text_item(node: &SceneNode, bounds: Bounds, z: u32) -> TextItem {
    let (sample, align, line_height) = match &node.text {
        Some(block) => {
            let sample = sample_first_run(block);
            let lh = line_height_px(block, sample.font_size);
            (sample, block.align, lh)
        }
        None => (Default::default(), TextAlign::default(), None),
    };

    TextItem {
        z,
        bounds,
        text: node
            .text
            .as_ref()
            .map(|b| b.characters.clone())
            .unwrap_or_default(),
        font_family: sample.font_family,
        font_size: sample.font_size,
        line_height_px: line_height,
        color: sample.color,
        align,
        opacity: node.opacity.clamp(0.0, 1.0),
        bold: sample.bold,
        italic: sample.italic,
    }
}

/// Run the deferred capture queue, in queue order.
///
/// Each entry is cancellation-checked before its host call. A single capture
/// failure is swallowed: the item is dropped from the output and the frame
/// continues. Entries whose geometry resolves to a non-positive width or
/// height are skipped outright.
pub fn rasterize_pending<H: DocumentHost + ?Sized>(
    host: &mut H,
    pending: &[PendingCapture],
    cancel: &CancelToken,
) -> ExportResult<Vec<ExportItem>> {
    let mut items = Vec::with_capacity(pending.len());
    let options = RasterOptions {
        scale: EXPORT_SCALE,
    };

    for capture in pending {
        cancel.checkpoint()?;
        if capture.bounds.is_degenerate() {
            continue;
        }

        let result = match capture.mode {
            CaptureMode::Overlay | CaptureMode::MaskedImage { .. } => {
                host.rasterize(capture.node, options)
            }
            CaptureMode::GradientBackdrop => {
                let mut text_ids = Vec::new();
                if let Some(node) = host.node(capture.node) {
                    collect_text_descendants(host, node, &mut text_ids);
                }
                with_hidden(host, &text_ids, |h| h.rasterize(capture.node, options))
            }
        };

        let png = match result {
            Ok(png) => png,
            Err(e) if e.is_cancelled() => return Err(e),
            Err(e) => {
                tracing::warn!(node = capture.node.0, error = %e, "dropping capture after rasterization failure");
                continue;
            }
        };

        items.push(match capture.mode {
            CaptureMode::MaskedImage { crop } => ExportItem::MaskedImage(MaskedImageItem {
                z: capture.z,
                bounds: capture.bounds,
                png,
                crop,
            }),
            _ => ExportItem::Raster(RasterItem {
                z: capture.z,
                bounds: capture.bounds,
                png,
            }),
        });
    }

    Ok(items)
}

fn collect_text_descendants<H: DocumentHost + ?Sized>(
    host: &H,
    node: &SceneNode,
    out: &mut Vec<NodeId>,
) {
    for &child_id in &node.children {
        let Some(child) = host.node(child_id) else {
            continue;
        };
        if !child.visible {
            continue;
        }
        if child.kind == NodeKind::Text {
            out.push(child_id);
        } else {
            collect_text_descendants(host, child, out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decompose/walker.rs"]
mod tests;
