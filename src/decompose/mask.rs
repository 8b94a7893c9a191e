use crate::classify::safety::{MASK_RADIUS_EPS, is_effectively_unrotated};
use crate::decompose::item::CropRect;
use crate::extract::geometry::bounds_relative_to;
use crate::foundation::core::Bounds;
use crate::scene::host::DocumentHost;
use crate::scene::node::{NodeId, NodeKind, SceneNode};

/// How a detected mask pair is converted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MaskPairKind {
    /// Rectangular mask: express the clip as a crop of the source image.
    RectangularCrop(CropRect),
    /// Rounded mask: rounding cannot be a rectangular crop, so the whole
    /// container is captured pre-clipped by the host.
    RoundedFlatten,
}

/// A detected mask-rectangle + image-rectangle child pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaskPair {
    /// The clipping rectangle (flagged as mask).
    pub mask: NodeId,
    /// The image-filled content rectangle.
    pub image: NodeId,
    /// Frame-relative box of the mask (the visible window).
    pub mask_bounds: Bounds,
    /// Conversion strategy.
    pub kind: MaskPairKind,
}

/// Inspect a container's first two visible children for the mask+image
/// pattern: child one a rectangle flagged as mask, child two a plain rectangle
/// with an image fill, neither rotated nor carrying effects.
///
/// Runs before generic per-node classification so mask/image children are
/// never independently emitted as raw rectangles.
pub fn detect_mask_pair<H: DocumentHost + ?Sized>(
    host: &H,
    container: &SceneNode,
    frame: &SceneNode,
) -> Option<MaskPair> {
    if !container.kind.is_container() {
        return None;
    }

    let mut visible = container
        .children
        .iter()
        .filter_map(|&id| host.node(id).map(|n| (id, n)))
        .filter(|(_, n)| n.visible);
    let (mask_id, mask) = visible.next()?;
    let (image_id, image) = visible.next()?;

    if mask.kind != NodeKind::Rectangle || !mask.is_mask {
        return None;
    }
    if image.kind != NodeKind::Rectangle || image.is_mask {
        return None;
    }
    if !image.fills.has_image() {
        return None;
    }
    for node in [mask, image] {
        if !is_effectively_unrotated(node) || node.effects.has_any() {
            return None;
        }
    }

    let mask_bounds = bounds_relative_to(mask, frame);
    let image_bounds = bounds_relative_to(image, frame);
    if image_bounds.is_degenerate() || mask_bounds.is_degenerate() {
        return None;
    }

    let kind = if mask.corner_radius <= MASK_RADIUS_EPS {
        MaskPairKind::RectangularCrop(crop_rect(mask_bounds, image_bounds))
    } else {
        MaskPairKind::RoundedFlatten
    };

    Some(MaskPair {
        mask: mask_id,
        image: image_id,
        mask_bounds,
        kind,
    })
}

/// Intersect the mask's frame-relative box with the image's, expressed in the
/// image's own normalized space. The window is clamped so it never exceeds the
/// source image: `0 <= x, y` and `x + w <= 1`, `y + h <= 1`.
pub fn crop_rect(mask: Bounds, image: Bounds) -> CropRect {
    let x = ((mask.x - image.x) / image.w).clamp(0.0, 1.0);
    let y = ((mask.y - image.y) / image.h).clamp(0.0, 1.0);
    let mut w = (mask.w / image.w).clamp(0.0, 1.0);
    let mut h = (mask.h / image.h).clamp(0.0, 1.0);

    if x + w > 1.0 {
        w = 1.0 - x;
    }
    if y + h > 1.0 {
        h = 1.0 - y;
    }

    CropRect { x, y, w, h }
}

#[cfg(test)]
#[path = "../../tests/unit/decompose/mask.rs"]
mod tests;
