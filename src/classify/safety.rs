use crate::extract::geometry::bounds_relative_to;
use crate::extract::paint::{solid_fill, solid_stroke};
use crate::foundation::core::Bounds;
use crate::scene::host::DocumentHost;
use crate::scene::node::{NodeKind, SceneNode};

/// Rotation magnitudes below this are treated as "effectively zero".
pub const ROTATION_EPS: f64 = 0.01;
/// Upper bound (per dimension) for the "small node" raster-overlay heuristic.
pub const SMALL_OVERLAY_MAX_PX: f64 = 420.0;
/// A node covering at least this fraction of the frame per dimension is
/// considered near-full-frame.
pub const NEAR_FULL_COVERAGE: f64 = 0.95;
/// Near-full-frame origin tolerance, as a fraction of the frame dimension.
pub const NEAR_FULL_ORIGIN_FRAC: f64 = 0.03;
/// Size bound for gradient containers captured background-only.
pub const GRADIENT_CONTAINER_MAX: (f64, f64) = (1800.0, 1000.0);
/// Size bound for gradient rectangles captured whole.
pub const GRADIENT_RECT_MAX: (f64, f64) = (2200.0, 1400.0);
/// Mask corner radii at or below this are treated as rectangular.
pub const MASK_RADIUS_EPS: f64 = 0.5;

/// `true` when the node's rotation is effectively zero.
pub fn is_effectively_unrotated(node: &SceneNode) -> bool {
    node.rotation.abs() < ROTATION_EPS
}

/// A node is safe-editable as a rect/ellipse when it is unrotated, effect-free,
/// carries no image or gradient fill, its fill list is uniformly solid or
/// empty, and at least one of fill or stroke survives extraction.
pub fn is_safe_editable_shape(node: &SceneNode) -> bool {
    if !is_effectively_unrotated(node) || node.effects.has_any() {
        return false;
    }
    if node.fills.is_mixed() || node.fills.has_image() || node.fills.has_gradient() {
        return false;
    }
    solid_fill(node).is_some() || solid_stroke(node).is_some()
}

/// Safe-line predicate: unrotated, effect-free, with a solid stroke.
pub fn is_safe_line(node: &SceneNode) -> bool {
    is_effectively_unrotated(node) && !node.effects.has_any() && solid_stroke(node).is_some()
}

/// Container eligibility for emission as a flat background rectangle:
/// the safe-editable conditions plus a non-mixed stroke list.
pub fn is_safe_container_background(node: &SceneNode) -> bool {
    node.kind.is_container() && !node.strokes.is_mixed() && is_safe_editable_shape(node)
}

/// `true` when `bounds` nearly covers the whole frame: at least 95% of each
/// dimension, positioned within 3% of the frame origin. Such nodes are left to
/// the background capture instead of being rasterized as overlays, avoiding a
/// double render of full-bleed content.
pub fn is_near_full_frame(bounds: Bounds, frame: &SceneNode) -> bool {
    if frame.width <= 0.0 || frame.height <= 0.0 {
        return false;
    }
    bounds.w >= frame.width * NEAR_FULL_COVERAGE
        && bounds.h >= frame.height * NEAR_FULL_COVERAGE
        && bounds.x.abs() <= frame.width * NEAR_FULL_ORIGIN_FRAC
        && bounds.y.abs() <= frame.height * NEAR_FULL_ORIGIN_FRAC
}

/// Gradient container candidate: a frame/component/instance with a gradient
/// fill, no rotation, no effects, no image fill, bounded to 1800x1000. Captured
/// background-only (descendant text hidden during the capture) so text stays
/// editable on top.
pub fn is_gradient_container_candidate(node: &SceneNode) -> bool {
    matches!(
        node.kind,
        NodeKind::Frame | NodeKind::Component | NodeKind::Instance
    ) && node.fills.has_gradient()
        && !node.fills.has_image()
        && is_effectively_unrotated(node)
        && !node.effects.has_any()
        && node.width <= GRADIENT_CONTAINER_MAX.0
        && node.height <= GRADIENT_CONTAINER_MAX.1
}

/// Gradient rectangle candidate: a plain rectangle with a gradient fill,
/// unrotated, bounded to 2200x1400. Captured whole as one overlay.
pub fn is_gradient_rect_candidate(node: &SceneNode) -> bool {
    node.kind == NodeKind::Rectangle
        && node.fills.has_gradient()
        && is_effectively_unrotated(node)
        && node.width <= GRADIENT_RECT_MAX.0
        && node.height <= GRADIENT_RECT_MAX.1
}

/// `true` when any visible descendant of `node` is a text node.
pub fn has_text_descendant<H: DocumentHost + ?Sized>(host: &H, node: &SceneNode) -> bool {
    for &child_id in &node.children {
        let Some(child) = host.node(child_id) else {
            continue;
        };
        if !child.visible {
            continue;
        }
        if child.kind == NodeKind::Text {
            return true;
        }
        if has_text_descendant(host, child) {
            return true;
        }
    }
    false
}

/// Decide whether `node` must be captured as a bitmap overlay.
///
/// Text is never rasterized. Image-filled nodes become overlays unless they are
/// near-full-frame (left to the background). Vector-ish kinds always rasterize,
/// as do lines that fail the safe-line predicate. Small nodes (both dimensions
/// at most 420px) rasterize when they are a container without visible text
/// descendants, or a rect/ellipse that fails the safe-editable predicate.
pub fn is_raster_overlay_candidate<H: DocumentHost + ?Sized>(
    host: &H,
    node: &SceneNode,
    frame: &SceneNode,
) -> bool {
    if !node.visible || node.kind == NodeKind::Text {
        return false;
    }

    let bounds = bounds_relative_to(node, frame);
    if node.fills.has_image() {
        return !is_near_full_frame(bounds, frame);
    }
    if node.kind.is_always_raster() {
        return true;
    }
    if node.kind == NodeKind::Line && !is_safe_line(node) {
        return true;
    }

    let small = node.width <= SMALL_OVERLAY_MAX_PX && node.height <= SMALL_OVERLAY_MAX_PX;
    if !small {
        return false;
    }
    if node.kind.is_container() {
        return !has_text_descendant(host, node);
    }
    matches!(node.kind, NodeKind::Rectangle | NodeKind::Ellipse) && !is_safe_editable_shape(node)
}

#[cfg(test)]
#[path = "../../tests/unit/classify/safety.rs"]
mod tests;
