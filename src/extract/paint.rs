use crate::foundation::core::Color;
use crate::scene::node::SceneNode;

/// A solid stroke extracted from a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolidStroke {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f64,
}

/// A solid fill extracted from a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolidFill {
    /// Fill color.
    pub color: Color,
    /// Fill paint opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Extract a node's fill only when it is safely representable as one flat
/// color: the fill list must be concrete, non-empty, and uniformly solid.
///
/// A mixed, image-bearing, or gradient-bearing list returns `None` and
/// disqualifies the node for vector re-creation.
pub fn solid_fill(node: &SceneNode) -> Option<SolidFill> {
    if !node.fills.all_solid() {
        return None;
    }
    node.fills
        .first_solid()
        .map(|(color, opacity)| SolidFill { color, opacity })
}

/// Extract a node's stroke only when every stroke paint is solid.
pub fn solid_stroke(node: &SceneNode) -> Option<SolidStroke> {
    if !node.strokes.all_solid() {
        return None;
    }
    node.strokes.first_solid().map(|(color, _)| SolidStroke {
        color,
        width: node.stroke_weight,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/extract/paint.rs"]
mod tests;
