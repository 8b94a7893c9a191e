use crate::foundation::core::Bounds;
use crate::scene::node::SceneNode;

/// Compute `node`'s bounding box relative to `frame`'s origin.
///
/// Both origins come from the translation component of each node's absolute
/// transform, so the result depends only on their relative placement: moving
/// the frame and the node by the same delta leaves it unchanged.
pub fn bounds_relative_to(node: &SceneNode, frame: &SceneNode) -> Bounds {
    let n = node.transform.translation();
    let f = frame.transform.translation();
    Bounds {
        x: n.x - f.x,
        y: n.y - f.y,
        w: node.width,
        h: node.height,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/extract/geometry.rs"]
mod tests;
