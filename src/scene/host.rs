use crate::foundation::error::{ExportError, ExportResult};
use crate::scene::node::{NodeId, SceneNode};

/// Options for a host rasterization call. Output format is always PNG.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RasterOptions {
    /// Uniform export scale (the engine always captures at 2x).
    pub scale: f64,
}

/// Boundary to the live document tree.
///
/// The engine consumes node data through [`DocumentHost::node`] and produces
/// bitmaps through [`DocumentHost::rasterize`]. The only mutation it ever
/// performs is [`DocumentHost::set_visible`], and strictly inside the scoped
/// hide/restore transaction of [`crate::scene::visibility::with_hidden`].
pub trait DocumentHost {
    /// Read view of a node, or `None` for an unknown id.
    fn node(&self, id: NodeId) -> Option<&SceneNode>;

    /// Set a node's visibility. Unknown ids are ignored.
    fn set_visible(&mut self, id: NodeId, visible: bool);

    /// Capture a node as PNG bytes. Potentially slow and fallible; the engine
    /// treats every call as a suspension point and re-checks cancellation
    /// around it.
    fn rasterize(&mut self, id: NodeId, options: RasterOptions) -> ExportResult<Vec<u8>>;
}

/// Resolve a node or fail with a validation error naming the id.
pub(crate) fn require_node<H: DocumentHost + ?Sized>(
    host: &H,
    id: NodeId,
) -> ExportResult<&SceneNode> {
    host.node(id)
        .ok_or_else(|| ExportError::validation(format!("unknown node id {}", id.0)))
}
