use std::collections::{BTreeMap, HashSet};
use std::io::Cursor;

use anyhow::Context;

use crate::foundation::error::{ExportError, ExportResult};
use crate::scene::host::{DocumentHost, RasterOptions};
use crate::scene::node::{NodeId, SceneNode};

/// In-memory [`DocumentHost`] used by tests, fixtures, and as the reference
/// host implementation.
///
/// `rasterize` synthesizes a real PNG payload (a flat color at the node's
/// scaled size), so everything downstream of the engine handles genuine image
/// bytes. Failure hooks allow injecting per-node and Nth-capture raster errors
/// for restore-on-failure tests.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    nodes: BTreeMap<NodeId, SceneNode>,
    next_id: u64,
    captures: Vec<NodeId>,
    fail_nodes: HashSet<NodeId>,
    fail_at_capture: Option<usize>,
}

impl MemoryDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a root-level node and return its id.
    pub fn insert(&mut self, node: SceneNode) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, node);
        id
    }

    /// Insert a node and append it to `parent`'s child list.
    ///
    /// Returns `None` when `parent` is unknown.
    pub fn insert_child(&mut self, parent: NodeId, node: SceneNode) -> Option<NodeId> {
        if !self.nodes.contains_key(&parent) {
            return None;
        }
        let id = self.insert(node);
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(id);
        }
        Some(id)
    }

    /// Mutable access to a node (fixture adjustments).
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(&id)
    }

    /// Make every future capture of `id` fail.
    pub fn fail_raster_for(&mut self, id: NodeId) {
        self.fail_nodes.insert(id);
    }

    /// Make the Nth capture (0-based, counted from now) fail.
    pub fn fail_at_capture(&mut self, n: usize) {
        self.fail_at_capture = Some(self.captures.len() + n);
    }

    /// Log of every rasterize call in order.
    pub fn captures(&self) -> &[NodeId] {
        &self.captures
    }

    fn synthesize_png(node: &SceneNode, scale: f64) -> ExportResult<Vec<u8>> {
        let width = (node.width * scale).round().max(1.0) as u32;
        let height = (node.height * scale).round().max(1.0) as u32;

        let rgba = match node.fills.first_solid() {
            Some((color, opacity)) => {
                let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
                fn byte(c: f64) -> u8 {
                    (c.clamp(0.0, 1.0) * 255.0).round() as u8
                }
                image::Rgba([byte(color.r), byte(color.g), byte(color.b), a])
            }
            None => image::Rgba([255, 255, 255, 255]),
        };

        let img = image::RgbaImage::from_pixel(width, height, rgba);
        let mut bytes = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut bytes, image::ImageFormat::Png)
            .context("encode synthetic capture png")?;
        Ok(bytes.into_inner())
    }
}

impl DocumentHost for MemoryDocument {
    fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.visible = visible;
        }
    }

    fn rasterize(&mut self, id: NodeId, options: RasterOptions) -> ExportResult<Vec<u8>> {
        let index = self.captures.len();
        self.captures.push(id);

        if self.fail_at_capture == Some(index) {
            return Err(ExportError::raster(format!(
                "injected failure at capture {index}"
            )));
        }
        if self.fail_nodes.contains(&id) {
            return Err(ExportError::raster(format!(
                "injected failure for node {}",
                id.0
            )));
        }

        let node = self
            .nodes
            .get(&id)
            .ok_or_else(|| ExportError::raster(format!("cannot rasterize unknown node {}", id.0)))?;
        if !(node.width > 0.0 && node.height > 0.0) {
            return Err(ExportError::raster(format!(
                "cannot rasterize zero-sized node {}",
                id.0
            )));
        }

        Self::synthesize_png(node, options.scale)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/memory.rs"]
mod tests;
