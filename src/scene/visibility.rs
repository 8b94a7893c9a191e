use std::collections::HashSet;

use crate::foundation::error::ExportResult;
use crate::scene::host::DocumentHost;
use crate::scene::node::NodeId;

/// Run `f` with the given nodes hidden, restoring every node's original
/// visibility before returning — on success, error, and cancellation alike.
///
/// This is the only place the engine mutates the live document. Prior
/// visibility is recorded per node before the first flip; duplicate ids are
/// hidden once and restored once. Unknown ids are skipped.
pub fn with_hidden<H, T, F>(host: &mut H, ids: &[NodeId], f: F) -> ExportResult<T>
where
    H: DocumentHost + ?Sized,
    F: FnOnce(&mut H) -> ExportResult<T>,
{
    let mut saved: Vec<(NodeId, bool)> = Vec::with_capacity(ids.len());
    let mut seen: HashSet<NodeId> = HashSet::with_capacity(ids.len());

    for &id in ids {
        if !seen.insert(id) {
            continue;
        }
        if let Some(node) = host.node(id) {
            saved.push((id, node.visible));
            host.set_visible(id, false);
        }
    }

    let result = f(host);

    // Unconditional restore: this must run on every exit path.
    for (id, was_visible) in saved.into_iter().rev() {
        host.set_visible(id, was_visible);
    }

    result
}

#[cfg(test)]
#[path = "../../tests/unit/scene/visibility.rs"]
mod tests;
