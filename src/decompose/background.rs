use crate::classify::safety::is_effectively_unrotated;
use crate::decompose::item::SlideBackground;
use crate::decompose::walker::EXPORT_SCALE;
use crate::foundation::cancel::CancelToken;
use crate::foundation::error::{ExportError, ExportResult};
use crate::scene::host::{DocumentHost, RasterOptions, require_node};
use crate::scene::node::{NodeId, Paint, PaintList, SceneNode};
use crate::scene::visibility::with_hidden;

/// Derive a flat-color background analytically, when the frame itself is
/// unrotated, effect-free, and filled with exactly one solid paint.
///
/// This avoids the bitmap capture (and therefore any node hiding) entirely.
pub fn smart_background(frame: &SceneNode) -> Option<SlideBackground> {
    if !is_effectively_unrotated(frame) || frame.effects.has_any() {
        return None;
    }
    let PaintList::Paints(paints) = &frame.fills else {
        return None;
    };
    if paints.len() != 1 {
        return None;
    }
    let Paint::Solid { color, opacity } = paints[0] else {
        return None;
    };
    Some(SlideBackground::Solid {
        hex: color.to_hex(),
        opacity: (opacity * frame.opacity).clamp(0.0, 1.0),
    })
}

/// Resolve a frame's background.
///
/// Smart backgrounds short-circuit. Otherwise every node in `to_hide` is
/// hidden inside one scoped transaction, the frame is captured at the fixed
/// export scale, and every flipped visibility is restored on all exit paths —
/// success, capture failure, and cancellation.
///
/// A capture failure here is promoted to [`ExportError::BackgroundCapture`]
/// and aborts the frame: a missing background is not an acceptable
/// degradation.
#[tracing::instrument(skip(host, to_hide, cancel))]
pub fn resolve_background<H: DocumentHost + ?Sized>(
    host: &mut H,
    frame_id: NodeId,
    to_hide: &[NodeId],
    cancel: &CancelToken,
) -> ExportResult<SlideBackground> {
    let frame = require_node(host, frame_id)?;
    if let Some(bg) = smart_background(frame) {
        return Ok(bg);
    }

    cancel.checkpoint()?;
    let captured = with_hidden(host, to_hide, |h| {
        h.rasterize(
            frame_id,
            RasterOptions {
                scale: EXPORT_SCALE,
            },
        )
    });

    match captured {
        Ok(png) => {
            cancel.checkpoint()?;
            Ok(SlideBackground::Image { png })
        }
        Err(e) if e.is_cancelled() => Err(e),
        Err(e) => Err(ExportError::background_capture(e.to_string())),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decompose/background.rs"]
mod tests;
