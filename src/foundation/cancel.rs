use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::foundation::error::{ExportError, ExportResult};

/// Cooperative cancellation token shared between the export engine and its caller.
///
/// Cancellation is advisory: an in-flight host rasterization cannot be aborted,
/// only the next checkpoint observes the flag and unwinds with
/// [`ExportError::Cancelled`]. Cleanup obligations (visibility restore) always
/// run before the condition propagates.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a fresh, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Safe to call from any thread, any number of times.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// `true` once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Checkpoint: unwind with [`ExportError::Cancelled`] if cancellation was requested.
    pub fn checkpoint(&self) -> ExportResult<()> {
        if self.is_cancelled() {
            Err(ExportError::Cancelled)
        } else {
            Ok(())
        }
    }
}
