/// Convenience result type used across Framedeck.
pub type ExportResult<T> = Result<T, ExportError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    /// The user selection cannot be exported (no frame, unknown id, wrong kind).
    #[error("selection error: {0}")]
    Selection(String),

    /// Invalid input data or violated engine invariants.
    #[error("validation error: {0}")]
    Validation(String),

    /// A host rasterization call failed for a single node.
    #[error("raster error: {0}")]
    Raster(String),

    /// The frame background capture failed. Unlike per-node raster failures this
    /// aborts the whole export, after visibility has been restored.
    #[error("background capture error: {0}")]
    BackgroundCapture(String),

    /// The export was cancelled cooperatively. Not a failure: reported to the
    /// caller as a distinct terminal state.
    #[error("export cancelled")]
    Cancelled,

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ExportError {
    /// Build an [`ExportError::Selection`] value.
    pub fn selection(msg: impl Into<String>) -> Self {
        Self::Selection(msg.into())
    }

    /// Build an [`ExportError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`ExportError::Raster`] value.
    pub fn raster(msg: impl Into<String>) -> Self {
        Self::Raster(msg.into())
    }

    /// Build an [`ExportError::BackgroundCapture`] value.
    pub fn background_capture(msg: impl Into<String>) -> Self {
        Self::BackgroundCapture(msg.into())
    }

    /// `true` when this value is the distinguished cancellation condition.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
