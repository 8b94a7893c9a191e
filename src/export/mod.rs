//! Batch orchestration and the progress/terminal event channel.

/// Batch orchestrator, letterbox math, serializer-facing constants.
pub mod batch;
/// Progress events and sinks.
pub mod progress;
