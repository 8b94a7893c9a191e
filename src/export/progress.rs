/// Major phases of one frame's decomposition, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ExportPhase {
    /// Walking the scene graph and classifying nodes.
    Scanning,
    /// Converting detected mask pairs.
    Masks,
    /// Running the deferred capture queue.
    Rasterizing,
    /// Capturing or deriving the slide background.
    Background,
}

/// A progress report emitted at phase transitions.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Progress {
    /// Phase being entered.
    pub phase: ExportPhase,
    /// 1-based index of the frame being processed.
    pub current: usize,
    /// Total frame count in the batch.
    pub total: usize,
    /// Optional human-readable detail (frame name, counts).
    pub label: Option<String>,
}

/// Events pushed to the caller during a batch export.
///
/// Exactly one terminal event is emitted per batch: `Done` on success,
/// `Cancelled` for a user-initiated stop (never presented as an error), or
/// `Error` for a hard failure.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ExportEvent {
    /// Phase transition report.
    Progress(Progress),
    /// The batch completed; the payload is returned from the export call.
    Done {
        /// Number of slides in the finished batch.
        slide_count: usize,
    },
    /// The batch was cancelled cooperatively; no payload was produced.
    Cancelled,
    /// The batch failed; no payload was produced.
    Error {
        /// Top-level failure message.
        message: String,
    },
}

/// Sink contract for consuming export events as they happen.
pub trait ProgressSink {
    /// Receive one event. Must not fail; a slow sink slows the export.
    fn emit(&mut self, event: ExportEvent);
}

/// Sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn emit(&mut self, _event: ExportEvent) {}
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct MemoryProgress {
    /// Events in emission order.
    pub events: Vec<ExportEvent>,
}

impl MemoryProgress {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The terminal event, if one was emitted yet.
    pub fn terminal(&self) -> Option<&ExportEvent> {
        self.events
            .iter()
            .find(|e| !matches!(e, ExportEvent::Progress(_)))
    }
}

impl ProgressSink for MemoryProgress {
    fn emit(&mut self, event: ExportEvent) {
        self.events.push(event);
    }
}
