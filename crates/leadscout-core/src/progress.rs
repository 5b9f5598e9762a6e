//! Human-readable progress reporting for a run.
//!
//! A run emits an ordered stream of status lines and recovered-failure
//! warnings. Callers decide how to show them; every event is mirrored to
//! `tracing` as it is emitted.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum ProgressEvent {
    Status(String),
    /// A failure that was recovered locally; the run continues.
    Warning(String),
}

impl ProgressEvent {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            ProgressEvent::Status(m) | ProgressEvent::Warning(m) => m,
        }
    }

    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(self, ProgressEvent::Warning(_))
    }
}

impl std::fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressEvent::Status(m) => write!(f, "{m}"),
            ProgressEvent::Warning(m) => write!(f, "warning: {m}"),
        }
    }
}

/// Receiver for progress events.
pub trait ProgressSink {
    fn emit(&mut self, event: ProgressEvent);

    fn status(&mut self, message: String) {
        tracing::info!("{message}");
        self.emit(ProgressEvent::Status(message));
    }

    fn warning(&mut self, message: String) {
        tracing::warn!("{message}");
        self.emit(ProgressEvent::Warning(message));
    }
}

impl ProgressSink for Vec<ProgressEvent> {
    fn emit(&mut self, event: ProgressEvent) {
        self.push(event);
    }
}
