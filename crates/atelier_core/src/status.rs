//! Status sink seam between the pipeline and the display surface.

/// Receives human-readable progress lines as the pipeline advances.
///
/// Injected into the pipeline so status recording is decoupled from whatever
/// surface displays it (console, TUI status feed, tests).
pub trait StatusSink {
    /// Append a status line for an item, identified by its file name.
    fn append(&mut self, item: &str, message: &str);
}

/// Status sink that forwards every line to the tracing subscriber.
///
/// Used for console runs; the TUI reads the session log instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingStatusSink;

impl StatusSink for TracingStatusSink {
    fn append(&mut self, item: &str, message: &str) {
        tracing::info!(item = %item, "{}", message);
    }
}
