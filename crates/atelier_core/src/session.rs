//! Session-scoped processing state.

use std::collections::{HashMap, HashSet};

/// State for one interactive session, passed explicitly into the pipeline.
///
/// Tracks which file names have already been processed so re-rendering the
/// same batch does not repeat uploads, and holds the ordered status log per
/// file. Both maps are append-only per key while a batch runs; a new batch
/// clears the whole context.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    processed: HashSet<String>,
    status_log: HashMap<String, Vec<String>>,
}

impl SessionContext {
    /// Create an empty session context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a file name has already been processed this session.
    pub fn is_processed(&self, file_name: &str) -> bool {
        self.processed.contains(file_name)
    }

    /// Mark a file name as processed.
    pub fn mark_processed(&mut self, file_name: impl Into<String>) {
        self.processed.insert(file_name.into());
    }

    /// Append a status line to a file's log.
    pub fn push_status(&mut self, file_name: &str, message: impl Into<String>) {
        self.status_log
            .entry(file_name.to_string())
            .or_default()
            .push(message.into());
    }

    /// Ordered status lines recorded for a file, if any.
    pub fn status_for(&self, file_name: &str) -> Option<&[String]> {
        self.status_log.get(file_name).map(Vec::as_slice)
    }

    /// File names with a status log, in unspecified order.
    pub fn logged_files(&self) -> impl Iterator<Item = &str> {
        self.status_log.keys().map(String::as_str)
    }

    /// Drop all session state. Called when the user clears the selection.
    pub fn clear(&mut self) {
        self.processed.clear();
        self.status_log.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_processed_names() {
        let mut ctx = SessionContext::new();
        assert!(!ctx.is_processed("a.png"));
        ctx.mark_processed("a.png");
        assert!(ctx.is_processed("a.png"));
    }

    #[test]
    fn status_log_keeps_order() {
        let mut ctx = SessionContext::new();
        ctx.push_status("a.png", "first");
        ctx.push_status("a.png", "second");
        assert_eq!(ctx.status_for("a.png").unwrap(), ["first", "second"]);
    }

    #[test]
    fn clear_resets_everything() {
        let mut ctx = SessionContext::new();
        ctx.mark_processed("a.png");
        ctx.push_status("a.png", "done");
        ctx.clear();
        assert!(!ctx.is_processed("a.png"));
        assert!(ctx.status_for("a.png").is_none());
    }
}
