//! Summarization error types.

/// Error from the vision-model summarization collaborator.
///
/// Summarization failures never abort an item: the pipeline folds this error
/// into a bracketed marker string in the result instead.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Summary Error: {} at line {} in {}", message, line, file)]
pub struct SummaryError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl SummaryError {
    /// Create a new SummaryError with the given message at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
