//! TUI error types.

/// Kinds of TUI errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum TuiErrorKind {
    /// Terminal could not be placed in raw/alternate mode
    #[display("Terminal setup failed: {}", _0)]
    TerminalSetup(String),
    /// Terminal could not be restored on exit
    #[display("Terminal restore failed: {}", _0)]
    TerminalRestore(String),
    /// Drawing a frame failed
    #[display("Rendering failed: {}", _0)]
    Rendering(String),
    /// Polling for terminal events failed
    #[display("Event poll failed: {}", _0)]
    EventPoll(String),
    /// Reading a terminal event failed
    #[display("Event read failed: {}", _0)]
    EventRead(String),
}

/// TUI error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("TUI Error: {} at line {} in {}", kind, line, file)]
pub struct TuiError {
    /// The kind of error that occurred
    pub kind: TuiErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl TuiError {
    /// Create a new TUI error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TuiErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for TUI operations.
pub type TuiResult<T> = std::result::Result<T, TuiError>;
