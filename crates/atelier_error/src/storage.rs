//! Remote storage error types.

/// Kinds of storage errors.
///
/// A missing object is not represented here: existence probes report
/// `Probe::Missing` as a regular value, since "not found" drives path
/// resolution rather than signalling failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// The store rejected or failed a remote call
    #[display("Remote store error: {}", _0)]
    Remote(String),
    /// The destination path already holds an object
    #[display("Destination already exists: {}", _0)]
    Conflict(String),
    /// Unique-path resolution exceeded its attempt bound
    #[display("Path resolution exhausted after {} attempts for {}", attempts, base)]
    ResolutionExhausted {
        /// Number of candidate paths probed
        attempts: u32,
        /// Base path that kept colliding
        base: String,
    },
    /// OAuth2 token refresh failed
    #[display("Authentication failed: {}", _0)]
    Auth(String),
    /// An upload session was driven out of order
    #[display("Invalid upload session state: {}", _0)]
    Session(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use atelier_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::Conflict("/assets/a.png".to_string()));
/// assert!(format!("{}", err).contains("already exists"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
