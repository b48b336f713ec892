//! Top-level error wrapper types.

use crate::{
    ConfigError, HttpError, JsonError, MediaError, PipelineError, StorageError, SummaryError,
    TuiError,
};

/// Foundation error enum for the Atelier workspace.
///
/// # Examples
///
/// ```
/// use atelier_error::{AtelierError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: AtelierError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum AtelierErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Remote storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Image processing error
    #[from(MediaError)]
    Media(MediaError),
    /// Summarization error
    #[from(SummaryError)]
    Summary(SummaryError),
    /// Pipeline error
    #[from(PipelineError)]
    Pipeline(PipelineError),
    /// TUI error
    #[from(TuiError)]
    Tui(TuiError),
}

/// Atelier error with kind discrimination.
///
/// # Examples
///
/// ```
/// use atelier_error::{AtelierResult, ConfigError};
///
/// fn might_fail() -> AtelierResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Atelier Error: {}", _0)]
pub struct AtelierError(Box<AtelierErrorKind>);

impl AtelierError {
    /// Create a new error from a kind.
    pub fn new(kind: AtelierErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AtelierErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to AtelierErrorKind
impl<T> From<T> for AtelierError
where
    T: Into<AtelierErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Atelier operations.
///
/// # Examples
///
/// ```
/// use atelier_error::{AtelierResult, HttpError};
///
/// fn fetch_data() -> AtelierResult<String> {
///     Err(HttpError::new("404 Not Found"))?
/// }
/// ```
pub type AtelierResult<T> = std::result::Result<T, AtelierError>;
