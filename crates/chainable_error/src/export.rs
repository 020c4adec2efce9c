//! Export error types.

/// Error raised while appending exported blocks to a file.
///
/// # Examples
///
/// ```
/// use chainable_error::ExportError;
///
/// let err = ExportError::new("results.txt", "permission denied");
/// assert!(format!("{}", err).contains("results.txt"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Export Error: failed to write {}: {} at line {} in {}", path, message, line, file)]
pub struct ExportError {
    /// Path of the file being written
    pub path: String,
    /// Underlying I/O error message
    pub message: String,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ExportError {
    /// Create a new export error with automatic location tracking.
    #[track_caller]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            path: path.into(),
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
