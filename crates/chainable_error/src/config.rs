//! Configuration error types.

/// Configuration error with source location.
///
/// Raised when a chain definition cannot be read or parsed, or when
/// process-wide setup (such as installing the tracing subscriber) fails.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainable_error::ConfigError;
    ///
    /// let err = ConfigError::new("Chain definition has no model");
    /// assert!(err.message.contains("no model"));
    /// ```
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
