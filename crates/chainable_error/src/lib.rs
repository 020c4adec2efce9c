//! Error types for the chainable library.
//!
//! Every error records the source location where it was created. Errors raised
//! by a caller's model callback are never wrapped in these types; they reach the
//! caller of a chain run unchanged.

mod config;
mod export;

pub use config::ConfigError;
pub use export::ExportError;

/// Crate-level error variants.
#[derive(Debug, derive_more::From, derive_more::Display)]
pub enum ChainableErrorKind {
    /// Configuration error
    #[display("{}", _0)]
    Config(ConfigError),
    /// Export error
    #[display("{}", _0)]
    Export(ExportError),
}

/// Chainable error with kind discrimination.
#[derive(Debug, derive_more::Display)]
#[display("Chainable Error: {}", _0)]
pub struct ChainableError(Box<ChainableErrorKind>);

impl ChainableError {
    /// Create a new error from a kind.
    pub fn new(kind: ChainableErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ChainableErrorKind {
        &self.0
    }
}

impl std::error::Error for ChainableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ChainableErrorKind::Config(e) => Some(e),
            ChainableErrorKind::Export(e) => Some(e),
        }
    }
}

// Generic From implementation for any type that converts to ChainableErrorKind
impl<T> From<T> for ChainableError
where
    T: Into<ChainableErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for chainable operations.
pub type ChainableResult<T> = std::result::Result<T, ChainableError>;
