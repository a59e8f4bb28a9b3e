//! Crate-wide error type and result alias.

/// Errors surfaced by the log store and its HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The caller supplied a record that fails validation.
    InvalidInput(String),
    /// The underlying file store failed to read or write.
    Storage(String),
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Error::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

/// Result type for all fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;
