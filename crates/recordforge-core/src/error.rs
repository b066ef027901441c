use thiserror::Error;

/// Core error type shared across Recordforge crates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A lookup named a field the record does not carry.
    #[error("missing field: {path}")]
    MissingField { path: String },
    /// A nested lookup walked into a value that is not a record.
    #[error("not a record: {path}")]
    NotARecord { path: String },
}

/// Convenience alias for results returned by Recordforge crates.
pub type Result<T> = std::result::Result<T, Error>;
