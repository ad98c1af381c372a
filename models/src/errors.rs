// models/src/errors.rs

pub use thiserror::Error;

/// Typed failure raised by the repository layer.
///
/// The variants mirror the failure kinds the layer distinguishes:
/// bad input is rejected before any I/O, missing parents after one read,
/// scheduling overlap and authorship violations before any write.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Infrastructure failure in the backing graph store.
    #[error("store error: {0}")]
    Store(String),
}

impl RepoError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        RepoError::InvalidArgument(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        RepoError::NotFound(msg.into())
    }
}

// Store implementations wrap arbitrary infrastructure errors through anyhow.
impl From<anyhow::Error> for RepoError {
    fn from(err: anyhow::Error) -> Self {
        RepoError::Store(format!("underlying store operation failed: {}", err))
    }
}

/// A type alias for a `Result` that returns a `RepoError` on failure.
pub type RepoResult<T> = Result<T, RepoError>;
