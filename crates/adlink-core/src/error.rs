use thiserror::Error;

/// Failure taxonomy for every request-scoped operation. All variants
/// are recoverable at the request boundary; `Store` is the only one
/// that is not a deliberate denial.
#[derive(Debug, Error)]
pub enum Error {
    /// No authenticated identity. The response is the
    /// redirect-to-login equivalent.
    #[error("please login first")]
    Unauthenticated,

    /// Authenticated, but wrong role or not the owner/target of the
    /// resource. The message is deliberately generic.
    #[error("invalid user")]
    Forbidden,

    /// A referenced entity id does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The request collides with existing state (duplicate unique
    /// field, transition on an already-resolved ad request).
    #[error("{0}")]
    Conflict(&'static str),

    /// Malformed or missing input. Propagated, never coerced.
    #[error("{0}")]
    Validation(String),

    /// Persistence-layer failure.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
