use thiserror::Error;

/// Convenient result type for progress-tracking operations using [`ProgressError`]
/// as the error type.
pub type ProgressResult<T> = Result<T, ProgressError>;

/// Main error type for progress-tracking operations.
///
/// The tracker itself performs no fallible I/O; errors are either configuration
/// mistakes caught at construction or failures surfaced by the injected
/// collaborators, which the tracker propagates without interpreting.
#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("invalid tracker configuration: {reason}")]
    InvalidConfig { reason: &'static str },

    #[error("message sink error: {0}")]
    Sink(String),

    #[error("last-imported store error: {0}")]
    Store(String),
}
