//! Error type for progress mutations.

use thiserror::Error;

/// Error returned by the mutating operations of [`crate::Progress`].
#[derive(Debug, Error)]
pub enum ProgressError {
    /// A counter or total was negative. Raised before any state changes.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The registered change callback failed. The mutation itself has already
    /// been applied and the subscription's last-fired time already updated.
    #[error("change callback failed")]
    Callback(#[source] anyhow::Error),
}

impl ProgressError {
    pub(crate) fn negative(what: &str) -> Self {
        ProgressError::InvalidArgument(format!("{what} must be greater than or equal to 0"))
    }
}
