//! Error taxonomy for Rips persistence computations.
//!
//! Every failure is reported where it is detected; no partial diagram is
//! ever returned alongside an error.

use thiserror::Error;

/// Errors raised while validating input or configuration, or while sizing
/// the filtration.
///
/// # Examples
///
/// ```rust
/// use rips_persistence::RipsError;
///
/// let err = RipsError::InvalidInput { message: "empty input".into() };
/// assert!(matches!(err, RipsError::InvalidInput { .. }));
/// assert_eq!(err.to_string(), "Invalid input: empty input");
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RipsError {
    /// Malformed point cloud or distance matrix.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the input.
        message: String,
    },
    /// Option values that cannot describe a computation.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Which option was rejected and why.
        message: String,
    },
    /// The requested dimension/threshold combination would not fit.
    #[error("Resource exhaustion: {message}")]
    ResourceExhaustion {
        /// What limit was hit.
        message: String,
    },
}

impl RipsError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    pub(crate) fn exhausted(message: impl Into<String>) -> Self {
        Self::ResourceExhaustion {
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type RipsResult<T> = Result<T, RipsError>;
