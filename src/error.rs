//! Error types for gradient-descent runs and the estimators built on them.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GdError>;

#[derive(Error, Debug)]
pub enum GdError {
    /// Weight, feature or target dimensionality disagree.
    #[error("Shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: String, got: String },

    /// The dataset contains zero examples.
    #[error("Dataset must contain at least one example")]
    EmptyDataset,

    #[error("Invalid hyperparameter: {name} = {value}, {reason}")]
    InvalidHyperparameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    /// A classification target outside {0, 1}.
    #[error("Labels must be 0 or 1 for binary classification, got {0}")]
    InvalidLabel(f64),

    #[error("Model not fitted. Call fit() first.")]
    NotFitted,

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl GdError {
    pub(crate) fn shape(expected: impl Into<String>, got: impl Into<String>) -> Self {
        GdError::ShapeMismatch {
            expected: expected.into(),
            got: got.into(),
        }
    }

    pub(crate) fn hyperparameter(name: &'static str, value: f64, reason: &'static str) -> Self {
        GdError::InvalidHyperparameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
