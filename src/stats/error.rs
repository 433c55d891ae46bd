//! Error types for statistical operations.

use thiserror::Error;

/// Result type for statistics operations.
pub type StatsResult<T> = Result<T, StatsError>;

/// Errors that can occur during statistical operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// The selected option cannot be applied to this input.
    #[error("Invalid option '{option}': {reason}")]
    InvalidOption { option: String, reason: String },

    /// A numeric parameter violates a mathematical precondition.
    #[error("Invalid value for '{name}' = {value}: {reason}")]
    Domain {
        name: String,
        value: f64,
        reason: String,
    },

    /// Input sample is empty (after removing missing values).
    #[error("Empty sample in {context}")]
    EmptySample { context: String },

    /// Input sample is non-empty but too small for the statistic.
    #[error("Insufficient data in {context}: need {required} observations, got {got}")]
    InsufficientData {
        required: usize,
        got: usize,
        context: String,
    },

    /// Paired samples or table rows of unequal length.
    #[error("Size mismatch in {context}: expected {expected}, got {got}")]
    SizeMismatch {
        expected: usize,
        got: usize,
        context: String,
    },

    /// No closed-form relation between the two effect sizes.
    #[error("Unsupported effect size conversion from {from} to {to}")]
    UnsupportedConversion { from: String, to: String },
}

impl StatsError {
    pub(crate) fn domain(name: &str, value: f64, reason: &str) -> Self {
        Self::Domain {
            name: name.to_string(),
            value,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn empty(context: &str) -> Self {
        Self::EmptySample {
            context: context.to_string(),
        }
    }

    pub(crate) fn invalid_option(option: &str, reason: &str) -> Self {
        Self::InvalidOption {
            option: option.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn insufficient(required: usize, got: usize, context: &str) -> Self {
        Self::InsufficientData {
            required,
            got,
            context: context.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StatsError::domain("p0", 1.5, "must be in [0, 1]");
        assert!(err.to_string().contains("p0"));
        assert!(err.to_string().contains("1.5"));
        assert!(err.to_string().contains("[0, 1]"));

        let err = StatsError::empty("me_mean");
        assert!(err.to_string().contains("me_mean"));

        let err = StatsError::UnsupportedConversion {
            from: "cohen d".to_string(),
            to: "yule q".to_string(),
        };
        assert!(err.to_string().contains("cohen d"));
        assert!(err.to_string().contains("yule q"));
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(StatsError::empty("x"), StatsError::empty("x"));
        assert_ne!(
            StatsError::insufficient(2, 1, "x"),
            StatsError::insufficient(3, 1, "x")
        );
    }
}
