use thiserror::Error;

pub type Result<T> = std::result::Result<T, RbmError>;

/// Which precondition a caller violated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidArgument {
    /// A layer was given zero units.
    #[error("{layer} must be a positive integer, got {value}")]
    LayerSize { layer: &'static str, value: usize },

    /// A probability handed to the Bernoulli sampler was outside [0, 1] (or NaN).
    #[error("probability at index {index} must lie in [0, 1], got {value}")]
    Probability { index: usize, value: f64 },

    /// A training hyperparameter cannot be used.
    #[error("invalid hyperparameter {name}: {reason}")]
    Hyperparameter { name: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum RbmError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    /// Flattened sample width does not match the visible layer.
    #[error("shape mismatch: expected samples of width {expected}, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    /// Training data held a value that is not a finite number.
    #[error("training value at index {index} must be finite, got {value}")]
    InvalidData { index: usize, value: f64 },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("line {line}: could not parse field {field:?}")]
    Parse { line: u64, field: String },

    #[error("line {line}: expected {expected} pixels, got {got}")]
    ImageSize { line: u64, expected: usize, got: usize },
}

impl RbmError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, RbmError::InvalidArgument(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_violated_precondition() {
        let layer: RbmError = InvalidArgument::LayerSize {
            layer: "n_hidden",
            value: 0,
        }
        .into();
        assert!(layer.is_invalid_argument());
        assert!(layer.to_string().contains("n_hidden"));

        let prob: RbmError = InvalidArgument::Probability {
            index: 3,
            value: 1.5,
        }
        .into();
        assert!(prob.to_string().contains("[0, 1]"));
        assert_ne!(layer.to_string(), prob.to_string());

        let shape = RbmError::ShapeMismatch {
            expected: 4,
            got: 5,
        };
        assert!(!shape.is_invalid_argument());
    }
}
