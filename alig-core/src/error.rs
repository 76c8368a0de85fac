use thiserror::Error;

/// Custom error type for the AliG optimizer.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum AligError {
    /// Rejected hyperparameters. Raised by constructors only; no optimizer is produced.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// None of the parameters of the step received a gradient.
    #[error("No gradients provided for any of the {num_params} parameter(s), check that they participate in the loss")]
    NoGradient { num_params: usize },

    #[error("Parameter {name:?} appears more than once in the same step")]
    DuplicateParameter { name: String },

    /// The gradient engine did not return exactly one pair per requested parameter.
    #[error("Gradient engine output does not match the step parameters: {reason}")]
    GradientMismatch { reason: String },

    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Failed to acquire {lock_type} lock: {reason}")]
    LockError { lock_type: String, reason: String },
}
