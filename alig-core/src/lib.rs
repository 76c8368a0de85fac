//! AliG (Adaptive Learning-rate for Interpolated Gradients).
//!
//! The learning rate of every step is computed from the current loss and the
//! squared norm of the current gradients, `lr = loss / (||g||^2 + eps)`,
//! optionally capped by `max_lr`. See [`optim::AligOptimizer`].

pub mod error;
pub mod nn;
pub mod optim;
pub mod tensor;
pub mod types;

#[cfg(test)]
pub(crate) mod utils;

pub use error::AligError;
pub use nn::{ParamRef, Parameter};
pub use tensor::Tensor;
pub use types::AligFloat;
// Re-export traits required by public functions/structs
pub use num_traits;
