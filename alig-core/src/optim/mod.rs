// alig-core/src/optim/mod.rs

//! The AliG optimizer.
//!
//! This module provides the pure step-size rule (`step_size`), the engine
//! traits through which gradients are obtained and applied (`engine`), a
//! reference SGD / Nesterov update engine (`sgd`) and the `AligOptimizer`
//! facade composing them.

pub mod config;
pub mod engine;
pub mod optimizer_trait;
pub mod step_size;

pub mod sgd;

pub mod alig;

// Re-export key items for easier access
pub use alig::AligOptimizer;
pub use config::{AligConfig, DEFAULT_EPSILON};
pub use engine::{GradAndParam, GradientEngine, MomentumMode, UpdateEngine};
pub use optimizer_trait::Optimizer;
pub use sgd::SgdUpdateEngine;
pub use step_size::{compute_step, step_size, StepOutput};
