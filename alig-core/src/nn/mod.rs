// src/nn/mod.rs

pub mod parameter; // struct Parameter, ParamRef

// Re-export common items
pub use parameter::{param_id, ParamRef, Parameter};
