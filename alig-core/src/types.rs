use num_traits::{Float, NumAssignOps};
use std::fmt::Debug;

/// Floating-point element types usable for parameters, gradients and losses.
///
/// Implemented for `f32` and `f64`. The step-size rule itself is generic over
/// this trait so that the same code serves both precisions.
pub trait AligFloat:
    Float // Includes Num + Copy + PartialOrd + zero()/one()/is_finite()
    + NumAssignOps
    + Debug
    + Send
    + Sync
    + 'static
{
}

impl AligFloat for f32 {}
impl AligFloat for f64 {}
