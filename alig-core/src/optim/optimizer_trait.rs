use crate::error::AligError;
use crate::nn::parameter::ParamRef;
use crate::optim::engine::{GradAndParam, GradientEngine};
use crate::optim::step_size::StepOutput;
use crate::types::AligFloat;

/// Trait defining the common interface of loss-driven optimizers.
///
/// Unlike a fixed-learning-rate optimizer, the step needs the current loss
/// value, and the learning rate it used is returned to the caller instead of
/// being kept as state.
pub trait Optimizer<T: AligFloat> {
    /// Performs a single optimization step.
    ///
    /// Asks `gradient_engine` for the gradients of `loss` with respect to
    /// `params`, then updates the parameters.
    ///
    /// # Returns
    ///
    /// The effective learning rate of the step, or an `AligError` if no
    /// parameter received a gradient or the update could not be applied.
    /// On error no parameter is modified.
    fn step<G: GradientEngine<T>>(
        &mut self,
        loss: T,
        params: &[ParamRef<T>],
        gradient_engine: &mut G,
    ) -> Result<T, AligError>;

    /// Performs a single optimization step from gradients computed elsewhere.
    ///
    /// Returns the full [`StepOutput`] (rate, squared norm, clamping flag and
    /// the scaled gradients that were applied).
    fn apply_gradients(
        &mut self,
        loss: T,
        grads_and_params: &[GradAndParam<T>],
    ) -> Result<StepOutput<T>, AligError>;

    /// Name of the optimizer, used in logs.
    fn name(&self) -> &str;
}
