use crate::error::AligError;
use crate::nn::parameter::ParamRef;
use crate::tensor::Tensor;
use crate::types::AligFloat;

/// A gradient paired with the parameter it belongs to.
///
/// `None` means the parameter did not take part in computing the loss.
pub type GradAndParam<T> = (Option<Tensor<T>>, ParamRef<T>);

/// How the update engine should turn scaled gradients into parameter updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MomentumMode<T> {
    /// `param -= scaled_grad`, no velocity state.
    Disabled,
    /// Nesterov accelerated update with the given momentum coefficient.
    Nesterov { momentum: T },
}

/// Source of gradients for a step (the automatic-differentiation side).
///
/// Implemented for any closure with the matching signature, so a test or a
/// hand-written model can provide gradients without a full autograd engine.
pub trait GradientEngine<T: AligFloat> {
    /// Computes the gradient of the loss with respect to each parameter.
    ///
    /// The returned pairs must follow the order of `params`, with `None` for
    /// parameters the loss does not depend on. `Optimizer::step` rejects a
    /// result that adds or leaves out a parameter with
    /// `AligError::GradientMismatch`.
    fn compute_gradients(
        &mut self,
        loss: T,
        params: &[ParamRef<T>],
    ) -> Result<Vec<GradAndParam<T>>, AligError>;
}

impl<T, F> GradientEngine<T> for F
where
    T: AligFloat,
    F: FnMut(T, &[ParamRef<T>]) -> Result<Vec<GradAndParam<T>>, AligError>,
{
    fn compute_gradients(
        &mut self,
        loss: T,
        params: &[ParamRef<T>],
    ) -> Result<Vec<GradAndParam<T>>, AligError> {
        self(loss, params)
    }
}

/// Applies already-scaled gradients to parameters (the parameter-update side).
pub trait UpdateEngine<T: AligFloat> {
    /// Mutates every parameter that has a gradient.
    ///
    /// Implementations must either apply the whole list or leave every
    /// parameter untouched when they return an error.
    fn apply_updates(
        &mut self,
        grads_and_params: &[GradAndParam<T>],
        mode: MomentumMode<T>,
    ) -> Result<(), AligError>;
}
