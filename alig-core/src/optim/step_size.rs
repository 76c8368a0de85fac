// src/optim/step_size.rs

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::AligError;
use crate::nn::parameter::{param_id, ParamRef};
use crate::optim::config::AligConfig;
use crate::optim::engine::GradAndParam;
use crate::types::AligFloat;

/// Result of one application of the AliG step-size rule.
#[derive(Debug, Clone)]
pub struct StepOutput<T> {
    /// Effective learning rate of this step.
    pub learning_rate: T,
    /// Squared L2 norm of all gradients, taken as one concatenated vector.
    pub grad_sq_norm: T,
    /// Whether the `max_lr` cap or the lower bound 0 changed the rate.
    pub clamped: bool,
    /// Gradients multiplied by `learning_rate`, same order and parameters as
    /// the input. Absent gradients stay absent.
    pub grads_and_params: Vec<GradAndParam<T>>,
}

/// Learning rate for a given loss and squared gradient norm.
///
/// `loss / (grad_sq_norm + epsilon)`, never below 0 and clamped to `max_lr`
/// when a cap is configured. Returns the rate and whether clamping changed it.
pub fn step_size<T: AligFloat>(config: &AligConfig<T>, loss: T, grad_sq_norm: T) -> (T, bool) {
    let rate = loss / (grad_sq_norm + config.epsilon);
    // Float::max returns the non-NaN operand, so a NaN rate ends up at 0.
    let mut clamped_rate = rate.max(T::zero());
    if let Some(max_lr) = config.effective_max_lr() {
        clamped_rate = clamped_rate.min(max_lr);
    }
    (clamped_rate, clamped_rate != rate)
}

/// Applies the AliG rule to one batch of gradients.
///
/// Pure function of its arguments: it reads neither the parameter values nor
/// any state from previous steps, and does not validate `config` (the
/// optimizer does so once at construction).
///
/// # Errors
///
/// * `AligError::NoGradient` if `grads_and_params` is empty or every gradient
///   is absent.
/// * `AligError::DuplicateParameter` if a parameter appears twice.
pub fn compute_step<T: AligFloat>(
    config: &AligConfig<T>,
    loss: T,
    grads_and_params: &[GradAndParam<T>],
) -> Result<StepOutput<T>, AligError> {
    if grads_and_params.iter().all(|(grad, _)| grad.is_none()) {
        return Err(AligError::NoGradient {
            num_params: grads_and_params.len(),
        });
    }
    check_unique_params(grads_and_params)?;

    if !loss.is_finite() {
        log::warn!("AliG received a non-finite loss ({:?})", loss);
    } else if loss < T::zero() {
        log::warn!("AliG received a negative loss ({:?}), the interpolation assumption does not hold", loss);
    }

    let grad_sq_norm = grads_and_params
        .iter()
        .filter_map(|(grad, _)| grad.as_ref())
        .fold(T::zero(), |acc, grad| acc + grad.squared_norm());

    let (learning_rate, clamped) = step_size(config, loss, grad_sq_norm);
    if !learning_rate.is_finite() {
        log::warn!(
            "AliG learning rate is not finite ({:?}); consider setting max_lr",
            learning_rate
        );
    }

    let scaled = grads_and_params
        .iter()
        .map(|(grad, param)| {
            let scaled_grad = grad.as_ref().map(|g| g.mul_scalar(learning_rate));
            (scaled_grad, Arc::clone(param))
        })
        .collect();

    Ok(StepOutput {
        learning_rate,
        grad_sq_norm,
        clamped,
        grads_and_params: scaled,
    })
}

/// Fails if a parameter appears more than once.
pub(crate) fn check_unique_params<T>(grads_and_params: &[GradAndParam<T>]) -> Result<(), AligError> {
    let mut seen = HashSet::with_capacity(grads_and_params.len());
    for (_, param) in grads_and_params {
        if !seen.insert(param_id(param)) {
            return Err(AligError::DuplicateParameter {
                name: param_name(param),
            });
        }
    }
    Ok(())
}

pub(crate) fn param_name<T>(param: &ParamRef<T>) -> String {
    match param.read() {
        Ok(guard) => guard.display_name().to_string(),
        Err(poisoned) => {
            log::warn!("RwLock for parameter was poisoned while reading its name. Recovering.");
            poisoned.into_inner().display_name().to_string()
        }
    }
}
