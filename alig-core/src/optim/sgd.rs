use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockWriteGuard, Weak};

use crate::error::AligError;
use crate::nn::parameter::{param_id, ParamRef, Parameter};
use crate::optim::engine::{GradAndParam, MomentumMode, UpdateEngine};
use crate::optim::step_size::check_unique_params;
use crate::tensor::{create::zeros_like, Tensor};
use crate::types::AligFloat;

/// Reference update engine: gradient descent with optional Nesterov momentum.
///
/// Gradients are expected to be already multiplied by the learning rate, so
/// the update uses a unit step:
///
/// * `Disabled`: `p -= g`
/// * `Nesterov { momentum: m }`: `v = m * v + g`, then `p -= g + m * v`
///
/// Velocity buffers are created lazily (zero-initialized) and keyed by
/// parameter identity. Each buffer keeps a weak handle to its parameter, so a
/// buffer never outlives the parameter it was created for: buffers of dropped
/// parameters are discarded at the next update.
#[derive(Debug)]
pub struct SgdUpdateEngine<T> {
    momentum_buffers: HashMap<usize, MomentumSlot<T>>,
}

/// Velocity of one parameter and a weak handle to that parameter.
#[derive(Debug)]
struct MomentumSlot<T> {
    owner: Weak<RwLock<Parameter<T>>>,
    velocity: Tensor<T>,
}

impl<T> MomentumSlot<T> {
    fn is_live(&self) -> bool {
        self.owner.strong_count() > 0
    }

    fn belongs_to(&self, param: &ParamRef<T>) -> bool {
        self.owner
            .upgrade()
            .map_or(false, |owner| Arc::ptr_eq(&owner, param))
    }
}

impl<T: AligFloat> Default for SgdUpdateEngine<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: AligFloat> SgdUpdateEngine<T> {
    pub fn new() -> Self {
        SgdUpdateEngine {
            momentum_buffers: HashMap::new(),
        }
    }

    /// Velocity buffer of a parameter, if one has been created.
    pub fn momentum_buffer(&self, param: &ParamRef<T>) -> Option<&Tensor<T>> {
        self.momentum_buffers
            .get(&param_id(param))
            .filter(|slot| slot.belongs_to(param))
            .map(|slot| &slot.velocity)
    }

    /// Number of velocity buffers whose parameter is still alive.
    pub fn num_momentum_buffers(&self) -> usize {
        self.momentum_buffers.values().filter(|slot| slot.is_live()).count()
    }

    /// Drops every velocity buffer.
    pub fn reset(&mut self) {
        self.momentum_buffers.clear();
    }

    fn prune_dead_buffers(&mut self) {
        let before = self.momentum_buffers.len();
        self.momentum_buffers.retain(|_, slot| slot.is_live());
        let pruned = before - self.momentum_buffers.len();
        if pruned > 0 {
            log::trace!("Dropped {} momentum buffer(s) of freed parameters", pruned);
        }
    }
}

impl<T: AligFloat> UpdateEngine<T> for SgdUpdateEngine<T> {
    fn apply_updates(
        &mut self,
        grads_and_params: &[GradAndParam<T>],
        mode: MomentumMode<T>,
    ) -> Result<(), AligError> {
        check_unique_params(grads_and_params)?;
        self.prune_dead_buffers();

        // Lock and validate everything first so that an error leaves every
        // parameter untouched.
        let mut pending: Vec<(&ParamRef<T>, &Tensor<T>, RwLockWriteGuard<'_, Parameter<T>>)> =
            Vec::with_capacity(grads_and_params.len());
        for (grad_opt, param_arc) in grads_and_params.iter() {
            let grad = match grad_opt {
                Some(g) => g,
                None => {
                    log::trace!("Skipping parameter without gradient in SGD step");
                    continue;
                }
            };

            let param = param_arc.write().map_err(|e| AligError::LockError {
                lock_type: "write".to_string(),
                reason: format!("Failed to lock parameter in SGD step: {}", e),
            })?;

            if param.shape() != grad.shape() {
                return Err(AligError::ShapeMismatch {
                    expected: param.shape().to_vec(),
                    actual: grad.shape().to_vec(),
                    operation: format!("Parameter {} and Gradient in SGD step", param.display_name()),
                });
            }

            if let Some(buffer) = self.momentum_buffer(param_arc) {
                if matches!(mode, MomentumMode::Nesterov { .. }) && buffer.shape() != grad.shape() {
                    return Err(AligError::ShapeMismatch {
                        expected: buffer.shape().to_vec(),
                        actual: grad.shape().to_vec(),
                        operation: format!("Momentum buffer of {} in SGD step", param.display_name()),
                    });
                }
            }

            pending.push((param_arc, grad, param));
        }

        for (param_arc, grad, mut param) in pending {
            let param_tensor: &mut Tensor<T> = &mut param.tensor;
            match mode {
                MomentumMode::Disabled => {
                    param_tensor.sub_(grad)?;
                }
                MomentumMode::Nesterov { momentum } => {
                    let id = param_id(param_arc);
                    if self
                        .momentum_buffers
                        .get(&id)
                        .map_or(false, |slot| !slot.belongs_to(param_arc))
                    {
                        self.momentum_buffers.remove(&id);
                    }
                    let slot = self.momentum_buffers.entry(id).or_insert_with(|| {
                        log::trace!("Creating momentum buffer of shape {:?}", grad.shape());
                        MomentumSlot {
                            owner: Arc::downgrade(param_arc),
                            velocity: zeros_like(grad),
                        }
                    });
                    let buffer = &mut slot.velocity;
                    buffer.mul_scalar_(momentum);
                    buffer.add_(grad)?;

                    let mut nesterov_update = grad.clone();
                    nesterov_update.add_scaled_(buffer, momentum)?;
                    param_tensor.sub_(&nesterov_update)?;
                }
            }
        }
        Ok(())
    }
}
