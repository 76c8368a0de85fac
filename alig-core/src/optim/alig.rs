// src/optim/alig.rs

use std::collections::HashSet;

use crate::error::AligError;
use crate::nn::parameter::{param_id, ParamRef};
use crate::optim::config::AligConfig;
use crate::optim::engine::{GradAndParam, GradientEngine, MomentumMode, UpdateEngine};
use crate::optim::optimizer_trait::Optimizer;
use crate::optim::sgd::SgdUpdateEngine;
use crate::optim::step_size::{compute_step, param_name, StepOutput};
use crate::types::AligFloat;

pub const DEFAULT_NAME: &str = "AliG";

/// The AliG optimizer.
///
/// Each step computes `lr = loss / (||g||^2 + epsilon)` (clamped to
/// `[0, max_lr]` if a cap is set), scales the gradients by `lr` and hands them
/// to the update engine, with Nesterov momentum when `momentum > 0`.
///
/// The only state kept here is the configuration; momentum buffers belong to
/// the update engine.
///
/// # Example
///
/// ```
/// use alig_core::optim::{AligConfig, AligOptimizer, Optimizer};
/// use alig_core::{Parameter, Tensor};
///
/// let w = Parameter::new_ref(Tensor::new(vec![1.0_f64, 1.0], vec![2])?, Some("w".into()));
/// let mut optimizer = AligOptimizer::with_sgd(AligConfig::default().with_max_lr(0.05))?;
///
/// let grads = vec![(Some(Tensor::new(vec![3.0, 4.0], vec![2])?), w.clone())];
/// let output = optimizer.apply_gradients(2.0, &grads)?;
/// assert_eq!(output.learning_rate, 0.05);
/// # Ok::<(), alig_core::AligError>(())
/// ```
#[derive(Debug)]
pub struct AligOptimizer<T: AligFloat, U: UpdateEngine<T> = SgdUpdateEngine<T>> {
    config: AligConfig<T>,
    mode: MomentumMode<T>,
    update_engine: U,
    name: String,
}

impl<T: AligFloat> AligOptimizer<T, SgdUpdateEngine<T>> {
    /// Creates an optimizer backed by the built-in [`SgdUpdateEngine`].
    pub fn with_sgd(config: AligConfig<T>) -> Result<Self, AligError> {
        Self::new(config, SgdUpdateEngine::new())
    }
}

impl<T: AligFloat, U: UpdateEngine<T>> AligOptimizer<T, U> {
    /// Creates a new `AligOptimizer`.
    ///
    /// # Errors
    ///
    /// `AligError::InvalidConfig` if the configuration is rejected by
    /// [`AligConfig::validate`] (e.g. negative momentum).
    pub fn new(config: AligConfig<T>, update_engine: U) -> Result<Self, AligError> {
        config.validate()?;
        let mode = config.momentum_mode();
        log::debug!(
            "Created {} optimizer: max_lr={:?}, epsilon={:?}, momentum mode={:?}",
            DEFAULT_NAME,
            config.effective_max_lr(),
            config.epsilon,
            mode
        );
        Ok(AligOptimizer {
            config,
            mode,
            update_engine,
            name: DEFAULT_NAME.to_string(),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn config(&self) -> &AligConfig<T> {
        &self.config
    }

    pub fn momentum_mode(&self) -> MomentumMode<T> {
        self.mode
    }

    pub fn update_engine(&self) -> &U {
        &self.update_engine
    }
}

impl<T: AligFloat, U: UpdateEngine<T>> Optimizer<T> for AligOptimizer<T, U> {
    fn step<G: GradientEngine<T>>(
        &mut self,
        loss: T,
        params: &[ParamRef<T>],
        gradient_engine: &mut G,
    ) -> Result<T, AligError> {
        let grads_and_params = gradient_engine.compute_gradients(loss, params)?;
        check_matches_params(params, &grads_and_params)?;
        let output = self.apply_gradients(loss, &grads_and_params)?;
        Ok(output.learning_rate)
    }

    fn apply_gradients(
        &mut self,
        loss: T,
        grads_and_params: &[GradAndParam<T>],
    ) -> Result<StepOutput<T>, AligError> {
        let output = compute_step(&self.config, loss, grads_and_params)?;
        log::debug!(
            "{} step: loss={:?}, lr={:?}, grad_sq_norm={:?}, clamped={}, params={}",
            self.name,
            loss,
            output.learning_rate,
            output.grad_sq_norm,
            output.clamped,
            output.grads_and_params.len()
        );
        self.update_engine
            .apply_updates(&output.grads_and_params, self.mode)?;
        Ok(output)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Fails unless `grads_and_params` holds exactly the parameters of `params`.
///
/// Duplicates among the returned pairs are left to [`compute_step`].
fn check_matches_params<T>(params: &[ParamRef<T>], grads_and_params: &[GradAndParam<T>]) -> Result<(), AligError> {
    if grads_and_params.len() != params.len() {
        return Err(AligError::GradientMismatch {
            reason: format!(
                "expected {} gradient/parameter pair(s), got {}",
                params.len(),
                grads_and_params.len()
            ),
        });
    }
    let requested: HashSet<usize> = params.iter().map(param_id).collect();
    for (_, param) in grads_and_params {
        if !requested.contains(&param_id(param)) {
            return Err(AligError::GradientMismatch {
                reason: format!("parameter {:?} was not passed to the step", param_name(param)),
            });
        }
    }
    Ok(())
}
