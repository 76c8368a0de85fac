use crate::error::AligError;
use crate::optim::engine::MomentumMode;
use crate::types::AligFloat;

/// Default numerical-stability term added to the squared gradient norm.
pub const DEFAULT_EPSILON: f64 = 1e-5;

/// Hyperparameters of the AliG optimizer.
///
/// The configuration is fixed once the optimizer is built: the optimizer keeps
/// its own copy and exposes it read-only.
///
/// * `max_lr`: optional cap on the learning rate. `None` or `0` means uncapped.
///   When a cap is active the rate is clamped to `[0, max_lr]`.
/// * `epsilon`: added to the squared gradient norm to avoid a division by zero.
/// * `momentum`: `0` disables momentum, a positive value enables Nesterov
///   momentum with that coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AligConfig<T> {
    pub max_lr: Option<T>,
    pub epsilon: T,
    pub momentum: T,
}

impl<T: AligFloat> Default for AligConfig<T> {
    fn default() -> Self {
        AligConfig {
            max_lr: None,
            epsilon: num_traits::cast(DEFAULT_EPSILON).unwrap_or_else(T::epsilon),
            momentum: T::zero(),
        }
    }
}

impl<T: AligFloat> AligConfig<T> {
    pub fn new(max_lr: Option<T>, momentum: T, epsilon: T) -> Self {
        AligConfig {
            max_lr,
            epsilon,
            momentum,
        }
    }

    pub fn with_max_lr(mut self, max_lr: T) -> Self {
        self.max_lr = Some(max_lr);
        self
    }

    pub fn with_momentum(mut self, momentum: T) -> Self {
        self.momentum = momentum;
        self
    }

    pub fn with_epsilon(mut self, epsilon: T) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Checks the hyperparameters.
    ///
    /// # Errors
    ///
    /// `AligError::InvalidConfig` if `momentum` is negative or not finite,
    /// `epsilon` is not a finite positive number, or `max_lr` is negative or
    /// not finite.
    pub fn validate(&self) -> Result<(), AligError> {
        if !self.momentum.is_finite() || self.momentum < T::zero() {
            return Err(AligError::InvalidConfig(format!(
                "Momentum cannot be negative ({:?})",
                self.momentum
            )));
        }
        if !self.epsilon.is_finite() || self.epsilon <= T::zero() {
            return Err(AligError::InvalidConfig(format!(
                "epsilon must be a finite positive number ({:?})",
                self.epsilon
            )));
        }
        if let Some(max_lr) = self.max_lr {
            if !max_lr.is_finite() || max_lr < T::zero() {
                return Err(AligError::InvalidConfig(format!(
                    "max_lr must be a finite non-negative number ({:?})",
                    max_lr
                )));
            }
        }
        Ok(())
    }

    /// The cap actually applied to the learning rate, if any.
    pub fn effective_max_lr(&self) -> Option<T> {
        self.max_lr.filter(|&m| m > T::zero())
    }

    /// Momentum mode handed to the update engine.
    pub fn momentum_mode(&self) -> MomentumMode<T> {
        if self.momentum > T::zero() {
            MomentumMode::Nesterov {
                momentum: self.momentum,
            }
        } else {
            MomentumMode::Disabled
        }
    }
}
