use crate::tensor::Tensor;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, RwLock};

/// Shared handle to a trainable parameter.
///
/// Parameters are owned by the model and mutated in place by the update
/// engine, hence the `Arc<RwLock<..>>`. Two handles refer to the same
/// parameter iff they point to the same allocation (see [`param_id`]).
pub type ParamRef<T> = Arc<RwLock<Parameter<T>>>;

/// A named tensor holding learnable values.
pub struct Parameter<T> {
    pub tensor: Tensor<T>,
    pub name: Option<String>,
}

impl<T> Parameter<T> {
    /// Creates a new Parameter from a Tensor and an optional name.
    pub fn new(tensor: Tensor<T>, name: Option<String>) -> Self {
        Parameter { tensor, name }
    }

    /// Wraps a new parameter into a shareable [`ParamRef`].
    pub fn new_ref(tensor: Tensor<T>, name: Option<String>) -> ParamRef<T> {
        Arc::new(RwLock::new(Parameter::new(tensor, name)))
    }

    /// Name used in logs and error messages.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    /// Consumes the Parameter and returns the underlying Tensor.
    pub fn into_inner(self) -> Tensor<T> {
        self.tensor
    }
}

/// Identity of a parameter: the address of its shared allocation.
///
/// Used as key for per-parameter state (momentum buffers) and to detect a
/// parameter passed twice to the same step.
pub fn param_id<T>(param: &ParamRef<T>) -> usize {
    Arc::as_ptr(param) as *const () as usize
}

// Allow accessing the underlying Tensor via Deref.
impl<T> Deref for Parameter<T> {
    type Target = Tensor<T>;

    fn deref(&self) -> &Self::Target {
        &self.tensor
    }
}

impl<T> DerefMut for Parameter<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.tensor
    }
}

impl<T: fmt::Debug> fmt::Debug for Parameter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parameter({}, {:?})", self.display_name(), self.tensor)
    }
}
