// src/tensor/mod.rs

use crate::error::AligError;
use crate::types::AligFloat;

pub mod create;

pub use create::{from_vec, full, zeros, zeros_like};

/// A dense, contiguous, CPU-resident buffer with a shape.
///
/// This is only the carrier for parameter values and gradients exchanged with
/// the gradient and update engines. It deliberately offers the handful of
/// element-wise operations the optimizer needs and nothing more.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<T> {
    data: Vec<T>,
    shape: Vec<usize>,
}

impl<T: AligFloat> Tensor<T> {
    /// Creates a new Tensor with the given data and shape.
    ///
    /// An empty shape denotes a scalar and expects exactly one element.
    ///
    /// # Errors
    ///
    /// Returns `AligError::TensorCreationError` if `data.len()` differs from
    /// the product of `shape`.
    pub fn new(data: Vec<T>, shape: Vec<usize>) -> Result<Self, AligError> {
        let numel: usize = shape.iter().product();
        if data.len() != numel {
            return Err(AligError::TensorCreationError {
                data_len: data.len(),
                shape,
            });
        }
        Ok(Tensor { data, shape })
    }

    /// Creates a 0-dimensional tensor holding `value`.
    pub fn scalar(value: T) -> Self {
        Tensor {
            data: vec![value],
            shape: vec![],
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of elements.
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Sum of the squares of all elements, i.e. the squared Euclidean norm of
    /// the flattened tensor.
    pub fn squared_norm(&self) -> T {
        self.data.iter().fold(T::zero(), |acc, &x| acc + x * x)
    }

    /// Returns a new tensor with every element multiplied by `scalar`.
    pub fn mul_scalar(&self, scalar: T) -> Self {
        Tensor {
            data: self.data.iter().map(|&x| x * scalar).collect(),
            shape: self.shape.clone(),
        }
    }

    /// Multiplies every element by `scalar` in place.
    pub fn mul_scalar_(&mut self, scalar: T) {
        self.data.iter_mut().for_each(|x| *x *= scalar);
    }

    /// Performs `self += alpha * other` in place.
    ///
    /// # Errors
    ///
    /// Returns `AligError::ShapeMismatch` if the shapes differ; `self` is left
    /// untouched in that case.
    pub fn add_scaled_(&mut self, other: &Tensor<T>, alpha: T) -> Result<(), AligError> {
        self.check_same_shape(other, "add_scaled_")?;
        self.data
            .iter_mut()
            .zip(other.data.iter())
            .for_each(|(a, &b)| *a += alpha * b);
        Ok(())
    }

    /// Performs `self += other` in place.
    pub fn add_(&mut self, other: &Tensor<T>) -> Result<(), AligError> {
        self.add_scaled_(other, T::one())
    }

    /// Performs `self -= other` in place.
    pub fn sub_(&mut self, other: &Tensor<T>) -> Result<(), AligError> {
        self.add_scaled_(other, -T::one())
    }

    pub(crate) fn check_same_shape(&self, other: &Tensor<T>, operation: &str) -> Result<(), AligError> {
        if self.shape != other.shape {
            return Err(AligError::ShapeMismatch {
                expected: self.shape.clone(),
                actual: other.shape.clone(),
                operation: operation.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
