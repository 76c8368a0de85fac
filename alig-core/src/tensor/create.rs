// src/tensor/create.rs

use crate::error::AligError;
use crate::tensor::Tensor;
use crate::types::AligFloat;

/// Creates a new tensor filled with zeros with the specified shape.
pub fn zeros<T: AligFloat>(shape: &[usize]) -> Tensor<T> {
    full(shape, T::zero())
}

/// Creates a new tensor filled with `value` with the specified shape.
pub fn full<T: AligFloat>(shape: &[usize], value: T) -> Tensor<T> {
    let numel = shape.iter().product();
    // Length matches the shape by construction.
    Tensor {
        data: vec![value; numel],
        shape: shape.to_vec(),
    }
}

/// Creates a zero tensor with the same shape as `other`.
/// Used to initialize momentum buffers.
pub fn zeros_like<T: AligFloat>(other: &Tensor<T>) -> Tensor<T> {
    zeros(other.shape())
}

/// Creates a new Tensor from a Vec and shape.
pub fn from_vec<T: AligFloat>(data_vec: Vec<T>, shape: &[usize]) -> Result<Tensor<T>, AligError> {
    Tensor::new(data_vec, shape.to_vec())
}
