// src/tensor/tests.rs

use super::*;
use approx::assert_relative_eq;

#[test]
fn test_tensor_creation() {
    let t = Tensor::new(vec![1.0_f32, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    assert_eq!(t.shape(), &[2, 2]);
    assert_eq!(t.numel(), 4);
    assert_eq!(t.data(), &[1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_tensor_creation_error() {
    let result = Tensor::new(vec![1.0_f64, 2.0, 3.0], vec![2, 2]);
    assert_eq!(
        result,
        Err(AligError::TensorCreationError {
            data_len: 3,
            shape: vec![2, 2]
        })
    );
}

#[test]
fn test_scalar_tensor() {
    let t = Tensor::scalar(3.5_f32);
    assert!(t.shape().is_empty());
    assert_eq!(t.numel(), 1);
    assert_eq!(Tensor::new(vec![3.5_f32], vec![]).unwrap(), t);
}

#[test]
fn test_squared_norm() {
    let t = Tensor::new(vec![3.0_f64, 4.0], vec![2]).unwrap();
    assert_relative_eq!(t.squared_norm(), 25.0);
    let z: Tensor<f64> = zeros(&[3, 2]);
    assert_eq!(z.squared_norm(), 0.0);
}

#[test]
fn test_mul_scalar_keeps_shape() {
    let t = Tensor::new(vec![1.0_f32, -2.0, 0.5, 0.0], vec![2, 2]).unwrap();
    let scaled = t.mul_scalar(2.0);
    assert_eq!(scaled.shape(), &[2, 2]);
    assert_eq!(scaled.data(), &[2.0, -4.0, 1.0, 0.0]);

    let mut inplace = t.clone();
    inplace.mul_scalar_(2.0);
    assert_eq!(inplace, scaled);
}

#[test]
fn test_add_sub_inplace() {
    let mut a = Tensor::new(vec![1.0_f64, 2.0], vec![2]).unwrap();
    let b = Tensor::new(vec![0.5_f64, 0.25], vec![2]).unwrap();
    a.add_(&b).unwrap();
    assert_eq!(a.data(), &[1.5, 2.25]);
    a.sub_(&b).unwrap();
    assert_eq!(a.data(), &[1.0, 2.0]);
    a.add_scaled_(&b, -4.0).unwrap();
    assert_eq!(a.data(), &[-1.0, 1.0]);
}

#[test]
fn test_add_shape_mismatch_leaves_tensor_untouched() {
    let mut a = Tensor::new(vec![1.0_f32, 2.0], vec![2]).unwrap();
    let b = Tensor::new(vec![1.0_f32, 2.0], vec![1, 2]).unwrap();
    let result = a.add_(&b);
    assert!(matches!(
        result,
        Err(AligError::ShapeMismatch { ref expected, ref actual, ref operation })
            if expected == &vec![2] && actual == &vec![1, 2] && operation == "add_scaled_"
    ));
    assert_eq!(a.data(), &[1.0, 2.0]);
}

#[test]
fn test_creation_helpers() {
    let f = full(&[2], 7.0_f32);
    assert_eq!(f.data(), &[7.0, 7.0]);
    let z = zeros_like(&f);
    assert_eq!(z.shape(), f.shape());
    assert_eq!(z.data(), &[0.0, 0.0]);
    assert!(from_vec(vec![1.0_f32], &[2]).is_err());
}
