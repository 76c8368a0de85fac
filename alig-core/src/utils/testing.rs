use crate::nn::parameter::{ParamRef, Parameter};
use crate::tensor::Tensor;
use crate::types::AligFloat;

/// Helper to create a named, shared parameter for testing purposes.
pub(crate) fn create_param<T: AligFloat>(data: Vec<T>, shape: Vec<usize>, name: &str) -> ParamRef<T> {
    let tensor = Tensor::new(data, shape).expect("Failed to create test parameter");
    Parameter::new_ref(tensor, Some(name.to_string()))
}

/// Helper to create a gradient tensor for testing purposes.
pub(crate) fn create_grad<T: AligFloat>(data: Vec<T>, shape: Vec<usize>) -> Tensor<T> {
    Tensor::new(data, shape).expect("Failed to create test gradient")
}

/// Copies the current values of a parameter.
pub(crate) fn param_data<T: AligFloat>(param: &ParamRef<T>) -> Vec<T> {
    param.read().unwrap().data().to_vec()
}

/// Panics with the first differing index if two slices are not element-wise close.
pub(crate) fn assert_vec_near(actual: &[f64], expected: &[f64], tolerance: f64) {
    assert_eq!(actual.len(), expected.len(), "Vector lengths differ");
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (a - e).abs();
        if diff > tolerance {
            panic!(
                "Mismatch at index {}: actual={}, expected={}, diff={}, tolerance={}",
                i, a, e, diff, tolerance
            );
        }
    }
}
