// Shared helpers for the integration tests.

use alig_core::optim::GradAndParam;
use alig_core::{AligError, ParamRef, Parameter, Tensor};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Least-squares problem `y = X w*` that a linear model can fit exactly,
/// i.e. a problem in the interpolation regime.
#[allow(dead_code)]
pub struct LinearRegression {
    pub inputs: Vec<Vec<f64>>,
    pub targets: Vec<f64>,
}

#[allow(dead_code)]
impl LinearRegression {
    pub fn realizable(num_samples: usize, true_weights: &[f64], seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let inputs: Vec<Vec<f64>> = (0..num_samples)
            .map(|_| {
                true_weights
                    .iter()
                    .map(|_| StandardNormal.sample(&mut rng))
                    .collect()
            })
            .collect();
        let targets = inputs.iter().map(|x| dot(x, true_weights)).collect();
        LinearRegression { inputs, targets }
    }

    /// `1/(2n) * sum_i (x_i . w - y_i)^2`
    pub fn loss(&self, weights: &ParamRef<f64>) -> f64 {
        let w = weights.read().unwrap().data().to_vec();
        let n = self.inputs.len() as f64;
        self.inputs
            .iter()
            .zip(self.targets.iter())
            .map(|(x, y)| (dot(x, &w) - y).powi(2))
            .sum::<f64>()
            / (2.0 * n)
    }

    /// Gradient engine for the weight parameter.
    pub fn gradients(&self, _loss: f64, params: &[ParamRef<f64>]) -> Result<Vec<GradAndParam<f64>>, AligError> {
        let n = self.inputs.len() as f64;
        params
            .iter()
            .map(|param| -> Result<GradAndParam<f64>, AligError> {
                let w = param.read().unwrap().data().to_vec();
                let mut grad = vec![0.0; w.len()];
                for (x, y) in self.inputs.iter().zip(self.targets.iter()) {
                    let residual = dot(x, &w) - y;
                    for (g, xi) in grad.iter_mut().zip(x.iter()) {
                        *g += residual * xi / n;
                    }
                }
                let len = grad.len();
                Ok((Some(Tensor::new(grad, vec![len])?), param.clone()))
            })
            .collect()
    }
}

#[allow(dead_code)]
pub fn zero_weights(dim: usize) -> ParamRef<f64> {
    Parameter::new_ref(Tensor::new(vec![0.0; dim], vec![dim]).unwrap(), Some("weights".to_string()))
}

#[allow(dead_code)]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
