//! # Fitting a linear model with AliG
//!
//! Trains `y = X w` on synthetic data that the model can fit exactly (the
//! interpolation regime AliG is designed for), once without momentum and
//! once with Nesterov momentum, and prints the loss and the learning rate
//! chosen by AliG at each step.
//!
//! Gradients are written by hand and plugged in as a closure, so no autograd
//! engine is involved.
//!
//! ## Running
//! `RUST_LOG=debug cargo run --example linear_regression`

use alig_core::optim::{AligConfig, AligOptimizer, GradAndParam, Optimizer};
use alig_core::{AligError, ParamRef, Parameter, Tensor};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

const NUM_SAMPLES: usize = 128;
const TRUE_WEIGHTS: [f64; 4] = [0.5, -1.5, 2.0, 0.25];
const STEPS: usize = 60;

struct Dataset {
    inputs: Vec<Vec<f64>>,
    targets: Vec<f64>,
}

impl Dataset {
    fn synthetic(seed: u64) -> Result<Self, Box<dyn std::error::Error>> {
        let mut rng = StdRng::seed_from_u64(seed);
        let normal = Normal::new(0.0, 1.0)?;
        let inputs: Vec<Vec<f64>> = (0..NUM_SAMPLES)
            .map(|_| TRUE_WEIGHTS.iter().map(|_| normal.sample(&mut rng)).collect())
            .collect();
        let targets = inputs.iter().map(|x| dot(x, &TRUE_WEIGHTS)).collect();
        Ok(Dataset { inputs, targets })
    }

    fn residuals(&self, w: &[f64]) -> Vec<f64> {
        self.inputs
            .iter()
            .zip(self.targets.iter())
            .map(|(x, y)| dot(x, w) - y)
            .collect()
    }

    fn loss(&self, weights: &ParamRef<f64>) -> f64 {
        let w = weights.read().map(|p| p.data().to_vec()).unwrap_or_default();
        let r = self.residuals(&w);
        r.iter().map(|v| v * v).sum::<f64>() / (2.0 * r.len() as f64)
    }

    fn gradients(&self, params: &[ParamRef<f64>]) -> Result<Vec<GradAndParam<f64>>, AligError> {
        let n = self.inputs.len() as f64;
        let mut out = Vec::with_capacity(params.len());
        for param in params {
            let w = param
                .read()
                .map_err(|e| AligError::LockError {
                    lock_type: "read".to_string(),
                    reason: e.to_string(),
                })?
                .data()
                .to_vec();
            let mut grad = vec![0.0; w.len()];
            for (x, r) in self.inputs.iter().zip(self.residuals(&w)) {
                for (g, xi) in grad.iter_mut().zip(x) {
                    *g += r * xi / n;
                }
            }
            let len = grad.len();
            out.push((Some(Tensor::new(grad, vec![len])?), param.clone()));
        }
        Ok(out)
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn run(label: &str, config: AligConfig<f64>, data: &Dataset) -> Result<(), Box<dyn std::error::Error>> {
    let weights = Parameter::new_ref(
        Tensor::new(vec![0.0; TRUE_WEIGHTS.len()], vec![TRUE_WEIGHTS.len()])?,
        Some("weights".to_string()),
    );
    let mut optimizer = AligOptimizer::with_sgd(config)?.with_name(label);
    let mut gradients = |_loss: f64, params: &[ParamRef<f64>]| data.gradients(params);

    println!("--- {} ---", label);
    for step in 0..STEPS {
        let loss = data.loss(&weights);
        let lr = optimizer.step(loss, &[weights.clone()], &mut gradients)?;
        if step % 10 == 0 {
            println!("step {:3}  loss {:.6e}  lr {:.4}", step, loss, lr);
        }
    }
    println!("final loss {:.6e}, weights {:?}", data.loss(&weights), weights.read().map(|w| w.data().to_vec()).unwrap_or_default());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let data = Dataset::synthetic(2024)?;

    run("AliG", AligConfig::default(), &data)?;
    run(
        "AliG + Nesterov",
        AligConfig::default().with_momentum(0.5).with_max_lr(0.5),
        &data,
    )?;
    Ok(())
}
