mod common;

use alig_core::optim::{AligConfig, AligOptimizer, Optimizer};
use alig_core::{AligError, ParamRef};
use common::{init_logger, zero_weights, LinearRegression};

const TRUE_WEIGHTS: [f64; 3] = [1.0, -2.0, 0.5];

fn train(config: AligConfig<f64>, steps: usize) -> Result<(f64, f64, Vec<f64>), AligError> {
    init_logger();
    let problem = LinearRegression::realizable(64, &TRUE_WEIGHTS, 42);
    let weights = zero_weights(TRUE_WEIGHTS.len());
    let mut optimizer = AligOptimizer::with_sgd(config)?;
    let mut gradients = |loss: f64, params: &[ParamRef<f64>]| problem.gradients(loss, params);

    let initial_loss = problem.loss(&weights);
    let mut rates = Vec::with_capacity(steps);
    for _ in 0..steps {
        let loss = problem.loss(&weights);
        let lr = optimizer.step(loss, &[weights.clone()], &mut gradients)?;
        rates.push(lr);
    }
    Ok((initial_loss, problem.loss(&weights), rates))
}

#[test]
fn test_alig_without_momentum_fits_realizable_problem() -> Result<(), AligError> {
    let (initial_loss, final_loss, rates) = train(AligConfig::default(), 300)?;

    assert!(initial_loss > 1.0);
    assert!(final_loss < 1e-3 * initial_loss, "final loss {} too high", final_loss);
    assert!(rates.iter().all(|lr| lr.is_finite() && *lr >= 0.0));
    Ok(())
}

#[test]
fn test_alig_with_nesterov_momentum_fits_realizable_problem() -> Result<(), AligError> {
    let config = AligConfig::default().with_momentum(0.5).with_max_lr(0.25);
    let (initial_loss, final_loss, rates) = train(config, 400)?;

    assert!(final_loss < 1e-3 * initial_loss, "final loss {} too high", final_loss);
    assert!(rates.iter().all(|lr| (0.0..=0.25).contains(lr)));
    Ok(())
}

#[test]
fn test_capped_rate_never_exceeds_max_lr() -> Result<(), AligError> {
    let (_, final_loss, rates) = train(AligConfig::default().with_max_lr(0.01), 50)?;

    assert!(rates.iter().all(|lr| (0.0..=0.01).contains(lr)));
    // Far from the optimum the uncapped rate is larger, so the cap is hit.
    assert_eq!(rates[0], 0.01);
    assert!(final_loss.is_finite());
    Ok(())
}
