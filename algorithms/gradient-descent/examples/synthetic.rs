use env_logger::Env;
use gradient::prelude::*;
use gradient_datasets::generate;
use gradient_descent::{GradientDescent, Result};
use ndarray::{array, Array1};
use rand::{rngs::SmallRng, SeedableRng};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // y = 1.5 x0 - 2 x1 + 0.5 x2 + 3 with a bit of noise
    let mut rng = SmallRng::seed_from_u64(42);
    let weights = array![1.5, -2.0, 0.5];
    let (train, valid) = generate::linear(500, &weights, 3.0, 0.1, &mut rng).split_with_ratio(0.8);

    for regularize in [false, true] {
        let model = GradientDescent::params()
            .regularize(regularize)
            .alpha(0.5)
            .initial_params(Array1::zeros(weights.len() + 1))
            .max_iterations(Some(1_000_000))
            .fit(&train)?;

        let predictions = model.predict(&valid);
        let r2 = predictions.r2(valid.targets().view())?;

        println!("regularize: {}", regularize);
        println!("  steps:     {}", model.n_steps());
        println!("  weights:   {}", model.weights());
        println!("  intercept: {}", model.intercept());
        println!("  r2 on the validation set: {:.4}", r2);
    }

    Ok(())
}
