//! An error when fitting a linear model with gradient descent
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GradientDescentError>;

/// An error when fitting a linear model with gradient descent
#[derive(Error, Debug)]
pub enum GradientDescentError {
    #[error("alpha should be positive and finite, but is {0}")]
    InvalidAlpha(f32),
    #[error("max_iterations should be at least 1, but is {0}")]
    InvalidMaxIterations(u64),
    #[error("initial parameter guess must be finite")]
    InvalidInitialParams,
    #[error("at least one sample needed")]
    NotEnoughSamples,
    #[error("the model has to be fitted before predicting")]
    NotFitted,
    #[error("{what} mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    /// The iteration cap was reached before the cost settled
    #[error("cost did not settle after {iterations} iterations, last cost {cost}")]
    NotConverged { iterations: u64, cost: f64 },
    /// The cost became `NaN` or infinite, usually because `alpha` is too large
    #[error("cost diverged after {iterations} iterations")]
    Diverged { iterations: u64 },
    #[error(transparent)]
    BaseCrate(#[from] gradient::Error),
}
