//! # Gradient descent linear regression
//!
//! ## The Big Picture
//!
//! `gradient-descent` fits the parameters of a linear model with batch gradient descent. It is
//! part of the `gradient` workspace, which also provides the dataset container, the fitting
//! traits and CSV loading.
//!
//! ## Current state
//!
//! The descent minimizes the half mean squared error, optionally with an L2 (ridge) penalty, and
//! can append a constant feature to fit an intercept. It stops once the relative change of the
//! cost between two steps drops below a threshold, `1e-5` for the plain cost and `1e-10` for
//! the regularized one. An optional iteration cap turns a descent that never settles into a
//! [`NotConverged`](GradientDescentError::NotConverged) error.
//!
//! Models are built either through the hyperparameters,
//! [`GradientDescent::params()`], and the `Fit` trait, or with the stateful
//! [`GradientDescent`] estimator which keeps the last fitted model.
//!
//! ## Examples
//!
//! There is an usage example in the `examples/` directory. To run, use:
//!
//! ```bash
//! $ cargo run --example synthetic
//! ```
//!
mod algorithm;
mod error;
mod hyperparams;
mod objective;

pub use algorithm::{add_bias, hypothesis, FittedGradientDescent};
pub use error::{GradientDescentError, Result};
pub use hyperparams::{GradientDescentParams, GradientDescentValidParams};
pub use objective::{LeastSquares, Objective, Ridge};

use gradient::dataset::AsTargets;
use gradient::{Float, ParamGuard};
use ndarray::{Array1, ArrayBase, Data, Ix2};
use rand::Rng;
use rand_xoshiro::Xoshiro256Plus;

/// Gradient descent estimator
///
/// Owns a checked hyperparameter set and, once [`fit`](Self::fit) succeeded, the fitted model.
/// Every successful fit replaces the previous model, a failed fit leaves it untouched.
///
/// ```rust
/// use gradient_descent::{GradientDescent, GradientDescentError};
/// use ndarray::array;
///
/// let params = GradientDescent::<f64>::params()
///     .regularize(false)
///     .with_bias(false)
///     .alpha(0.01);
/// let mut estimator = GradientDescent::new(params)?;
///
/// let features = array![[1.0], [2.0], [3.0], [4.0]];
/// estimator.fit(&features, &array![2.0, 4.0, 6.0, 8.0], Some(array![0.5]))?;
///
/// let predictions = estimator.predict(&array![[5.0]])?;
/// assert!((predictions[0] - 10.0).abs() < 1e-2);
/// # Ok::<(), GradientDescentError>(())
/// ```
#[derive(Clone, Debug)]
pub struct GradientDescent<F, R = Xoshiro256Plus> {
    params: GradientDescentValidParams<F, R>,
    fitted: Option<FittedGradientDescent<F>>,
}

impl<F: Float> GradientDescent<F> {
    /// Create default hyperparameters
    pub fn params() -> GradientDescentParams<F, Xoshiro256Plus> {
        GradientDescentParams::new()
    }

    /// Create default hyperparameters drawing the initial guess from `rng`
    pub fn params_with_rng<R: Rng + Clone>(rng: R) -> GradientDescentParams<F, R> {
        GradientDescentParams::default_with_rng(rng)
    }
}

impl<F: Float, R: Rng + Clone> GradientDescent<F, R> {
    /// Check the hyperparameters and create an estimator without a fitted model
    pub fn new(params: GradientDescentParams<F, R>) -> Result<Self> {
        Ok(GradientDescent {
            params: params.check()?,
            fitted: None,
        })
    }

    /// Fit the parameters to `features`, shape `(n_samples, n_features)`, and `labels`, shape
    /// `(n_samples)` or `(n_samples, 1)`.
    ///
    /// The descent starts from `initial_params` when given, then from the initial guess of the
    /// hyperparameters, and otherwise from a random point in `[0, 1)`.
    pub fn fit<D, T>(
        &mut self,
        features: &ArrayBase<D, Ix2>,
        labels: &T,
        initial_params: Option<Array1<F>>,
    ) -> Result<()>
    where
        D: Data<Elem = F>,
        T: AsTargets<Elem = F>,
    {
        let labels = labels.try_single_target()?;
        let initial_params = initial_params.or_else(|| self.params.initial_params.clone());

        let fitted = self
            .params
            .fit_records(features.view(), labels, initial_params)?;
        self.fitted = Some(fitted);

        Ok(())
    }

    /// Predict the targets of `features` with the last fitted model
    pub fn predict<D: Data<Elem = F>>(&self, features: &ArrayBase<D, Ix2>) -> Result<Array1<F>> {
        self.fitted
            .as_ref()
            .ok_or(GradientDescentError::NotFitted)?
            .try_predict(features)
    }

    /// The last fitted model, if any
    pub fn fitted(&self) -> Option<&FittedGradientDescent<F>> {
        self.fitted.as_ref()
    }

    /// The fitted parameter vector, if any
    pub fn parameters(&self) -> Option<&Array1<F>> {
        self.fitted.as_ref().map(|fitted| fitted.params())
    }

    pub fn hyperparams(&self) -> &GradientDescentValidParams<F, R> {
        &self.params
    }

    /// Relative change of the cost below which the descent stops
    pub fn epsilon(&self) -> F {
        self.params.epsilon()
    }
}
