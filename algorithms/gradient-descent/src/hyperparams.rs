use gradient::{Float, ParamGuard};
use ndarray::Array1;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;

use crate::error::{GradientDescentError, Result};

/// A verified hyper-parameter set ready for the estimation of a linear model with gradient
/// descent
///
/// See [`GradientDescentParams`](crate::GradientDescentParams) for more information.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientDescentValidParams<F, R> {
    pub(crate) regularize: bool,
    pub(crate) with_bias: bool,
    pub(crate) alpha: F,
    pub(crate) max_iterations: Option<u64>,
    pub(crate) initial_params: Option<Array1<F>>,
    pub(crate) rng: R,
}

impl<F: Float, R> GradientDescentValidParams<F, R> {
    pub fn regularize(&self) -> bool {
        self.regularize
    }

    pub fn with_bias(&self) -> bool {
        self.with_bias
    }

    pub fn alpha(&self) -> F {
        self.alpha
    }

    pub fn max_iterations(&self) -> Option<u64> {
        self.max_iterations
    }

    pub fn initial_params(&self) -> Option<&Array1<F>> {
        self.initial_params.as_ref()
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Relative change of the cost below which the descent stops
    ///
    /// The regularized cost keeps a non-zero penalty at its minimum, so its threshold is much
    /// tighter: `1e-10` against `1e-5` for the plain least squares cost.
    pub fn epsilon(&self) -> F {
        if self.regularize {
            F::cast(1e-10)
        } else {
            F::cast(1e-5)
        }
    }
}

/// A hyper-parameter set for gradient descent linear regression
///
/// Minimizes the half mean squared error
/// ```ignore
/// 1 / (2 * n_samples) * ||X w - y||^2_2
/// ```
/// or, when regularizing, the ridge objective
/// ```ignore
/// 1 / (2 * n_samples) * ||X w - y||^2_2 + lambda / (2 * n_samples) * ||w||^2_2
/// ```
/// with `lambda = 0.2 * n_samples / alpha`. When the bias is enabled a column of ones is
/// appended to `X` and its weight, the intercept, is the last entry of `w`.
///
/// # Parameters
/// | Name | Default | Purpose | Range |
/// | :--- | :--- | :---| :--- |
/// | [regularize](Self::regularize) | `true` | Add the L2 penalty to the cost | `false`, `true` |
/// | [with_bias](Self::with_bias) | `true` | Fit an intercept | `false`, `true` |
/// | [alpha](Self::alpha) | `3e-9` | Step size of each update | `(0, inf)` |
/// | [max_iterations](Self::max_iterations) | `None` | Upper bound on the number of updates | `[1, inf)` |
/// | [initial_params](Self::initial_params) | random in `[0, 1)` | Starting point of the descent | finite values |
/// | [rng](Self::rng) | `Xoshiro256Plus` | Source of the random starting point | |
///
/// # Errors
///
/// Returns [`InvalidAlpha`](GradientDescentError::InvalidAlpha) if `alpha` is not strictly
/// positive and finite.
///
/// Returns [`InvalidMaxIterations`](GradientDescentError::InvalidMaxIterations) if the iteration
/// cap is zero.
///
/// Returns [`InvalidInitialParams`](GradientDescentError::InvalidInitialParams) if the initial
/// guess holds `NaN` or infinite values.
///
/// # Example
///
/// ```rust
/// use gradient::prelude::*;
/// use gradient_descent::{GradientDescent, GradientDescentError};
/// use ndarray::array;
///
/// let ds = Dataset::new(array![[1.0], [2.0], [3.0], [4.0]], array![2.0, 4.0, 6.0, 8.0]);
///
/// let unchecked_params = GradientDescent::params()
///     .regularize(false)
///     .with_bias(false)
///     .alpha(0.01)
///     .max_iterations(Some(10_000));
///
/// // fit model with unchecked parameter set
/// let model = unchecked_params.fit(&ds)?;
///
/// // transform into a verified parameter set
/// let checked_params = unchecked_params.check()?;
///
/// // Regenerate model with the verified parameters, this only returns
/// // errors originating from the fitting process
/// let model = checked_params.fit(&ds)?;
/// # Ok::<(), GradientDescentError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GradientDescentParams<F, R>(pub(crate) GradientDescentValidParams<F, R>);

impl<F: Float> Default for GradientDescentParams<F, Xoshiro256Plus> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> GradientDescentParams<F, Xoshiro256Plus> {
    /// Create default hyperparameters, see the table above
    pub fn new() -> Self {
        Self::default_with_rng(Xoshiro256Plus::seed_from_u64(42))
    }
}

/// Configure and fit a gradient descent model
impl<F: Float, R: Rng + Clone> GradientDescentParams<F, R> {
    /// Create default hyperparameters with a pre-defined random number generator
    pub fn default_with_rng(rng: R) -> Self {
        Self(GradientDescentValidParams {
            regularize: true,
            with_bias: true,
            alpha: F::cast(3e-9),
            max_iterations: None,
            initial_params: None,
            rng,
        })
    }

    /// Enable the L2 penalty on the parameters.
    ///
    /// Also selects the convergence threshold, see
    /// [`epsilon`](GradientDescentValidParams::epsilon).
    pub fn regularize(mut self, regularize: bool) -> Self {
        self.0.regularize = regularize;
        self
    }

    /// Append a constant feature of ones to every sample, its weight is the intercept.
    pub fn with_bias(mut self, with_bias: bool) -> Self {
        self.0.with_bias = with_bias;
        self
    }

    /// Set the step size of the parameter update.
    ///
    /// Defaults to `3e-9` if not set
    ///
    /// `alpha` must be positive and finite
    pub fn alpha(mut self, alpha: F) -> Self {
        self.0.alpha = alpha;
        self
    }

    /// Bound the number of updates. A descent that has not settled by then fails with
    /// [`NotConverged`](GradientDescentError::NotConverged).
    ///
    /// Defaults to `None`, the descent then runs until the cost settles.
    pub fn max_iterations(mut self, max_iterations: Option<u64>) -> Self {
        self.0.max_iterations = max_iterations;
        self
    }

    /// Configure the parameters from where the descent starts.
    ///
    /// The array must have one entry per feature, plus one for the intercept when the bias is
    /// enabled. Without an initial guess every parameter is drawn uniformly from `[0, 1)`.
    pub fn initial_params(mut self, params: Array1<F>) -> Self {
        self.0.initial_params = Some(params);
        self
    }

    /// Set the random number generator used to draw the initial guess.
    ///
    /// The generator is cloned on every fit, so fitting twice with the same parameter set starts
    /// from the same point.
    pub fn rng<R2: Rng + Clone>(self, rng: R2) -> GradientDescentParams<F, R2> {
        let GradientDescentValidParams {
            regularize,
            with_bias,
            alpha,
            max_iterations,
            initial_params,
            ..
        } = self.0;

        GradientDescentParams(GradientDescentValidParams {
            regularize,
            with_bias,
            alpha,
            max_iterations,
            initial_params,
            rng,
        })
    }
}

impl<F: Float, R> ParamGuard for GradientDescentParams<F, R> {
    type Checked = GradientDescentValidParams<F, R>;
    type Error = GradientDescentError;

    /// Validate the hyper parameters
    fn check_ref(&self) -> Result<&Self::Checked> {
        if !self.0.alpha.is_finite() || self.0.alpha <= F::zero() {
            Err(GradientDescentError::InvalidAlpha(
                self.0.alpha.to_f32().unwrap_or(f32::NAN),
            ))
        } else if self.0.max_iterations == Some(0) {
            Err(GradientDescentError::InvalidMaxIterations(0))
        } else if self
            .0
            .initial_params
            .as_ref()
            .map_or(false, |params| params.iter().any(|x| !x.is_finite()))
        {
            Err(GradientDescentError::InvalidInitialParams)
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
