//! Cost functions minimized by the descent
use gradient::Float;
use ndarray::{Array1, ArrayView1, ArrayView2};

/// Share of the step size the ridge penalty takes out of each parameter per update
const RIDGE_SHRINKAGE: f64 = 0.2;

/// A differentiable cost over the predictions of a linear model
///
/// `predictions` are always `features . params`, they are passed in so that the descent computes
/// the product once per step.
pub trait Objective<F: Float> {
    /// Number of steps between two progress records
    const PROGRESS_EVERY: u64;

    fn cost(&self, predictions: ArrayView1<F>, labels: ArrayView1<F>, params: ArrayView1<F>) -> F;

    /// Partial derivatives of the cost, one per column of `features`
    fn gradient(
        &self,
        predictions: ArrayView1<F>,
        labels: ArrayView1<F>,
        features: ArrayView2<F>,
        params: ArrayView1<F>,
    ) -> Array1<F>;
}

/// Half mean squared error, `sum((yhat - y)^2) / (2 * m)`
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LeastSquares;

impl<F: Float> Objective<F> for LeastSquares {
    const PROGRESS_EVERY: u64 = 1000;

    fn cost(&self, predictions: ArrayView1<F>, labels: ArrayView1<F>, _params: ArrayView1<F>) -> F {
        let m = F::cast(labels.len());
        let residuals = &predictions - &labels;

        residuals.dot(&residuals) / (m + m)
    }

    fn gradient(
        &self,
        predictions: ArrayView1<F>,
        labels: ArrayView1<F>,
        features: ArrayView2<F>,
        _params: ArrayView1<F>,
    ) -> Array1<F> {
        let m = F::cast(features.nrows());
        let residuals = &predictions - &labels;

        residuals.dot(&features) / m
    }
}

/// Half mean squared error with an L2 penalty on every parameter, the intercept included
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ridge<F> {
    lambda: F,
}

impl<F: Float> Ridge<F> {
    /// Penalty used by the regularized descent, `lambda = 0.2 * nsamples / alpha`
    pub fn new(nsamples: usize, alpha: F) -> Self {
        Self::with_lambda(F::cast(nsamples) * F::cast(RIDGE_SHRINKAGE) / alpha)
    }

    pub fn with_lambda(lambda: F) -> Self {
        Ridge { lambda }
    }

    pub fn lambda(&self) -> F {
        self.lambda
    }
}

impl<F: Float> Objective<F> for Ridge<F> {
    const PROGRESS_EVERY: u64 = 10;

    fn cost(&self, predictions: ArrayView1<F>, labels: ArrayView1<F>, params: ArrayView1<F>) -> F {
        let m = F::cast(labels.len());
        let penalty = self.lambda / (m + m) * params.dot(&params);

        LeastSquares.cost(predictions, labels, params) + penalty
    }

    fn gradient(
        &self,
        predictions: ArrayView1<F>,
        labels: ArrayView1<F>,
        features: ArrayView2<F>,
        params: ArrayView1<F>,
    ) -> Array1<F> {
        let m = F::cast(features.nrows());
        let mut gradient = LeastSquares.gradient(predictions, labels, features, params);
        gradient.scaled_add(self.lambda / m, &params);

        gradient
    }
}
