//! Common metrics for regression
//!
//! This module implements common comparison metrices for continuous variables.

use ndarray::{ArrayBase, ArrayView1, Data, Ix1};

use crate::{
    error::{Error, Result},
    Float,
};

/// Regression metrices trait
///
/// Implemented for one-dimensional predictions, compared against the ground truth with
/// `prediction.r2(truth.view())`.
pub trait Regression<F: Float> {
    /// Maximal error between two continuous variables
    fn max_error(&self, compare_to: ArrayView1<F>) -> Result<F>;
    /// Mean error between two continuous variables
    fn mean_absolute_error(&self, compare_to: ArrayView1<F>) -> Result<F>;
    /// Mean squared error between two continuous variables
    fn mean_squared_error(&self, compare_to: ArrayView1<F>) -> Result<F>;
    /// R squared coefficient, is the proportion of the variance in the dependent variable that is
    /// predictable from the independent variable.
    fn r2(&self, compare_to: ArrayView1<F>) -> Result<F>;
    /// Same as R-Squared but with biased variance
    fn explained_variance(&self, compare_to: ArrayView1<F>) -> Result<F>;
}

impl<F: Float, D: Data<Elem = F>> Regression<F> for ArrayBase<D, Ix1> {
    fn max_error(&self, compare_to: ArrayView1<F>) -> Result<F> {
        let diff = residuals(self, compare_to)?;

        Ok(diff.iter().map(|x| x.abs()).fold(F::neg_infinity(), F::max))
    }

    fn mean_absolute_error(&self, compare_to: ArrayView1<F>) -> Result<F> {
        let diff = residuals(self, compare_to)?;

        Ok(diff.iter().map(|x| x.abs()).sum::<F>() / F::cast(diff.len()))
    }

    fn mean_squared_error(&self, compare_to: ArrayView1<F>) -> Result<F> {
        let diff = residuals(self, compare_to)?;

        Ok(diff.iter().map(|x| *x * *x).sum::<F>() / F::cast(diff.len()))
    }

    // r2 = 1 - sum((pred_i - y_i)^2)/sum((mean_y - y_i)^2)
    // the mean is taken over `compare_to`, the ground truth
    fn r2(&self, compare_to: ArrayView1<F>) -> Result<F> {
        let diff = residuals(self, compare_to)?;
        let mean = compare_to.sum() / F::cast(compare_to.len());

        let ss_res = diff.iter().map(|x| *x * *x).sum::<F>();
        let ss_tot = compare_to.iter().map(|x| (*x - mean) * (*x - mean)).sum::<F>();

        Ok(F::one() - ss_res / (ss_tot + F::cast(1e-10)))
    }

    fn explained_variance(&self, compare_to: ArrayView1<F>) -> Result<F> {
        let diff = residuals(self, compare_to)?;
        let n = F::cast(diff.len());

        let mean = compare_to.sum() / n;
        let mean_error = diff.sum() / n;

        let var_error = diff
            .iter()
            .map(|x| (*x - mean_error) * (*x - mean_error))
            .sum::<F>();
        let var_truth = compare_to.iter().map(|x| (*x - mean) * (*x - mean)).sum::<F>();

        Ok(F::one() - var_error / (var_truth + F::cast(1e-10)))
    }
}

fn residuals<F: Float, D: Data<Elem = F>>(
    prediction: &ArrayBase<D, Ix1>,
    compare_to: ArrayView1<F>,
) -> Result<ndarray::Array1<F>> {
    if prediction.len() != compare_to.len() {
        return Err(Error::MismatchedShapes(prediction.len(), compare_to.len()));
    }
    if prediction.is_empty() {
        return Err(Error::NotEnoughSamples);
    }

    Ok(prediction - &compare_to)
}
