//! Provide traits for different classes of algorithms
//!

use crate::dataset::{DatasetBase, Records};

/// Fittable algorithms
///
/// A fittable algorithm takes a dataset and creates a concept of some kind about it. For example
/// in *regression* the fitted model is a parameter vector which predicts a continuous target for
/// unseen records.
///
/// The hyperparameters are kept separate from the fitted model, so fitting never mutates the
/// parameter set and the same set can be reused for several datasets.
pub trait Fit<R: Records, T, E: std::error::Error + From<crate::error::Error>> {
    type Object;

    fn fit(&self, dataset: &DatasetBase<R, T>) -> Result<Self::Object, E>;
}

/// Predict with model into a mutable reference of targets.
pub trait PredictInplace<R: Records, T> {
    /// Predict something in place
    fn predict_inplace<'a>(&'a self, x: &'a R, y: &mut T);

    /// Create targets that `predict_inplace` works with.
    fn default_target(&self, x: &R) -> T;
}

/// Predict with model
///
/// This trait assumes the `PredictInplace` implementation and provides additional input/output
/// combinations.
///
/// # Provided implementation
///
/// * Array2 -> Array1: predict a target for each record of a feature matrix
/// * &Dataset -> Array1: predict a target for each record of a dataset, ignoring its targets
pub trait Predict<R: Records, T> {
    fn predict(&self, x: R) -> T;
}
