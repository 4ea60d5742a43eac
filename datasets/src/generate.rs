//! Utility functions for randomly generating datasets

use gradient::Dataset;
use ndarray::{Array, ArrayBase, Data, Ix1};
use ndarray_rand::{
    rand::Rng,
    rand_distr::{Normal, Uniform},
    RandomExt,
};

/// Draw a dataset following `y = X . weights + intercept + noise`
///
/// The features are uniform in `[-1, 1)` and the noise is normal with standard deviation
/// `noise`, a noise of `0.` gives an exactly linear dataset.
///
/// # Panics
///
/// If `noise` is negative or not finite.
pub fn linear(
    nsamples: usize,
    weights: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    intercept: f64,
    noise: f64,
    rng: &mut impl Rng,
) -> Dataset<f64, f64> {
    let features = Array::random_using((nsamples, weights.len()), Uniform::new(-1., 1.), rng);
    let noise = Array::random_using(nsamples, Normal::new(0., noise).unwrap(), rng);

    let targets = features.dot(weights) + intercept + noise;

    Dataset::new(features, targets)
}
