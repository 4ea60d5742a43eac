use gradient::dataset::{AsTargets, DatasetBase};
use gradient::traits::{Fit, PredictInplace};
use gradient::Float;
use ndarray::{concatenate, s, Array1, Array2, ArrayBase, ArrayView1, ArrayView2, Axis, CowArray, Data, Ix2};
use ndarray_rand::RandomExt;
use rand::distributions::Uniform;
use rand::Rng;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{GradientDescentError, Result};
use crate::hyperparams::GradientDescentValidParams;
use crate::objective::{LeastSquares, Objective, Ridge};

impl<F, R, D, T> Fit<ArrayBase<D, Ix2>, T, GradientDescentError> for GradientDescentValidParams<F, R>
where
    F: Float,
    R: Rng + Clone,
    D: Data<Elem = F>,
    T: AsTargets<Elem = F>,
{
    type Object = FittedGradientDescent<F>;

    /// Fit a linear model given a feature matrix `x` and a target variable `y`.
    ///
    /// The feature matrix `x` must have shape `(n_samples, n_features)`
    ///
    /// The target variable `y` must have shape `(n_samples)` or `(n_samples, 1)`
    ///
    /// Returns a `FittedGradientDescent` object which contains the fitted
    /// parameters and can be used to `predict` values of the target variable
    /// for new feature values.
    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        let labels = dataset.try_single_target()?;

        self.fit_records(
            dataset.records().view(),
            labels,
            self.initial_params.clone(),
        )
    }
}

impl<F: Float, R: Rng + Clone> GradientDescentValidParams<F, R> {
    pub(crate) fn fit_records(
        &self,
        features: ArrayView2<F>,
        labels: ArrayView1<F>,
        initial_params: Option<Array1<F>>,
    ) -> Result<FittedGradientDescent<F>> {
        let nsamples = features.nrows();
        if nsamples == 0 {
            return Err(GradientDescentError::NotEnoughSamples);
        }
        if labels.len() != nsamples {
            return Err(GradientDescentError::ShapeMismatch {
                what: "number of labels",
                expected: nsamples,
                actual: labels.len(),
            });
        }

        let features: CowArray<F, Ix2> = if self.with_bias {
            add_bias(features).into()
        } else {
            features.into()
        };
        let nparams = features.ncols();

        let params = match initial_params {
            Some(params) if params.len() != nparams => {
                return Err(GradientDescentError::ShapeMismatch {
                    what: "number of initial parameters",
                    expected: nparams,
                    actual: params.len(),
                })
            }
            Some(params) if params.iter().any(|x| !x.is_finite()) => {
                return Err(GradientDescentError::InvalidInitialParams)
            }
            Some(params) => params,
            None => {
                let mut rng = self.rng.clone();
                Array1::random_using(nparams, Uniform::new(F::zero(), F::one()), &mut rng)
            }
        };

        let descent = Descent {
            features: features.view(),
            labels: labels.view(),
            alpha: self.alpha,
            epsilon: self.epsilon(),
            max_iterations: self.max_iterations,
        };
        let (params, trace) = if self.regularize {
            descent.run(&Ridge::new(nsamples, self.alpha), params)?
        } else {
            descent.run(&LeastSquares, params)?
        };

        Ok(FittedGradientDescent {
            params,
            with_bias: self.with_bias,
            n_steps: trace.n_steps,
            cost: trace.cost,
            cost_history: trace.cost_history,
        })
    }
}

/// Append a column of ones to the feature matrix
///
/// The returned matrix has shape `(n_samples, n_features + 1)`, the weight of the last column
/// is the intercept of the model.
pub fn add_bias<F: Float>(features: ArrayView2<F>) -> Array2<F> {
    let ones = Array2::ones((features.nrows(), 1));
    // both operands have the same number of rows
    concatenate(Axis(1), &[features.view(), ones.view()]).unwrap()
}

/// Predictions of a linear model, `features . params`
pub fn hypothesis<F: Float>(features: ArrayView2<F>, params: ArrayView1<F>) -> Array1<F> {
    features.dot(&params)
}

struct Descent<'a, F> {
    features: ArrayView2<'a, F>,
    labels: ArrayView1<'a, F>,
    alpha: F,
    epsilon: F,
    max_iterations: Option<u64>,
}

struct Trace<F> {
    n_steps: u64,
    cost: F,
    cost_history: Vec<F>,
}

impl<'a, F: Float> Descent<'a, F> {
    /// Batch gradient descent from `params` until the relative change of the cost drops
    /// below `epsilon`
    fn run<O: Objective<F>>(&self, objective: &O, mut params: Array1<F>) -> Result<(Array1<F>, Trace<F>)> {
        let mut predictions = hypothesis(self.features, params.view());
        let mut previous = F::zero();
        let mut cost_history = Vec::new();
        let mut n_steps = 0;

        let cost = loop {
            let cost = objective.cost(predictions.view(), self.labels, params.view());
            if !cost.is_finite() {
                return Err(GradientDescentError::Diverged {
                    iterations: n_steps,
                });
            }
            if n_steps > 0 && !keeps_descending(cost, previous, self.epsilon) {
                break cost;
            }
            if self.max_iterations.map_or(false, |max| n_steps >= max) {
                return Err(GradientDescentError::NotConverged {
                    iterations: n_steps,
                    cost: cost.to_f64().unwrap_or(f64::NAN),
                });
            }

            n_steps += 1;
            previous = cost;
            let gradient =
                objective.gradient(predictions.view(), self.labels, self.features, params.view());
            params.scaled_add(-self.alpha, &gradient);
            predictions = hypothesis(self.features, params.view());
            cost_history.push(cost);

            if n_steps % O::PROGRESS_EVERY == 0 {
                log::debug!("{:>3} : cost function = {}", n_steps, cost);
            }
        };

        log::info!("finished after {} steps, cost function = {}", n_steps, cost);

        Ok((
            params,
            Trace {
                n_steps,
                cost,
                cost_history,
            },
        ))
    }
}

/// Continue while the cost moved by at least `epsilon` times its previous value.
///
/// A cost which stopped moving altogether ends the descent as well, this covers a previous cost
/// of exactly zero where the relative test alone would never fail.
fn keeps_descending<F: Float>(cost: F, previous: F, epsilon: F) -> bool {
    let change = (cost - previous).abs();

    change > F::zero() && change >= epsilon * previous
}

/// A fitted linear model which can be used for making predictions.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct FittedGradientDescent<F> {
    params: Array1<F>,
    with_bias: bool,
    n_steps: u64,
    cost: F,
    cost_history: Vec<F>,
}

/// View the fitted parameters and make predictions with a fitted
/// gradient descent model.
impl<F: Float> FittedGradientDescent<F> {
    /// Get the full parameter vector, the intercept is the last entry when the bias is enabled
    pub fn params(&self) -> &Array1<F> {
        &self.params
    }

    /// Get the feature weights, without the intercept
    pub fn weights(&self) -> ArrayView1<'_, F> {
        if self.with_bias {
            self.params.slice(s![..self.params.len() - 1])
        } else {
            self.params.view()
        }
    }

    /// Get the fitted intercept, `0.` if no bias was fitted
    pub fn intercept(&self) -> F {
        if self.with_bias {
            self.params[self.params.len() - 1]
        } else {
            F::zero()
        }
    }

    pub fn with_bias(&self) -> bool {
        self.with_bias
    }

    /// Number of parameter updates performed
    pub fn n_steps(&self) -> u64 {
        self.n_steps
    }

    /// Cost of the returned parameters
    pub fn cost(&self) -> F {
        self.cost
    }

    /// Cost before each update, in order
    ///
    /// Holds one entry per step. A small `alpha` without an iteration cap can take millions of
    /// steps, and this history grows with them.
    pub fn cost_history(&self) -> &[F] {
        &self.cost_history
    }

    /// Predict the targets of `features`, failing when the number of features does not match
    /// the model
    pub fn try_predict<D: Data<Elem = F>>(&self, features: &ArrayBase<D, Ix2>) -> Result<Array1<F>> {
        let nfeatures = self.weights().len();
        if features.ncols() != nfeatures {
            return Err(GradientDescentError::ShapeMismatch {
                what: "number of features",
                expected: nfeatures,
                actual: features.ncols(),
            });
        }

        Ok(self.predict_records(features.view()))
    }

    fn predict_records(&self, features: ArrayView2<F>) -> Array1<F> {
        if self.with_bias {
            hypothesis(add_bias(features).view(), self.params.view())
        } else {
            hypothesis(features, self.params.view())
        }
    }
}

impl<F: Float, D: Data<Elem = F>> PredictInplace<ArrayBase<D, Ix2>, Array1<F>>
    for FittedGradientDescent<F>
{
    /// Given an input matrix `X`, with shape `(n_samples, n_features)`,
    /// `predict` returns the target variable according to the linear model
    /// learned from the training data distribution.
    fn predict_inplace(&self, x: &ArrayBase<D, Ix2>, y: &mut Array1<F>) {
        assert_eq!(
            x.nrows(),
            y.len(),
            "The number of data points must match the number of output targets."
        );
        assert_eq!(
            x.ncols(),
            self.weights().len(),
            "Number of data features must match the number of features the model was trained with."
        );

        *y = self.predict_records(x.view());
    }

    fn default_target(&self, x: &ArrayBase<D, Ix2>) -> Array1<F> {
        Array1::zeros(x.nrows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use gradient::traits::Predict;
    use gradient::{Dataset, ParamGuard};
    use ndarray::array;

    use crate::GradientDescent;

    fn line() -> Dataset<f64, f64> {
        Dataset::new(array![[1.], [2.], [3.], [4.]], array![2., 4., 6., 8.])
    }

    fn noisy_line() -> Dataset<f64, f64> {
        Dataset::new(array![[1.], [2.], [3.], [4.]], array![2.1, 3.9, 6.2, 7.8])
    }

    #[test]
    fn add_bias_appends_ones() {
        let features = array![[1., 2.], [3., 4.], [5., 6.]];
        let with_bias = add_bias(features.view());

        assert_eq!(with_bias.dim(), (3, 3));
        assert_abs_diff_eq!(with_bias.column(2), array![1., 1., 1.]);
        assert_abs_diff_eq!(with_bias.slice(s![.., ..2]), features);
    }

    #[test]
    fn hypothesis_is_matrix_product() {
        let features = array![[1., 2.], [3., 4.]];
        let params = array![0.5, -1.];

        assert_abs_diff_eq!(
            hypothesis(features.view(), params.view()),
            array![-1.5, -2.5]
        );
    }

    #[test]
    fn first_step_always_runs() {
        // previous cost starts at zero, so any cost keeps the descent going
        assert!(keeps_descending(1e-300, 0.0, 1e-5));
        assert!(keeps_descending(3.0, 0.0, 1e-5));
        assert!(!keeps_descending(0.0, 0.0, 1e-5));
    }

    #[test]
    fn relative_change_stops_descent() {
        assert!(keeps_descending(0.9, 1.0, 1e-5));
        assert!(!keeps_descending(1.0 - 1e-7, 1.0, 1e-5));
        assert!(!keeps_descending(1.0, 1.0, 1e-5));
    }

    #[test]
    fn fits_a_line_through_the_origin() {
        let model = GradientDescent::params()
            .regularize(false)
            .with_bias(false)
            .alpha(0.01)
            .initial_params(array![0.3])
            .max_iterations(Some(100_000))
            .fit(&line())
            .unwrap();

        assert_abs_diff_eq!(model.params(), &array![2.0], epsilon = 1e-3);
        assert_abs_diff_eq!(model.intercept(), 0.0);
        assert!(model.n_steps() > 0);
        assert_eq!(model.cost_history().len() as u64, model.n_steps());
    }

    #[test]
    fn fits_an_intercept() {
        let dataset = Dataset::new(array![[0.], [1.], [2.], [3.]], array![1.1, 3.9, 7.1, 9.9]);
        let model = GradientDescent::params()
            .regularize(false)
            .alpha(0.1)
            .initial_params(array![0., 0.])
            .max_iterations(Some(100_000))
            .fit(&dataset)
            .unwrap();

        assert_eq!(model.params().len(), 2);
        assert_abs_diff_eq!(model.weights(), array![2.96], epsilon = 1e-2);
        assert_abs_diff_eq!(model.intercept(), 1.06, epsilon = 1e-2);

        let prediction = model.predict(&array![[4.]]);
        assert_abs_diff_eq!(prediction, array![12.9], epsilon = 5e-2);
    }

    #[test]
    fn cost_never_increases_for_small_steps() {
        let dataset = Dataset::new(array![[0.], [1.], [2.], [3.]], array![1.1, 3.9, 7.1, 9.9]);
        let model = GradientDescent::params()
            .regularize(false)
            .alpha(0.1)
            .initial_params(array![0., 0.])
            .fit(&dataset)
            .unwrap();

        let history = model.cost_history();
        assert!(history.windows(2).all(|w| w[1] <= w[0]));
        assert!(model.cost() <= history[history.len() - 1]);
    }

    #[test]
    fn regularization_shrinks_parameters() {
        let params = GradientDescent::params()
            .with_bias(false)
            .alpha(0.01)
            .initial_params(array![0.3])
            .max_iterations(Some(100_000));

        let plain = params.clone().regularize(false).fit(&line()).unwrap();
        let ridge = params.regularize(true).fit(&line()).unwrap();

        // the ridge optimum solves 7.5 (w - 2) + 20 w = 0
        assert_abs_diff_eq!(ridge.params(), &array![15. / 27.5], epsilon = 1e-4);
        assert!(ridge.params().dot(ridge.params()) < plain.params().dot(plain.params()));
    }

    #[test]
    fn fit_records_with_bias_on_borrowed_views() {
        let features = array![[1.], [2.], [3.], [4.]];
        // least squares solution is 1.96 x + 1.1
        let labels = array![[3.1], [4.9], [7.1], [8.9]];
        let params = GradientDescent::params()
            .regularize(false)
            .alpha(0.05)
            .max_iterations(Some(100_000))
            .check()
            .unwrap();

        let model = params
            .fit_records(features.view(), labels.column(0), Some(array![0., 0.]))
            .unwrap();

        assert_eq!(add_bias(features.view()).column(1), array![1., 1., 1., 1.]);
        assert_abs_diff_eq!(model.weights(), array![1.96], epsilon = 1e-2);
        assert_abs_diff_eq!(model.intercept(), 1.1, epsilon = 3e-2);
    }

    #[test]
    fn tighter_epsilon_takes_more_steps() {
        let dataset = noisy_line();
        let features = dataset.records().view();
        let labels = dataset.targets().view();

        let run = |epsilon| {
            let descent = Descent {
                features,
                labels,
                alpha: 0.01,
                epsilon,
                max_iterations: Some(100_000),
            };
            descent.run(&LeastSquares, array![0.5]).unwrap()
        };
        let (loose, loose_trace) = run(1e-5);
        let (tight, tight_trace) = run(1e-10);

        assert!(tight_trace.n_steps > loose_trace.n_steps);
        assert_abs_diff_eq!(tight, array![1.99], epsilon = 1e-5);
        assert_abs_diff_eq!(loose, array![1.99], epsilon = 1e-2);
    }

    #[test]
    fn explicit_start_is_deterministic() {
        let params = GradientDescent::params()
            .alpha(0.01)
            .initial_params(array![0.1, 0.2])
            .max_iterations(Some(100_000))
            .check()
            .unwrap();

        let first = params.fit(&noisy_line()).unwrap();
        let second = params.fit(&noisy_line()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn random_start_is_reproducible_per_params() {
        let params = GradientDescent::params()
            .regularize(false)
            .with_bias(false)
            .alpha(0.01)
            .max_iterations(Some(100_000));

        let first = params.fit(&noisy_line()).unwrap();
        let second = params.fit(&noisy_line()).unwrap();

        assert_eq!(first.params(), second.params());
        assert_abs_diff_eq!(first.params(), &array![1.99], epsilon = 1e-2);
    }

    #[test]
    fn single_sample() {
        let dataset = Dataset::new(array![[3.]], array![6.]);
        let model = GradientDescent::params()
            .regularize(false)
            .with_bias(false)
            .alpha(0.01)
            .initial_params(array![0.5])
            .max_iterations(Some(100_000))
            .fit(&dataset)
            .unwrap();

        assert_abs_diff_eq!(model.params(), &array![2.0], epsilon = 1e-3);
    }

    #[test]
    fn column_labels_are_accepted() {
        let dataset = Dataset::new(array![[1.], [2.], [3.], [4.]], array![[2.], [4.], [6.], [8.]]);
        let model = GradientDescent::params()
            .regularize(false)
            .with_bias(false)
            .alpha(0.01)
            .initial_params(array![0.3])
            .fit(&dataset)
            .unwrap();

        assert_abs_diff_eq!(model.params(), &array![2.0], epsilon = 1e-3);
    }

    #[test]
    fn iteration_cap_reports_non_convergence() {
        let res = GradientDescent::params()
            .regularize(false)
            .with_bias(false)
            .alpha(1e-6)
            .initial_params(array![0.])
            .max_iterations(Some(5))
            .fit(&line());

        assert!(matches!(
            res,
            Err(GradientDescentError::NotConverged { iterations: 5, .. })
        ));
    }

    #[test]
    fn large_steps_diverge() {
        let res = GradientDescent::params()
            .regularize(false)
            .with_bias(false)
            .alpha(10.)
            .initial_params(array![0.])
            .fit(&line());

        assert!(matches!(res, Err(GradientDescentError::Diverged { .. })));
    }

    #[test]
    fn wrong_initial_params_length() {
        // the bias adds a parameter, one weight alone is not enough
        let res = GradientDescent::params()
            .initial_params(array![1.])
            .fit(&line());

        assert!(matches!(
            res,
            Err(GradientDescentError::ShapeMismatch {
                expected: 2,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn mismatched_labels() {
        let dataset = Dataset::new(array![[1.], [2.], [3.]], array![2., 4.]);
        let res = GradientDescent::params().fit(&dataset);

        assert!(matches!(
            res,
            Err(GradientDescentError::ShapeMismatch {
                expected: 3,
                actual: 2,
                ..
            })
        ));
    }

    #[test]
    fn empty_dataset() {
        let dataset = Dataset::new(Array2::<f64>::zeros((0, 2)), Array1::zeros(0));
        let res = GradientDescent::params().fit(&dataset);

        assert!(matches!(res, Err(GradientDescentError::NotEnoughSamples)));
    }

    #[test]
    fn try_predict_checks_features() {
        let model = GradientDescent::params()
            .alpha(0.01)
            .initial_params(array![0.1, 0.2])
            .fit(&noisy_line())
            .unwrap();

        assert!(model.try_predict(&array![[1.]]).is_ok());
        assert!(matches!(
            model.try_predict(&array![[1., 2.]]),
            Err(GradientDescentError::ShapeMismatch {
                expected: 1,
                actual: 2,
                ..
            })
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn fitted_model_survives_serialization() {
        let model = GradientDescent::params()
            .regularize(false)
            .with_bias(false)
            .alpha(0.01)
            .initial_params(array![0.5])
            .fit(&line())
            .unwrap();

        let json = serde_json::to_string(&model).unwrap();
        let restored: FittedGradientDescent<f64> = serde_json::from_str(&json).unwrap();

        assert_abs_diff_eq!(restored.params(), model.params(), epsilon = 1e-12);
        assert_eq!(restored.n_steps(), model.n_steps());
        assert_eq!(restored.cost_history().len(), model.cost_history().len());
    }
}
