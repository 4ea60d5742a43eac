//! `gradient` provides the shared building blocks for fitting linear models with
//! batch gradient descent.
//!
//! ## The Big Picture
//!
//! The workspace is split the way the estimators use it:
//!
//! * `gradient` (this crate) holds the dataset container, the [`Float`] bound, the
//!   fitting/prediction traits, hyperparameter checking and regression metrics
//! * `gradient-descent` implements the optimizer itself, with and without L2
//!   regularization and with an optional bias term
//! * `gradient-datasets` loads feature matrices and label vectors from CSV files and
//!   generates synthetic linear data
//!
//! ## Usage
//!
//! ```ignore
//! use gradient::prelude::*;
//! use gradient_descent::GradientDescent;
//!
//! let dataset = gradient_datasets::load_csv("data/sigma.csv", 3)?;
//! let model = GradientDescent::params().alpha(1e-3).fit(&dataset)?;
//! let predictions = model.predict(&dataset);
//! ```

pub mod benchmarks;
pub mod dataset;
pub mod error;
mod metrics_regression;
mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{Dataset, DatasetBase, Float};
pub use error::Error;
pub use param_guard::ParamGuard;

/// Common metrics functions for regression
pub mod metrics {
    pub use crate::metrics_regression::Regression;
}
