//! `gradient-datasets` loads feature matrices and label vectors into a [`gradient::Dataset`].
//!
//! ## The Big Picture
//!
//! The estimators of the `gradient` workspace only work on data already in memory. This crate
//! is the thin layer in front of them: it reads a CSV file, optionally gzip-compressed, picks
//! one column as the label vector and keeps the remaining columns as features. With the
//! `generate` feature it also draws synthetic linear datasets for tests and benchmarks.
//!
//! ## Using a dataset
//!
//! ```ignore
//! let dataset = gradient_datasets::load_csv("data/sigma.csv", 3)?;
//! let (train, valid) = dataset.split_with_ratio(0.8);
//! ```

mod dataset;
mod error;

#[cfg(feature = "generate")]
pub mod generate;

pub use dataset::{
    array_from_csv, array_from_gz_csv, from_csv_reader, from_gz_csv_reader, load_csv,
    load_csv_gz, split_targets,
};
pub use error::{DatasetError, Result};
