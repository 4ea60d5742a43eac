//! Error types in gradient
//!

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("multiple targets not supported")]
    MultipleTargets,
    #[error("the number of samples do not match: {0} - {1}")]
    MismatchedShapes(usize, usize),
    #[error("at least one sample needed")]
    NotEnoughSamples,
}
