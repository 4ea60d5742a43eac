use thiserror::Error;

pub type Result<T> = std::result::Result<T, DatasetError>;

/// An error when reading a dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("could not open dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("could not read array: {0}")]
    Array(#[from] ndarray_csv::ReadError),
    #[error("target column {column} out of range for {ncols} columns")]
    MissingTargetColumn { column: usize, ncols: usize },
}
