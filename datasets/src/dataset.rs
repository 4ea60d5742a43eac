use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use flate2::read::GzDecoder;
use gradient::Dataset;
use ndarray::{concatenate, s, Array2, Axis};
use ndarray_csv::Array2Reader;

use crate::error::{DatasetError, Result};

/// Convert Gzipped CSV bytes into 2D array
pub fn array_from_gz_csv<R: Read>(gz: R, has_headers: bool, separator: u8) -> Result<Array2<f64>> {
    // unzip file
    let file = GzDecoder::new(gz);
    array_from_csv(file, has_headers, separator)
}

/// Convert CSV bytes into 2D array
pub fn array_from_csv<R: Read>(csv: R, has_headers: bool, separator: u8) -> Result<Array2<f64>> {
    // parse CSV
    let mut reader = ReaderBuilder::new()
        .has_headers(has_headers)
        .delimiter(separator)
        .from_reader(csv);

    // extract ndarray
    Ok(reader.deserialize_array2_dynamic()?)
}

/// Split a matrix into features and labels, the labels are taken from `target_column`
pub fn split_targets(array: Array2<f64>, target_column: usize) -> Result<Dataset<f64, f64>> {
    let ncols = array.ncols();
    if target_column >= ncols {
        return Err(DatasetError::MissingTargetColumn {
            column: target_column,
            ncols,
        });
    }

    let targets = array.column(target_column).to_owned();
    let features = concatenate(
        Axis(1),
        &[
            array.slice(s![.., ..target_column]),
            array.slice(s![.., target_column + 1..]),
        ],
    )
    // both halves share the number of rows
    .unwrap();

    Ok(Dataset::new(features, targets))
}

/// Read a dataset from a CSV stream with a header row
///
/// The header names the features, the label column is dropped from them.
pub fn from_csv_reader<R: Read>(
    csv: R,
    separator: u8,
    target_column: usize,
) -> Result<Dataset<f64, f64>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(separator)
        .from_reader(csv);

    let names = reader
        .headers()?
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != target_column)
        .map(|(_, name)| name.trim().to_string())
        .collect::<Vec<_>>();
    let array: Array2<f64> = reader.deserialize_array2_dynamic()?;

    Ok(split_targets(array, target_column)?.with_feature_names(names))
}

/// Read a dataset from a gzip-compressed CSV stream with a header row
pub fn from_gz_csv_reader<R: Read>(
    gz: R,
    separator: u8,
    target_column: usize,
) -> Result<Dataset<f64, f64>> {
    from_csv_reader(GzDecoder::new(gz), separator, target_column)
}

/// Read a comma separated file with a header row, `target_column` holds the labels
pub fn load_csv<P: AsRef<Path>>(path: P, target_column: usize) -> Result<Dataset<f64, f64>> {
    let file = BufReader::new(File::open(path)?);
    from_csv_reader(file, b',', target_column)
}

/// Read a gzip-compressed, comma separated file with a header row
pub fn load_csv_gz<P: AsRef<Path>>(path: P, target_column: usize) -> Result<Dataset<f64, f64>> {
    let file = BufReader::new(File::open(path)?);
    from_gz_csv_reader(file, b',', target_column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use flate2::{write::GzEncoder, Compression};
    use gradient::dataset::Records;
    use ndarray::array;
    use std::io::Write;

    const SIGMA: &str = "sigma,label,tau\n1.0,2.0,0.5\n2.0,4.0,0.25\n3.0,6.0,0.125\n";

    #[test]
    fn label_column_is_removed_from_features() {
        let dataset = from_csv_reader(SIGMA.as_bytes(), b',', 1).unwrap();

        assert_eq!(dataset.nsamples(), 3);
        assert_eq!(dataset.nfeatures(), 2);
        assert_abs_diff_eq!(dataset.targets(), &array![2., 4., 6.]);
        assert_abs_diff_eq!(
            dataset.records(),
            &array![[1.0, 0.5], [2.0, 0.25], [3.0, 0.125]]
        );
        assert_eq!(dataset.feature_names(), vec!["sigma", "tau"]);
    }

    #[test]
    fn last_column_as_label() {
        let dataset = from_csv_reader(SIGMA.as_bytes(), b',', 2).unwrap();

        assert_abs_diff_eq!(dataset.targets(), &array![0.5, 0.25, 0.125]);
        assert_eq!(dataset.feature_names(), vec!["sigma", "label"]);
    }

    #[test]
    fn out_of_range_label_column() {
        let res = from_csv_reader(SIGMA.as_bytes(), b',', 3);

        assert!(matches!(
            res,
            Err(DatasetError::MissingTargetColumn {
                column: 3,
                ncols: 3
            })
        ));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let res = from_csv_reader("a,b\n1.0,2.0\n3.0\n".as_bytes(), b',', 1);
        assert!(res.is_err());
    }

    #[test]
    fn semicolon_separated_without_header() {
        let array = array_from_csv("1;2\n3;4\n".as_bytes(), false, b';').unwrap();
        assert_abs_diff_eq!(array, array![[1., 2.], [3., 4.]]);
    }

    #[test]
    fn reads_gzip_compressed_files() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(SIGMA.as_bytes()).unwrap();
        let bytes = encoder.finish().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sigma.csv.gz");
        std::fs::write(&path, &bytes).unwrap();

        let dataset = load_csv_gz(&path, 1).unwrap();
        assert_abs_diff_eq!(dataset.targets(), &array![2., 4., 6.]);

        let array = array_from_gz_csv(&bytes[..], true, b',').unwrap();
        assert_eq!(array.dim(), (3, 3));
    }

    #[test]
    fn loads_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sigma.csv");
        std::fs::write(&path, SIGMA).unwrap();

        let dataset = load_csv(&path, 1).unwrap();
        assert_eq!(dataset.nfeatures(), 2);

        assert!(matches!(
            load_csv(dir.path().join("missing.csv"), 1),
            Err(DatasetError::Io(_))
        ));
    }
}
