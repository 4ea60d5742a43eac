use super::{AsTargets, DatasetBase, Records};
use crate::traits::{Predict, PredictInplace};
use ndarray::{ArrayBase, Axis, Data, Dimension, Ix2, OwnedRepr};

/// Implementation without constraints on records and targets
///
/// This implementation block provides methods for the creation and mutation of datasets. This
/// includes swapping the targets, return the records etc.
impl<R: Records, S> DatasetBase<R, S> {
    /// Create a new dataset from records and targets
    ///
    /// # Example
    ///
    /// ```ignore
    /// let dataset = Dataset::new(records, targets);
    /// ```
    pub fn new(records: R, targets: S) -> DatasetBase<R, S> {
        DatasetBase {
            records,
            targets,
            feature_names: Vec::new(),
        }
    }

    /// Returns reference to targets
    pub fn targets(&self) -> &S {
        &self.targets
    }

    /// Returns reference to records
    pub fn records(&self) -> &R {
        &self.records
    }

    /// Updates the feature names of a dataset
    pub fn with_feature_names<I: Into<String>>(mut self, names: Vec<I>) -> DatasetBase<R, S> {
        self.feature_names = names.into_iter().map(|x| x.into()).collect();

        self
    }

    /// Returns feature names
    ///
    /// A feature name gives a human-readable string describing the purpose of a single feature.
    /// This allow the reader to understand its purpose while analysing results, for example
    /// correlation analysis or feature importance. Unnamed features are called after their
    /// column index.
    pub fn feature_names(&self) -> Vec<String> {
        if !self.feature_names.is_empty() {
            self.feature_names.clone()
        } else {
            (0..self.records.nfeatures())
                .map(|idx| format!("feature-{}", idx))
                .collect()
        }
    }
}

impl<F: Clone, T: Clone, I: Dimension>
    DatasetBase<ArrayBase<OwnedRepr<F>, Ix2>, ArrayBase<OwnedRepr<T>, I>>
{
    /// Split dataset into two disjoint chunks
    ///
    /// This function splits the observations in a dataset into two disjoint chunks. The splitting
    /// threshold is calculated with the `ratio`. For example a ratio of `0.9` allocates 90% to the
    /// first chunk and 10% to the second. The order of the samples is preserved, shuffle the
    /// records beforehand if the file is sorted.
    pub fn split_with_ratio(self, ratio: f32) -> (Self, Self) {
        let n = (self.nsamples() as f32 * ratio).ceil() as usize;
        let n = n.min(self.nsamples());

        let (first, second) = self.records.view().split_at(Axis(0), n);
        let (first_targets, second_targets) = self.targets.view().split_at(Axis(0), n);

        let dataset1 = DatasetBase::new(first.to_owned(), first_targets.to_owned())
            .with_feature_names(self.feature_names.clone());
        let dataset2 = DatasetBase::new(second.to_owned(), second_targets.to_owned())
            .with_feature_names(self.feature_names);

        (dataset1, dataset2)
    }
}

impl<'a, F, D, T, O> Predict<&'a ArrayBase<D, Ix2>, T> for O
where
    D: Data<Elem = F>,
    O: PredictInplace<ArrayBase<D, Ix2>, T>,
{
    fn predict(&self, records: &'a ArrayBase<D, Ix2>) -> T {
        let mut targets = self.default_target(records);
        self.predict_inplace(records, &mut targets);
        targets
    }
}

impl<'a, R, T, S, O> Predict<&'a DatasetBase<R, T>, S> for O
where
    R: Records,
    T: AsTargets,
    O: PredictInplace<R, S>,
{
    fn predict(&self, ds: &'a DatasetBase<R, T>) -> S {
        let mut targets = self.default_target(&ds.records);
        self.predict_inplace(&ds.records, &mut targets);
        targets
    }
}
