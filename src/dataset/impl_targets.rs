use super::{AsTargets, DatasetBase, Records};
use ndarray::{ArrayBase, ArrayView2, Axis, Data, Ix1, Ix2};

/// A one-dimensional array is a single target column
impl<L, S: Data<Elem = L>> AsTargets for ArrayBase<S, Ix1> {
    type Elem = L;

    fn as_multi_targets(&self) -> ArrayView2<'_, L> {
        self.view().insert_axis(Axis(1))
    }
}

/// A two-dimensional array holds one target per column
impl<L, S: Data<Elem = L>> AsTargets for ArrayBase<S, Ix2> {
    type Elem = L;

    fn as_multi_targets(&self) -> ArrayView2<'_, L> {
        self.view()
    }
}

impl<T: AsTargets> AsTargets for &T {
    type Elem = T::Elem;

    fn as_multi_targets(&self) -> ArrayView2<'_, Self::Elem> {
        (*self).as_multi_targets()
    }
}

impl<R: Records, T: AsTargets> AsTargets for DatasetBase<R, T> {
    type Elem = T::Elem;

    fn as_multi_targets(&self) -> ArrayView2<'_, Self::Elem> {
        self.targets.as_multi_targets()
    }
}
