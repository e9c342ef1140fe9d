/// Field-by-field fallback merge: fields of `self` win, holes are filled
/// from `other`. Implementations decide what counts as a hole.
pub trait Coalesce<O = Self> {
    fn coalesce(self, other: &O) -> Self;
}

impl<T: Clone> Coalesce for Option<T> {
    fn coalesce(self, other: &Self) -> Self {
        self.or_else(|| other.clone())
    }
}
