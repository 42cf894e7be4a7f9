/// A type-parameter position in a view: pinned to something, or unknown (`?`).
///
/// The generator uses `ParamSlot<usize>` (bound to an owning-type parameter)
/// when shaping signatures; the runtime uses `ParamSlot<TypeTag>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamSlot<T> {
    Bound(T),
    Unknown,
}

impl<T> ParamSlot<T> {
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}
