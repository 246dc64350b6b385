//! Successor operation for values enumerated out of an `IntervalSet`.

/// A totally ordered type whose values can be enumerated one by one.
///
/// `successor` must return the next value in `Ord` order, or `None` when
/// `self` is the greatest value of the type.
pub trait Step: Ord + Clone {
    /// The value immediately after `self`, if there is one.
    #[must_use]
    fn successor(&self) -> Option<Self>;
}

macro_rules! impl_step_for_integers {
    ($($t:ty),* $(,)?) => {
        $(
            impl Step for $t {
                #[inline]
                fn successor(&self) -> Option<Self> {
                    self.checked_add(1)
                }
            }
        )*
    };
}

impl_step_for_integers!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
