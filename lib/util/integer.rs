use std::iter::Map;
use std::mem::transmute_copy;
use std::ops::RangeInclusive;

/// Trait for field-less enums that occupy a contiguous range of primitive integers.
///
/// # Safety
///
/// Must only be implemented for types that can be safely transmuted to and from
/// [`Integer::Repr`] for every repr in the range [`Integer::MIN`]..=[`Integer::MAX`].
pub unsafe trait Integer: Copy {
    /// The equivalent primitive integer type.
    type Repr: Copy + Ord;

    /// The minimum repr.
    const MIN: Self::Repr;

    /// The maximum repr.
    const MAX: Self::Repr;

    /// Casts from [`Integer::Repr`].
    ///
    /// The repr must be in range, this is the caller's contract.
    #[inline(always)]
    fn new(i: Self::Repr) -> Self {
        debug_assert!(Self::in_range(i));
        unsafe { transmute_copy(&i) }
    }

    /// Casts to [`Integer::Repr`].
    #[inline(always)]
    fn get(self) -> Self::Repr {
        unsafe { transmute_copy(&self) }
    }

    /// Casts from [`Integer::Repr`] if in range.
    #[inline(always)]
    fn convert(i: Self::Repr) -> Option<Self> {
        if Self::in_range(i) {
            Some(Self::new(i))
        } else {
            None
        }
    }

    /// Whether a repr is in the range [`Integer::MIN`]..=[`Integer::MAX`].
    #[inline(always)]
    fn in_range(i: Self::Repr) -> bool {
        Self::MIN <= i && i <= Self::MAX
    }

    /// An iterator over all values in the range [`Integer::MIN`]..=[`Integer::MAX`].
    #[inline(always)]
    #[allow(clippy::type_complexity)]
    fn iter() -> Map<RangeInclusive<Self::Repr>, fn(Self::Repr) -> Self>
    where
        RangeInclusive<Self::Repr>: Iterator<Item = Self::Repr>,
    {
        (Self::MIN..=Self::MAX).map(Self::new)
    }
}
