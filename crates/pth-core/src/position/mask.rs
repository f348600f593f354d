use std::fmt;
use std::marker::PhantomData;

/// A value drawn from one of the closed attribute sets of a position.
///
/// The ordinal must be below 64 and unique within the set.
pub trait Member: Copy {
    fn ordinal(self) -> u32;
}

/// Bit set over a closed attribute value space.
pub struct Mask<T> {
    bits: u64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Mask<T> {
    pub const EMPTY: Self = Self::from_bits(0);

    pub const fn from_bits(bits: u64) -> Self {
        Self {
            bits,
            _marker: PhantomData,
        }
    }

    pub const fn bits(&self) -> u64 {
        self.bits
    }

    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl<T: Member> Mask<T> {
    pub fn insert(&mut self, value: T) {
        self.bits |= 1 << value.ordinal();
    }

    pub fn contains(&self, value: T) -> bool {
        self.bits & (1 << value.ordinal()) != 0
    }
}

impl<T: Member> FromIterator<T> for Mask<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut mask = Self::EMPTY;
        for value in iter {
            mask.insert(value);
        }
        mask
    }
}

impl<T> Clone for Mask<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Mask<T> {}

impl<T> PartialEq for Mask<T> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<T> Eq for Mask<T> {}

impl<T> fmt::Debug for Mask<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mask({:#b})", self.bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Tone;

    #[test]
    fn insert_and_contains() {
        let mask: Mask<Tone> = [Tone::Level, Tone::Checked].into_iter().collect();
        assert!(mask.contains(Tone::Level));
        assert!(mask.contains(Tone::Checked));
        assert!(!mask.contains(Tone::Rising));
        assert!(!mask.is_empty());
    }

    #[test]
    fn empty_mask_contains_nothing() {
        let mask = Mask::<Tone>::EMPTY;
        assert!(mask.is_empty());
        assert!(Tone::ALL.iter().all(|t| !mask.contains(*t)));
    }
}
