//! FixedSeq: immutable fixed-length sequence.

use crate::error::SeqError;
use core::fmt;
use core::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};
use core::ops::{Add, Bound, Mul, RangeBounds};
use std::collections::hash_map::DefaultHasher;

const HASH_SEED: u64 = 0x345678;
const HASH_MULTIPLIER: u64 = 1_000_003;
const MULTIPLIER_STEP: u64 = 82_520;
const HASH_TAIL: u64 = 97_531;

#[derive(Clone, PartialEq, Eq)]
pub struct FixedSeq<T> {
    items: Box<[T]>,
}

impl<T> FixedSeq<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Result<&T, SeqError> {
        self.items.get(index).ok_or(SeqError::IndexOutOfBounds {
            index,
            len: self.len(),
        })
    }

    /// Element `index` places from the end; `get_back(0)` is the last one.
    pub fn get_back(&self, index: usize) -> Result<&T, SeqError> {
        let len = self.len();
        if index >= len {
            return Err(SeqError::IndexOutOfBounds { index, len });
        }
        self.get(len - 1 - index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Clamps `range` to `0..len`; an inverted range yields `0..0`.
    fn bounds<R: RangeBounds<usize>>(&self, range: R) -> (usize, usize) {
        let len = self.len();
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(len);
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        }
        .min(len);
        (start, end.max(start))
    }

    /// New sequence holding the elements in `range`, clamped to the length.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Self
    where
        T: Clone,
    {
        let (start, end) = self.bounds(range);
        self.items[start..end].iter().cloned().collect()
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.items.contains(value)
    }

    pub fn count(&self, value: &T) -> usize
    where
        T: PartialEq,
    {
        self.iter().filter(|v| *v == value).count()
    }

    /// Position of the first element equal to `value` within `range`.
    pub fn index_of<R: RangeBounds<usize>>(&self, value: &T, range: R) -> Result<usize, SeqError>
    where
        T: PartialEq,
    {
        let (start, end) = self.bounds(range);
        self.items[start..end]
            .iter()
            .position(|v| v == value)
            .map(|i| start + i)
            .ok_or(SeqError::ValueNotFound)
    }

    pub fn concat(&self, other: &Self) -> Self
    where
        T: Clone,
    {
        self.iter().chain(other.iter()).cloned().collect()
    }

    /// The elements repeated `times` times; `repeat(0)` is empty.
    pub fn repeat(&self, times: usize) -> Self
    where
        T: Clone,
    {
        (0..times).flat_map(|_| self.iter().cloned()).collect()
    }

    /// Multiplicative combination of the element hashes produced by `hasher`.
    pub fn combined_hash<S: BuildHasher>(&self, hasher: &S) -> u64
    where
        T: Hash,
    {
        let len = self.len() as u64;
        let mut acc = HASH_SEED;
        let mut mult = HASH_MULTIPLIER;
        for item in self.iter() {
            acc = (acc ^ hasher.hash_one(item)).wrapping_mul(mult);
            mult = mult.wrapping_add(MULTIPLIER_STEP + len + len);
        }
        acc = acc.wrapping_add(HASH_TAIL);
        // all-ones is reserved
        if acc == u64::MAX {
            u64::MAX - 1
        } else {
            acc
        }
    }
}

impl<T: Hash> Hash for FixedSeq<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.combined_hash(&BuildHasherDefault::<DefaultHasher>::default()));
    }
}

impl<T> FromIterator<T> for FixedSeq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> From<Vec<T>> for FixedSeq<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: items.into_boxed_slice(),
        }
    }
}

impl<T, const N: usize> From<[T; N]> for FixedSeq<T> {
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a FixedSeq<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Clone> Add<&FixedSeq<T>> for &FixedSeq<T> {
    type Output = FixedSeq<T>;

    fn add(self, rhs: &FixedSeq<T>) -> FixedSeq<T> {
        self.concat(rhs)
    }
}

impl<T: Clone> Mul<usize> for &FixedSeq<T> {
    type Output = FixedSeq<T>;

    fn mul(self, times: usize) -> FixedSeq<T> {
        self.repeat(times)
    }
}

impl<T: fmt::Debug> fmt::Debug for FixedSeq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("()");
        }
        let mut t = f.debug_tuple("");
        for item in self.iter() {
            t.field(item);
        }
        t.finish()
    }
}

impl<T: fmt::Debug> fmt::Display for FixedSeq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [only] = &*self.items {
            return write!(f, "({only:?},)");
        }
        f.write_str("(")?;
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v:?}")?;
        }
        f.write_str(")")
    }
}
