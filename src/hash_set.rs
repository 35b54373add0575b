//! ChainSet: a set of values over `ChainTable` with unit values.

use crate::chain_table::{self, ChainTable};
use crate::error::KeyError;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;

/// A hash set resolving collisions by chaining.
///
/// Set algebra (`union`, `intersection`, ...) lives in `set_algebra` and
/// always builds a fresh set.
pub struct ChainSet<T, S = RandomState> {
    pub(crate) table: ChainTable<T, (), S>,
}

/// Iterator over the members of a `ChainSet`, in bucket order.
pub struct Iter<'a, T> {
    inner: chain_table::Iter<'a, T, ()>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> core::iter::FusedIterator for Iter<'_, T> {}

impl<T> ChainSet<T>
where
    T: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            table: ChainTable::new(),
        }
    }
}

impl<T> Default for ChainSet<T>
where
    T: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> ChainSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Clone + Default,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            table: ChainTable::with_hasher(hasher),
        }
    }

    pub fn hasher(&self) -> &S {
        self.table.hasher()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Adds `value`; returns `false` if an equal value was already present.
    pub fn insert(&mut self, value: T) -> bool {
        self.table.insert(value, ()).is_none()
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.contains_key(value)
    }

    /// Returns the stored member equal to `value`.
    pub fn get<Q>(&self, value: &Q) -> Result<&T, KeyError>
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table
            .get_key_value(value)
            .map(|(k, _)| k)
            .ok_or(KeyError::NotFound)
    }

    pub fn remove<Q>(&mut self, value: &Q) -> Result<(), KeyError>
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.take(value).map(drop)
    }

    /// Removes and returns the stored member equal to `value`.
    pub fn take<Q>(&mut self, value: &Q) -> Result<T, KeyError>
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table
            .remove(value)
            .map(|(k, ())| k)
            .ok_or(KeyError::NotFound)
    }

    /// Removes `value` if present; absence is not an error.
    pub fn discard<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.remove(value).is_some()
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.iter(),
        }
    }
}

impl<T, S> Clone for ChainSet<T, S>
where
    T: Eq + Hash + Clone,
    S: BuildHasher + Clone + Default,
{
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
        }
    }
}

impl<T, S> PartialEq for ChainSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Clone + Default,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|v| other.contains(v))
    }
}

impl<T, S> Eq for ChainSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Clone + Default,
{
}

impl<T, S> fmt::Debug for ChainSet<T, S>
where
    T: Eq + Hash + fmt::Debug,
    S: BuildHasher + Clone + Default,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> fmt::Display for ChainSet<T, S>
where
    T: Eq + Hash + fmt::Debug,
    S: BuildHasher + Clone + Default,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("set()");
        }
        f.write_str("{")?;
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v:?}")?;
        }
        f.write_str("}")
    }
}

impl<T, S> FromIterator<T> for ChainSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Clone + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::with_hasher(S::default());
        set.extend(iter);
        set
    }
}

impl<T, S> Extend<T> for ChainSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Clone + Default,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.table.insert(v, ());
        }
    }
}

impl<'a, T, S> IntoIterator for &'a ChainSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Clone + Default,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
