//! Set algebra over `ChainSet`, built only from membership and iteration.
//!
//! Every combining operation allocates a new set that owns clones of the
//! members; neither operand is modified, and later changes to an operand
//! do not show through an earlier result. Results use a clone of the left
//! operand's hasher.

use crate::hash_set::ChainSet;
use core::hash::{BuildHasher, Hash};
use core::ops::{BitAnd, BitOr, BitXor, Sub};

impl<T, S> ChainSet<T, S>
where
    T: Eq + Hash + Clone,
    S: BuildHasher + Clone + Default,
{
    fn empty_like(&self) -> Self {
        Self::with_hasher(self.hasher().clone())
    }

    /// Members of `self`, then members of `other` not already present.
    pub fn union<S2>(&self, other: &ChainSet<T, S2>) -> Self
    where
        S2: BuildHasher + Clone + Default,
    {
        let mut out = self.empty_like();
        out.extend(self.iter().cloned());
        out.extend(other.iter().cloned());
        out
    }

    pub fn intersection<S2>(&self, other: &ChainSet<T, S2>) -> Self
    where
        S2: BuildHasher + Clone + Default,
    {
        let mut out = self.empty_like();
        out.extend(self.iter().filter(|v| other.contains(*v)).cloned());
        out
    }

    pub fn difference<S2>(&self, other: &ChainSet<T, S2>) -> Self
    where
        S2: BuildHasher + Clone + Default,
    {
        let mut out = self.empty_like();
        out.extend(self.iter().filter(|v| !other.contains(*v)).cloned());
        out
    }

    /// Members of `self` absent from `other`, then members of `other`
    /// absent from `self`.
    pub fn symmetric_difference<S2>(&self, other: &ChainSet<T, S2>) -> Self
    where
        S2: BuildHasher + Clone + Default,
    {
        let mut out = self.difference(other);
        out.extend(other.iter().filter(|v| !self.contains(*v)).cloned());
        out
    }
}

impl<T, S> ChainSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Clone + Default,
{
    /// Walks the smaller set and stops at the first shared member.
    pub fn is_disjoint<S2>(&self, other: &ChainSet<T, S2>) -> bool
    where
        S2: BuildHasher + Clone + Default,
    {
        if self.len() <= other.len() {
            self.iter().all(|v| !other.contains(v))
        } else {
            other.iter().all(|v| !self.contains(v))
        }
    }

    pub fn is_subset<S2>(&self, other: &ChainSet<T, S2>) -> bool
    where
        S2: BuildHasher + Clone + Default,
    {
        self.len() <= other.len() && self.iter().all(|v| other.contains(v))
    }

    pub fn is_superset<S2>(&self, other: &ChainSet<T, S2>) -> bool
    where
        S2: BuildHasher + Clone + Default,
    {
        other.is_subset(self)
    }
}

impl<T, S> BitOr<&ChainSet<T, S>> for &ChainSet<T, S>
where
    T: Eq + Hash + Clone,
    S: BuildHasher + Clone + Default,
{
    type Output = ChainSet<T, S>;

    fn bitor(self, rhs: &ChainSet<T, S>) -> ChainSet<T, S> {
        self.union(rhs)
    }
}

impl<T, S> BitAnd<&ChainSet<T, S>> for &ChainSet<T, S>
where
    T: Eq + Hash + Clone,
    S: BuildHasher + Clone + Default,
{
    type Output = ChainSet<T, S>;

    fn bitand(self, rhs: &ChainSet<T, S>) -> ChainSet<T, S> {
        self.intersection(rhs)
    }
}

impl<T, S> Sub<&ChainSet<T, S>> for &ChainSet<T, S>
where
    T: Eq + Hash + Clone,
    S: BuildHasher + Clone + Default,
{
    type Output = ChainSet<T, S>;

    fn sub(self, rhs: &ChainSet<T, S>) -> ChainSet<T, S> {
        self.difference(rhs)
    }
}

impl<T, S> BitXor<&ChainSet<T, S>> for &ChainSet<T, S>
where
    T: Eq + Hash + Clone,
    S: BuildHasher + Clone + Default,
{
    type Output = ChainSet<T, S>;

    fn bitxor(self, rhs: &ChainSet<T, S>) -> ChainSet<T, S> {
        self.symmetric_difference(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(xs: &[i32]) -> ChainSet<i32> {
        xs.iter().copied().collect()
    }

    #[test]
    fn basic_operations() {
        let a = set(&[1, 2, 3, 4, 5]);
        let b = set(&[4, 5, 6, 7]);
        assert_eq!(a.union(&b), set(&[1, 2, 3, 4, 5, 6, 7]));
        assert_eq!(a.intersection(&b), set(&[4, 5]));
        assert_eq!(a.difference(&b), set(&[1, 2, 3]));
        assert_eq!(a.symmetric_difference(&b), set(&[1, 2, 3, 6, 7]));
    }

    #[test]
    fn operators_match_methods() {
        let a = set(&[1, 2, 3]);
        let b = set(&[3, 4]);
        assert_eq!(&a | &b, a.union(&b));
        assert_eq!(&a & &b, a.intersection(&b));
        assert_eq!(&a - &b, a.difference(&b));
        assert_eq!(&a ^ &b, a.symmetric_difference(&b));
    }

    #[test]
    fn predicates() {
        let a = set(&[1, 2]);
        let b = set(&[1, 2, 3]);
        let c = set(&[9]);
        assert!(a.is_subset(&b));
        assert!(!b.is_subset(&a));
        assert!(b.is_superset(&a));
        assert!(a.is_disjoint(&c));
        assert!(c.is_disjoint(&b));
        assert!(!a.is_disjoint(&b));
        let empty = set(&[]);
        assert!(empty.is_subset(&a));
        assert!(empty.is_disjoint(&empty));
    }

    #[test]
    fn results_are_independent_of_operands() {
        let mut a = set(&[1, 2, 3]);
        let b = set(&[3]);
        let u = a.union(&b);
        a.insert(42);
        a.discard(&1);
        assert!(u.contains(&1));
        assert!(!u.contains(&42));
    }
}
