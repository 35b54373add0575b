//! GrowList: growable indexable sequence over a boxed slot array.
//!
//! Capacity doubles when a push or insert finds the array full, and halves
//! (never below one slot) when a removal leaves it less than a quarter full.
//! Slots `0..len` are always `Some`, slots `len..capacity` always `None`.

use crate::error::SeqError;
use core::fmt;

pub struct GrowList<T> {
    slots: Box<[Option<T>]>,
    len: usize,
}

fn empty_slots<T>(capacity: usize) -> Box<[Option<T>]> {
    core::iter::repeat_with(|| None).take(capacity).collect()
}

impl<T> GrowList<T> {
    pub fn new() -> Self {
        Self {
            slots: empty_slots(1),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn check_index(&self, index: usize) -> Result<(), SeqError> {
        if index < self.len {
            Ok(())
        } else {
            Err(SeqError::IndexOutOfBounds {
                index,
                len: self.len,
            })
        }
    }

    pub fn get(&self, index: usize) -> Result<&T, SeqError> {
        self.check_index(index)?;
        self.slots[index].as_ref().ok_or(SeqError::IndexOutOfBounds {
            index,
            len: self.len,
        })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, SeqError> {
        self.check_index(index)?;
        let len = self.len;
        self.slots[index]
            .as_mut()
            .ok_or(SeqError::IndexOutOfBounds { index, len })
    }

    /// Replaces the element at `index`, returning the old one.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, SeqError> {
        let slot = self.get_mut(index)?;
        Ok(core::mem::replace(slot, value))
    }

    pub fn push(&mut self, value: T) {
        if self.len == self.capacity() {
            self.reallocate(self.capacity() * 2);
        }
        self.slots[self.len] = Some(value);
        self.len += 1;
    }

    /// Inserts at `pos` (`0..=len`), shifting later elements right.
    pub fn insert(&mut self, pos: usize, value: T) -> Result<(), SeqError> {
        if pos > self.len {
            return Err(SeqError::IndexOutOfBounds {
                index: pos,
                len: self.len,
            });
        }
        if self.len == self.capacity() {
            self.reallocate(self.capacity() * 2);
        }
        // slot `len` is empty; rotating it to `pos` shifts the tail right
        self.slots[pos..=self.len].rotate_right(1);
        self.slots[pos] = Some(value);
        self.len += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<T, SeqError> {
        if self.len == 0 {
            return Err(SeqError::Empty);
        }
        self.remove(self.len - 1)
    }

    /// Removes the element at `index`, shifting later elements left.
    pub fn remove(&mut self, index: usize) -> Result<T, SeqError> {
        if self.len == 0 {
            return Err(SeqError::Empty);
        }
        self.check_index(index)?;
        let value = self.slots[index].take();
        self.slots[index..self.len].rotate_left(1);
        self.len -= 1;
        if self.len < self.capacity() / 4 {
            self.reallocate(1.max(self.capacity() / 2));
        }
        value.ok_or(SeqError::IndexOutOfBounds {
            index,
            len: self.len,
        })
    }

    pub fn clear(&mut self) {
        self.slots = empty_slots(1);
        self.len = 0;
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    /// Position of the first element equal to `value`.
    pub fn index_of(&self, value: &T) -> Result<usize, SeqError>
    where
        T: PartialEq,
    {
        self.iter()
            .position(|v| v == value)
            .ok_or(SeqError::ValueNotFound)
    }

    /// Number of elements equal to `value`.
    pub fn count(&self, value: &T) -> usize
    where
        T: PartialEq,
    {
        self.iter().filter(|v| *v == value).count()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.slots[..self.len].iter(),
        }
    }

    fn reallocate(&mut self, new_capacity: usize) {
        let mut slots = empty_slots(new_capacity);
        for (dst, src) in slots.iter_mut().zip(self.slots[..self.len].iter_mut()) {
            *dst = src.take();
        }
        log::trace!(
            "grow list reallocate {} -> {} slots ({} elements)",
            self.capacity(),
            new_capacity,
            self.len
        );
        self.slots = slots;
    }
}

impl<T> Default for GrowList<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Iter<'a, T> {
    inner: core::slice::Iter<'a, Option<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().and_then(Option::as_ref)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().and_then(Option::as_ref)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

pub struct IntoIter<T> {
    list: GrowList<T>,
    front: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front >= self.list.len {
            return None;
        }
        let value = self.list.slots[self.front].take();
        self.front += 1;
        value
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.list.len - self.front;
        (n, Some(n))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for GrowList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            list: self,
            front: 0,
        }
    }
}

impl<'a, T> IntoIterator for &'a GrowList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> FromIterator<T> for GrowList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for GrowList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.push(v);
        }
    }
}

impl<T: Clone> Clone for GrowList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for GrowList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for GrowList<T> {}

impl<T: fmt::Debug> fmt::Debug for GrowList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for GrowList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("]")
    }
}
