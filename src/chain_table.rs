//! ChainTable: bucket array of singly linked chains over an entry arena.
//!
//! Entries live in a `SlotMap`; a bucket slot holds the arena key of its
//! chain head and each entry holds the key of its successor. Deleted slots
//! go back on the arena's free list and are reused by later inserts.

use crate::reentrancy::DebugReentrancy;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::mem;
use slotmap::{DefaultKey, SlotMap};
use std::collections::hash_map::RandomState;

/// Bucket count of a fresh table, and the floor for shrinking.
pub const INITIAL_CAPACITY: usize = 8;

/// Growth threshold for `len / capacity`, checked before each insert.
pub const MAX_LOAD_FACTOR: f64 = 0.66;

type EntryId = DefaultKey;

#[derive(Debug)]
struct ChainEntry<K, V> {
    key: K,
    value: V,
    hash: u64,
    next: Option<EntryId>,
}

pub struct ChainTable<K, V, S = RandomState> {
    hasher: S,
    heads: Box<[Option<EntryId>]>,
    entries: SlotMap<EntryId, ChainEntry<K, V>>,
    reentrancy: DebugReentrancy,
}

fn empty_heads(capacity: usize) -> Box<[Option<EntryId>]> {
    vec![None; capacity].into_boxed_slice()
}

#[inline]
fn bucket_of(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

impl<K, V> ChainTable<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<K, V> Default for ChainTable<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the entries of a `ChainTable`, bucket by bucket.
///
/// Within a bucket, entries come out most recently inserted first.
pub struct Iter<'a, K, V> {
    heads: core::slice::Iter<'a, Option<EntryId>>,
    entries: &'a SlotMap<EntryId, ChainEntry<K, V>>,
    cursor: Option<EntryId>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(id) = self.cursor {
                let entries = self.entries;
                let entry = &entries[id];
                self.cursor = entry.next;
                self.remaining -= 1;
                return Some((&entry.key, &entry.value));
            }
            self.cursor = *self.heads.next()?;
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> core::iter::FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            heads: self.heads.clone(),
            entries: self.entries,
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

impl<K, V, S> ChainTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Clone + Default,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            hasher,
            heads: empty_heads(INITIAL_CAPACITY),
            entries: SlotMap::with_key(),
            reentrancy: DebugReentrancy::new(),
        }
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.heads.len()
    }

    /// Number of entries chained in bucket `index`, or `None` past the end.
    pub fn chain_len(&self, index: usize) -> Option<usize> {
        let mut cursor = *self.heads.get(index)?;
        let mut n = 0;
        while let Some(id) = cursor {
            n += 1;
            cursor = self.entries[id].next;
        }
        Some(n)
    }

    fn exceeds_load(&self, count: usize) -> bool {
        count as f64 / self.capacity() as f64 > MAX_LOAD_FACTOR
    }

    fn find_in_bucket<Q>(&self, bucket: usize, hash: u64, q: &Q) -> Option<EntryId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let mut cursor = self.heads[bucket];
        while let Some(id) = cursor {
            let entry = &self.entries[id];
            if entry.hash == hash && entry.key.borrow() == q {
                return Some(id);
            }
            cursor = entry.next;
        }
        None
    }

    fn find<Q>(&self, q: &Q) -> Option<EntryId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        self.find_in_bucket(bucket_of(hash, self.capacity()), hash, q)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        self.find(q).is_some()
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let id = self.find(q)?;
        Some(&self.entries[id].value)
    }

    pub fn get_key_value<Q>(&self, q: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let id = self.find(q)?;
        let entry = &self.entries[id];
        Some((&entry.key, &entry.value))
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = {
            let _g = self.reentrancy.enter();
            self.find(q)?
        };
        Some(&mut self.entries[id].value)
    }

    /// Insert `key -> value`, or overwrite the value of an equal stored key.
    ///
    /// Returns the replaced value. The load check runs before the key is
    /// looked up, so the table may grow even when the key already exists.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.exceeds_load(self.len() + 1) {
            self.resize(self.capacity() * 2);
        }

        let _g = self.reentrancy.enter();
        let hash = self.make_hash(&key);
        let bucket = bucket_of(hash, self.capacity());
        if let Some(id) = self.find_in_bucket(bucket, hash, &key) {
            return Some(mem::replace(&mut self.entries[id].value, value));
        }

        let id = self.entries.insert(ChainEntry {
            key,
            value,
            hash,
            next: self.heads[bucket],
        });
        self.heads[bucket] = Some(id);
        None
    }

    /// Unlink and return the entry stored under `q`.
    ///
    /// A table left sparse (fewer than a quarter of its buckets in use)
    /// shrinks by half, never below `INITIAL_CAPACITY`.
    pub fn remove<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let removed = {
            let _g = self.reentrancy.enter();
            let hash = self.make_hash(q);
            let bucket = bucket_of(hash, self.capacity());
            let mut prev: Option<EntryId> = None;
            let mut cursor = self.heads[bucket];
            loop {
                let id = cursor?;
                let (matches, next) = {
                    let entry = &self.entries[id];
                    (entry.hash == hash && entry.key.borrow() == q, entry.next)
                };
                if matches {
                    match prev {
                        Some(p) => self.entries[p].next = next,
                        None => self.heads[bucket] = next,
                    }
                    break self.entries.remove(id)?;
                }
                prev = Some(id);
                cursor = next;
            }
        };

        let capacity = self.capacity();
        if capacity > INITIAL_CAPACITY && self.len() < capacity / 4 {
            self.resize(INITIAL_CAPACITY.max(capacity / 2));
        }
        // Key and value drop in the caller, after the table is consistent.
        Some((removed.key, removed.value))
    }

    /// Drop every entry and return to `INITIAL_CAPACITY` buckets.
    pub fn clear(&mut self) {
        self.heads = empty_heads(INITIAL_CAPACITY);
        self.entries.clear();
    }

    /// Rebuild the bucket array with `new_capacity` slots.
    ///
    /// The new array is allocated before any link changes. Entries are not
    /// moved: each is re-threaded, in old bucket order, onto the front of
    /// the chain its stored hash selects.
    fn resize(&mut self, new_capacity: usize) {
        let mut heads = empty_heads(new_capacity);
        for &head in self.heads.iter() {
            let mut cursor = head;
            while let Some(id) = cursor {
                let entry = &mut self.entries[id];
                cursor = entry.next;
                let bucket = bucket_of(entry.hash, new_capacity);
                entry.next = heads[bucket];
                heads[bucket] = Some(id);
            }
        }
        log::trace!(
            "chain table resize {} -> {} buckets ({} entries)",
            self.capacity(),
            new_capacity,
            self.len()
        );
        self.heads = heads;
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            heads: self.heads.iter(),
            entries: &self.entries,
            cursor: None,
            remaining: self.entries.len(),
        }
    }

    /// Iterator over the keys, in the order of `iter`.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Iterator over the values, in the order of `iter`.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }
}

impl<K, V, S> Clone for ChainTable<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: BuildHasher + Clone + Default,
{
    /// Builds a new table and re-inserts every entry; no storage is shared.
    fn clone(&self) -> Self {
        let mut table = Self::with_hasher(self.hasher.clone());
        for (k, v) in self.iter() {
            table.insert(k.clone(), v.clone());
        }
        table
    }
}

impl<K, V, S> core::fmt::Debug for ChainTable<K, V, S>
where
    K: Eq + Hash + core::fmt::Debug,
    V: core::fmt::Debug,
    S: BuildHasher + Clone + Default,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
