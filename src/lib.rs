//! chain-collections: hash map, hash set and sequence containers that
//! manage their own backing storage.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: one chained hash table engine, specialized twice, plus the two
//!   sequence types the map hands its snapshots to.
//! - Layers:
//!   - ChainTable<K, V, S>: bucket array of singly linked chains whose
//!     entries live in a slot arena; owns the grow/shrink policy and a
//!     debug-only reentrancy guard.
//!   - ChainMap<K, V, S>: key -> value API over ChainTable; `NotFound`
//!     errors for absent keys.
//!   - ChainSet<T, S>: ChainTable with unit values; set algebra is built on
//!     top of its membership test and iteration only.
//!   - GrowList<T> / FixedSeq<T>: growable and fixed-length sequences.
//!
//! Constraints
//! - Single-threaded: `!Send`/`!Sync` (reentrancy marker).
//! - Buckets: start at 8, double when `(len + 1) / capacity` would pass
//!   0.66, halve (not below 8) when a removal leaves `len < capacity / 4`.
//! - Chains are front-inserted; iteration is bucket order, and within a
//!   bucket most recent first. No insertion-order guarantee.
//!
//! Hasher and rehashing invariants
//! - Each entry stores its `u64` hash at insertion. A resize re-threads the
//!   existing entries using the stored hash, so `K: Hash` never runs during
//!   a rehash and no entry is reallocated.
//! - The new bucket array is allocated before any link is touched; a failed
//!   allocation leaves the old table intact.
//!
//! Reentrancy policy
//! - ChainTable guards its public methods so `K: Eq`/`K: Hash` cannot reach
//!   back into the same table mid-walk (panics in debug builds).
//! - `remove` hands the unlinked key and value back to the caller; their
//!   `Drop` runs with the table already consistent.
//!
//! Notes and non-goals
//! - No persistence or serialization.
//! - Set-algebra results and clones own their storage; nothing is shared
//!   between containers.

pub mod chain_table;
mod chain_table_proptest;
pub mod error;
pub mod fixed_seq;
pub mod grow_list;
pub mod hash_map;
pub mod hash_set;
mod reentrancy;
mod set_algebra;

// Public surface
pub use chain_table::{ChainTable, INITIAL_CAPACITY, MAX_LOAD_FACTOR};
pub use error::{KeyError, SeqError};
pub use fixed_seq::FixedSeq;
pub use grow_list::GrowList;
pub use hash_map::ChainMap;
pub use hash_set::ChainSet;
