// ChainMap unit test suite.
//
// Each test documents what behavior is being verified and which
// invariants are assumed or asserted. The core invariants exercised:
// - Round trip: `get(k)` returns the last value put under `k`.
// - Deletion completeness: after `remove(k)`, `contains_key(k)` is false and
//   `get(k)` is `NotFound`.
// - Load factor: `len / capacity <= 0.66` after every put.
// - Shrink floor: capacity never drops below the initial eight buckets.
// - Traversal: a full iteration yields exactly `len` entries.
use chain_collections::{ChainMap, KeyError, INITIAL_CAPACITY, MAX_LOAD_FACTOR};
use std::collections::BTreeMap;

// Test: six puts starting from an empty map.
// Assumes: growth check `(len + 1) / capacity > 0.66` runs before each put.
// Verifies: capacity stays 8 through five puts, doubles on the sixth.
#[test]
fn sixth_put_grows_to_sixteen() {
    let mut m = ChainMap::new();
    for (k, v) in (1..=5).zip(["a", "b", "c", "d", "e"]) {
        m.put(k, v);
        assert_eq!(m.capacity(), 8);
    }
    m.put(6, "f");
    assert_eq!(m.len(), 6);
    assert_eq!(m.capacity(), 16);
    assert_eq!(m.get(&3), Ok(&"c"));
}

// Test: removing five of six entries.
// Assumes: a map at capacity 16 holding six keys.
// Verifies: shrink to 8 once len < 16 / 4; final capacity 8.
#[test]
fn draining_shrinks_back_to_eight() {
    let mut m: ChainMap<i32, &str> = (1..=6).zip(["a", "b", "c", "d", "e", "f"]).collect();
    assert_eq!(m.capacity(), 16);
    for k in 1..=5 {
        assert!(m.remove(&k).is_ok());
    }
    assert_eq!(m.len(), 1);
    assert_eq!(m.capacity(), 8);
    assert_eq!(m.get(&6), Ok(&"f"));
}

// Test: last write wins.
// Verifies: `put` returns the replaced value; `len` counts keys once.
#[test]
fn put_overwrites_and_reports_previous() {
    let mut m = ChainMap::new();
    assert_eq!(m.put("k".to_string(), 1), None);
    assert_eq!(m.put("k".to_string(), 2), Some(1));
    assert_eq!(m.put("k".to_string(), 3), Some(2));
    assert_eq!(m.len(), 1);
    assert_eq!(m.get("k"), Ok(&3));
}

// Test: deletion completeness across many keys and a shrink.
// Verifies: removed keys are gone; others keep their values.
#[test]
fn removed_keys_are_not_found() {
    let mut m: ChainMap<u32, u32> = (0..100).map(|k| (k, k * 10)).collect();
    for k in (0..100).filter(|k| k % 2 == 0) {
        assert_eq!(m.remove(&k), Ok(k * 10));
    }
    for k in 0..100 {
        if k % 2 == 0 {
            assert!(!m.contains_key(&k));
            assert_eq!(m.get(&k), Err(KeyError::NotFound));
            assert_eq!(m.remove(&k), Err(KeyError::NotFound));
        } else {
            assert_eq!(m.get(&k), Ok(&(k * 10)));
        }
    }
    assert_eq!(m.len(), 50);
}

// Test: load factor and floor through a grow/drain cycle.
// Verifies: ratio bound after every put; capacity >= 8 after every remove.
#[test]
fn load_factor_and_floor_hold_throughout() {
    let mut m = ChainMap::new();
    for k in 0..500u32 {
        m.put(k, ());
        assert!(m.len() as f64 / m.capacity() as f64 <= MAX_LOAD_FACTOR);
    }
    for k in 0..500u32 {
        m.remove(&k).unwrap();
        assert!(m.capacity() >= INITIAL_CAPACITY);
    }
    assert!(m.is_empty());
    assert_eq!(m.capacity(), INITIAL_CAPACITY);
}

// Test: traversal against a model.
// Verifies: items/keys/values agree with each other and with a BTreeMap.
#[test]
fn traversal_matches_model() {
    let mut m = ChainMap::new();
    let mut model = BTreeMap::new();
    for i in 0..64u64 {
        let k = i.wrapping_mul(0x9e37_79b9_7f4a_7c15) % 97;
        m.put(k, i);
        model.insert(k, i);
    }
    assert_eq!(m.iter().len(), m.len());
    let seen: BTreeMap<u64, u64> = m.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(seen, model);

    let keys = m.keys();
    let values = m.values();
    assert_eq!(keys.len(), model.len());
    for (i, (k, v)) in m.items().iter().enumerate() {
        assert_eq!(keys.get(i), Ok(k));
        assert_eq!(values.get(i), Ok(v));
    }
}

// Test: get_mut and Index.
// Verifies: in-place mutation is visible to later lookups.
#[test]
fn get_mut_and_index() {
    let mut m: ChainMap<String, Vec<u8>> = ChainMap::new();
    m.put("bytes".to_string(), vec![1]);
    m.get_mut("bytes").unwrap().push(2);
    assert_eq!(m["bytes"], vec![1, 2]);
    assert_eq!(m.get_mut("nope"), Err(KeyError::NotFound));
}

// Test: clones own their storage.
// Verifies: mutating a clone does not affect the source, and equality
// compares contents regardless of bucket layout.
#[test]
fn clone_and_equality() {
    let a: ChainMap<u32, String> = (0..40).map(|k| (k, format!("v{k}"))).collect();
    let mut b = a.clone();
    assert_eq!(a, b);
    b.put(0, "changed".to_string());
    assert_ne!(a, b);
    assert_eq!(a.get(&0).map(String::as_str), Ok("v0"));

    // same contents, different growth history
    let mut c: ChainMap<u32, String> = (0..200).map(|k| (k, format!("v{k}"))).collect();
    for k in 40..200 {
        c.remove(&k).unwrap();
    }
    assert_eq!(a, c);
}

// Test: clear.
// Verifies: empties the map and resets the bucket count.
#[test]
fn clear_resets_capacity() {
    let mut m: ChainMap<u32, u32> = (0..50).map(|k| (k, k)).collect();
    m.clear();
    assert!(m.is_empty());
    assert_eq!(m.capacity(), INITIAL_CAPACITY);
    assert_eq!(m.get(&1), Err(KeyError::NotFound));
}

// Test: remove_entry hands back the stored key.
#[test]
fn remove_entry_returns_owned_pair() {
    let mut m = ChainMap::new();
    m.put("key".to_string(), 5);
    assert_eq!(m.remove_entry("key"), Ok(("key".to_string(), 5)));
    assert_eq!(m.remove_entry("key"), Err(KeyError::NotFound));
}

// Test: Display.
// Verifies: braces, `Debug` forms, comma separation.
#[test]
fn display_lists_entries() {
    let mut m = ChainMap::new();
    m.put("only", 1);
    assert_eq!(m.to_string(), "{\"only\": 1}");
    m.put("two", 2);
    let s = m.to_string();
    assert!(s == "{\"only\": 1, \"two\": 2}" || s == "{\"two\": 2, \"only\": 1}");
}
