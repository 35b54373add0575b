use chain_collections::{ChainMap, ChainSet};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("chain_map_insert_10k", |b| {
        let keys: Vec<_> = lcg(1).take(10_000).map(key).collect();
        b.iter_batched(
            || keys.clone(),
            |keys| {
                let mut m = ChainMap::new();
                for (i, k) in keys.into_iter().enumerate() {
                    m.put(k, i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("chain_map_get_hit", |b| {
        let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
        let m: ChainMap<String, u64> = keys
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, k)| (k, i as u64))
            .collect();
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get(k).unwrap());
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("chain_map_get_miss", |b| {
        let m: ChainMap<String, u64> = lcg(11)
            .take(10_000)
            .enumerate()
            .map(|(i, x)| (key(x), i as u64))
            .collect();
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // generate keys unlikely in map
            let k = key(miss.next().unwrap());
            black_box(m.get(&k).is_err());
        })
    });
}

// Removes every key, walking the table down through each shrink step.
fn bench_drain(c: &mut Criterion) {
    c.bench_function("chain_map_remove_all_10k", |b| {
        let keys: Vec<_> = lcg(3).take(10_000).map(key).collect();
        let full: ChainMap<String, u64> = keys.iter().cloned().map(|k| (k, 0)).collect();
        b.iter_batched(
            || full.clone(),
            |mut m| {
                for k in &keys {
                    let _ = m.remove(k);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_set_union(c: &mut Criterion) {
    c.bench_function("chain_set_union_5k", |b| {
        let a: ChainSet<u64> = lcg(5).take(5_000).collect();
        let other: ChainSet<u64> = lcg(5).skip(2_500).take(5_000).collect();
        b.iter(|| black_box(a.union(&other)))
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert, bench_get_hit, bench_get_miss, bench_drain, bench_set_union
}
criterion_main!(benches);
