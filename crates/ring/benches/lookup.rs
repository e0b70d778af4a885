use chash_ring::{Crc32Hasher, HashRing, Md5Hasher, Xxh3Hasher};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn ring_of(nodes: usize) -> HashRing<Crc32Hasher> {
    let ring = HashRing::new(Crc32Hasher);
    ring.add_nodes((0..nodes).map(|i| format!("node-{}", i)), 1.0)
        .expect("distinct node ids");
    ring
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    for nodes in [4usize, 32, 256] {
        let ring = ring_of(nodes);
        group.bench_with_input(BenchmarkId::new("single", nodes), &ring, |b, ring| {
            b.iter(|| ring.lookup(black_box(b"user:1234567")))
        });
        group.bench_with_input(BenchmarkId::new("three", nodes), &ring, |b, ring| {
            b.iter(|| ring.lookup_n(black_box(b"user:1234567"), 3))
        });
    }
    group.finish();
}

fn bench_hashers(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_node");
    group.bench_function("crc32", |b| {
        b.iter(|| {
            let ring = HashRing::new(Crc32Hasher);
            ring.add_node("cache-a").expect("empty ring")
        })
    });
    group.bench_function("md5", |b| {
        b.iter(|| {
            let ring = HashRing::new(Md5Hasher);
            ring.add_node("cache-a").expect("empty ring")
        })
    });
    group.bench_function("xxh3", |b| {
        b.iter(|| {
            let ring = HashRing::new(Xxh3Hasher);
            ring.add_node("cache-a").expect("empty ring")
        })
    });
    group.finish();
}

criterion_group!(benches, bench_lookup, bench_hashers);
criterion_main!(benches);
