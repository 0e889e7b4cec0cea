use criterion::{criterion_group, BatchSize, Criterion};
use nodygon::{Envelope, RTree, Visit};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_records(amount: usize) -> Vec<(Envelope, usize)> {
    let mut rng = StdRng::seed_from_u64(0);

    (0..amount)
        .map(|record| {
            let min_x: f64 = rng.random_range(0.0..0.9);
            let min_y: f64 = rng.random_range(0.0..0.9);

            let envelope = Envelope {
                min: [min_x, min_y].into(),
                max: [
                    min_x + rng.random_range(0.0..0.1),
                    min_y + rng.random_range(0.0..0.1),
                ]
                .into(),
            };

            (envelope, record)
        })
        .collect()
}

pub fn index(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("index");

    group.bench_function("insert", |b| {
        b.iter_batched(
            || random_records(1000),
            |records| {
                let mut tree = RTree::new();
                for (envelope, record) in records {
                    tree.insert(envelope, record);
                }
                tree
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("bulk load", |b| {
        b.iter_batched(
            || random_records(1000),
            RTree::bulk_load,
            BatchSize::SmallInput,
        )
    });

    group.bench_function("range search", |b| {
        let tree = RTree::bulk_load(random_records(1000));
        let query = Envelope {
            min: [0.25, 0.25].into(),
            max: [0.75, 0.75].into(),
        };

        b.iter(|| {
            let mut found = 0usize;
            let _: Result<(), ()> = tree.range_search(query, |_| {
                found += 1;
                Visit::Continue
            });
            found
        })
    });

    group.bench_function("priority search", |b| {
        let tree = RTree::bulk_load(random_records(1000));
        let query = Envelope {
            min: [0.5, 0.5].into(),
            max: [0.5, 0.5].into(),
        };

        b.iter(|| {
            let mut found = 0usize;
            let _: Result<(), ()> = tree.priority_search(query, |_| {
                found += 1;
                if found == 100 {
                    Visit::Stop
                } else {
                    Visit::Continue
                }
            });
            found
        })
    });

    group.finish();
}

criterion_group!(benches, index);
