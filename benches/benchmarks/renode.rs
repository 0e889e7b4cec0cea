use criterion::{criterion_group, BatchSize, Criterion};
use nodygon::{renode, CutSet, Geometry, Tolerance};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// A jagged line string wandering across the unit square.
fn random_line_string(rng: &mut StdRng, vertices: usize) -> Geometry {
    Geometry::LineString(
        (0..vertices)
            .map(|_| [rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)])
            .collect::<Vec<[f64; 2]>>()
            .into(),
    )
}

pub fn renoding(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("renode");

    group.bench_function("build cut set", |b| {
        let mut rng = StdRng::seed_from_u64(0);
        let source = random_line_string(&mut rng, 1000);

        b.iter_batched(|| &source, CutSet::new, BatchSize::SmallInput)
    });

    group.bench_function("renode line string", |b| {
        let mut rng = StdRng::seed_from_u64(0);
        let cut = CutSet::new(&random_line_string(&mut rng, 500));
        let subject = random_line_string(&mut rng, 500);
        let tolerance = Tolerance::default();

        b.iter(|| renode(&subject, &cut, &tolerance))
    });

    group.finish();
}

criterion_group!(benches, renoding);
