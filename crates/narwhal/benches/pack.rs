use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use narwhal::{Particle, SectorForce, SectorSpec, pack};
use std::hint::black_box;
use std::time::Duration;

fn bench_pack(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack");
    group.measurement_time(Duration::from_secs(3));

    let specs = [
        ("demo_sector", SectorSpec::new(100.0, 500.0, 15.0, 60.0).unwrap()),
        ("full_ring", SectorSpec::full(50.0, 2_000.0).unwrap()),
    ];
    for (name, spec) in specs {
        for n in [200usize, 2_000, 20_000] {
            group.bench_with_input(BenchmarkId::new(name, n), &n, |b, &n| {
                b.iter(|| pack(black_box(&spec), black_box(n)))
            });
        }
    }
    group.finish();
}

fn bench_apply(c: &mut Criterion) {
    let mut nodes = vec![Particle::default(); 2_000];
    let mut force = SectorForce::new(100.0, 500.0).unwrap();
    force.initialize(&nodes);

    c.bench_function("sector_force_apply_2000", |b| {
        b.iter(|| force.apply(black_box(&mut nodes), black_box(0.5)))
    });
}

criterion_group!(benches, bench_pack, bench_apply);
criterion_main!(benches);
