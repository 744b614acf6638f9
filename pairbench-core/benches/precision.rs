use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pairbench_core::distance::optimized_pairwise;
use pairbench_core::points::random_array;

fn bench_precision(c: &mut Criterion) {
    let mut rng = rand::thread_rng();

    let sizes = vec![256, 512, 1024];

    let mut group = c.benchmark_group("Optimized Precision");

    for n in sizes {
        let narrow = random_array::<f32, _>(n, &mut rng);
        let wide = random_array::<f64, _>(n, &mut rng);

        group.bench_with_input(format!("f32 (n={})", n), &narrow, |b, points| {
            b.iter(|| optimized_pairwise(black_box(points.view())))
        });

        group.bench_with_input(format!("f64 (n={})", n), &wide, |b, points| {
            b.iter(|| optimized_pairwise(black_box(points.view())))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_precision);
criterion_main!(benches);
