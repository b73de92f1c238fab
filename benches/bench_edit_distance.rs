use cats::{edit_distance, substitution_distance};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn bench_edit_distance(c: &mut Criterion) {
    let pairs = [("ckiteus", "kittens"), ("intention", "execution"), ("abcdefgh", "stuvwxyz")];

    let mut group = c.benchmark_group("edit_distance");
    for limit in [1, 3, 5] {
        group.bench_with_input(BenchmarkId::from_parameter(limit), &limit, |b, &limit| {
            b.iter(|| {
                for (start, goal) in pairs {
                    black_box(edit_distance(black_box(start), black_box(goal), limit));
                }
            })
        });
    }
    group.finish();

    c.bench_function("substitution_distance", |b| {
        b.iter(|| {
            for (start, goal) in pairs {
                black_box(substitution_distance(black_box(start), black_box(goal), 10));
            }
        })
    });
}

criterion_group!(benches, bench_edit_distance);
criterion_main!(benches);
