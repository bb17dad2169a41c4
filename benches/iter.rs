use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use holdem_equity::core::{CardIter, Deck};

fn iter_all(c: &mut Criterion) {
    let cards = Deck::new().to_vec();
    let mut group = c.benchmark_group("card_iter");
    for k in [2, 3, 5] {
        group.bench_with_input(BenchmarkId::new("all", k), &k, |b, &k| {
            b.iter(|| CardIter::new(&cards, k).count())
        });
    }
    group.finish();
}

fn iter_starting_at(c: &mut Criterion) {
    let cards = Deck::new().to_vec();
    c.bench_function("card_iter_starting_at_middle", |b| {
        b.iter(|| {
            CardIter::starting_at(&cards, 5, std::hint::black_box(1_299_480))
                .take(1000)
                .count()
        })
    });
}

criterion_group!(benches, iter_all, iter_starting_at);
criterion_main!(benches);
