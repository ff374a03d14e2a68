use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use poker_arena::agents::estimate_win_probability;
use poker_arena::cards::{parse_cards, Card};
use poker_arena::evaluator::{evaluate_cards, evaluate_five};
use poker_arena::hand::HoleCards;
use rand::{rngs::StdRng, SeedableRng};

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).expect("bench hands parse")
}

fn bench_lookup_paths(c: &mut Criterion) {
    // one hand per table: flush, unique ranks, prime product
    let hands = [
        ("flush_table", "As Ks Qs Js Ts"),
        ("unique5_table", "Ah Kd 7s 5c 2d"),
        ("product_map", "9s 9h 9c 4d 4s"),
    ];
    let mut g = c.benchmark_group("evaluate_five");
    for (name, hand) in hands {
        let five: [Card; 5] = cards(hand).try_into().expect("five cards");
        g.bench_with_input(BenchmarkId::new(name, hand), &five, |b, input| {
            b.iter(|| evaluate_five(black_box(input)))
        });
    }
    g.finish();
}

fn bench_streets(c: &mut Criterion) {
    let full = cards("As Ah Ks Qs Js Ts 9s");
    let mut g = c.benchmark_group("evaluate_cards");
    for n in [2, 5, 6, 7] {
        g.bench_with_input(BenchmarkId::from_parameter(n), &full[..n], |b, input| {
            b.iter(|| evaluate_cards(black_box(input)))
        });
    }
    g.finish();
}

fn bench_win_probability(c: &mut Criterion) {
    let hole: HoleCards = "Ah Kh".parse().expect("hole cards parse");
    let flop = cards("Qh 7c 2h");
    let mut rng = StdRng::seed_from_u64(11);
    c.bench_function("win_probability_100_trials", |b| {
        b.iter(|| estimate_win_probability(&hole, black_box(&flop), 3, 100, &mut rng))
    });
}

criterion_group!(benches, bench_lookup_paths, bench_streets, bench_win_probability);
criterion_main!(benches);
