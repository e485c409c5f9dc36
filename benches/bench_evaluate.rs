use cluesolve::{Corpus, Evaluator, Ranker};
use criterion::{Criterion, criterion_group, criterion_main};

const VOCAB: &[&str] = &[
    "small", "large", "animal", "bird", "river", "stone", "quick", "silent", "ancient", "metal",
    "fruit", "garden", "storm", "light", "shadow", "winter", "ocean", "forest", "music", "paper",
];

fn corpus_with(words: usize, offset: usize) -> Corpus {
    (0..words)
        .map(|i| {
            let pick = |n: usize| VOCAB[(i * 11 + offset + n) % VOCAB.len()];
            let clues = vec![
                format!("{} {}", pick(0), pick(2)),
                format!("the {} in {}", pick(1), pick(5)),
            ];
            (format!("w{i:05}"), clues)
        })
        .collect()
}

fn bench_evaluate(c: &mut Criterion) {
    let corpus = corpus_with(3_000, 0);
    let golden = corpus_with(4_000, 1);
    let evaluator = Evaluator::new(Ranker::default()).with_seed(42);

    c.bench_function("evaluate_10_samples_4_loops", |b| {
        b.iter(|| {
            let _ = evaluator.evaluate(&corpus, &golden, 10, 4);
        })
    });
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);
