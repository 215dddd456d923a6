use criterion::{criterion_group, criterion_main, Criterion};
use lexrank_core::{tokenize, CancelToken, CorpusIndex, IndexConfig, SearchOptions, Strategy};

fn corpus() -> Vec<String> {
    let words = [
        "lexical",
        "retrieval",
        "scores",
        "documents",
        "against",
        "queries",
        "using",
        "term",
        "statistics",
        "inverse",
        "frequency",
        "length",
        "normalization",
        "cosine",
        "similarity",
        "bounded",
        "heap",
    ];
    (0..5_000)
        .map(|i: usize| {
            (0..(20 + i % 40))
                .map(|j| words[(i * 31 + j * 17) % words.len()])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn bench_tokenize(c: &mut Criterion) {
    let text = corpus().join("\n");
    c.bench_function("tokenize_corpus", |b| b.iter(|| tokenize(&text)));
}

fn bench_search(c: &mut Criterion) {
    let index = CorpusIndex::build(corpus(), &IndexConfig::default()).expect("non-empty corpus");
    let cancel = CancelToken::new();
    for strategy in Strategy::ALL {
        c.bench_function(&format!("search_{strategy}"), |b| {
            b.iter(|| index.search(strategy, "inverse term frequency heap", 10))
        });
        let parallel = SearchOptions {
            top_k: 10,
            parallel: true,
        };
        c.bench_function(&format!("search_{strategy}_parallel"), |b| {
            b.iter(|| {
                index.search_with(strategy, "inverse term frequency heap", &parallel, &cancel)
            })
        });
    }
}

criterion_group!(benches, bench_tokenize, bench_search);
criterion_main!(benches);
