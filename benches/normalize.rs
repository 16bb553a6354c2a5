use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::fs;

use urlcanon::normalize;

fn bench_normalize_corpus(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize-corpus");

    let data = match fs::read_to_string("tests/testdata/urls.tsv") {
        Ok(d) => d,
        Err(_) => return,
    };
    let urls: Vec<&str> = data
        .lines()
        .filter_map(|l| l.split('\t').next())
        .collect();

    group.throughput(Throughput::Elements(urls.len() as u64));
    group.bench_function("corpus", |b| {
        b.iter(|| {
            for url in &urls {
                let _ = normalize(url);
            }
        })
    });
    group.finish();
}

fn bench_normalize_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize-shapes");
    let shapes = [
        ("bare-host", "example.com"),
        ("packed-ipv4", "0xa40300b"),
        ("messy-path", "https://WWW.Example.com//A/./B/../C/"),
        ("escaped-query", "http://x.example/search?q=hello%20world&x=%41"),
    ];

    for (name, url) in shapes {
        group.bench_function(name, |b| b.iter(|| normalize(url)));
    }
    group.finish();
}

criterion_group!(benches, bench_normalize_corpus, bench_normalize_shapes);
criterion_main!(benches);
