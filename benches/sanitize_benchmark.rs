//! Benchmarks for rsvpdf sanitizing performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks run the noise filter and the audit masks over synthetic
//! papers of various sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rsvpdf::{Dictionary, Lexicon, SanitizeOptions};

/// Creates a synthetic paper with the given number of body paragraphs.
fn create_test_paper(paragraph_count: usize) -> String {
    let mut text = String::from(
        "arXiv:2401.00001v2 [cs.LG] 12 Jan 2024\n\
         Selective State Spaces for Sequence Modeling\n\
         Jane Doe1, John Roe2\n\
         1Department of Computer Science, Example University\n\
         {jane,john}@example.edu\n\
         Abstract\n",
    );

    for i in 0..paragraph_count {
        text.push_str(&format!(
            "The model in section {i} learns a selective scan over the input sequence \
             and compares favourably with earlier work (Gu et al., 2021) [3, 4].\n\
             x(t) = A·h(t) + B·u(t)\n\
             Code for this experiment is available at https://github.com/example/repo{i}\n\
             We find that the recurrent view of the layer keeps memory use constant in \
             the length of the input, which makes long con-\n\
             texts practical on a single device.\n"
        ));
    }

    text.push_str(
        "References\n\
         [1] A. Author. A paper about things. 2020.\n\
         [2] B. Author. Another paper. 2021.\n",
    );
    text
}

fn create_test_lexicon() -> Lexicon {
    Lexicon::with_dictionary(Dictionary::from_words([
        "the", "model", "in", "section", "learns", "a", "selective", "scan", "over", "input",
        "sequence", "and", "compares", "with", "earlier", "work", "code", "for", "this",
        "experiment", "is", "available", "at", "we", "find", "that", "recurrent", "view", "of",
        "layer", "keeps", "memory", "use", "constant", "length", "which", "makes", "long",
        "contexts", "practical", "on", "single", "device",
    ]))
}

/// Benchmark the full sanitizing pipeline at various sizes.
fn bench_sanitize(c: &mut Criterion) {
    let mut group = c.benchmark_group("sanitize");
    let lexicon = create_test_lexicon();
    let options = SanitizeOptions::default();

    for para_count in [10, 100, 500, 1000].iter() {
        let text = create_test_paper(*para_count);

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("paragraphs", para_count),
            &text,
            |b, text| {
                b.iter(|| rsvpdf::sanitize(black_box(text), &lexicon, &options));
            },
        );
    }

    group.finish();
}

/// Benchmark the pipeline with and without line-level parallelism.
fn bench_line_parallelism(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_parallelism");
    let lexicon = create_test_lexicon();
    let text = create_test_paper(1000);

    group.throughput(Throughput::Bytes(text.len() as u64));
    for (name, options) in [
        ("parallel", SanitizeOptions::default()),
        ("sequential", SanitizeOptions::default().with_parallel(false)),
    ] {
        group.bench_with_input(BenchmarkId::new(name, 1000), &text, |b, text| {
            b.iter(|| rsvpdf::sanitize(black_box(text), &lexicon, &options));
        });
    }

    group.finish();
}

/// Benchmark audit mask construction.
fn bench_audit(c: &mut Criterion) {
    let mut group = c.benchmark_group("audit");
    let lexicon = create_test_lexicon();
    let options = SanitizeOptions::default();

    for para_count in [10, 100, 500].iter() {
        let text = create_test_paper(*para_count);

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("paragraphs", para_count),
            &text,
            |b, text| {
                b.iter(|| rsvpdf::audit(black_box(text), &lexicon, &options));
            },
        );
    }

    group.finish();
}

/// Benchmark the dictionary-free fallback.
fn bench_regex_only(c: &mut Criterion) {
    let lexicon = Lexicon::without_dictionary();
    let options = SanitizeOptions::default();
    let text = create_test_paper(100);

    c.bench_function("sanitize_regex_only", |b| {
        b.iter(|| rsvpdf::sanitize(black_box(&text), &lexicon, &options));
    });
}

criterion_group!(
    benches,
    bench_sanitize,
    bench_line_parallelism,
    bench_audit,
    bench_regex_only,
);
criterion_main!(benches);
