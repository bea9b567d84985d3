//! Benchmarks for segmentation and caret remapping.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tagline::caret::plain_to_structured;
use tagline::document::Document;
use tagline::segment::segment;

const LINE: &str = "@you #hello there #welcome to @ our";

fn bench_segment_line(c: &mut Criterion) {
    c.bench_function("segment_line", |b| {
        b.iter(|| segment(black_box(LINE)).unwrap())
    });
}

fn bench_parse_document(c: &mut Criterion) {
    let text = std::iter::repeat_n(LINE, 500).collect::<Vec<_>>().join("\n");
    c.bench_function("parse_document", |b| {
        b.iter(|| Document::parse(black_box(&text)).unwrap())
    });
}

fn bench_remap_caret(c: &mut Criterion) {
    let spans = segment(LINE).unwrap();
    c.bench_function("remap_caret", |b| {
        b.iter(|| plain_to_structured(black_box(&spans), black_box(28)))
    });
}

criterion_group!(
    benches,
    bench_segment_line,
    bench_parse_document,
    bench_remap_caret
);
criterion_main!(benches);
