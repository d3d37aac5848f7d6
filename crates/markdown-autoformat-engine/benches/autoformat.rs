use criterion::{Criterion, black_box, criterion_group, criterion_main};
use markdown_autoformat_engine::markdown::{AutoformatOptions, convert_from_plain_text};
use markdown_autoformat_engine::tree::Document;
mod common;

fn bench_import(c: &mut Criterion) {
    let mut group = c.benchmark_group("import");
    group.sample_size(20);

    let content = common::generate_markdown_content(100);
    group.bench_function("from_plain_text", |b| {
        b.iter(|| {
            let doc = Document::from_plain_text(black_box(&content)).unwrap();
            black_box(doc);
        });
    });

    group.finish();
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    group.sample_size(20);

    let options = AutoformatOptions::default();
    let mixed = common::generate_markdown_content(100);
    group.bench_function("mixed_markdown", |b| {
        b.iter(|| {
            let doc = convert_from_plain_text(black_box(&mixed), &options).unwrap();
            black_box(doc);
        });
    });

    // Every code line removes a block, so this is dominated by restarts.
    let code_heavy = common::generate_code_heavy_content(20, 50);
    group.bench_function("code_heavy", |b| {
        b.iter(|| {
            let doc = convert_from_plain_text(black_box(&code_heavy), &options).unwrap();
            black_box(doc);
        });
    });

    let no_inline = AutoformatOptions {
        inline_formatting: false,
        ..Default::default()
    };
    group.bench_function("mixed_markdown_blocks_only", |b| {
        b.iter(|| {
            let doc = convert_from_plain_text(black_box(&mixed), &no_inline).unwrap();
            black_box(doc);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_import, bench_convert);
criterion_main!(benches);
