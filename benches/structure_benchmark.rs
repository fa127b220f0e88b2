//! Benchmarks for pdf2md structuring performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use a synthetic raw text stream shaped like an
//! extracted book.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pdf2md::{Classifier, LineFilter, MarkdownRenderer, Structurer};

/// Creates a synthetic raw text stream with the given number of pages.
fn create_raw_text(page_count: usize) -> String {
    let mut raw = String::new();

    for page in 1..=page_count {
        raw.push_str(&format!("--- 第 {} 页 ---\n", page));

        if page % 10 == 1 {
            raw.push_str(&format!("第{}章 基准测试\n", page / 10 + 1));
        }
        raw.push_str(&format!("{}.1 小节标题\n", page / 10 + 1));

        // Wrapped paragraph fragments
        for _ in 0..6 {
            raw.push_str("这是一段用于性能测量的正文内容，它在提取时被截断成了\n");
            raw.push_str("多个视觉行，需要重新合并为一个完整的段落。\n");
        }

        raw.push_str("© 2024 示例出版社\n");
        raw.push_str(&format!("{}\n\n", page));
    }

    raw
}

/// Benchmark single-line operations.
fn bench_line_rules(c: &mut Criterion) {
    let filter = LineFilter::default();
    let classifier = Classifier::default();

    c.bench_function("filter_noise_line", |b| {
        b.iter(|| filter.is_noise(black_box("第 12 页")));
    });

    c.bench_function("classify_chapter", |b| {
        b.iter(|| classifier.label(black_box("第十二章 总结与展望")));
    });

    c.bench_function("classify_content", |b| {
        b.iter(|| classifier.label(black_box("这是一段普通的正文内容，不会匹配任何规则。")));
    });
}

/// Benchmark the full structuring pass at various sizes.
fn bench_structuring(c: &mut Criterion) {
    let mut group = c.benchmark_group("structuring");
    let structurer = Structurer::default();

    for page_count in [10, 100, 500].iter() {
        let raw = create_raw_text(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| structurer.structure_text(black_box(&raw)));
        });
    }

    group.finish();
}

/// Benchmark Markdown rendering.
fn bench_rendering(c: &mut Criterion) {
    let doc = Structurer::default().structure_text(&create_raw_text(100));
    let renderer = MarkdownRenderer::default();

    c.bench_function("render_100_pages", |b| {
        b.iter(|| renderer.render(black_box(&doc.records)));
    });
}

/// Benchmark rule table compilation.
fn bench_rule_compilation(c: &mut Criterion) {
    c.bench_function("structurer_creation", |b| {
        b.iter(Structurer::default);
    });
}

criterion_group!(
    benches,
    bench_line_rules,
    bench_structuring,
    bench_rendering,
    bench_rule_compilation,
);
criterion_main!(benches);
