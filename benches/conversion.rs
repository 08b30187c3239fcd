//! Benchmarks for the article rendering pipeline.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};

use folio::dom::{Document, InlineStyle};
use folio::toc::{build_outline, headings_from_html};
use folio::{Article, convert_html};

const ARTICLE_HTML: &str = include_str!("../tests/fixtures/article.html");

/// The fixture repeated until it resembles a long-form post.
fn long_article() -> String {
    ARTICLE_HTML.repeat(40)
}

// ============================================================================
// Parsing Benchmarks
// ============================================================================

fn bench_parse_document(c: &mut Criterion) {
    let html = long_article();

    c.bench_function("parse_document", |b| {
        b.iter(|| Document::parse(&html));
    });
}

fn bench_parse_inline_style(c: &mut Criterion) {
    let style = "color: #333; font-size: 18px !important; margin: 0 auto; --accent: rgb(1, 2, 3)";

    c.bench_function("parse_inline_style", |b| {
        b.iter(|| InlineStyle::parse(style));
    });
}

// ============================================================================
// Rendering Benchmarks
// ============================================================================

fn bench_convert_html(c: &mut Criterion) {
    let html = long_article();

    c.bench_function("convert_html", |b| {
        b.iter(|| convert_html(&html));
    });
}

// ============================================================================
// Table of Contents Benchmarks
// ============================================================================

fn bench_build_outline(c: &mut Criterion) {
    let headings = headings_from_html(&long_article());

    c.bench_function("build_outline", |b| {
        b.iter(|| build_outline(&headings));
    });
}

fn bench_article_parse(c: &mut Criterion) {
    let html = long_article();

    c.bench_function("article_parse", |b| {
        b.iter(|| Article::parse(&html));
    });
}

criterion_group!(
    benches,
    // Parsing
    bench_parse_document,
    bench_parse_inline_style,
    // Rendering
    bench_convert_html,
    // Table of contents
    bench_build_outline,
    bench_article_parse,
);
criterion_main!(benches);
