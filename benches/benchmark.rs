//! Performance benchmarks for page-seo-audit.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks include:
//! - A small synthetic article (~2KB) for the full audit and single analyzers
//! - Synthetic pages of growing size for throughput

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use page_seo_audit::analyzers::{headings, keywords};
use page_seo_audit::{audit, audit_with_options, Options, Page};

const LOCATION: &str = "https://example.com/guides/sample-article";

const SAMPLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width">
    <title>Sample Article for Benchmarking</title>
    <meta name="description" content="A sample article used to benchmark the SEO audit of a typical page.">
    <link rel="canonical" href="/guides/sample-article">
    <link rel="alternate" hreflang="en" href="/guides/sample-article">
    <link rel="alternate" hreflang="x-default" href="/guides/sample-article">
    <script type="application/ld+json">{"@type": "Article", "headline": "Sample", "author": "Jo"}</script>
</head>
<body>
    <nav>
        <a href="/">Home</a>
        <a href="/about">About</a>
        <a href="https://other.example.org/" rel="nofollow">Partner</a>
    </nav>
    <article>
        <h1>Sample Article Title</h1>
        <p>This is the first paragraph of the article. It contains some meaningful
        content that the content analyzer will count.</p>
        <h2>Second section</h2>
        <p>Here is a second paragraph with more content. Keywords such as audit and
        content appear more than once in the audit.</p>
        <img src="/img/figure.png" alt="Figure" width="640" height="480">
        <h4>Skipped level</h4>
        <p>A third paragraph ensures we have enough content for meaningful
        benchmarking of the audit performance.</p>
    </article>
    <footer>
        <p>Copyright 2024</p>
    </footer>
</body>
</html>
"#;

fn sample_page() -> Option<Page> {
    Page::parse(SAMPLE_HTML, LOCATION).ok()
}

fn bench_audit_default(c: &mut Criterion) {
    let Some(page) = sample_page() else { return };
    c.bench_function("audit_default", |b| {
        b.iter(|| audit(black_box(&page)));
    });
}

fn bench_audit_with_options(c: &mut Criterion) {
    let Some(page) = sample_page() else { return };
    let options = Options {
        keyword_limit: 25,
        selector_text_len: 30,
        ..Options::default()
    };

    c.bench_function("audit_with_options", |b| {
        b.iter(|| audit_with_options(black_box(&page), black_box(&options)));
    });
}

fn bench_parse_and_audit(c: &mut Criterion) {
    c.bench_function("parse_and_audit", |b| {
        b.iter(|| page_seo_audit::audit_html(black_box(SAMPLE_HTML), LOCATION));
    });
}

fn bench_single_analyzers(c: &mut Criterion) {
    let Some(page) = sample_page() else { return };
    let options = Options::default();

    let mut group = c.benchmark_group("analyzers");
    group.bench_function("headings", |b| {
        b.iter(|| headings::analyze(black_box(&page), &options));
    });
    group.bench_function("keywords", |b| {
        b.iter(|| keywords::analyze(black_box(&page), &options));
    });
    group.finish();
}

/// Throughput on pages with a growing number of sections
fn bench_page_size(c: &mut Criterion) {
    let section = r#"<section><h2>Section</h2><p>Paragraph text with several words. And a second sentence!</p>
        <a href="/next">Next page</a><img src="/img/photo.jpg" width="320" height="200"></section>"#;

    let mut group = c.benchmark_group("page_size");

    for sections in [10, 100, 1_000] {
        let html = format!("<html><body><h1>Big page</h1>{}</body></html>", section.repeat(sections));
        let Ok(page) = Page::parse(&html, LOCATION) else { continue };

        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("audit", sections), &page, |b, page| {
            b.iter(|| audit(black_box(page)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_audit_default,
    bench_audit_with_options,
    bench_parse_and_audit,
    bench_single_analyzers,
    bench_page_size
);
criterion_main!(benches);
