//! Benchmarks for layout reconstruction and segmentation at varying page counts.
//!
//! Run with: `cargo bench --bench layout_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tariffscan::config::{LayoutConfig, SegmentConfig};
use tariffscan::{render_document, render_page, segment, Glyph, TariffProcessor};

/// Generate one import page with a merged and a side-by-side splitted
/// container, glyphs shuffled out of reading order.
fn generate_page(page: usize) -> Vec<Glyph> {
    let mut glyphs = vec![
        Glyph::new("CMA CGM", 20.0, 820.0),
        Glyph::new("IMPORT DEMURRAGE & DETENTION", 20.0, 800.0),
        Glyph::new("Tariff in USD per container", 20.0, 780.0),
        Glyph::new("Effective date : 01/10/2026", 20.0, 760.0),
        Glyph::new("Expiration date : 31/12/2026", 20.0, 740.0),
        Glyph::new(format!("DRY {page} MERGED"), 20.0, 720.0),
        Glyph::new("SLAB", 20.0, 700.0),
        Glyph::new("20'", 120.0, 700.0),
        Glyph::new("40'", 170.0, 700.0),
        Glyph::new("45'", 220.0, 700.0),
    ];

    let mut y = 680.0;
    for (from, to) in [(1, 5), (6, 10), (11, 15), (16, 30)] {
        glyphs.push(Glyph::new(format!("From {from}th to {to}th"), 20.0, y));
        glyphs.push(Glyph::new(format!("{}", from * 10), 121.0, y));
        glyphs.push(Glyph::new(format!("{}", from * 20), 169.0, y));
        glyphs.push(Glyph::new(format!("{}", from * 20), 224.0, y));
        y -= 20.0;
    }

    glyphs.push(Glyph::new(format!("REEFER {page} SPLITTED"), 20.0, y));
    y -= 20.0;
    glyphs.push(Glyph::new("DEMURRAGE DETENTION", 20.0, y));
    y -= 20.0;
    for (text, x) in [("SLAB", 20.0), ("20'", 120.0), ("40'", 170.0), ("45'", 220.0)] {
        glyphs.push(Glyph::new(text, x, y));
        glyphs.push(Glyph::new(text, x + 300.0, y));
    }
    y -= 20.0;
    for (from, to) in [(1, 3), (4, 10), (11, 20)] {
        glyphs.push(Glyph::new(format!("From {from}th to {to}th"), 20.0, y));
        glyphs.push(Glyph::new(format!("From {from}th to {to}th"), 320.0, y));
        for (i, x) in [120.0, 170.0, 220.0, 420.0, 470.0, 520.0].into_iter().enumerate() {
            glyphs.push(Glyph::new(format!("{}", from * (i + 1) * 5), x + 1.5, y));
        }
        y -= 20.0;
    }

    glyphs.reverse();
    glyphs
}

fn bench_render_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_page");
    let layout = LayoutConfig::default();
    let page = generate_page(1);

    group.throughput(Throughput::Elements(page.len() as u64));
    group.bench_function("mixed_schedules", |b| {
        b.iter(|| black_box(render_page(black_box(&page), 1, &layout)));
    });

    group.finish();
}

fn bench_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("document");
    let processor = TariffProcessor::default();

    for pages in [1usize, 10, 50] {
        let doc: Vec<Vec<Glyph>> = (1..=pages).map(generate_page).collect();
        group.throughput(Throughput::Elements(pages as u64));
        group.bench_with_input(BenchmarkId::new("process_pages", pages), &doc, |b, doc| {
            b.iter(|| black_box(processor.process_pages(black_box(doc))));
        });
    }

    group.finish();
}

fn bench_segment(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment");
    let layout = LayoutConfig::default();
    let config = SegmentConfig::default();

    let pages: Vec<_> = (1..=20)
        .filter_map(|n| render_page(&generate_page(n), n, &layout))
        .collect();
    let text = render_document(&pages);

    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("20_pages", |b| {
        b.iter(|| black_box(segment(black_box(&text), &config)));
    });

    group.finish();
}

criterion_group!(benches, bench_render_page, bench_document, bench_segment);
criterion_main!(benches);
