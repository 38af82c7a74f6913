//! Benchmarks for pdfreflow layout passes.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic pdf2xml documents with book-like layout.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pdfreflow::{layout, parse_pdfxml, LayoutOptions};

/// Creates a synthetic pdf2xml document with the given number of pages.
///
/// Every page has a running header, 40 body lines in paragraphs of five
/// lines, and a page number footer. Even pages sit 12 points further left.
fn create_test_pdfxml(page_count: usize) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<pdf2xml>\n");

    for page in 1..=page_count {
        xml.push_str(&format!(
            "<page number=\"{}\" position=\"absolute\" top=\"0\" left=\"0\" height=\"1188\" width=\"918\">\n",
            page
        ));
        if page == 1 {
            xml.push_str("<fontspec id=\"0\" size=\"12\" family=\"Times\" color=\"#000000\"/>\n");
            xml.push_str("<fontspec id=\"1\" size=\"9\" family=\"Times\" color=\"#000000\"/>\n");
        }
        let shift = if page % 2 == 0 { 0 } else { 12 };

        xml.push_str(&format!(
            "<text top=\"30\" left=\"{}\" width=\"200\" height=\"11\" font=\"1\">RUNNING HEAD</text>\n",
            300 + shift
        ));
        for line in 0..40 {
            let top = 80 + line * 16;
            let (left, width) = match line % 5 {
                0 => (108 + shift, 452),
                4 => (72 + shift, 210),
                _ => (72 + shift, 488),
            };
            xml.push_str(&format!(
                "<text top=\"{}\" left=\"{}\" width=\"{}\" height=\"15\" font=\"0\">Benchmark line {} of page {} with <i>some</i> ﬁlling text.</text>\n",
                top, left, width, line, page
            ));
        }
        xml.push_str(&format!(
            "<text top=\"1120\" left=\"{}\" width=\"20\" height=\"11\" font=\"1\">{}</text>\n",
            450 + shift,
            page
        ));
        xml.push_str("</page>\n");
    }

    xml.push_str("</pdf2xml>\n");
    xml
}

fn options() -> LayoutOptions {
    LayoutOptions::new().with_header_pos(40).with_footer_pos(1100)
}

/// Benchmark pdf2xml parsing.
fn bench_parsing(c: &mut Criterion) {
    let xml = create_test_pdfxml(10);

    c.bench_function("parse_pdfxml_10_pages", |b| {
        b.iter(|| parse_pdfxml(black_box(&xml)).unwrap());
    });
}

/// Benchmark the estimate and assemble passes at various sizes.
fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let options = options();

    for page_count in [1, 10, 100].iter() {
        let doc = parse_pdfxml(&create_test_pdfxml(*page_count)).unwrap();

        group.bench_function(format!("estimate_{}_pages", page_count), |b| {
            b.iter(|| layout::estimate(black_box(&doc), &options).unwrap());
        });

        let stats = layout::estimate(&doc, &options).unwrap();
        group.bench_function(format!("assemble_{}_pages", page_count), |b| {
            b.iter(|| layout::assemble(black_box(&doc), &stats, &options).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the full pipeline including rendering.
fn bench_end_to_end(c: &mut Criterion) {
    let xml = create_test_pdfxml(10);

    c.bench_function("reflow_to_html_10_pages", |b| {
        b.iter(|| {
            pdfreflow::Reflow::new()
                .with_header_pos(40)
                .with_footer_pos(1100)
                .parse_str(black_box(&xml))
                .unwrap()
                .to_html()
                .unwrap()
        });
    });
}

criterion_group!(benches, bench_parsing, bench_layout, bench_end_to_end);
criterion_main!(benches);
