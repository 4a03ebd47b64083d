//! Benchmarks for document composition and source highlighting.

use std::fmt::Write;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use wysi::document::compose;
use wysi::highlight::highlight_lines;

fn sample_markup(sections: usize) -> String {
    let mut markup = String::from("<main>\n");
    for i in 0..sections {
        let _ = writeln!(
            markup,
            "  <section id=\"s{i}\">\n    <h2>Section {i}</h2>\n    <p>Body text {i}</p>\n  </section>"
        );
    }
    markup.push_str("</main>\n");
    markup
}

fn bench_compose_skeleton(c: &mut Criterion) {
    let markup = sample_markup(200);
    let styles = "body { margin: 0; }\nh2 { color: teal; }\n".repeat(50);
    let script = "console.log('ready');\n".repeat(50);
    c.bench_function("compose_skeleton", |b| {
        b.iter(|| compose(black_box(&markup), black_box(&styles), black_box(&script)));
    });
}

fn bench_compose_markers(c: &mut Criterion) {
    let markup = format!(
        "<html><head><style id=\"custom-css\"></style></head><body>{}<script id=\"custom-js\"></script></body></html>",
        sample_markup(200)
    );
    let styles = "p { line-height: 1.4; }\n".repeat(50);
    let script = "document.title = 'x';\n".repeat(50);
    c.bench_function("compose_markers", |b| {
        b.iter(|| compose(black_box(&markup), black_box(&styles), black_box(&script)));
    });
}

fn bench_highlight_markup(c: &mut Criterion) {
    let markup = sample_markup(100);
    c.bench_function("highlight_markup_visible", |b| {
        b.iter(|| highlight_lines(black_box("html"), black_box(&markup), 60));
    });
}

criterion_group!(
    benches,
    bench_compose_skeleton,
    bench_compose_markers,
    bench_highlight_markup
);
criterion_main!(benches);
