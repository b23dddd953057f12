use criterion::{black_box, criterion_group, criterion_main, Criterion};
use missive_editor::{render_document_editable, render_document_static, Document, Registry};

/// Root with `sections` containers, each holding a two-column row and a few leaves.
fn build_document(registry: &Registry, sections: usize) -> Document {
    let mut doc = Document::new(registry, "root").unwrap();
    for _ in 0..sections {
        let section = doc.add_block(registry, "Container", None, None).unwrap();
        doc.add_block(registry, "Heading", None, Some(&section)).unwrap();
        doc.add_block(registry, "Text", None, Some(&section)).unwrap();

        let columns = doc.add_block(registry, "Columns", None, Some(&section)).unwrap();
        doc.add_block_to_column(registry, "Image", &columns, 0).unwrap();
        doc.add_block_to_column(registry, "Button", &columns, 1).unwrap();

        doc.add_block(registry, "Divider", None, None).unwrap();
    }
    doc
}

fn render_small_document(c: &mut Criterion) {
    let registry = Registry::with_builtin_blocks();
    let doc = build_document(&registry, 3);

    c.bench_function("render_static_small", |b| {
        b.iter(|| render_document_static(black_box(&doc), &registry))
    });
}

fn render_large_document(c: &mut Criterion) {
    let registry = Registry::with_builtin_blocks();
    let doc = build_document(&registry, 50);

    c.bench_function("render_static_large", |b| {
        b.iter(|| render_document_static(black_box(&doc), &registry))
    });

    c.bench_function("render_editable_large", |b| {
        b.iter(|| render_document_editable(black_box(&doc), &registry))
    });
}

criterion_group!(benches, render_small_document, render_large_document);
criterion_main!(benches);
