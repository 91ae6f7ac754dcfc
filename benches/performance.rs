use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use serde_json::{json, Map, Value};
use xterminate::tui::components::xterminate_icon::{IconOptions, XterminateIcon};
use xterminate::tui::document::{Document, NodeId, PageView};
use xterminate::tui::widgets::DataDisplayDialog;

/// Document with `count` icons in the body, all watching for the same
/// detached container
fn create_watching_page(count: usize) -> (Document, NodeId, Vec<XterminateIcon>) {
    let mut doc = Document::new();
    let container = doc.create_element("div");
    let body = doc.body();
    let icons = (0..count)
        .map(|i| {
            let icon = XterminateIcon::new(
                &mut doc,
                IconOptions {
                    icon_source: format!("icons/{}.png", i),
                    label_text: format!("Icon {}", i),
                    on_activate: None,
                    target_container: Some(container),
                },
            )
            .unwrap();
            doc.append_child(body, icon.node()).unwrap();
            icon
        })
        .collect();
    (doc, container, icons)
}

fn create_sample_data(keys: usize) -> Map<String, Value> {
    let mut data = Map::new();
    for i in 0..keys {
        let value = match i % 3 {
            0 => json!((0..10).map(|n| format!("item-{}", n)).collect::<Vec<_>>()),
            1 => json!({"id": i, "name": format!("entry {}", i), "tags": ["a", "b"]}),
            _ => json!(i),
        };
        data.insert(format!("key_{}", i), value);
    }
    data
}

/// Benchmark the late-attach path: insert the container, deliver records
fn bench_late_attach(c: &mut Criterion) {
    let mut group = c.benchmark_group("late_attach");

    for count in [1usize, 50, 200] {
        group.bench_function(format!("{}_watchers", count), |b| {
            b.iter_batched(
                || create_watching_page(count),
                |(mut doc, container, icons)| {
                    let body = doc.body();
                    doc.append_child(body, container).unwrap();
                    let delivered = doc.deliver_mutations();
                    black_box((delivered, icons))
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

/// Benchmark deliveries that do not satisfy any watcher
fn bench_unrelated_mutations(c: &mut Criterion) {
    let (mut doc, _container, _icons) = create_watching_page(50);
    let body = doc.body();

    c.bench_function("unrelated_mutation_50_watchers", |b| {
        b.iter(|| {
            let node = doc.create_element("p");
            doc.append_child(body, node).unwrap();
            doc.remove(node).unwrap();
            black_box(doc.deliver_mutations())
        })
    });
}

/// Benchmark dialog layout and the outline view
fn bench_layout(c: &mut Criterion) {
    let data = create_sample_data(60);
    let (doc, _container, _icons) = create_watching_page(50);

    let mut group = c.benchmark_group("layout");

    group.bench_function("dialog_60_keys", |b| {
        b.iter(|| DataDisplayDialog::new("Bench", black_box(data.clone()), || {}))
    });

    group.bench_function("outline_50_icons", |b| {
        b.iter(|| PageView::new(black_box(&doc)).lines())
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_late_attach,
    bench_unrelated_mutations,
    bench_layout
);
criterion_main!(benches);
