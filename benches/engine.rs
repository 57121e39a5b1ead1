//! Benchmarks for the scan and apply engines.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use retint::colour::{Adjustment, Rgb, Rgba};
use retint::engine::{apply, scan, ApplyOptions, ApplyRequest, ScanOptions};
use retint::scene::{Effect, Node, Paint};

/// A frame with `width` cards, each holding a solid, a gradient and a shadow.
fn wide_tree(width: usize) -> Node {
    let mut root = Node::group("Frame");
    for i in 0..width {
        let t = (i % 256) as f64 / 255.0;
        let card = Node::group(format!("Card {}", i))
            .with_fills(vec![Paint::solid(Rgb::new(t, 0.5, 1.0 - t))])
            .with_child(
                Node::new("Button")
                    .with_fills(vec![Paint::linear_gradient(&[
                        Rgba::opaque(1.0, t, 0.0),
                        Rgba::opaque(0.0, t, 1.0),
                    ])])
                    .with_strokes(vec![Paint::solid(Rgb::new(0.0, 0.0, 0.0))]),
            )
            .with_effects(vec![Effect::drop_shadow(Rgba::new(0.0, 0.0, 0.0, 0.25))]);
        root = root.with_child(card);
    }
    root
}

/// A single chain `depth` nodes deep.
fn deep_tree(depth: usize) -> Node {
    let mut node = Node::new("Leaf").with_fills(vec![Paint::solid(Rgb::new(1.0, 0.0, 0.0))]);
    for i in 0..depth {
        node = Node::group(format!("Group {}", i))
            .with_fills(vec![Paint::solid(Rgb::new(0.2, 0.4, 0.6))])
            .with_child(node);
    }
    node
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");

    let wide = vec![wide_tree(1000)];
    let deep = vec![deep_tree(1000)];
    let options = ScanOptions::default();

    group.bench_function("scan_wide_1000", |b| b.iter(|| scan(black_box(&wide), &options)));
    group.bench_function("scan_deep_1000", |b| b.iter(|| scan(black_box(&deep), &options)));

    group.finish();
}

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply");

    let wide = vec![wide_tree(1000)];
    let request = ApplyRequest::new(Adjustment::new(0.1, -0.05, 45.0), ApplyOptions::default());

    group.bench_function("apply_wide_1000", |b| {
        b.iter_batched(
            || wide.clone(),
            |mut selection| apply(black_box(&mut selection), &request, |_| {}),
            criterion::BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_scan, bench_apply);
criterion_main!(benches);
