// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for the `canopy_render` layout strategies.
//!
//! Renders and hit-tests a deterministic synthetic call tree with every
//! strategy, so layout and hit-test costs can be compared across them.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use canopy_imaging::{DrawOp, DrawTarget, Surface};
use canopy_property::Configuration;
use canopy_render::{
    HighriseRenderer, Invalidation, LinearRenderer, RadialRenderer, RenderContext, TreeMapRenderer,
    TreeRenderer, prepare_view_configuration,
};
use canopy_tree::{NodeId, NumericAttribute, TextAttribute, VecTree, numeric_fn, text_fn};

/// (label index, weight)
type Tree = VecTree<(u32, i64)>;

/// Builds a tree of the given depth where every node has `fanout` children
/// and sibling weights follow a fixed skewed pattern.
fn synthetic_tree(depth: u32, fanout: u32) -> Tree {
    fn grow(tree: &mut Tree, parent: NodeId, depth: u32, fanout: u32, next: &mut u32) {
        if depth == 0 {
            return;
        }
        let parent_weight = tree.payload(parent).1;
        for i in 0..fanout {
            let weight = parent_weight * i64::from(i + 1)
                / (i64::from(fanout) * i64::from(fanout + 1) / 2);
            let child = tree.push_child(parent, (*next, weight.max(1)));
            *next += 1;
            grow(tree, child, depth - 1, fanout, next);
        }
    }

    let mut tree = Tree::new();
    let root = tree.push_root((0, 1_000_000));
    let mut next = 1;
    grow(&mut tree, root, depth, fanout, &mut next);
    tree
}

/// A target that counts operations without storing them.
struct CountingTarget(u64);

impl DrawTarget for CountingTarget {
    fn draw(&mut self, _op: DrawOp) {
        self.0 += 1;
    }
}

fn strategies() -> Vec<Box<dyn TreeRenderer<Tree>>> {
    vec![
        Box::new(LinearRenderer::new()),
        Box::new(HighriseRenderer::new()),
        Box::new(RadialRenderer::new()),
        Box::new(TreeMapRenderer::new()),
    ]
}

fn bench_layouts(c: &mut Criterion) {
    let tree = synthetic_tree(5, 4);
    let root = tree.root().unwrap();
    let size: &dyn NumericAttribute<Tree> = &numeric_fn("weight", |t: &Tree, n| t.payload(n).1);
    let label: &dyn TextAttribute<Tree> =
        &text_fn("name", |t: &Tree, n| Some(format!("n{}", t.payload(n).0)));
    let ctx = RenderContext::new(&tree, root, root, size, label);
    let surface = Surface::new(1600, 900);

    let mut group = c.benchmark_group("render_tree");
    for mut strategy in strategies() {
        strategy.invalidate(Invalidation::all());
        strategy.recompute_statistics(&ctx);
        let mut config = Configuration::new();
        prepare_view_configuration(&mut config);
        strategy.prepare_configuration(&mut config);

        group.bench_function(BenchmarkId::from_parameter(strategy.name()), |b| {
            b.iter(|| {
                let mut target = CountingTarget(0);
                strategy.render_tree(black_box(&ctx), &config, surface, &mut target);
                target.0
            });
        });
    }
    group.finish();

    let mut group = c.benchmark_group("find_node");
    for mut strategy in strategies() {
        strategy.invalidate(Invalidation::all());
        strategy.recompute_statistics(&ctx);
        let mut config = Configuration::new();
        prepare_view_configuration(&mut config);
        strategy.prepare_configuration(&mut config);

        group.bench_function(BenchmarkId::from_parameter(strategy.name()), |b| {
            b.iter(|| {
                let mut hits = 0_u32;
                for y in (0..900).step_by(90) {
                    for x in (0..1600).step_by(160) {
                        if strategy
                            .find_node(black_box(&ctx), &config, surface, x, y)
                            .is_some()
                        {
                            hits += 1;
                        }
                    }
                }
                hits
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layouts);
criterion_main!(benches);
