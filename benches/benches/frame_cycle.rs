// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// criterion_group!/criterion_main! expand to undocumented functions.
#![allow(missing_docs, reason = "criterion macros generate undocumented items")]

//! Per-frame rebuild cost: clear, insert every box, enumerate all pairs.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use understory_benches::{jitter, scattered_boxes};
use understory_quadtree::{Aabb2D, QuadTree};

const WORLD: f64 = 1000.0;

fn frame_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_cycle");
    for &n in &[200_usize, 1_000, 5_000] {
        let mut boxes = scattered_boxes(n, WORLD, 8.0, 7);
        let mut rng = StdRng::seed_from_u64(3);
        let mut tree: QuadTree<f64, usize> =
            QuadTree::new(Aabb2D::from_xywh(0.0, 0.0, WORLD, WORLD), 2, 5).unwrap();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter(|| {
                jitter(&mut boxes, WORLD, 2.0, &mut rng);
                tree.clear();
                for key in 0..boxes.len() {
                    tree.insert(key, &boxes);
                }
                tree.all_collisions(&boxes)
            });
        });
    }
    group.finish();
}

fn single_queries(c: &mut Criterion) {
    let boxes = scattered_boxes(1_000, WORLD, 8.0, 11);
    let mut tree: QuadTree<f64, usize> =
        QuadTree::new(Aabb2D::from_xywh(0.0, 0.0, WORLD, WORLD), 2, 5).unwrap();
    for key in 0..boxes.len() {
        tree.insert(key, &boxes);
    }
    c.bench_function("collisions_with_1000", |b| {
        b.iter(|| {
            (0..boxes.len())
                .map(|key| tree.collisions_with(&key, &boxes).len())
                .sum::<usize>()
        });
    });
}

criterion_group!(benches, frame_cycle, single_queries);
criterion_main!(benches);
