// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Broad-phase collision pass over bouncing boxes, rebuilt every frame.
//!
//! Each frame the quad-tree is cleared, every box is re-inserted at its new
//! position, and all overlapping pairs are enumerated. A renderer would draw a
//! line between each pair; here we log them.
//!
//! Run:
//! - `RUST_LOG=info cargo run -p understory_demos --example frame_loop`
//! - `RUST_LOG=understory_quadtree=debug,info cargo run -p understory_demos --example frame_loop`

use kurbo::{Rect, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;
use understory_quadtree::{Aabb2D, QuadTree, pair_count, pairs};

const WORLD: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);
const BOXES: usize = 200;
const FRAMES: usize = 5;

/// A box drifting through the world, bouncing off its edges.
#[derive(Clone, Copy, Debug)]
struct Walker {
    rect: Rect,
    velocity: Vec2,
}

impl Walker {
    fn step(&mut self) {
        let mut moved = self.rect + self.velocity;
        if moved.x0 < WORLD.x0 || moved.x1 > WORLD.x1 {
            self.velocity.x = -self.velocity.x;
            moved = self.rect + self.velocity;
        }
        if moved.y0 < WORLD.y0 || moved.y1 > WORLD.y1 {
            self.velocity.y = -self.velocity.y;
            moved = self.rect + self.velocity;
        }
        self.rect = moved;
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut rng = StdRng::seed_from_u64(42);
    let mut walkers: Vec<Walker> = (0..BOXES)
        .map(|_| {
            let size = 10.0;
            let x = rng.random_range(WORLD.x0..WORLD.x1 - size);
            let y = rng.random_range(WORLD.y0..WORLD.y1 - size);
            Walker {
                rect: Rect::new(x, y, x + size, y + size),
                velocity: Vec2::new(rng.random_range(-4.0..4.0), rng.random_range(-4.0..4.0)),
            }
        })
        .collect();

    // Same parameters as a typical screen-space setup: two boxes per leaf, five levels.
    let mut tree: QuadTree<f64, usize> =
        QuadTree::new(Aabb2D::from(WORLD), 2, 5).expect("valid quad-tree configuration");

    for frame in 0..FRAMES {
        for w in &mut walkers {
            w.step();
        }

        let extents = |k: &usize| Aabb2D::from(walkers[*k].rect);
        tree.clear();
        for key in 0..walkers.len() {
            tree.insert(key, &extents);
        }

        let collisions = tree.all_collisions(&extents);
        info!(
            frame,
            pairs = pair_count(&collisions),
            nodes = tree.node_count(),
            depth = tree.depth(),
            "broad phase done"
        );
        for (a, b) in pairs(&collisions) {
            let from = walkers[a].rect.center();
            let to = walkers[b].rect.center();
            info!(frame, a, b, ?from, ?to, "draw line");
        }
    }
}
