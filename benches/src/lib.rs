// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for the Understory quad-tree benchmarks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use understory_quadtree::Aabb2D;

/// `n` boxes of side `size` scattered uniformly over a `world` x `world` square.
///
/// The same `seed` always yields the same boxes.
pub fn scattered_boxes(n: usize, world: f64, size: f64, seed: u64) -> Vec<Aabb2D<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let x = rng.random_range(0.0..world - size);
            let y = rng.random_range(0.0..world - size);
            Aabb2D::from_xywh(x, y, size, size)
        })
        .collect()
}

/// Move every box by up to `step` on each axis, keeping it inside the world.
pub fn jitter(boxes: &mut [Aabb2D<f64>], world: f64, step: f64, rng: &mut impl Rng) {
    for b in boxes {
        let w = b.width();
        let h = b.height();
        let x = (b.min_x + rng.random_range(-step..=step)).clamp(0.0, world - w);
        let y = (b.min_y + rng.random_range(-step..=step)).clamp(0.0, world - h);
        *b = Aabb2D::from_xywh(x, y, w, h);
    }
}
