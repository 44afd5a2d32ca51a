// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_quadtree --heading-base-level=0

//! Understory Quadtree: a rebuild-per-frame region quad-tree for broad-phase overlap queries.
//!
//! Understory Quadtree accelerates "which of these boxes touch?" for a set of
//! moving objects that is re-indexed from scratch every simulation step.
//!
//! - Clear the tree, insert every tracked object, then ask for all overlapping pairs.
//! - Query the objects overlapping one object, or any rectangle.
//! - Inspect the leaves covering a rectangle or a point.
//!
//! The tree never stores geometry for the objects it indexes. It keeps opaque,
//! hashable handles (`K`) in its leaves and asks an [`Extents`] accessor for a
//! handle's current box whenever it needs one. Any `Fn(&K) -> Aabb2D<T>`
//! closure is an accessor, and so is a slice of boxes keyed by position.
//!
//! ## Subdivision
//!
//! The tree starts as a single leaf covering the root bounds. When an insertion
//! leaves a leaf with more than [`Config::capacity`] residents and the leaf is
//! shallower than [`Config::max_depth`], it splits into four equal quadrants and
//! its residents are routed into them. Leaves at the depth limit keep growing.
//!
//! Boxes are routed to every leaf they overlap, edges included, so a box that
//! straddles a quadrant boundary is stored in each leaf on either side. Query
//! results are deduplicated; storage is not.
//!
//! [`QuadTree::clear`] empties every leaf but keeps the shape reached so far.
//! [`QuadTree::reset`] collapses the tree back to its root.
//!
//! # Example
//!
//! ```rust
//! use understory_quadtree::{Aabb2D, QuadTree, pair_count};
//!
//! let mut boxes = vec![
//!     Aabb2D::from_xywh(0.0, 0.0, 10.0, 10.0),
//!     Aabb2D::from_xywh(5.0, 5.0, 10.0, 10.0),
//!     Aabb2D::from_xywh(90.0, 90.0, 5.0, 5.0),
//! ];
//! let mut tree = QuadTree::new(Aabb2D::from_xywh(0.0, 0.0, 100.0, 100.0), 2, 3).unwrap();
//!
//! for _frame in 0..2 {
//!     tree.clear();
//!     for key in 0..boxes.len() {
//!         tree.insert(key, &boxes);
//!     }
//!     let pairs = tree.all_collisions(&boxes);
//!     assert_eq!(pair_count(&pairs), 1);
//!
//!     // The simulation moves things between frames.
//!     boxes[2] = Aabb2D::from_xywh(92.0, 90.0, 5.0, 5.0);
//! }
//! ```
//!
//! ## Features
//!
//! - `kurbo_adapter`: conversions between `kurbo::Rect` and `Aabb2D<f64>`.
//! - `serde`: `Serialize`/`Deserialize` for [`Config`] and [`Aabb2D`]. Deserializing a
//!   [`Config`] validates it.
//! - `std` / `libm`: forwarded to optional dependencies.
//!
//! ## Diagnostics
//!
//! Splits and resets are reported through `tracing` at `debug` level, and boxes that
//! miss the root bounds at `trace` level. Install a subscriber in the host to see them.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates of indexed objects; a box
//! with NaN coordinates overlaps nothing and is not stored. Root bounds with NaN are
//! rejected at construction.

#![no_std]

extern crate alloc;

mod config;
mod error;
mod extent;
mod tree;
mod types;

pub use config::Config;
pub use error::ConfigError;
pub use extent::Extents;
pub use tree::{Collisions, Leaf, QuadTree, pair_count, pairs};
pub use types::{Aabb2D, Scalar};
