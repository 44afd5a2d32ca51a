// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quad-tree structure: node arena, insertion and splitting, queries.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::config::Config;
use crate::error::ConfigError;
use crate::extent::Extents;
use crate::types::{Aabb2D, Scalar};

/// Overlap partners keyed by a canonical object, as returned by
/// [`QuadTree::all_collisions`].
///
/// Every overlapping pair appears under exactly one of its two objects.
pub type Collisions<K> = HashMap<K, HashSet<K>>;

/// Number of distinct pairs recorded in `collisions`.
pub fn pair_count<K>(collisions: &Collisions<K>) -> usize {
    collisions.values().map(HashSet::len).sum()
}

/// Flatten `collisions` into `(key, partner)` pairs. Order is unspecified.
pub fn pairs<K: Copy>(collisions: &Collisions<K>) -> impl Iterator<Item = (K, K)> + '_ {
    collisions
        .iter()
        .flat_map(|(&a, partners)| partners.iter().map(move |&b| (a, b)))
}

const ROOT: usize = 0;

#[derive(Clone, Debug)]
struct Node<T, K> {
    bounds: Aabb2D<T>,
    depth: u32,
    residents: SmallVec<[K; 4]>,
    // Quadrant order: top-left, top-right, bottom-left, bottom-right.
    children: Option<[usize; 4]>,
}

impl<T, K> Node<T, K> {
    fn leaf(bounds: Aabb2D<T>, depth: u32) -> Self {
        Self {
            bounds,
            depth,
            residents: SmallVec::new(),
            children: None,
        }
    }

    fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// Read-only view of a leaf node.
#[derive(Clone, Copy, Debug)]
pub struct Leaf<'a, T, K> {
    bounds: Aabb2D<T>,
    depth: u32,
    residents: &'a [K],
}

impl<'a, T: Copy, K> Leaf<'a, T, K> {
    fn of(node: &'a Node<T, K>) -> Self {
        Self {
            bounds: node.bounds,
            depth: node.depth,
            residents: &node.residents,
        }
    }

    /// Region covered by this leaf.
    pub fn bounds(&self) -> Aabb2D<T> {
        self.bounds
    }

    /// Subdivision depth; the root is at depth 0.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Objects stored in this leaf, in insertion order.
    ///
    /// An object whose box straddles quadrant boundaries is stored in every
    /// leaf it overlaps, so the same handle can show up in several leaves.
    pub fn residents(&self) -> &'a [K] {
        self.residents
    }
}

/// A region quad-tree over axis-aligned boxes, meant to be rebuilt every frame.
///
/// The tree stores opaque object handles `K` in its leaves and looks up their
/// boxes through an [`Extents`] accessor passed to each call. A typical frame
/// is [`clear`](Self::clear), then [`insert`](Self::insert) for every tracked
/// object, then [`all_collisions`](Self::all_collisions).
///
/// Leaves split into four equal quadrants once they hold more than
/// [`Config::capacity`] objects, until [`Config::max_depth`] is reached.
/// Objects are routed to every leaf their box overlaps (edges inclusive).
///
/// [`clear`](Self::clear) empties the leaves but keeps the subdivided shape,
/// so the tree only ever gains nodes until [`reset`](Self::reset) is called.
///
/// ## Example
///
/// ```rust
/// use understory_quadtree::{Aabb2D, QuadTree};
///
/// let boxes = vec![
///     Aabb2D::from_xywh(0.0, 0.0, 10.0, 10.0),
///     Aabb2D::from_xywh(5.0, 5.0, 10.0, 10.0),
///     Aabb2D::from_xywh(90.0, 90.0, 5.0, 5.0),
/// ];
///
/// let mut tree = QuadTree::new(Aabb2D::from_xywh(0.0, 0.0, 100.0, 100.0), 2, 3).unwrap();
/// tree.clear();
/// for key in 0..boxes.len() {
///     tree.insert(key, &boxes);
/// }
///
/// let hits = tree.collisions_with(&0, &boxes);
/// assert!(hits.contains(&1));
/// assert_eq!(hits.len(), 1);
///
/// let all = tree.all_collisions(&boxes);
/// assert_eq!(understory_quadtree::pair_count(&all), 1);
/// ```
pub struct QuadTree<T, K> {
    config: Config,
    // Index 0 is the root. Children of a node are pushed as four consecutive slots.
    nodes: Vec<Node<T, K>>,
}

impl<T: Debug, K> Debug for QuadTree<T, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let leaves = self.nodes.iter().filter(|n| n.is_leaf()).count();
        let residents: usize = self.nodes.iter().map(|n| n.residents.len()).sum();
        f.debug_struct("QuadTree")
            .field("config", &self.config)
            .field("bounds", &self.nodes[ROOT].bounds)
            .field("nodes", &self.nodes.len())
            .field("leaves", &leaves)
            .field("residents", &residents)
            .finish_non_exhaustive()
    }
}

impl<T, K> QuadTree<T, K>
where
    T: Scalar,
    K: Copy + Eq + Hash,
{
    /// Create a tree with a single empty root leaf covering `bounds`.
    ///
    /// Fails if `capacity` is zero or if `bounds` is inverted or NaN.
    pub fn new(bounds: Aabb2D<T>, capacity: usize, max_depth: u32) -> Result<Self, ConfigError> {
        Self::with_config(bounds, Config::new(capacity, max_depth)?)
    }

    /// Create a tree from an already validated [`Config`].
    pub fn with_config(bounds: Aabb2D<T>, config: Config) -> Result<Self, ConfigError> {
        if !bounds.is_well_formed() {
            return Err(ConfigError::InvalidBounds);
        }
        let mut nodes = Vec::new();
        nodes.push(Node::leaf(bounds, 0));
        Ok(Self { config, nodes })
    }

    /// Region covered by the root.
    pub fn bounds(&self) -> Aabb2D<T> {
        self.nodes[ROOT].bounds
    }

    /// Split policy this tree was built with.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Empty every node, keeping the subdivided shape.
    ///
    /// Internal nodes stay internal (with empty children), so capacity checks
    /// in the next cycle start from the shape reached in earlier cycles. Use
    /// [`reset`](Self::reset) to collapse back to a single root.
    pub fn clear(&mut self) {
        for node in &mut self.nodes {
            node.residents.clear();
        }
    }

    /// Drop every node except the root and empty it.
    pub fn reset(&mut self) {
        debug!(nodes = self.nodes.len(), "reset quad-tree");
        self.nodes.truncate(1);
        let root = &mut self.nodes[ROOT];
        root.children = None;
        root.residents.clear();
    }

    /// Insert `key` into every leaf its box overlaps.
    ///
    /// The box is read from `extents`. Leaves pushed over capacity are split
    /// (within the depth limit) and their residents re-routed into the new
    /// quadrants, which reads their boxes from `extents` again. An object whose
    /// box misses the root entirely is not stored.
    ///
    /// Inserting the same handle twice stores it twice.
    pub fn insert<E>(&mut self, key: K, extents: &E)
    where
        E: Extents<T, K> + ?Sized,
    {
        let rect = extents.extent(&key);
        if self.insert_below(ROOT, key, &rect, extents) == 0 {
            trace!(?rect, "object lies outside the root bounds; not indexed");
        }
    }

    /// Route `key` into the leaves below `start` that overlap `rect`.
    ///
    /// Returns how many leaves received it.
    fn insert_below<E>(&mut self, start: usize, key: K, rect: &Aabb2D<T>, extents: &E) -> usize
    where
        E: Extents<T, K> + ?Sized,
    {
        let mut targets: SmallVec<[usize; 4]> = SmallVec::new();
        self.visit_leaf_slots(
            start,
            &|b: &Aabb2D<T>| b.overlaps(rect),
            &mut |slot| targets.push(slot),
        );
        for &slot in &targets {
            let node = &mut self.nodes[slot];
            node.residents.push(key);
            let must_split = self.config.should_split(node.residents.len(), node.depth);
            if must_split {
                self.split(slot, extents);
            }
        }
        targets.len()
    }

    fn split<E>(&mut self, slot: usize, extents: &E)
    where
        E: Extents<T, K> + ?Sized,
    {
        let first = self.nodes.len();
        let depth = self.nodes[slot].depth + 1;
        let quadrants = self.nodes[slot].bounds.quadrants();
        for bounds in quadrants {
            self.nodes.push(Node::leaf(bounds, depth));
        }
        let node = &mut self.nodes[slot];
        node.children = Some([first, first + 1, first + 2, first + 3]);
        let residents = core::mem::take(&mut node.residents);
        debug!(node = slot, child_depth = depth, residents = residents.len(), "split leaf");

        for key in residents {
            let rect = extents.extent(&key);
            self.insert_below(slot, key, &rect, extents);
        }
    }

    /// Depth-first walk over the leaves below `slot` whose bounds (and whose
    /// ancestors' bounds) satisfy `keep`.
    fn visit_leaf_slots<P, F>(&self, slot: usize, keep: &P, f: &mut F)
    where
        P: Fn(&Aabb2D<T>) -> bool,
        F: FnMut(usize),
    {
        let node = &self.nodes[slot];
        if !keep(&node.bounds) {
            return;
        }
        match node.children {
            None => f(slot),
            Some(children) => {
                for child in children {
                    self.visit_leaf_slots(child, keep, f);
                }
            }
        }
    }

    /// Visit every leaf whose bounds overlap `rect`, occupied or not.
    ///
    /// Leaves are visited depth-first in quadrant order.
    pub fn visit_leaves_overlapping<'a, F>(&'a self, rect: Aabb2D<T>, mut f: F)
    where
        F: FnMut(Leaf<'a, T, K>),
    {
        self.visit_leaf_slots(ROOT, &|b: &Aabb2D<T>| b.overlaps(&rect), &mut |slot| {
            f(Leaf::of(&self.nodes[slot]));
        });
    }

    /// Collect every leaf whose bounds overlap `rect`, occupied or not.
    pub fn leaves_overlapping(&self, rect: Aabb2D<T>) -> Vec<Leaf<'_, T, K>> {
        let mut out = Vec::new();
        self.visit_leaves_overlapping(rect, |leaf| out.push(leaf));
        out
    }

    /// Collect every leaf whose bounds contain the point.
    ///
    /// A point on a quadrant boundary lies in each leaf sharing that boundary.
    pub fn leaves_containing_point(&self, x: T, y: T) -> Vec<Leaf<'_, T, K>> {
        let mut out = Vec::new();
        self.visit_leaf_slots(ROOT, &|b: &Aabb2D<T>| b.contains_point(x, y), &mut |slot| {
            out.push(Leaf::of(&self.nodes[slot]));
        });
        out
    }

    /// Iterate over all leaves. Order is unspecified.
    pub fn leaves(&self) -> impl Iterator<Item = Leaf<'_, T, K>> + '_ {
        self.nodes.iter().filter(|n| n.is_leaf()).map(Leaf::of)
    }

    /// Distinct objects whose box overlaps `rect`.
    pub fn query_rect<E>(&self, rect: Aabb2D<T>, extents: &E) -> HashSet<K>
    where
        E: Extents<T, K> + ?Sized,
    {
        let mut seen = HashSet::new();
        let mut out = HashSet::new();
        self.visit_leaves_overlapping(rect, |leaf| {
            for &other in leaf.residents() {
                if seen.insert(other) && extents.extent(&other).overlaps(&rect) {
                    out.insert(other);
                }
            }
        });
        out
    }

    /// Visit each distinct object overlapping `key`'s box, excluding `key` itself.
    ///
    /// Only leaves overlapping `key`'s current box are inspected, so `key`
    /// does not need to be stored in the tree. Each partner is reported once
    /// even when it shares several leaves with `key`. Order is unspecified.
    pub fn visit_collisions_with<E, F>(&self, key: &K, extents: &E, mut f: F)
    where
        E: Extents<T, K> + ?Sized,
        F: FnMut(K),
    {
        let rect = extents.extent(key);
        let mut seen: HashSet<K> = HashSet::new();
        self.visit_leaves_overlapping(rect, |leaf| {
            for &other in leaf.residents() {
                if other == *key || !seen.insert(other) {
                    continue;
                }
                if extents.extent(&other).overlaps(&rect) {
                    f(other);
                }
            }
        });
    }

    /// Distinct objects overlapping `key`'s box, excluding `key` itself.
    pub fn collisions_with<E>(&self, key: &K, extents: &E) -> HashSet<K>
    where
        E: Extents<T, K> + ?Sized,
    {
        let mut out = HashSet::new();
        self.visit_collisions_with(key, extents, |other| {
            out.insert(other);
        });
        out
    }

    /// Enumerate every overlapping pair of objects that share a leaf.
    ///
    /// Each pair is recorded once, under whichever of its two objects comes
    /// first in the first leaf (depth-first, quadrant order) where the pair is
    /// found. Pairs met again in later leaves, in either orientation, are
    /// skipped. Objects without partners do not appear as keys.
    ///
    /// Pairs are only discovered inside a shared leaf; boxes that overlap
    /// without sharing any leaf (which the inclusive routing rules out for
    /// boxes inside the root) are not reported.
    pub fn all_collisions<E>(&self, extents: &E) -> Collisions<K>
    where
        E: Extents<T, K> + ?Sized,
    {
        let mut out: Collisions<K> = HashMap::new();
        let mut rects: SmallVec<[Aabb2D<T>; 8]> = SmallVec::new();
        self.visit_leaf_slots(ROOT, &|_: &Aabb2D<T>| true, &mut |slot| {
            let residents = &self.nodes[slot].residents;
            if residents.len() < 2 {
                return;
            }
            rects.clear();
            rects.extend(residents.iter().map(|k| extents.extent(k)));
            for (i, &a) in residents.iter().enumerate() {
                for (j, &b) in residents.iter().enumerate().skip(i + 1) {
                    if a == b || is_recorded(&out, a, b) {
                        continue;
                    }
                    if rects[i].overlaps(&rects[j]) {
                        out.entry(a).or_default().insert(b);
                    }
                }
            }
        });
        out
    }

    /// Number of nodes (internal and leaf) in the tree.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Depth of the deepest node; 0 for an unsplit tree.
    pub fn depth(&self) -> u32 {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Total number of stored entries, counting an object once per leaf it is in.
    pub fn resident_count(&self) -> usize {
        self.nodes.iter().map(|n| n.residents.len()).sum()
    }

    /// Whether no leaf holds any object.
    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(|n| n.residents.is_empty())
    }
}

fn is_recorded<K: Eq + Hash>(out: &Collisions<K>, a: K, b: K) -> bool {
    out.get(&a).is_some_and(|s| s.contains(&b)) || out.get(&b).is_some_and(|s| s.contains(&a))
}
