// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle accessor used to look up the current bounds of indexed objects.

use alloc::vec::Vec;

use crate::types::Aabb2D;

/// Produces the current bounding box of an object from its handle.
///
/// The tree stores only handles and asks an `Extents` implementation for a
/// rectangle whenever it needs one (on insertion, on split, and during
/// queries). Implementations are expected to be cheap and free of side
/// effects, and to answer for every handle that was inserted.
///
/// Closures of the form `Fn(&K) -> Aabb2D<T>` implement this trait, as do
/// slices and vectors of boxes keyed by `usize` position.
///
/// ```
/// use understory_quadtree::{Aabb2D, Extents};
///
/// let boxes = [Aabb2D::new(0, 0, 1, 1), Aabb2D::new(5, 5, 6, 6)];
/// assert_eq!(boxes[..].extent(&1), Aabb2D::new(5, 5, 6, 6));
///
/// let shifted = |k: &usize| {
///     let b = boxes[*k];
///     Aabb2D::new(b.min_x + 1, b.min_y, b.max_x + 1, b.max_y)
/// };
/// assert_eq!(shifted.extent(&0), Aabb2D::new(1, 0, 2, 1));
/// ```
pub trait Extents<T, K> {
    /// The bounding box of `key`, in the coordinate space of the tree.
    fn extent(&self, key: &K) -> Aabb2D<T>;
}

impl<T, K, F> Extents<T, K> for F
where
    F: Fn(&K) -> Aabb2D<T>,
{
    #[inline]
    fn extent(&self, key: &K) -> Aabb2D<T> {
        self(key)
    }
}

impl<T: Copy> Extents<T, usize> for [Aabb2D<T>] {
    /// Panics if `key` is out of range, which breaks the accessor contract.
    #[inline]
    fn extent(&self, key: &usize) -> Aabb2D<T> {
        self[*key]
    }
}

impl<T: Copy> Extents<T, usize> for Vec<Aabb2D<T>> {
    #[inline]
    fn extent(&self, key: &usize) -> Aabb2D<T> {
        self.as_slice().extent(key)
    }
}
