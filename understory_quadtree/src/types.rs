// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use core::cmp::Ordering;
use core::fmt::Debug;

/// Axis-aligned bounding box in 2D.
///
/// Coordinates grow to the right and downward, so `min_y` is the top edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb2D<T> {
    /// Minimum x (left)
    pub min_x: T,
    /// Minimum y (top)
    pub min_y: T,
    /// Maximum x (right)
    pub max_x: T,
    /// Maximum y (bottom)
    pub max_y: T,
}

impl<T> Aabb2D<T> {
    /// Create a new AABB from min/max corners.
    #[inline(always)]
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Copy + PartialOrd> Aabb2D<T> {
    /// Whether this AABB contains the point. Edges are inclusive.
    #[inline]
    pub fn contains_point(&self, x: T, y: T) -> bool {
        self.min_x <= x && self.min_y <= y && x <= self.max_x && y <= self.max_y
    }

    /// Determines whether this AABB overlaps with another in any way.
    ///
    /// The intersection of the two boxes is computed per axis, and the boxes
    /// overlap when it has non-negative extent on both axes. The edge of the
    /// AABB is considered to be part of itself, meaning that two AABBs that
    /// share an edge or a single corner are considered to overlap. Zero-area
    /// boxes follow the same rule.
    ///
    /// # Examples
    ///
    /// ```
    /// use understory_quadtree::Aabb2D;
    ///
    /// let a = Aabb2D::new(0.0, 0.0, 10.0, 10.0);
    /// let b = Aabb2D::new(5.0, 5.0, 15.0, 15.0);
    /// assert!(a.overlaps(&b));
    ///
    /// let a = Aabb2D::new(0.0, 0.0, 10.0, 10.0);
    /// let b = Aabb2D::new(10.0, 10.0, 20.0, 20.0);
    /// assert!(a.overlaps(&b));
    ///
    /// let a = Aabb2D::new(0.0, 0.0, 10.0, 10.0);
    /// let b = Aabb2D::new(11.0, 0.0, 20.0, 10.0);
    /// assert!(!a.overlaps(&b));
    /// ```
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        max_t(self.min_x, other.min_x) <= min_t(self.max_x, other.max_x)
            && max_t(self.min_y, other.min_y) <= min_t(self.max_y, other.max_y)
    }

    /// Whether the corners are ordered (`min <= max` on both axes).
    ///
    /// Returns `false` for inverted boxes and for boxes with NaN coordinates.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    /// Return true if the AABB is empty or inverted (no area). Assumes no NaN.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max_x <= self.min_x || self.max_y <= self.min_y
    }
}

impl<T: Scalar> Aabb2D<T> {
    /// Create an AABB from a position (top-left corner) and a size.
    #[inline]
    pub fn from_xywh(x: T, y: T, w: T, h: T) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: T::add(x, w),
            max_y: T::add(y, h),
        }
    }

    /// Width of the box, clamped at zero.
    #[inline]
    pub fn width(&self) -> T {
        T::max(T::sub(self.max_x, self.min_x), T::zero())
    }

    /// Height of the box, clamped at zero.
    #[inline]
    pub fn height(&self) -> T {
        T::max(T::sub(self.max_y, self.min_y), T::zero())
    }

    /// Split the box into its four quadrants.
    ///
    /// The order is top-left, top-right, bottom-left, bottom-right. Adjacent
    /// quadrants share the midpoint lines exactly, so together they tile
    /// `self` with no gap.
    #[inline]
    pub fn quadrants(&self) -> [Self; 4] {
        let mid_x = T::mid(self.min_x, self.max_x);
        let mid_y = T::mid(self.min_y, self.max_y);
        [
            Self::new(self.min_x, self.min_y, mid_x, mid_y),
            Self::new(mid_x, self.min_y, self.max_x, mid_y),
            Self::new(self.min_x, mid_y, mid_x, self.max_y),
            Self::new(mid_x, mid_y, self.max_x, self.max_y),
        ]
    }
}

/// Numeric scalar abstraction for 2D AABBs.
///
/// This trait provides the minimal set of operations needed to build boxes from
/// a position and size, and to subdivide them into quadrants.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Add two scalar values.
    fn add(a: Self, b: Self) -> Self;

    /// Subtract two scalar values: a - b.
    fn sub(a: Self, b: Self) -> Self;

    /// Zero value for the scalar type.
    fn zero() -> Self;

    /// Max of the two scalar values.
    fn max(a: Self, b: Self) -> Self;

    /// Min of the two scalar values.
    fn min(a: Self, b: Self) -> Self;

    /// Midpoint between a and b (used for quadrant splits).
    fn mid(a: Self, b: Self) -> Self;
}

impl Scalar for f32 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline(always)]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn max(a: Self, b: Self) -> Self {
        Self::max(a, b)
    }

    #[inline]
    fn min(a: Self, b: Self) -> Self {
        Self::min(a, b)
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * (a + b)
    }
}

impl Scalar for f64 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline(always)]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn max(a: Self, b: Self) -> Self {
        Self::max(a, b)
    }

    #[inline]
    fn min(a: Self, b: Self) -> Self {
        Self::min(a, b)
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * (a + b)
    }
}

impl Scalar for i64 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a.saturating_add(b)
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.saturating_sub(b)
    }

    #[inline(always)]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn max(a: Self, b: Self) -> Self {
        core::cmp::max(a, b)
    }

    #[inline]
    fn min(a: Self, b: Self) -> Self {
        core::cmp::min(a, b)
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        // Average without overflow: (a & b) + ((a ^ b) >> 1)
        (a & b) + ((a ^ b) >> 1)
    }
}

#[cfg(feature = "kurbo_adapter")]
impl From<kurbo::Rect> for Aabb2D<f64> {
    fn from(r: kurbo::Rect) -> Self {
        let r = r.abs();
        Self::new(r.x0, r.y0, r.x1, r.y1)
    }
}

#[cfg(feature = "kurbo_adapter")]
impl From<Aabb2D<f64>> for kurbo::Rect {
    fn from(a: Aabb2D<f64>) -> Self {
        Self::new(a.min_x, a.min_y, a.max_x, a.max_y)
    }
}

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}
