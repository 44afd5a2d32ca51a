// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Subdivision policy shared by every node of a tree.

use crate::error::ConfigError;

/// Split policy for a [`QuadTree`][crate::QuadTree].
///
/// A leaf splits into four children once it holds more than `capacity`
/// residents, unless it already sits at `max_depth`. Leaves at `max_depth`
/// keep accepting residents past capacity.
///
/// The same values apply unchanged at every depth and cannot be changed after
/// the tree is built.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawConfig"))]
pub struct Config {
    capacity: usize,
    max_depth: u32,
}

impl Config {
    /// Create a validated configuration.
    ///
    /// `capacity` must be at least 1. A `max_depth` of 0 is allowed and means the
    /// root never splits.
    pub const fn new(capacity: usize, max_depth: u32) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Self {
            capacity,
            max_depth,
        })
    }

    /// Maximum residents a leaf holds before it splits.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Depth at which leaves stop splitting. The root is at depth 0.
    #[inline]
    pub const fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Whether a leaf at `depth` holding `residents` entries must split.
    #[inline]
    pub(crate) const fn should_split(&self, residents: usize, depth: u32) -> bool {
        residents > self.capacity && depth < self.max_depth
    }
}

impl Default for Config {
    /// One resident per leaf, at most three levels of subdivision.
    fn default() -> Self {
        Self {
            capacity: 1,
            max_depth: 3,
        }
    }
}

/// Unvalidated wire form of [`Config`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawConfig {
    capacity: usize,
    max_depth: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawConfig> for Config {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        Self::new(raw.capacity, raw.max_depth)
    }
}
