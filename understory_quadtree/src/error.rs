// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction errors.

use thiserror::Error;

/// Rejected quad-tree configuration.
///
/// Construction is the only fallible step; once a [`QuadTree`][crate::QuadTree]
/// exists, every operation on it has a defined result.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The per-leaf capacity was zero.
    #[error("leaf capacity must be at least 1")]
    ZeroCapacity,
    /// The root bounds were inverted or contained NaN.
    #[error("root bounds must satisfy min <= max on both axes")]
    InvalidBounds,
}
