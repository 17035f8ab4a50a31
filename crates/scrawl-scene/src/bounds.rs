// SPDX-License-Identifier: Apache-2.0
//! Running axis-aligned bounding box over appended geometry.

use glam::Vec3;

/// Axis-aligned bounding box maintained incrementally on each append.
///
/// The empty box is the identity for [`Bounds::insert`]: min starts at
/// `+inf`, max at `-inf`. Consumers that scale by the diagonal get a unit
/// default for empty or degenerate boxes instead of a division by zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    min: Vec3,
    max: Vec3,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

impl Bounds {
    /// The box containing nothing.
    pub fn empty() -> Self {
        Self {
            min: Vec3::INFINITY,
            max: Vec3::NEG_INFINITY,
        }
    }

    /// True when no position has been inserted since the last reset.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    /// Grow the box to contain `position`. O(1).
    pub fn insert(&mut self, position: Vec3) {
        self.min = self.min.min(position);
        self.max = self.max.max(position);
    }

    /// Minimum corner. Meaningless for an empty box.
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Maximum corner. Meaningless for an empty box.
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Geometric center; the origin for an empty box.
    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            (self.min + self.max) * 0.5
        }
    }

    /// Diagonal length. Empty and single-point boxes report 1.0 so that
    /// downstream scale math stays finite.
    pub fn diagonal(&self) -> f32 {
        if self.is_empty() {
            return 1.0;
        }
        let d = (self.max - self.min).length();
        if d == 0.0 {
            1.0
        } else {
            d
        }
    }
}
