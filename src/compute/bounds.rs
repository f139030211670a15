//! Axis-aligned bounds over compute vectors.
//!
//! Points with a NaN or infinite component are never folded in: one bad
//! vertex in a loaded buffer would otherwise poison the whole box through
//! the SIMD min/max.

use super::Vec3;
use crate::storage::PackedVec3;
use std::fmt;

/// Axis-aligned box; `min > max` on any axis means empty.
#[derive(Clone, Copy, PartialEq)]
pub struct Bounds3 {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds3 {
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Bounds of a packed point array, plus how many points were skipped
    /// as non-finite.
    pub fn from_packed(points: &[PackedVec3]) -> (Self, usize) {
        let mut bounds = Self::EMPTY;
        let skipped = points
            .iter()
            .filter(|p| !bounds.include(p.to_compute()))
            .count();
        (bounds, skipped)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x() > self.max.x() || self.min.y() > self.max.y() || self.min.z() > self.max.z()
    }

    /// Grow to cover `p`. Returns `false`, leaving the box untouched, when
    /// `p` is not finite.
    #[inline]
    pub fn include(&mut self, p: Vec3) -> bool {
        if !p.is_finite() {
            return false;
        }
        self.min = self.min.min(p);
        self.max = self.max.max(p);
        true
    }

    pub fn union(&self, other: &Self) -> Self {
        match (self.is_empty(), other.is_empty()) {
            (_, true) => *self,
            (true, false) => *other,
            (false, false) => Self::new(self.min.min(other.min), self.max.max(other.max)),
        }
    }

    /// Closed containment test; always `false` for an empty box.
    pub fn contains(&self, p: Vec3) -> bool {
        !self.is_empty()
            && (0..3).all(|axis| self.min[axis] <= p[axis] && p[axis] <= self.max[axis])
    }

    /// `None` when empty.
    pub fn center(&self) -> Option<Vec3> {
        (!self.is_empty()).then(|| (self.min + self.max) * 0.5)
    }

    /// Edge lengths; zero for an empty box.
    pub fn extent(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }
}

impl Default for Bounds3 {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl FromIterator<Vec3> for Bounds3 {
    fn from_iter<I: IntoIterator<Item = Vec3>>(iter: I) -> Self {
        let mut bounds = Self::EMPTY;
        for p in iter {
            bounds.include(p);
        }
        bounds
    }
}

impl fmt::Debug for Bounds3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("Bounds3(empty)");
        }
        f.debug_struct("Bounds3")
            .field("min", &self.min)
            .field("max", &self.max)
            .finish()
    }
}
