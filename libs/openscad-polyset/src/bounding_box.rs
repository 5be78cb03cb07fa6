//! # Bounding Box
//!
//! Axis-aligned bounding box derived on demand from PolySet vertices.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
///
/// The empty box has `min = +inf` and `max = -inf`, so extending it with
/// any point yields a box around exactly that point.
///
/// # Example
///
/// ```rust
/// use openscad_polyset::BoundingBox;
/// use glam::DVec3;
///
/// let mut bbox = BoundingBox::empty();
/// assert!(bbox.is_empty());
/// bbox.extend(DVec3::new(1.0, 2.0, 3.0));
/// bbox.extend(DVec3::new(-1.0, 0.0, 5.0));
/// assert_eq!(bbox.min, DVec3::new(-1.0, 0.0, 3.0));
/// assert_eq!(bbox.max, DVec3::new(1.0, 2.0, 5.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum corner
    pub min: DVec3,
    /// Maximum corner
    pub max: DVec3,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingBox {
    /// Creates the canonical empty box.
    pub fn empty() -> Self {
        Self {
            min: DVec3::splat(f64::INFINITY),
            max: DVec3::splat(f64::NEG_INFINITY),
        }
    }

    /// Creates a box from two corners.
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Returns true if the box contains no point.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grows the box to contain `point`.
    #[inline]
    pub fn extend(&mut self, point: DVec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Grows the box to contain `other`.
    pub fn extend_box(&mut self, other: &BoundingBox) {
        if other.is_empty() {
            return;
        }
        self.extend(other.min);
        self.extend(other.max);
    }

    /// Returns the edge lengths, zero for an empty box.
    pub fn size(&self) -> DVec3 {
        if self.is_empty() {
            DVec3::ZERO
        } else {
            self.max - self.min
        }
    }

    /// Returns the center point, zero for an empty box.
    pub fn center(&self) -> DVec3 {
        if self.is_empty() {
            DVec3::ZERO
        } else {
            (self.min + self.max) * 0.5
        }
    }

    /// Returns true if `point` lies inside or on the box.
    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Returns true if `other` lies entirely inside this box.
    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        other.is_empty() || (self.contains(other.min) && self.contains(other.max))
    }
}
