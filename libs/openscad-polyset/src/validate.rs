//! # Polygon Validation
//!
//! Opt-in check of the convexity and winding contract of a PolySet.
//!
//! Producers are trusted to emit convex, consistently wound polygons and
//! nothing on the build or render path checks this. During development
//! and in tests a caller can run this pass to catch a producer that
//! breaks the contract, instead of chasing mis-triangulated previews.
//!
//! ## Example
//!
//! ```rust
//! use openscad_polyset::PolySet;
//! use glam::DVec3;
//!
//! let mut ps = PolySet::new();
//! ps.append_poly();
//! ps.append_vertex(DVec3::new(0.0, 0.0, 0.0));
//! ps.append_vertex(DVec3::new(1.0, 0.0, 0.0));
//! assert!(ps.validate().is_err());
//! ```

use crate::error::PolySetError;
use crate::polyset::PolySet;
use config::constants::EPSILON;
use glam::DVec3;
use tracing::warn;

/// Area-weighted normal of a polygon loop (Newell's method).
///
/// Its length is twice the polygon area.
pub fn polygon_normal(poly: &[DVec3]) -> DVec3 {
    let n = poly.len();
    (0..n).fold(DVec3::ZERO, |acc, i| acc + poly[i].cross(poly[(i + 1) % n]))
}

/// Checks a single polygon; `index` is only used for error reporting.
///
/// Collinear corners are accepted. For flat polygons the loop must also be
/// counter-clockwise seen from +Z.
pub fn check_polygon(index: usize, poly: &[DVec3], flat: bool) -> Result<(), PolySetError> {
    let n = poly.len();
    if n < 3 {
        return Err(PolySetError::too_few_vertices(index, n));
    }

    let normal = polygon_normal(poly);
    if normal.length() <= EPSILON {
        return Err(PolySetError::degenerate(index, "zero area"));
    }

    for i in 0..n {
        let prev = poly[(i + n - 1) % n];
        let curr = poly[i];
        let next = poly[(i + 1) % n];
        let turn = (curr - prev).cross(next - curr);
        if turn.dot(normal) < -EPSILON {
            return Err(PolySetError::non_convex(index, i));
        }
    }

    if flat && normal.z < 0.0 {
        return Err(PolySetError::wrong_winding(index));
    }

    Ok(())
}

impl PolySet {
    /// Checks every polygon, returning the first violation.
    pub fn validate(&self) -> Result<(), PolySetError> {
        for (index, poly) in self.polygons().iter().enumerate() {
            check_polygon(index, poly, self.is_2d())?;
        }
        Ok(())
    }

    /// Returns every violation, in polygon order.
    pub fn validation_errors(&self) -> Vec<PolySetError> {
        self.polygons()
            .iter()
            .enumerate()
            .filter_map(|(index, poly)| check_polygon(index, poly, self.is_2d()).err())
            .collect()
    }

    /// Logs every violation in debug builds; does nothing in release builds.
    pub fn debug_validate(&self) {
        if !cfg!(debug_assertions) {
            return;
        }
        for err in self.validation_errors() {
            warn!(polygon = err.polygon(), "PolySet contract violation: {}", err);
        }
    }
}
