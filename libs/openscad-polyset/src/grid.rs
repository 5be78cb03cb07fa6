//! # Spatial Vertex Grid
//!
//! Welds near-coincident vertices by quantizing them onto a fixed grid.
//! The first vertex that lands in a cell becomes that cell's canonical
//! value; every later vertex in the same cell (or in an empty cell next to
//! an occupied one) is replaced by it. This keeps faces that were built
//! independently from leaving hairline cracks between shared edges.
//!
//! ## Example
//!
//! ```rust
//! use openscad_polyset::grid::Grid3d;
//! use glam::DVec3;
//!
//! let mut grid = Grid3d::new(1e-5);
//! let mut a = DVec3::new(0.0000001, 0.0, 0.0);
//! let mut b = DVec3::new(0.0000002, 0.0, 0.0);
//! grid.align(&mut a);
//! grid.align(&mut b);
//! assert_eq!(a, b);
//! ```

use config::constants::GRID_FINE;
use glam::DVec3;
use std::collections::HashMap;
use std::mem::size_of;

/// Largest scaled coordinate that still maps to a distinct `i64` cell.
const MAX_CELL_INDEX: f64 = i64::MAX as f64;

/// Integer cell coordinate of a quantized vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl CellKey {
    /// Quantizes a position to the cell whose center is nearest.
    fn from_position(pos: DVec3, resolution: f64) -> Self {
        Self {
            x: (pos.x / resolution).round() as i64,
            y: (pos.y / resolution).round() as i64,
            z: (pos.z / resolution).round() as i64,
        }
    }

    /// Manhattan distance in cells.
    fn manhattan(self, other: CellKey) -> u64 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) + self.z.abs_diff(other.z)
    }
}

/// Quantization grid mapping cells to canonical vertex values.
///
/// The map only grows. A grid belongs to exactly one PolySet and is dropped
/// with it; grids of different PolySets are never reconciled.
#[derive(Debug, Clone)]
pub struct Grid3d {
    /// Cell edge length
    resolution: f64,
    /// Canonical vertex per occupied cell
    db: HashMap<CellKey, DVec3>,
}

impl Default for Grid3d {
    fn default() -> Self {
        Self::new(GRID_FINE)
    }
}

impl Grid3d {
    /// Creates an empty grid with the given cell size.
    pub fn new(resolution: f64) -> Self {
        Self {
            resolution,
            db: HashMap::new(),
        }
    }

    /// Returns the cell size.
    #[inline]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Returns the number of occupied cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Returns true if no vertex has been aligned yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    /// Returns the cell a position falls into.
    pub fn key(&self, pos: DVec3) -> CellKey {
        CellKey::from_position(pos, self.resolution)
    }

    /// Returns the canonical vertex stored for a cell, if any.
    pub fn get(&self, key: CellKey) -> Option<DVec3> {
        self.db.get(&key).copied()
    }

    /// Snaps `v` to its canonical value, registering it if its cell is new.
    ///
    /// If the vertex's own cell is empty but one of the 26 neighbouring
    /// cells is occupied, the vertex snaps to the closest occupied
    /// neighbour (Manhattan distance in cells, first found on ties).
    /// Aligning is idempotent: `align(align(v)) == align(v)`.
    ///
    /// Vertices that cannot be quantized (non-finite, or too far out for an
    /// `i64` cell index) pass through unchanged and are not registered.
    pub fn align(&mut self, v: &mut DVec3) {
        if !self.is_quantizable(*v) {
            return;
        }
        let key = self.key(*v);
        if let Some(canonical) = self.db.get(&key) {
            *v = *canonical;
            return;
        }

        if let Some(neighbour) = self.nearest_occupied_neighbour(key) {
            *v = neighbour;
            return;
        }

        self.db.insert(key, *v);
    }

    /// True if every scaled coordinate is finite and fits an `i64` cell index.
    fn is_quantizable(&self, v: DVec3) -> bool {
        let scaled = v / self.resolution;
        scaled.is_finite() && scaled.abs().max_element() < MAX_CELL_INDEX
    }

    /// Scans the 3x3x3 block around `key` for the closest occupied cell.
    fn nearest_occupied_neighbour(&self, key: CellKey) -> Option<DVec3> {
        if self.db.is_empty() {
            return None;
        }

        let mut best: Option<(u64, DVec3)> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let candidate = CellKey {
                        x: key.x.saturating_add(dx),
                        y: key.y.saturating_add(dy),
                        z: key.z.saturating_add(dz),
                    };
                    let Some(value) = self.db.get(&candidate) else {
                        continue;
                    };
                    let dist = key.manhattan(candidate);
                    if best.map_or(true, |(d, _)| dist < d) {
                        best = Some((dist, *value));
                    }
                }
            }
        }
        best.map(|(_, value)| value)
    }

    /// Bytes used by the grid: one key plus one stored vertex per cell,
    /// plus the grid header.
    pub fn memsize(&self) -> usize {
        self.db.len() * (3 * size_of::<i64>() + size_of::<DVec3>()) + size_of::<Grid3d>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_new_is_empty() {
        let grid = Grid3d::default();
        assert!(grid.is_empty());
        assert_eq!(grid.resolution(), GRID_FINE);
    }

    #[test]
    fn test_align_registers_first_vertex() {
        let mut grid = Grid3d::new(0.5);
        let mut v = DVec3::new(1.1, 2.2, 3.3);
        grid.align(&mut v);
        // First vertex keeps its own value
        assert_eq!(v, DVec3::new(1.1, 2.2, 3.3));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_align_snaps_same_cell() {
        let mut grid = Grid3d::new(1e-5);
        let mut a = DVec3::new(0.0000001, 0.0, 0.0);
        let mut b = DVec3::new(0.0000002, 0.0, 0.0);
        grid.align(&mut a);
        grid.align(&mut b);
        assert_eq!(a, b);
        assert_eq!(b, DVec3::new(0.0000001, 0.0, 0.0));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_align_snaps_to_neighbour_cell() {
        let mut grid = Grid3d::new(1.0);
        // 0.45 rounds to cell 0, 0.55 rounds to cell 1
        let mut a = DVec3::new(0.45, 0.0, 0.0);
        let mut b = DVec3::new(0.55, 0.0, 0.0);
        grid.align(&mut a);
        grid.align(&mut b);
        assert_eq!(a, b);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_align_prefers_closest_neighbour() {
        let mut grid = Grid3d::new(1.0);
        let mut near = DVec3::new(2.0, 0.0, 0.0);
        let mut far = DVec3::new(0.0, 1.0, 1.0);
        grid.align(&mut near);
        grid.align(&mut far);
        assert_eq!(grid.len(), 2);

        // Cell (1,0,0) touches both; (2,0,0) is one step away, (0,1,1) three
        let mut probe = DVec3::new(1.0, 0.0, 0.0);
        grid.align(&mut probe);
        assert_eq!(probe, DVec3::new(2.0, 0.0, 0.0));
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn test_align_keeps_distant_vertices_apart() {
        let mut grid = Grid3d::new(1e-3);
        let mut a = DVec3::ZERO;
        let mut b = DVec3::new(1.0, 0.0, 0.0);
        grid.align(&mut a);
        grid.align(&mut b);
        assert_ne!(a, b);
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn test_align_is_idempotent() {
        let mut grid = Grid3d::default();
        let mut v = DVec3::new(0.123456789, -9.87654321, 42.0);
        grid.align(&mut v);
        let once = v;
        grid.align(&mut v);
        assert_eq!(v, once);
    }

    #[test]
    fn test_align_passes_nan_through() {
        let mut grid = Grid3d::default();
        let mut bad = DVec3::new(f64::NAN, 0.0, 0.0);
        grid.align(&mut bad);
        assert!(bad.x.is_nan());
        assert!(grid.is_empty());

        // The origin is not snapped onto the NaN vertex
        let mut origin = DVec3::ZERO;
        grid.align(&mut origin);
        assert_eq!(origin, DVec3::ZERO);
        assert_eq!(grid.len(), 1);

        let mut inf = DVec3::new(0.0, f64::INFINITY, 0.0);
        grid.align(&mut inf);
        assert_eq!(inf.y, f64::INFINITY);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_align_out_of_range_is_not_welded() {
        let mut grid = Grid3d::default();
        let mut a = DVec3::new(1e13, 0.0, 0.0);
        let mut b = DVec3::new(5e13, 0.0, 0.0);
        grid.align(&mut a);
        grid.align(&mut b);
        assert_eq!(a, DVec3::new(1e13, 0.0, 0.0));
        assert_eq!(b, DVec3::new(5e13, 0.0, 0.0));
        assert!(grid.is_empty());

        // Large but representable coordinates still weld
        let mut coarse = Grid3d::new(1.0);
        let mut c = DVec3::new(1e13, 0.0, 0.0);
        let mut d = DVec3::new(1e13 + 0.25, 0.0, 0.0);
        coarse.align(&mut c);
        coarse.align(&mut d);
        assert_eq!(c, d);
    }

    #[test]
    fn test_memsize_grows_per_cell() {
        let mut grid = Grid3d::new(1.0);
        let empty = grid.memsize();
        assert_eq!(empty, size_of::<Grid3d>());

        let mut v = DVec3::new(10.0, 10.0, 10.0);
        grid.align(&mut v);
        assert_eq!(grid.memsize(), empty + 3 * size_of::<i64>() + size_of::<DVec3>());

        // Same cell, no growth
        let mut w = DVec3::new(10.1, 10.0, 10.0);
        grid.align(&mut w);
        assert_eq!(grid.memsize(), empty + 3 * size_of::<i64>() + size_of::<DVec3>());
    }
}
