//! # PolySet
//!
//! Container for explicit polygonal geometry from all origins: importers,
//! primitives and CSG results. A PolySet is either solid (3D polygon soup)
//! or flat (2D), in which case it also carries the outlines of the shape it
//! was built from; those are used for preview side walls and edges.
//!
//! Every stored polygon must be convex. This is not checked while building;
//! see [`PolySet::validate`] for an opt-in check.

use crate::bounding_box::BoundingBox;
use crate::grid::Grid3d;
use crate::shape2d::Polygon2d;
use config::constants::{DEFAULT_CONVEXITY, GRID_FINE};
use glam::DVec3;
use std::fmt::Write;
use std::mem::size_of;

/// One convex face (3D) or convex piece of a flat shape (2D).
///
/// Vertices are ordered counter-clockwise seen from outside, so the
/// right-hand rule gives the outward normal.
pub type Polygon = Vec<DVec3>;

/// Polygon mesh container.
///
/// # Example
///
/// ```rust
/// use openscad_polyset::PolySet;
/// use glam::DVec3;
///
/// let mut ps = PolySet::new();
/// ps.append_poly();
/// ps.append_vertex(DVec3::new(0.0, 0.0, 0.0));
/// ps.append_vertex(DVec3::new(1.0, 0.0, 0.0));
/// ps.append_vertex(DVec3::new(0.0, 1.0, 0.0));
/// assert_eq!(ps.len(), 1);
/// assert_eq!(ps.bounding_box().max, DVec3::new(1.0, 1.0, 0.0));
/// ```
#[derive(Debug, Clone)]
pub struct PolySet {
    /// True for flat shapes
    is_2d: bool,
    /// Hint forwarded to boolean operations, not interpreted here
    convexity: u32,
    /// Convex polygons in build order
    polygons: Vec<Polygon>,
    /// Welding grid, owned exclusively by this set
    grid: Grid3d,
    /// Source outlines of a flat shape (empty when solid)
    polygon2d: Polygon2d,
}

impl Default for PolySet {
    fn default() -> Self {
        Self::new()
    }
}

impl PolySet {
    /// Creates an empty solid PolySet.
    pub fn new() -> Self {
        Self::with_resolution(GRID_FINE)
    }

    /// Creates an empty solid PolySet welding on a custom grid.
    pub fn with_resolution(resolution: f64) -> Self {
        Self {
            is_2d: false,
            convexity: DEFAULT_CONVEXITY,
            polygons: Vec::new(),
            grid: Grid3d::new(resolution),
            polygon2d: Polygon2d::new(),
        }
    }

    /// Creates an empty flat PolySet seeded with the outlines of `origin`.
    ///
    /// The caller still has to add the convex pieces covering the shape.
    pub fn from_polygon2d(origin: Polygon2d) -> Self {
        Self {
            is_2d: true,
            polygon2d: origin,
            ..Self::new()
        }
    }

    /// Returns true for flat PolySets.
    #[inline]
    pub fn is_2d(&self) -> bool {
        self.is_2d
    }

    /// Returns the convexity hint.
    #[inline]
    pub fn convexity(&self) -> u32 {
        self.convexity
    }

    /// Sets the convexity hint.
    pub fn set_convexity(&mut self, convexity: u32) {
        self.convexity = convexity;
    }

    /// Returns the number of polygons.
    #[inline]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    /// Returns true if no polygon has been started.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Returns the polygons.
    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Returns the source outlines (empty for solid PolySets).
    #[inline]
    pub fn polygon2d(&self) -> &Polygon2d {
        &self.polygon2d
    }

    /// Returns the welding grid.
    #[inline]
    pub fn grid(&self) -> &Grid3d {
        &self.grid
    }

    /// Returns the total number of polygon vertices.
    pub fn vertex_count(&self) -> usize {
        self.polygons.iter().map(Vec::len).sum()
    }

    // =========================================================================
    // BUILDING
    // =========================================================================

    /// Starts a new, empty polygon.
    pub fn append_poly(&mut self) {
        self.polygons.push(Polygon::new());
    }

    /// Welds `v` and appends it to the polygon being built.
    ///
    /// Starts a polygon if none has been started yet.
    pub fn append_vertex(&mut self, mut v: DVec3) {
        self.grid.align(&mut v);
        self.current_polygon().push(v);
    }

    /// Welds `v` and prepends it to the polygon being built.
    ///
    /// Used to emit a loop in reverse order, e.g. for holes or mirrored
    /// contours, without re-deriving the sequence.
    pub fn insert_vertex(&mut self, mut v: DVec3) {
        self.grid.align(&mut v);
        self.current_polygon().insert(0, v);
    }

    fn current_polygon(&mut self) -> &mut Polygon {
        if self.polygons.is_empty() {
            self.polygons.push(Polygon::new());
        }
        let last = self.polygons.len() - 1;
        &mut self.polygons[last]
    }

    /// Appends the polygons of `other`.
    ///
    /// This is a union of disjoint parts, not a boolean union. Grids are not
    /// merged: vertices of `other` keep the values its own grid gave them,
    /// so coincident vertices across the two sets are not welded.
    pub fn append(&mut self, other: &PolySet) {
        self.polygons.extend(other.polygons.iter().cloned());
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Computes the bounding box of all polygon vertices.
    ///
    /// Outline points of a flat set are not included. An empty set yields
    /// [`BoundingBox::empty`].
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::empty();
        for v in self.polygons.iter().flatten() {
            bbox.extend(*v);
        }
        bbox
    }

    /// Bytes used by the set: polygon vertices, outline storage, grid
    /// cells and the set header.
    pub fn memsize(&self) -> usize {
        self.vertex_count() * size_of::<DVec3>()
            + (self.polygon2d.memsize() - size_of::<Polygon2d>())
            + (self.grid.memsize() - size_of::<Grid3d>())
            + size_of::<PolySet>()
    }

    /// Deterministic text dump for debugging and test comparison.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail
        let _ = write!(
            out,
            "PolySet:\n dimensions:{}\n convexity:{}\n num polygons: {}\n num outlines: {}\n polygons data:",
            if self.is_2d { 2 } else { 3 },
            self.convexity,
            self.polygons.len(),
            self.polygon2d.outlines().len(),
        );
        for poly in &self.polygons {
            out.push_str("\n  polygon begin:");
            for v in poly {
                let _ = write!(out, "\n   vertex:{} {} {}", v.x, v.y, v.z);
            }
        }
        out.push_str("\n outlines data:\n");
        out.push_str(&self.polygon2d.dump());
        out.push_str("PolySet end");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn add_polygon(ps: &mut PolySet, points: &[[f64; 3]]) {
        ps.append_poly();
        for p in points {
            ps.append_vertex(DVec3::from_array(*p));
        }
    }

    #[test]
    fn test_new_polyset() {
        let ps = PolySet::new();
        assert!(ps.is_empty());
        assert!(!ps.is_2d());
        assert_eq!(ps.convexity(), DEFAULT_CONVEXITY);
        assert!(ps.polygon2d().is_empty());
        assert!(ps.grid().is_empty());
    }

    #[test]
    fn test_from_polygon2d_is_flat() {
        let shape = Polygon2d::from_outlines(vec![vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(0.0, 1.0),
        ]]);
        let ps = PolySet::from_polygon2d(shape);
        assert!(ps.is_2d());
        assert_eq!(ps.polygon2d().outlines().len(), 1);
        assert!(ps.is_empty());
    }

    #[test]
    fn test_append_vertex_order() {
        let mut ps = PolySet::new();
        add_polygon(&mut ps, &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        assert_eq!(ps.polygons()[0][1], DVec3::X);
        assert_eq!(ps.vertex_count(), 3);
    }

    #[test]
    fn test_insert_vertex_prepends() {
        let mut ps = PolySet::new();
        ps.append_poly();
        ps.insert_vertex(DVec3::new(0.0, 1.0, 0.0));
        ps.insert_vertex(DVec3::new(1.0, 0.0, 0.0));
        ps.insert_vertex(DVec3::new(0.0, 0.0, 0.0));
        assert_eq!(
            ps.polygons()[0],
            vec![DVec3::ZERO, DVec3::X, DVec3::Y]
        );
    }

    #[test]
    fn test_insert_vertex_is_welded() {
        let mut ps = PolySet::new();
        add_polygon(&mut ps, &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        ps.append_poly();
        ps.insert_vertex(DVec3::new(1.0, 1.0, 0.0));
        ps.insert_vertex(DVec3::new(1.0 + 1e-9, -1e-9, 0.0));
        assert_eq!(ps.polygons()[1][0], ps.polygons()[0][1]);
        assert_eq!(ps.polygons()[1][0], DVec3::X);
        assert_eq!(ps.grid().len(), 4);
    }

    #[test]
    fn test_non_finite_vertices_do_not_corrupt_neighbours() {
        let mut ps = PolySet::new();
        ps.append_poly();
        ps.append_vertex(DVec3::new(f64::NAN, 0.0, 0.0));
        ps.append_vertex(DVec3::ZERO);
        ps.append_vertex(DVec3::new(1e13, 0.0, 0.0));
        ps.append_vertex(DVec3::new(5e13, 0.0, 0.0));
        let poly = &ps.polygons()[0];
        assert!(poly[0].x.is_nan());
        assert_eq!(poly[1], DVec3::ZERO);
        assert_eq!(poly[3], DVec3::new(5e13, 0.0, 0.0));
    }

    #[test]
    fn test_append_vertex_without_poly_starts_one() {
        let mut ps = PolySet::new();
        ps.append_vertex(DVec3::ONE);
        assert_eq!(ps.len(), 1);
        assert_eq!(ps.polygons()[0], vec![DVec3::ONE]);
    }

    #[test]
    fn test_vertices_are_welded() {
        let mut ps = PolySet::new();
        add_polygon(&mut ps, &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        add_polygon(&mut ps, &[[1.0 + 1e-9, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0 - 1e-9, 0.0]]);
        assert_eq!(ps.polygons()[1][0], ps.polygons()[0][1]);
        assert_eq!(ps.polygons()[1][2], ps.polygons()[0][2]);
        assert_eq!(ps.grid().len(), 4);
    }

    #[test]
    fn test_append_concatenates() {
        let mut a = PolySet::new();
        add_polygon(&mut a, &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        let mut b = PolySet::new();
        add_polygon(&mut b, &[[0.0, 0.0, 5.0], [1.0, 0.0, 5.0], [0.0, 1.0, 5.0]]);
        add_polygon(&mut b, &[[0.0, 0.0, 6.0], [1.0, 0.0, 6.0], [0.0, 1.0, 6.0]]);

        a.append(&b);
        assert_eq!(a.len(), 3);
        assert_eq!(a.polygons()[2][0], DVec3::new(0.0, 0.0, 6.0));
        // Grids stay separate
        assert_eq!(a.grid().len(), 3);
    }

    #[test]
    fn test_bounding_box_ignores_outlines() {
        let shape = Polygon2d::from_outlines(vec![vec![
            DVec2::new(-100.0, -100.0),
            DVec2::new(100.0, -100.0),
            DVec2::new(0.0, 100.0),
        ]]);
        let mut ps = PolySet::from_polygon2d(shape);
        assert!(ps.bounding_box().is_empty());

        add_polygon(&mut ps, &[[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 3.0, 0.0]]);
        let bbox = ps.bounding_box();
        assert_eq!(bbox.min, DVec3::ZERO);
        assert_eq!(bbox.max, DVec3::new(2.0, 3.0, 0.0));
    }

    #[test]
    fn test_memsize_accounting() {
        let mut ps = PolySet::new();
        let empty = ps.memsize();
        assert_eq!(empty, size_of::<PolySet>());

        add_polygon(&mut ps, &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        let cell = 3 * size_of::<i64>() + size_of::<DVec3>();
        assert_eq!(ps.memsize(), empty + 3 * size_of::<DVec3>() + 3 * cell);
    }

    #[test]
    fn test_dump_format() {
        let mut ps = PolySet::new();
        ps.set_convexity(2);
        add_polygon(&mut ps, &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.5, 0.0]]);
        let expected = "PolySet:\n dimensions:3\n convexity:2\n num polygons: 1\n num outlines: 0\n polygons data:\n  polygon begin:\n   vertex:0 0 0\n   vertex:1 0 0\n   vertex:0 1.5 0\n outlines data:\nPolySet end";
        assert_eq!(ps.dump(), expected);
    }

    #[test]
    fn test_dump_flat_includes_outlines() {
        let shape = Polygon2d::from_outlines(vec![vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(0.0, 1.0),
        ]]);
        let ps = PolySet::from_polygon2d(shape);
        let dump = ps.dump();
        assert!(dump.contains(" dimensions:2\n"));
        assert!(dump.contains(" num outlines: 1\n"));
        assert!(dump.ends_with(" outlines data:\ncontour:\n 0 0 1 0 0 1\nPolySet end"));
        // Stable across calls
        assert_eq!(dump, ps.dump());
    }
}
