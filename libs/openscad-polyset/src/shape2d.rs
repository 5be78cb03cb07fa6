//! # 2D Shapes
//!
//! A flat region is stored as a set of closed outlines: the outer boundary
//! plus any holes. Outlines are not checked for orientation or overlap;
//! holes are simply additional outlines.
//!
//! ## Example
//!
//! ```rust
//! use openscad_polyset::shape2d::Polygon2d;
//! use glam::DVec2;
//!
//! let mut shape = Polygon2d::new();
//! shape.add_outline(vec![
//!     DVec2::new(0.0, 0.0),
//!     DVec2::new(10.0, 0.0),
//!     DVec2::new(10.0, 10.0),
//!     DVec2::new(0.0, 10.0),
//! ]);
//! assert_eq!(shape.outlines().len(), 1);
//! ```

use crate::bounding_box::BoundingBox;
use glam::{DMat3, DVec2};
use std::fmt::Write;
use std::mem::size_of;

/// One closed boundary loop; the last point connects back to the first.
pub type Outline2d = Vec<DVec2>;

/// A flat region described by its outlines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon2d {
    /// Outer boundaries and holes, in insertion order
    outlines: Vec<Outline2d>,
    /// Set by producers that guarantee non-overlapping, consistently
    /// oriented outlines
    sanitized: bool,
}

impl Polygon2d {
    /// Creates an empty shape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a shape from a list of outlines.
    pub fn from_outlines(outlines: Vec<Outline2d>) -> Self {
        Self {
            outlines,
            sanitized: false,
        }
    }

    /// Appends an outline.
    pub fn add_outline(&mut self, outline: Outline2d) {
        self.outlines.push(outline);
    }

    /// Returns all outlines.
    #[inline]
    pub fn outlines(&self) -> &[Outline2d] {
        &self.outlines
    }

    /// Returns true if the shape has no outline.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.outlines.is_empty()
    }

    /// Returns true if the producer marked the outlines as well-formed.
    #[inline]
    pub fn is_sanitized(&self) -> bool {
        self.sanitized
    }

    /// Marks the outlines as well-formed (or not).
    pub fn set_sanitized(&mut self, sanitized: bool) {
        self.sanitized = sanitized;
    }

    /// Returns the total number of outline points.
    pub fn point_count(&self) -> usize {
        self.outlines.iter().map(Vec::len).sum()
    }

    /// Computes the bounding box of all outline points, at z = 0.
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::empty();
        for point in self.outlines.iter().flatten() {
            bbox.extend(point.extend(0.0));
        }
        bbox
    }

    /// Applies an affine 2D transform to every point.
    ///
    /// A transform with negative determinant reverses every outline so
    /// that orientation is preserved.
    pub fn transform(&mut self, matrix: &DMat3) {
        for point in self.outlines.iter_mut().flatten() {
            *point = matrix.transform_point2(*point);
        }
        if matrix.determinant() < 0.0 {
            for outline in &mut self.outlines {
                outline.reverse();
            }
        }
    }

    /// Bytes used by the shape, including its header.
    pub fn memsize(&self) -> usize {
        self.point_count() * size_of::<DVec2>()
            + self.outlines.len() * size_of::<Outline2d>()
            + size_of::<Polygon2d>()
    }

    /// Deterministic text dump, one `contour:` block per outline.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for outline in &self.outlines {
            out.push_str("contour:\n");
            for point in outline {
                // Writing to a String cannot fail
                let _ = write!(out, " {} {}", point.x, point.y);
            }
            out.push('\n');
        }
        out
    }
}
