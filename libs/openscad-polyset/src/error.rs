//! # PolySet Errors
//!
//! Error types reported by the opt-in polygon validation pass.
//!
//! Building, querying and tessellating a PolySet never fails; malformed
//! polygons degrade into odd triangles instead. These errors only surface
//! when a caller explicitly asks for [`PolySet::validate`](crate::PolySet::validate).

use thiserror::Error;

/// Errors that can be found when validating a PolySet.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolySetError {
    /// Polygon has fewer than three vertices
    #[error("Polygon {polygon} has {count} vertices (min: 3)")]
    TooFewVertices { polygon: usize, count: usize },

    /// Polygon has zero area, so no normal can be derived
    #[error("Polygon {polygon} is degenerate: {message}")]
    Degenerate { polygon: usize, message: String },

    /// Polygon turns the other way at some corner
    #[error("Polygon {polygon} is not convex at vertex {vertex}")]
    NonConvex { polygon: usize, vertex: usize },

    /// Flat polygon is wound clockwise seen from +Z
    #[error("Polygon {polygon} of a 2D PolySet is wound clockwise")]
    WrongWinding { polygon: usize },
}

impl PolySetError {
    /// Creates a too-few-vertices error.
    pub fn too_few_vertices(polygon: usize, count: usize) -> Self {
        Self::TooFewVertices { polygon, count }
    }

    /// Creates a degenerate polygon error.
    pub fn degenerate(polygon: usize, message: impl Into<String>) -> Self {
        Self::Degenerate {
            polygon,
            message: message.into(),
        }
    }

    /// Creates a non-convex polygon error.
    pub fn non_convex(polygon: usize, vertex: usize) -> Self {
        Self::NonConvex { polygon, vertex }
    }

    /// Creates a wrong winding error.
    pub fn wrong_winding(polygon: usize) -> Self {
        Self::WrongWinding { polygon }
    }

    /// Index of the offending polygon.
    pub fn polygon(&self) -> usize {
        match self {
            Self::TooFewVertices { polygon, .. }
            | Self::Degenerate { polygon, .. }
            | Self::NonConvex { polygon, .. }
            | Self::WrongWinding { polygon } => *polygon,
        }
    }
}
