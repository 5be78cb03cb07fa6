//! # Preview Tessellation
//!
//! Turns a built PolySet into drawing primitives for the preview renderer:
//! a buffer of triangles (with face normals and edge flags) for the
//! surface pass, and line loops/segments for the edge pass.
//!
//! ## Pipeline
//!
//! ```text
//! PolySet → render_surface(mode, mirrored) → SurfaceBuffer → DrawBackend
//!         → render_edges(mode)             → EdgeBuffer    → DrawBackend
//! ```
//!
//! Tessellation is a pure function of the stored polygons; the buffers can
//! be inspected directly in tests or fed to any backend through
//! [`DrawBackend`].
//!
//! ## Rules
//!
//! - Triangles are emitted as-is, quads are split along the 1-3 diagonal,
//!   larger polygons are fanned around their vertex centroid.
//! - Flat PolySets are previewed as a prism [`flat_preview_thickness`]
//!   thick, centered on z = 0, with walls built from the source outlines.
//! - Under a mirroring transform the last two vertices of every triangle
//!   swap places on emission; normals keep their unmirrored value.
//!
//! [`flat_preview_thickness`]: config::constants::flat_preview_thickness

mod backend;
mod buffer;
mod edges;
mod surface;


pub use backend::DrawBackend;
pub use buffer::{EdgeBuffer, EdgeShaderVertex, SurfaceBuffer, TriangleRecord};
pub use surface::{face_normal, polygon_triangle_count};

use glam::DMat4;
use serde::{Deserialize, Serialize};

/// How a CSG term is drawn in the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CsgMode {
    /// Plain drawing outside any CSG product
    #[default]
    None,
    /// Positive term of a CSG product
    Normal,
    /// Subtracted term of a CSG product
    Difference,
    /// Background modifier (`%`)
    Background,
    /// Background modifier on a subtracted term
    BackgroundDifference,
    /// Highlight modifier (`#`)
    Highlight,
    /// Highlight modifier on a subtracted term
    HighlightDifference,
}

impl CsgMode {
    /// Returns true for subtracted terms, which get thicker flat previews.
    pub fn is_difference(self) -> bool {
        matches!(
            self,
            Self::Difference | Self::BackgroundDifference | Self::HighlightDifference
        )
    }
}

/// Returns true if `transform` reflects space (negative determinant).
///
/// Callers derive the `mirrored` flag of
/// [`PolySet::render_surface`](crate::PolySet::render_surface) with this once
/// per object.
///
/// # Example
///
/// ```rust
/// use openscad_polyset::render::is_mirrored;
/// use glam::{DMat4, DVec3};
///
/// assert!(!is_mirrored(&DMat4::IDENTITY));
/// assert!(is_mirrored(&DMat4::from_scale(DVec3::new(-1.0, 1.0, 1.0))));
/// ```
pub fn is_mirrored(transform: &DMat4) -> bool {
    transform.determinant() < 0.0
}
