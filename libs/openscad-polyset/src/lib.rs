//! # OpenSCAD PolySet
//!
//! Polygon-mesh container for explicit 2D/3D geometry and its preview
//! tessellation.
//!
//! ## Architecture
//!
//! ```text
//! importers / CSG → PolySet (build API, Grid3d welding)
//!                      ├─ bounding_box / memsize / dump
//!                      └─ render_surface / render_edges → buffers → DrawBackend
//! ```
//!
//! ## Components
//!
//! - **Grid**: quantization grid welding near-coincident vertices
//! - **Shape2d**: outlines of flat shapes (outer boundary plus holes)
//! - **PolySet**: convex polygons, build API and queries
//! - **Validate**: opt-in convexity and winding check
//! - **Render**: triangle/line buffers for the preview renderer
//!
//! ## Usage
//!
//! ```rust
//! use openscad_polyset::{CsgMode, PolySet};
//! use glam::DVec3;
//!
//! let mut ps = PolySet::new();
//! ps.append_poly();
//! ps.append_vertex(DVec3::new(0.0, 0.0, 0.0));
//! ps.append_vertex(DVec3::new(1.0, 0.0, 0.0));
//! ps.append_vertex(DVec3::new(1.0, 1.0, 0.0));
//! ps.append_vertex(DVec3::new(0.0, 1.0, 0.0));
//!
//! let surface = ps.render_surface(CsgMode::Normal, false);
//! assert_eq!(surface.len(), 2);
//! assert_eq!(surface.triangles[0].normal, DVec3::Z);
//! ```

pub mod bounding_box;
pub mod error;
pub mod grid;
pub mod import;
pub mod polyset;
pub mod render;
pub mod shape2d;
pub mod validate;

pub use bounding_box::BoundingBox;
pub use error::PolySetError;
pub use grid::Grid3d;
pub use polyset::{Polygon, PolySet};
pub use render::{CsgMode, DrawBackend, EdgeBuffer, SurfaceBuffer, TriangleRecord};
pub use shape2d::{Outline2d, Polygon2d};
