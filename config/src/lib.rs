//! # Config Crate
//!
//! Centralized configuration constants for the PolySet geometry pipeline.
//! Grid resolution, preview thickness and the tolerances used by the
//! tessellator are defined here so that every crate agrees on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{GRID_FINE, FLAT_EXTRUSION_THICKNESS};
//!
//! // Two coordinates closer than the grid resolution land in one cell
//! let a: f64 = 1.0e-7;
//! let b: f64 = 2.0e-7;
//! assert_eq!((a / GRID_FINE).round(), (b / GRID_FINE).round());
//!
//! // Flat shapes are previewed as a thin prism
//! assert_eq!(FLAT_EXTRUSION_THICKNESS, 1.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **OpenSCAD Compatible**: Defaults match OpenSCAD behavior

pub mod constants;
