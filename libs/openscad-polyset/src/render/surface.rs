//! Surface pass: polygons to triangles.

use super::buffer::{SurfaceBuffer, TriangleRecord};
use super::CsgMode;
use crate::polyset::{Polygon, PolySet};
use config::constants::{flat_preview_thickness, NORMAL_EPSILON};
use glam::DVec3;
use tracing::warn;

/// Edge flags of a triangle that is a whole polygon.
const EDGES_ALL: [bool; 3] = [true, true, true];
/// Edge flags of a quad half; the 1-2 edge is the diagonal.
const EDGES_QUAD: [bool; 3] = [true, false, true];
/// Edge flags of a fan triangle; only the rim edge is real.
const EDGES_FAN: [bool; 3] = [false, true, false];
/// Side wall triangle (top, bottom, next bottom).
const EDGES_WALL_LOWER: [bool; 3] = [true, true, false];
/// Side wall triangle (top, next bottom, next top).
const EDGES_WALL_UPPER: [bool; 3] = [false, true, true];

/// Unit normal of the triangle `p0, p1, p2` by the right-hand rule.
///
/// Uses the two edges meeting at `p1`. Returns `None` for non-finite
/// triangles and for triangles whose edges are parallel up to
/// [`NORMAL_EPSILON`] relative to their lengths.
///
/// # Example
///
/// ```rust
/// use openscad_polyset::render::face_normal;
/// use glam::DVec3;
///
/// assert_eq!(face_normal(DVec3::ZERO, DVec3::X, DVec3::Y), Some(DVec3::Z));
/// assert_eq!(face_normal(DVec3::ZERO, DVec3::X, DVec3::X * 2.0), None);
/// ```
pub fn face_normal(p0: DVec3, p1: DVec3, p2: DVec3) -> Option<DVec3> {
    let a = p1 - p0;
    let b = p2 - p1;
    let n = a.cross(b);
    let len = n.length();
    if len.is_finite() && len > NORMAL_EPSILON * a.length() * b.length() {
        Some(n / len)
    } else {
        None
    }
}

/// Number of triangles the surface pass emits for a polygon of `n` vertices.
pub fn polygon_triangle_count(n: usize) -> usize {
    match n {
        0 => 0,
        3 => 1,
        4 => 2,
        _ => n,
    }
}

/// Accumulates triangles with the mirroring policy of one render call.
struct TriangleEmitter {
    buffer: SurfaceBuffer,
    mirrored: bool,
    /// Substituted for degenerate triangles
    last_normal: DVec3,
}

impl TriangleEmitter {
    fn new(mirrored: bool, capacity: usize) -> Self {
        Self {
            buffer: SurfaceBuffer::with_capacity(capacity),
            mirrored,
            last_normal: DVec3::ZERO,
        }
    }

    fn emit(&mut self, p0: DVec3, p1: DVec3, p2: DVec3, edges: [bool; 3]) {
        let normal = face_normal(p0, p1, p2).unwrap_or(self.last_normal);
        self.last_normal = normal;
        self.buffer.triangles.push(TriangleRecord {
            corners: [p0, p1, p2],
            normal,
            edges,
            mirrored: self.mirrored,
        });
    }

    /// Emits a triangle, optionally with reversed winding.
    fn emit_wound(&mut self, p0: DVec3, p1: DVec3, p2: DVec3, edges: [bool; 3], flip: bool) {
        if flip {
            let [e0, e1, e2] = edges;
            self.emit(p0, p2, p1, [e2, e1, e0]);
        } else {
            self.emit(p0, p1, p2, edges);
        }
    }

    /// Triangulates one convex polygon moved by `offset`.
    ///
    /// `flip` reverses the winding of every emitted triangle while keeping
    /// the same diagonal and fan center.
    fn emit_polygon(&mut self, poly: &Polygon, offset: DVec3, flip: bool) {
        let n = poly.len();
        let at = |i: usize| poly[i] + offset;
        match n {
            0 => {}
            3 => self.emit_wound(at(0), at(1), at(2), EDGES_ALL, flip),
            4 => {
                self.emit_wound(at(0), at(1), at(3), EDGES_QUAD, flip);
                self.emit_wound(at(2), at(3), at(1), EDGES_QUAD, flip);
            }
            _ => {
                let center = poly.iter().copied().sum::<DVec3>() / n as f64 + offset;
                for j in 1..=n {
                    self.emit_wound(center, at(j - 1), at(j % n), EDGES_FAN, flip);
                }
            }
        }
    }

    /// Emits the vertical wall between `a` and `b` spanning `z_low..z_high`.
    fn emit_wall(&mut self, a: DVec3, b: DVec3, z_low: f64, z_high: f64) {
        let a_low = DVec3::new(a.x, a.y, a.z + z_low);
        let a_high = DVec3::new(a.x, a.y, a.z + z_high);
        let b_low = DVec3::new(b.x, b.y, b.z + z_low);
        let b_high = DVec3::new(b.x, b.y, b.z + z_high);
        self.emit(a_high, a_low, b_low, EDGES_WALL_LOWER);
        self.emit(a_high, b_low, b_high, EDGES_WALL_UPPER);
    }

    fn finish(self) -> SurfaceBuffer {
        self.buffer
    }
}

impl PolySet {
    /// Tessellates the PolySet for the surface pass.
    ///
    /// `mirrored` must be true when the object's transform has a negative
    /// determinant (see [`is_mirrored`](super::is_mirrored)); emission order
    /// is then swapped so faces still appear outward-facing.
    ///
    /// Solid sets emit one, two or n triangles per polygon of 3, 4 or n
    /// vertices. Flat sets emit a thin prism: both caps plus two triangles
    /// per outline edge.
    pub fn render_surface(&self, mode: CsgMode, mirrored: bool) -> SurfaceBuffer {
        let cap_triangles: usize = self
            .polygons()
            .iter()
            .map(|p| polygon_triangle_count(p.len()))
            .sum();

        if !self.is_2d() {
            let mut emitter = TriangleEmitter::new(mirrored, cap_triangles);
            for poly in self.polygons() {
                emitter.emit_polygon(poly, DVec3::ZERO, false);
            }
            return emitter.finish();
        }

        let zbase = flat_preview_thickness(mode.is_difference());
        let half = zbase / 2.0;
        let wall_triangles = 2 * self.polygon2d().point_count();
        let mut emitter = TriangleEmitter::new(mirrored, 2 * cap_triangles + wall_triangles);

        // Bottom cap faces down, top cap faces up
        for poly in self.polygons() {
            emitter.emit_polygon(poly, DVec3::new(0.0, 0.0, -half), true);
        }
        for poly in self.polygons() {
            emitter.emit_polygon(poly, DVec3::new(0.0, 0.0, half), false);
        }

        if !self.polygon2d().is_empty() {
            for outline in self.polygon2d().outlines() {
                let m = outline.len();
                for j in 1..=m {
                    let a = outline[j - 1].extend(0.0);
                    let b = outline[j % m].extend(0.0);
                    emitter.emit_wall(a, b, -half, half);
                }
            }
        } else if !self.is_empty() {
            warn!(
                polygons = self.len(),
                "2D PolySet has no outlines, extruding polygon edges as side walls"
            );
            for poly in self.polygons() {
                let m = poly.len();
                for j in 1..=m {
                    emitter.emit_wall(poly[j - 1], poly[j % m], -half, half);
                }
            }
        }

        emitter.finish()
    }
}
