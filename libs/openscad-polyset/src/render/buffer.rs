//! Triangle and line buffers produced by the tessellator.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// One tessellated triangle.
///
/// `corners` and `edges` are in geometric order: `edges[k]` tells whether
/// the edge from `corners[k]` to `corners[(k + 1) % 3]` is a real polygon
/// boundary (`true`) or a synthetic diagonal/fan edge (`false`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriangleRecord {
    /// Vertex positions before any mirroring swap
    pub corners: [DVec3; 3],
    /// Unit face normal of `corners` (right-hand rule)
    pub normal: DVec3,
    /// Boundary flags per edge
    pub edges: [bool; 3],
    /// Emit `corners[0], corners[2], corners[1]` instead
    pub mirrored: bool,
}

impl TriangleRecord {
    /// Vertex positions in the order they are sent to the backend.
    pub fn emitted(&self) -> [DVec3; 3] {
        let [p0, p1, p2] = self.corners;
        if self.mirrored {
            [p0, p2, p1]
        } else {
            [p0, p1, p2]
        }
    }

    /// Edge flags matching [`emitted`](Self::emitted): flag k covers the
    /// edge from emitted vertex k to emitted vertex k + 1.
    pub fn emitted_edges(&self) -> [bool; 3] {
        let [e0, e1, e2] = self.edges;
        if self.mirrored {
            [e2, e1, e0]
        } else {
            [e0, e1, e2]
        }
    }

    /// Per-vertex attributes for the edge-highlighting shader, in emission
    /// order.
    ///
    /// Every vertex carries the same edge factors (2.0 for a boundary edge,
    /// -1.0 otherwise), the positions of the two other corners and a
    /// barycentric selector identifying which corner it is.
    pub fn edge_shader_vertices(&self) -> [EdgeShaderVertex; 3] {
        let factor = |e: bool| if e { 2.0 } else { -1.0 };
        let edge_factors = DVec3::new(
            factor(self.edges[0]),
            factor(self.edges[1]),
            factor(self.edges[2]),
        );
        let [p0, p1, p2] = self.corners;
        let v0 = EdgeShaderVertex {
            position: p0,
            edge_factors,
            others: [p1, p2],
            barycentric: DVec3::Y,
        };
        let v1 = EdgeShaderVertex {
            position: p1,
            edge_factors,
            others: [p0, p2],
            barycentric: DVec3::Z,
        };
        let v2 = EdgeShaderVertex {
            position: p2,
            edge_factors,
            others: [p0, p1],
            barycentric: DVec3::X,
        };
        if self.mirrored {
            [v0, v2, v1]
        } else {
            [v0, v1, v2]
        }
    }
}

/// Vertex attributes of the edge-highlighting shader path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeShaderVertex {
    /// Vertex position
    pub position: DVec3,
    /// 2.0 / -1.0 per triangle edge
    pub edge_factors: DVec3,
    /// Positions of the two other corners
    pub others: [DVec3; 2],
    /// Corner selector
    pub barycentric: DVec3,
}

/// Output of the surface pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceBuffer {
    /// Triangles in emission order
    pub triangles: Vec<TriangleRecord>,
}

impl SurfaceBuffer {
    /// Creates a buffer with room for `capacity` triangles.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if nothing was emitted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Exports emitted positions as a flat f32 array for GPU upload.
    ///
    /// Returns [x, y, z, x, y, z, ...], three vertices per triangle.
    pub fn positions_f32(&self) -> Vec<f32> {
        let mut result = Vec::with_capacity(self.triangles.len() * 9);
        for tri in &self.triangles {
            for p in tri.emitted() {
                result.extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
            }
        }
        result
    }

    /// Exports flat-shaded normals, repeated for each vertex.
    pub fn normals_f32(&self) -> Vec<f32> {
        let mut result = Vec::with_capacity(self.triangles.len() * 9);
        for tri in &self.triangles {
            let n = tri.normal;
            for _ in 0..3 {
                result.extend_from_slice(&[n.x as f32, n.y as f32, n.z as f32]);
            }
        }
        result
    }
}

/// Output of the edge pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeBuffer {
    /// Closed polylines; the last point connects back to the first
    pub loops: Vec<Vec<DVec3>>,
    /// Independent segments
    pub segments: Vec<[DVec3; 2]>,
}

impl EdgeBuffer {
    /// Returns true if nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.loops.is_empty() && self.segments.is_empty()
    }
}
