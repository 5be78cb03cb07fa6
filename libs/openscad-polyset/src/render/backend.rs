//! Adapter between tessellation buffers and a drawing backend.

use super::buffer::{EdgeBuffer, EdgeShaderVertex, SurfaceBuffer};
use glam::DVec3;

/// A sink for drawing primitives, e.g. an OpenGL or WebGPU wrapper.
pub trait DrawBackend {
    /// Draws one triangle, vertices in emission order.
    fn triangle(&mut self, vertices: [DVec3; 3], normal: DVec3);

    /// Draws one triangle with edge-shader attributes.
    ///
    /// Backends without the edge shader draw a plain triangle.
    fn edge_shaded_triangle(&mut self, vertices: [EdgeShaderVertex; 3], normal: DVec3) {
        self.triangle(vertices.map(|v| v.position), normal);
    }

    /// Draws a closed polyline.
    fn line_loop(&mut self, points: &[DVec3]);

    /// Draws independent segments.
    fn lines(&mut self, segments: &[[DVec3; 2]]);
}

impl SurfaceBuffer {
    /// Feeds every triangle to `backend`.
    pub fn draw<B: DrawBackend + ?Sized>(&self, backend: &mut B) {
        for tri in &self.triangles {
            backend.triangle(tri.emitted(), tri.normal);
        }
    }

    /// Feeds every triangle to `backend` with edge-shader attributes.
    pub fn draw_edge_shaded<B: DrawBackend + ?Sized>(&self, backend: &mut B) {
        for tri in &self.triangles {
            backend.edge_shaded_triangle(tri.edge_shader_vertices(), tri.normal);
        }
    }
}

impl EdgeBuffer {
    /// Feeds every loop, then all segments, to `backend`.
    pub fn draw<B: DrawBackend + ?Sized>(&self, backend: &mut B) {
        for points in &self.loops {
            backend.line_loop(points);
        }
        if !self.segments.is_empty() {
            backend.lines(&self.segments);
        }
    }
}
