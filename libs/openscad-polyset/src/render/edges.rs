//! Edge pass: polygon and outline wireframe.

use super::buffer::EdgeBuffer;
use super::CsgMode;
use crate::polyset::PolySet;
use config::constants::flat_preview_thickness;
use glam::DVec2;
use tracing::warn;

/// Adds the cage of one flat loop: bottom and top rims plus one vertical
/// segment per point.
fn push_cage(buffer: &mut EdgeBuffer, points: &[DVec2], half: f64) {
    for z in [-half, half] {
        buffer
            .loops
            .push(points.iter().map(|p| p.extend(z)).collect());
    }
    buffer
        .segments
        .extend(points.iter().map(|p| [p.extend(-half), p.extend(half)]));
}

impl PolySet {
    /// Builds the wireframe for the edge pass.
    ///
    /// Solid sets draw every polygon as a closed loop. Flat sets draw a cage
    /// around the preview prism, one per outline.
    pub fn render_edges(&self, mode: CsgMode) -> EdgeBuffer {
        let mut buffer = EdgeBuffer::default();

        if !self.is_2d() {
            buffer.loops = self.polygons().to_vec();
            return buffer;
        }

        let half = flat_preview_thickness(mode.is_difference()) / 2.0;
        if !self.polygon2d().is_empty() {
            for outline in self.polygon2d().outlines() {
                push_cage(&mut buffer, outline, half);
            }
        } else if !self.is_empty() {
            warn!(
                polygons = self.len(),
                "2D PolySet has no outlines, drawing polygon edges instead"
            );
            for poly in self.polygons() {
                let points: Vec<DVec2> = poly.iter().map(|v| v.truncate()).collect();
                push_cage(&mut buffer, &points, half);
            }
        }
        buffer
    }
}
