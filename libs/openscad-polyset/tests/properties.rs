//! Whole-crate properties of the PolySet container and its tessellation.

use glam::{DVec2, DVec3};
use openscad_polyset::grid::Grid3d;
use openscad_polyset::render::polygon_triangle_count;
use openscad_polyset::{BoundingBox, CsgMode, PolySet, Polygon2d};

fn add_polygon(ps: &mut PolySet, points: &[DVec3]) {
    ps.append_poly();
    for p in points {
        ps.append_vertex(*p);
    }
}

/// Deterministic pseudo-random points, no external RNG needed.
fn scattered_points(count: usize) -> Vec<DVec3> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state % 20_000) as f64 / 100.0 - 100.0
    };
    (0..count).map(|_| DVec3::new(next(), next(), next())).collect()
}

#[test]
fn grid_align_is_idempotent() {
    let mut grid = Grid3d::default();
    for p in scattered_points(200) {
        let mut once = p;
        grid.align(&mut once);
        let mut twice = once;
        grid.align(&mut twice);
        assert_eq!(once, twice);
    }
}

#[test]
fn grid_welds_points_closer_than_resolution() {
    let resolution = 1e-3;
    for p in scattered_points(100) {
        let mut grid = Grid3d::new(resolution);
        let mut a = p;
        let mut b = p + DVec3::new(0.4, -0.3, 0.2) * resolution;
        grid.align(&mut a);
        grid.align(&mut b);
        assert_eq!(a, b);
    }
}

#[test]
fn grid_scenario_fine_points() {
    let mut grid = Grid3d::new(1e-5);
    let mut a = DVec3::new(0.0000001, 0.0, 0.0);
    let mut b = DVec3::new(0.0000002, 0.0, 0.0);
    grid.align(&mut a);
    grid.align(&mut b);
    assert_eq!(a, b);
}

#[test]
fn bounding_box_never_shrinks() {
    let mut ps = PolySet::new();
    assert_eq!(ps.bounding_box(), BoundingBox::empty());

    let points = scattered_points(60);
    let mut previous = ps.bounding_box();
    for tri in points.chunks(3) {
        add_polygon(&mut ps, tri);
        let current = ps.bounding_box();
        assert!(current.contains_box(&previous));
        previous = current;
    }
}

#[test]
fn triangle_count_is_conserved() {
    let mut ps = PolySet::new();
    let mut expected = 0;
    for n in 3..12 {
        let points: Vec<DVec3> = (0..n)
            .map(|i| {
                let a = std::f64::consts::TAU * i as f64 / n as f64;
                DVec3::new(a.cos() * 10.0, a.sin() * 10.0, n as f64)
            })
            .collect();
        add_polygon(&mut ps, &points);
        expected += match n {
            3 => 1,
            4 => 2,
            _ => n,
        };
    }
    let surface = ps.render_surface(CsgMode::Normal, false);
    assert_eq!(surface.len(), expected);
    let by_helper: usize = ps.polygons().iter().map(|p| polygon_triangle_count(p.len())).sum();
    assert_eq!(by_helper, expected);
}

#[test]
fn append_merges_polygons_and_bounds() {
    let points = scattered_points(30);
    let mut a = PolySet::new();
    let mut b = PolySet::new();
    for tri in points[..15].chunks(3) {
        add_polygon(&mut a, tri);
    }
    for tri in points[15..].chunks(3) {
        add_polygon(&mut b, tri);
    }

    let mut expected_bbox = a.bounding_box();
    expected_bbox.extend_box(&b.bounding_box());
    let expected_len = a.len() + b.len();

    a.append(&b);
    assert_eq!(a.len(), expected_len);
    assert_eq!(a.bounding_box(), expected_bbox);
}

#[test]
fn unit_quad_scenario() {
    let mut ps = PolySet::new();
    add_polygon(
        &mut ps,
        &[
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ],
    );
    let surface = ps.render_surface(CsgMode::Normal, false);
    assert_eq!(surface.len(), 2);
    let v = &ps.polygons()[0];
    assert_eq!(surface.triangles[0].emitted(), [v[0], v[1], v[3]]);
    assert_eq!(surface.triangles[1].emitted(), [v[2], v[3], v[1]]);
    assert!(surface.triangles.iter().all(|t| t.normal == DVec3::Z));
}

#[test]
fn flat_triangle_scenario() {
    let outline = vec![DVec2::new(0.0, 0.0), DVec2::new(3.0, 0.0), DVec2::new(0.0, 3.0)];
    let mut ps = PolySet::from_polygon2d(Polygon2d::from_outlines(vec![outline.clone()]));
    add_polygon(&mut ps, &outline.iter().map(|p| p.extend(0.0)).collect::<Vec<_>>());
    assert!(ps.validate().is_ok());

    let surface = ps.render_surface(CsgMode::Normal, false);
    // One cap triangle each side plus two per outline edge
    assert_eq!(surface.len(), 1 + 1 + 2 * 3);
    let ups = surface.triangles.iter().filter(|t| t.normal == DVec3::Z).count();
    let downs = surface.triangles.iter().filter(|t| t.normal == -DVec3::Z).count();
    assert_eq!((ups, downs), (1, 1));
}

#[test]
fn queries_are_repeatable() {
    let mut ps = PolySet::new();
    for tri in scattered_points(12).chunks(3) {
        add_polygon(&mut ps, tri);
    }
    assert_eq!(ps.dump(), ps.dump());
    assert_eq!(ps.memsize(), ps.memsize());
    assert_eq!(
        ps.render_surface(CsgMode::Normal, true),
        ps.render_surface(CsgMode::Normal, true)
    );
    assert_eq!(ps.render_edges(CsgMode::Normal), ps.render_edges(CsgMode::Normal));
}
