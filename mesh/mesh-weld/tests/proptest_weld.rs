//! Property-based tests for import and welding.
//!
//! Soups are drawn on a small integer lattice so that coincident edges are
//! common.
//!
//! Run with: cargo test -p mesh-weld -- proptest

use mesh_weld::{MeshImport, WeldParams, import_mesh, import_mesh_with_summary, weld_mesh};
use nalgebra::Point3;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// A point on the 3x3x3 lattice.
fn arb_lattice_point() -> impl Strategy<Value = Point3<f64>> {
    prop::array::uniform3(0..3_i32)
        .prop_map(|[x, y, z]| Point3::new(f64::from(x), f64::from(y), f64::from(z)))
}

/// A soup of up to `max_triangles` triangles, each with its own vertices.
fn arb_soup(max_triangles: usize) -> impl Strategy<Value = Vec<[Point3<f64>; 3]>> {
    prop::collection::vec(prop::array::uniform3(arb_lattice_point()), 0..=max_triangles)
}

fn to_import(triangles: &[[Point3<f64>; 3]]) -> MeshImport {
    let positions: Vec<_> = triangles.iter().flatten().copied().collect();
    let indices = (0..u32::try_from(positions.len()).unwrap()).collect();
    MeshImport::new(positions).with_submesh(indices)
}

/// An n x n grid of unit squares, two triangles each, as a soup.
fn grid_soup(n: u32) -> MeshImport {
    let mut triangles = Vec::new();
    for i in 0..n {
        for j in 0..n {
            let (x, y) = (f64::from(i), f64::from(j));
            let p00 = Point3::new(x, y, 0.0);
            let p10 = Point3::new(x + 1.0, y, 0.0);
            let p11 = Point3::new(x + 1.0, y + 1.0, 0.0);
            let p01 = Point3::new(x, y + 1.0, 0.0);
            triangles.push([p00, p10, p11]);
            triangles.push([p00, p11, p01]);
        }
    }
    to_import(&triangles)
}

fn arb_angle() -> impl Strategy<Value = f64> {
    prop_oneof![Just(180.0), Just(179.99), Just(45.0), 0.0..180.0_f64]
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn proptest_import_is_consistent(triangles in arb_soup(12), angle in arb_angle()) {
        let import = to_import(&triangles);
        let (mesh, summary) = import_mesh_with_summary(&import, &WeldParams::smooth(angle)).unwrap();

        prop_assert!(mesh.validate().is_ok());
        prop_assert_eq!(mesh.face_count(), triangles.len());
        prop_assert_eq!(mesh.face_corner_count(), 3 * triangles.len());
        if !triangles.is_empty() {
            prop_assert_eq!(mesh.edge_count(), 3 * triangles.len() - summary.edges_welded);
            prop_assert_eq!(mesh.vertex_count(), import.positions.len() - summary.vertices_welded);
        }
    }

    #[test]
    fn proptest_welding_preserves_corner_positions(triangles in arb_soup(12), angle in arb_angle()) {
        let mesh = import_mesh(&to_import(&triangles), &WeldParams::smooth(angle)).unwrap();
        let positions = mesh.positions();
        for (face, tri) in mesh.topology().faces().iter().zip(&triangles) {
            for (v, expected) in face.vertices().into_iter().zip(tri) {
                prop_assert_eq!(positions[v as usize], expected.coords);
            }
        }
    }

    #[test]
    fn proptest_adjacency_has_no_duplicates(triangles in arb_soup(12)) {
        let mesh = import_mesh(&to_import(&triangles), &WeldParams::permissive()).unwrap();
        for (i, face) in mesh.topology().faces().iter().enumerate() {
            let mut sorted = face.adjacent_faces.clone();
            sorted.dedup();
            prop_assert_eq!(&sorted, &face.adjacent_faces);
            prop_assert!(!face.adjacent_faces.contains(&u32::try_from(i).unwrap()));
        }
        for vertex in mesh.topology().vertices() {
            let mut edges = vertex.edges.clone();
            edges.dedup();
            prop_assert_eq!(edges.len(), vertex.edges.len());
        }
    }

    #[test]
    fn proptest_rewelding_is_idempotent(triangles in arb_soup(10), angle in arb_angle()) {
        let params = WeldParams::smooth(angle);
        let first = import_mesh(&to_import(&triangles), &params).unwrap();
        let (second, summary) = weld_mesh(&first, &params).unwrap();

        prop_assert!(!summary.had_changes());
        prop_assert_eq!(second, first);
    }

    #[test]
    fn proptest_grid_welds_to_shared_lattice(n in 1_u32..6) {
        let mesh = import_mesh(&grid_soup(n), &WeldParams::default()).unwrap();
        let n = n as usize;
        prop_assert_eq!(mesh.vertex_count(), (n + 1) * (n + 1));
        prop_assert_eq!(mesh.face_count(), 2 * n * n);
        // n(n+1) horizontal, n(n+1) vertical, n^2 diagonals
        prop_assert_eq!(mesh.edge_count(), 2 * n * (n + 1) + n * n);
        let boundary = mesh.topology().edges().iter().filter(|e| e.is_boundary()).count();
        prop_assert_eq!(boundary, 4 * n);
    }
}
