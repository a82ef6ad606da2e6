//! Element construction from a triangle soup.
//!
//! Every triangle becomes one face with three fresh edges and three fresh
//! corners. Nothing is shared yet; welding happens afterwards.

use mesh_types::{Edge, Face, FaceCorner, Triangle};
use nalgebra::{Vector2, Vector3};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{MeshImport, WeldParams};

/// Unwelded element tables plus the per-face and per-corner data computed
/// while building them.
#[derive(Debug, Clone)]
pub(crate) struct RawElements {
    pub positions: Vec<Vector3<f64>>,
    pub edges: Vec<Edge>,
    pub faces: Vec<Face>,
    pub corners: Vec<FaceCorner>,
    pub face_normals: Vec<Vector3<f64>>,
    pub materials: Vec<i32>,
    pub shade_smooth: Vec<bool>,
    pub corner_uvs: Option<Vec<Vector2<f64>>>,
}

/// Build one face, three edges and three corners per triangle.
///
/// `import` must already be validated.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn build_elements(import: &MeshImport, params: &WeldParams) -> RawElements {
    let positions: Vec<Vector3<f64>> = import.positions.iter().map(|p| p.coords).collect();

    let triangles: Vec<([u32; 3], i32)> = import
        .submeshes
        .iter()
        .enumerate()
        .flat_map(|(submesh, indices)| {
            let material = i32::try_from(submesh).unwrap_or(i32::MAX);
            indices
                .chunks_exact(3)
                .map(move |t| ([t[0], t[1], t[2]], material))
        })
        .collect();

    let face_normals: Vec<Vector3<f64>> = triangles
        .par_iter()
        .map(|([a, b, c], _)| {
            Triangle::from_vectors(
                positions[*a as usize],
                positions[*b as usize],
                positions[*c as usize],
            )
            .normal()
        })
        .collect();

    let shade_smooth = match &import.normals {
        Some(normals) => triangles
            .par_iter()
            .zip(face_normals.par_iter())
            .map(|(([a, b, c], _), computed)| {
                let authored =
                    (normals[*a as usize] + normals[*b as usize] + normals[*c as usize]) / 3.0;
                (computed - authored).norm_squared() > params.smooth_normal_threshold_sq
            })
            .collect(),
        None => {
            warn!("import has no vertex normals, every face is flat shaded");
            vec![false; triangles.len()]
        }
    };

    if import.uvs.is_none() {
        warn!("import has no uvs, corners get (0, 0)");
    }

    let mut edges = Vec::with_capacity(triangles.len() * 3);
    let mut faces = Vec::with_capacity(triangles.len());
    let mut corners = Vec::with_capacity(triangles.len() * 3);
    let mut corner_uvs = import
        .uvs
        .as_ref()
        .map(|_| Vec::with_capacity(triangles.len() * 3));
    let mut materials = Vec::with_capacity(triangles.len());

    for (f, &([a, b, c], material)) in triangles.iter().enumerate() {
        let f = f as u32;
        let e = edges.len() as u32;
        let k = corners.len() as u32;

        faces.push(Face::new([a, b, c], [k, k + 1, k + 2], [e, e + 1, e + 2]));
        edges.extend([Edge::new(a, b, f), Edge::new(b, c, f), Edge::new(c, a, f)]);
        corners.extend([a, b, c].map(|vert| FaceCorner { face: f, vert }));
        materials.push(material);

        if let (Some(out), Some(uvs)) = (corner_uvs.as_mut(), import.uvs.as_ref()) {
            out.extend([a, b, c].map(|v| uvs[v as usize]));
        }
    }

    debug!(
        positions = positions.len(),
        faces = faces.len(),
        edges = edges.len(),
        "built unwelded elements"
    );

    RawElements {
        positions,
        edges,
        faces,
        corners,
        face_normals,
        materials,
        shade_smooth,
        corner_uvs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn quad_soup() -> MeshImport {
        MeshImport::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ])
        .with_submesh(vec![0, 1, 2])
        .with_submesh(vec![3, 4, 5])
    }

    #[test]
    fn one_face_three_edges_three_corners_per_triangle() {
        let raw = build_elements(&quad_soup(), &WeldParams::default());
        assert_eq!(raw.faces.len(), 2);
        assert_eq!(raw.edges.len(), 6);
        assert_eq!(raw.corners.len(), 6);
        assert_eq!(raw.faces[1].vertices(), [3, 4, 5]);
        assert_eq!(raw.faces[1].edges(), [3, 4, 5]);
        assert_eq!(raw.edges[5], Edge::new(5, 3, 1));
        assert!(raw.edges.iter().all(Edge::is_boundary));
        assert_eq!(raw.corners[4], FaceCorner { face: 1, vert: 4 });
    }

    #[test]
    fn material_is_submesh_index() {
        let raw = build_elements(&quad_soup(), &WeldParams::default());
        assert_eq!(raw.materials, vec![0, 1]);
    }

    #[test]
    fn face_normals_are_unit() {
        let raw = build_elements(&quad_soup(), &WeldParams::default());
        for n in &raw.face_normals {
            assert_relative_eq!(n.z, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn shade_smooth_compares_authored_normals() {
        let import = quad_soup();
        assert_eq!(
            build_elements(&import, &WeldParams::default()).shade_smooth,
            vec![false, false]
        );

        let mut normals = vec![Vector3::z(); 6];
        normals[4] = Vector3::new(1.0, 0.0, 1.0).normalize();
        let raw = build_elements(&import.with_normals(normals), &WeldParams::default());
        assert_eq!(raw.shade_smooth, vec![false, true]);
    }

    #[test]
    fn uvs_are_spread_per_corner() {
        let uvs = (0..6).map(|i| Vector2::new(f64::from(i), 0.0)).collect();
        let raw = build_elements(&quad_soup().with_uvs(uvs), &WeldParams::default());
        let corner_uvs = raw.corner_uvs.unwrap();
        assert_eq!(corner_uvs.len(), 6);
        assert_relative_eq!(corner_uvs[5].x, 5.0);
    }
}
