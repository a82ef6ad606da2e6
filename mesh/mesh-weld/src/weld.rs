//! Welding and the import entry points.

use mesh_types::{
    Attribute, AttributeDomain, AttributeStore, Edge, Face, FaceCorner, GeometryMesh, Topology,
    TopologyError, Vertex, builtin,
};
use nalgebra::Vector3;
use tracing::{debug, info};

use crate::build::{RawElements, build_elements};
use crate::duplicates::find_duplicate_edges;
use crate::union_find::UnionFind;
use crate::{MeshImport, WeldParams, WeldResult};

/// Counts describing one import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeldSummary {
    /// Number of positions in the import.
    pub initial_vertices: usize,
    /// Number of edges before welding (three per triangle).
    pub initial_edges: usize,
    /// Number of vertices after welding.
    pub final_vertices: usize,
    /// Number of edges after welding.
    pub final_edges: usize,
    /// Number of faces (welding never removes faces).
    pub faces: usize,
    /// Number of vertices merged into another.
    pub vertices_welded: usize,
    /// Number of edges merged into another.
    pub edges_welded: usize,
}

impl WeldSummary {
    /// Check if welding merged anything.
    #[must_use]
    pub const fn had_changes(&self) -> bool {
        self.vertices_welded > 0 || self.edges_welded > 0
    }
}

impl std::fmt::Display for WeldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Weld: {} verts ({} welded), {} edges ({} welded), {} faces",
            self.final_vertices,
            self.vertices_welded,
            self.final_edges,
            self.edges_welded,
            self.faces
        )
    }
}

/// Import a triangle soup: build elements, weld duplicates, derive
/// adjacency and fill the built-in attributes.
///
/// # Errors
///
/// Returns a [`WeldError`](crate::WeldError) if the import is malformed or
/// the welded tables fail the integrity check.
///
/// # Example
///
/// ```
/// use mesh_weld::{MeshImport, WeldParams, import_mesh};
/// use nalgebra::Point3;
///
/// // Two triangles authored separately, sharing the diagonal of a square.
/// let import = MeshImport::new(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ])
/// .with_submesh(vec![0, 1, 2, 3, 4, 5]);
///
/// let mesh = import_mesh(&import, &WeldParams::permissive())?;
/// assert_eq!(mesh.vertex_count(), 4);
/// assert_eq!(mesh.edge_count(), 5);
/// assert_eq!(mesh.face_count(), 2);
/// # Ok::<(), mesh_weld::WeldError>(())
/// ```
pub fn import_mesh(import: &MeshImport, params: &WeldParams) -> WeldResult<GeometryMesh> {
    import_mesh_with_summary(import, params).map(|(mesh, _)| mesh)
}

/// As [`import_mesh`], also returning what welding did.
///
/// A soup with no triangles yields [`GeometryMesh::empty`].
///
/// # Errors
///
/// See [`import_mesh`].
pub fn import_mesh_with_summary(
    import: &MeshImport,
    params: &WeldParams,
) -> WeldResult<(GeometryMesh, WeldSummary)> {
    import.validate()?;
    if import.triangle_count() == 0 {
        debug!("import has no triangles");
        return Ok((GeometryMesh::empty(), WeldSummary::default()));
    }

    let raw = build_elements(import, params);
    let submesh_count = u32::try_from(import.submeshes.len()).unwrap_or(u32::MAX);
    let (mesh, summary) = weld(raw, params, submesh_count)?;

    info!(
        vertices_welded = summary.vertices_welded,
        edges_welded = summary.edges_welded,
        vertices = summary.final_vertices,
        edges = summary.final_edges,
        faces = summary.faces,
        "welded imported mesh"
    );
    Ok((mesh, summary))
}

/// Run welding again over an existing mesh.
///
/// Boundary edges of `mesh` are matched the same way an import's edges
/// are, using the stored face normals. Edges that already border two faces
/// are left alone. Every attribute is carried over: a merged vertex keeps
/// the values of the lowest-indexed vertex of its group, an absorbed edge
/// is dropped with its values, and face and corner values are untouched.
///
/// Re-welding a mesh that came out of [`import_mesh`] with the same
/// parameters returns an identical mesh.
///
/// # Errors
///
/// Returns a [`WeldError`](crate::WeldError) if the welded tables fail the
/// integrity check.
///
/// # Example
///
/// ```
/// use mesh_weld::{MeshImport, WeldParams, import_mesh, weld_mesh};
/// use nalgebra::Point3;
///
/// let import = MeshImport::new(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ])
/// .with_submesh(vec![0, 1, 2]);
/// let mesh = import_mesh(&import, &WeldParams::default())?;
///
/// let (again, summary) = weld_mesh(&mesh, &WeldParams::default())?;
/// assert!(!summary.had_changes());
/// assert_eq!(again, mesh);
/// # Ok::<(), mesh_weld::WeldError>(())
/// ```
pub fn weld_mesh(mesh: &GeometryMesh, params: &WeldParams) -> WeldResult<(GeometryMesh, WeldSummary)> {
    let face_normals = mesh
        .attribute_values::<Vector3<f64>>(builtin::NORMAL, AttributeDomain::Face)
        .map_err(TopologyError::from)?;
    let (_, edges, faces, corners) = mesh.topology().clone().into_tables();
    let welded = weld_tables(mesh.positions(), edges, faces, corners, &face_normals, params);

    let mut attributes = AttributeStore::new();
    for attribute in mesh.attributes().iter() {
        let data = match attribute.domain() {
            AttributeDomain::Vertex => attribute.data().select(&welded.vertex_sources),
            AttributeDomain::Edge => attribute.data().select(&welded.edge_sources),
            AttributeDomain::Face | AttributeDomain::FaceCorner => attribute.data().clone(),
        };
        attributes.insert(Attribute::new(attribute.name(), attribute.domain(), data));
    }

    let summary = welded.summary.clone();
    let out = GeometryMesh::from_parts(welded.into_topology(), attributes, mesh.submesh_count())?;

    info!(
        vertices_welded = summary.vertices_welded,
        edges_welded = summary.edges_welded,
        vertices = summary.final_vertices,
        edges = summary.final_edges,
        faces = summary.faces,
        "rewelded mesh"
    );
    Ok((out, summary))
}

/// Element tables after welding, with the input element each survivor
/// takes its values from.
struct Welded {
    edges: Vec<Edge>,
    faces: Vec<Face>,
    corners: Vec<FaceCorner>,
    /// Per output vertex, the lowest input vertex of its group.
    vertex_sources: Vec<usize>,
    /// Per output edge, the input edge kept for it.
    edge_sources: Vec<usize>,
    summary: WeldSummary,
}

impl Welded {
    fn into_topology(self) -> Topology {
        Topology::from_tables(
            vec![Vertex::default(); self.vertex_sources.len()],
            self.edges,
            self.faces,
            self.corners,
        )
    }
}

/// Confirm duplicate edges, merge their vertices and renumber densely.
#[allow(clippy::cast_possible_truncation)]
fn weld_tables(
    positions: &[Vector3<f64>],
    mut edges: Vec<Edge>,
    mut faces: Vec<Face>,
    mut corners: Vec<FaceCorner>,
    face_normals: &[Vector3<f64>],
    params: &WeldParams,
) -> Welded {
    let duplicates = find_duplicate_edges(
        positions,
        &mut edges,
        face_normals,
        params.normal_angle_threshold_deg,
    );

    let mut sets = UnionFind::new(positions.len());
    for duplicate in &duplicates {
        for (a, b) in duplicate.vertex_pairs(&edges) {
            sets.union(a, b);
        }
    }

    // Roots are the lowest index of their set, so they are numbered before
    // any member refers to them.
    let mut vertex_remap = vec![0_u32; positions.len()];
    let mut vertex_sources = Vec::new();
    for v in 0..positions.len() {
        let root = sets.find(v as u32) as usize;
        if root == v {
            vertex_remap[v] = vertex_sources.len() as u32;
            vertex_sources.push(v);
        } else {
            vertex_remap[v] = vertex_remap[root];
        }
    }

    // A kept edge always precedes the edge it absorbs.
    let mut absorbed_by: Vec<Option<u32>> = vec![None; edges.len()];
    for duplicate in &duplicates {
        absorbed_by[duplicate.remove as usize] = Some(duplicate.keep);
    }
    let mut edge_remap = vec![0_u32; edges.len()];
    let mut kept: Vec<Edge> = Vec::with_capacity(edges.len() - duplicates.len());
    let mut edge_sources = Vec::with_capacity(kept.capacity());
    for (e, edge) in edges.iter().enumerate() {
        match absorbed_by[e] {
            Some(keep) => edge_remap[e] = edge_remap[keep as usize],
            None => {
                edge_remap[e] = kept.len() as u32;
                edge_sources.push(e);
                kept.push(Edge {
                    vert_a: vertex_remap[edge.vert_a as usize],
                    vert_b: vertex_remap[edge.vert_b as usize],
                    ..*edge
                });
            }
        }
    }

    for face in &mut faces {
        face.vert_a = vertex_remap[face.vert_a as usize];
        face.vert_b = vertex_remap[face.vert_b as usize];
        face.vert_c = vertex_remap[face.vert_c as usize];
        face.edge_a = edge_remap[face.edge_a as usize];
        face.edge_b = edge_remap[face.edge_b as usize];
        face.edge_c = edge_remap[face.edge_c as usize];
    }
    for corner in &mut corners {
        corner.vert = vertex_remap[corner.vert as usize];
    }

    let summary = WeldSummary {
        initial_vertices: positions.len(),
        initial_edges: edges.len(),
        final_vertices: vertex_sources.len(),
        final_edges: kept.len(),
        faces: faces.len(),
        vertices_welded: positions.len() - vertex_sources.len(),
        edges_welded: duplicates.len(),
    };
    debug!(
        vertices = summary.final_vertices,
        edges = summary.final_edges,
        "welded element tables"
    );

    Welded {
        edges: kept,
        faces,
        corners,
        vertex_sources,
        edge_sources,
        summary,
    }
}

/// Weld freshly built elements and attach the built-in attributes.
fn weld(
    raw: RawElements,
    params: &WeldParams,
    submesh_count: u32,
) -> WeldResult<(GeometryMesh, WeldSummary)> {
    let welded = weld_tables(
        &raw.positions,
        raw.edges,
        raw.faces,
        raw.corners,
        &raw.face_normals,
        params,
    );

    let positions: Vec<_> = welded
        .vertex_sources
        .iter()
        .map(|&v| raw.positions[v])
        .collect();
    let mut attributes = AttributeStore::new();
    attributes.insert(Attribute::from_values(
        builtin::POSITION,
        AttributeDomain::Vertex,
        positions,
    ));
    attributes.insert(Attribute::from_values(
        builtin::NORMAL,
        AttributeDomain::Face,
        raw.face_normals,
    ));
    attributes.insert(Attribute::from_values(
        builtin::MATERIAL_INDEX,
        AttributeDomain::Face,
        raw.materials,
    ));
    attributes.insert(Attribute::from_values(
        builtin::SHADE_SMOOTH,
        AttributeDomain::Face,
        raw.shade_smooth,
    ));
    if let Some(uvs) = raw.corner_uvs {
        attributes.insert(Attribute::from_values(
            builtin::UV,
            AttributeDomain::FaceCorner,
            uvs,
        ));
    }

    let summary = welded.summary.clone();
    let mesh = GeometryMesh::from_parts(welded.into_topology(), attributes, submesh_count)?;
    Ok((mesh, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector2, Vector3};

    fn unit_triangle() -> MeshImport {
        MeshImport::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ])
        .with_submesh(vec![0, 1, 2])
    }

    /// Two triangles of the unit square, authored with separate vertices.
    fn quad_soup() -> MeshImport {
        MeshImport::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ])
        .with_submesh(vec![0, 1, 2, 3, 4, 5])
    }

    /// The square folded 90 degrees along its diagonal.
    fn folded_soup() -> MeshImport {
        let mut import = quad_soup();
        import.positions[5] = Point3::new(0.5, 0.5, 1.0);
        import
    }

    /// A unit cube, every triangle with its own three vertices.
    fn cube_soup() -> MeshImport {
        let corners = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
            [0.0, 1.0, 1.0],
        ];
        let faces: [[usize; 3]; 12] = [
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            [0, 1, 5],
            [0, 5, 4],
            [2, 3, 7],
            [2, 7, 6],
            [0, 4, 7],
            [0, 7, 3],
            [1, 2, 6],
            [1, 6, 5],
        ];
        let positions = faces
            .iter()
            .flatten()
            .map(|&c| Point3::from(corners[c]))
            .collect();
        MeshImport::new(positions).with_submesh((0..36).collect())
    }

    #[test]
    fn unit_triangle_is_a_boundary_face() {
        let mesh = import_mesh(&unit_triangle(), &WeldParams::permissive()).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.edge_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.face_corner_count(), 3);
        assert!(mesh.topology().faces()[0].adjacent_faces.is_empty());
        assert!(mesh.topology().edges().iter().all(Edge::is_boundary));
        assert_eq!(mesh.submesh_count(), 1);
    }

    #[test]
    fn quad_shares_its_diagonal() {
        let (mesh, summary) =
            import_mesh_with_summary(&quad_soup(), &WeldParams::permissive()).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.edge_count(), 5);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(summary.vertices_welded, 2);
        assert_eq!(summary.edges_welded, 1);
        assert!(summary.had_changes());

        let shared: Vec<_> = mesh
            .topology()
            .edges()
            .iter()
            .filter(|e| !e.is_boundary())
            .collect();
        assert_eq!(shared.len(), 1);
        assert_eq!((shared[0].face_a, shared[0].face_b), (0, Some(1)));
        assert_eq!(mesh.topology().faces()[0].adjacent_faces, vec![1]);
        assert_eq!(mesh.topology().faces()[1].adjacent_faces, vec![0]);
    }

    #[test]
    fn weld_keeps_lowest_vertex_and_dense_indices() {
        let mesh = import_mesh(&quad_soup(), &WeldParams::permissive()).unwrap();
        // Positions 3 and 4 fold into 0 and 2; 5 becomes 3.
        assert_eq!(mesh.topology().faces()[1].vertices(), [0, 2, 3]);
        assert_relative_eq!(mesh.positions()[3], Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(mesh.topology().face_corners()[5].vert, 3);
    }

    #[test]
    fn sharp_fold_stays_split_under_smooth_threshold() {
        let mesh = import_mesh(&folded_soup(), &WeldParams::smooth(45.0)).unwrap();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.edge_count(), 6);

        let mesh = import_mesh(&folded_soup(), &WeldParams::default()).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.edge_count(), 5);
    }

    #[test]
    fn closed_cube_welds_fully() {
        let mesh = import_mesh(&cube_soup(), &WeldParams::default()).unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.edge_count(), 18);
        assert_eq!(mesh.face_count(), 12);
        assert!(mesh.topology().edges().iter().all(|e| !e.is_boundary()));
        assert!(
            mesh.topology()
                .faces()
                .iter()
                .all(|f| f.adjacent_faces.len() == 3)
        );
    }

    #[test]
    fn cube_with_smooth_threshold_splits_sides() {
        let mesh = import_mesh(&cube_soup(), &WeldParams::smooth(30.0)).unwrap();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.edge_count(), 30);
        assert_eq!(mesh.topology().faces()[0].adjacent_faces, vec![1]);
    }

    #[test]
    fn disjoint_triangles_pass_through() {
        let mut import = unit_triangle();
        import.positions.extend([
            Point3::new(5.0, 0.0, 0.0),
            Point3::new(6.0, 0.0, 0.0),
            Point3::new(5.0, 1.0, 0.0),
        ]);
        import.submeshes[0].extend([3, 4, 5]);
        let (mesh, summary) = import_mesh_with_summary(&import, &WeldParams::permissive()).unwrap();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.edge_count(), 6);
        assert!(!summary.had_changes());
        assert_eq!(mesh.topology().faces()[1].vertices(), [3, 4, 5]);
    }

    #[test]
    fn empty_import_is_the_empty_mesh() {
        let mesh = import_mesh(&MeshImport::default(), &WeldParams::default()).unwrap();
        assert!(mesh.is_empty());
        let mesh = import_mesh(
            &MeshImport::new(vec![Point3::origin()]).with_submesh(Vec::new()),
            &WeldParams::default(),
        )
        .unwrap();
        assert_eq!(mesh, GeometryMesh::empty());
    }

    #[test]
    fn builtins_are_filled() {
        let uvs = vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(0.0, 1.0),
        ];
        let import = unit_triangle()
            .with_submesh(vec![2, 1, 0])
            .with_uvs(uvs);
        let mesh = import_mesh(&import, &WeldParams::default()).unwrap();

        let materials = mesh
            .attribute_values::<i32>(builtin::MATERIAL_INDEX, AttributeDomain::Face)
            .unwrap();
        assert_eq!(materials, vec![0, 1]);
        assert_eq!(mesh.submesh_count(), 2);

        let uv = mesh
            .attribute_values::<Vector2<f64>>(builtin::UV, AttributeDomain::FaceCorner)
            .unwrap();
        assert_eq!(uv.len(), 6);
        assert_relative_eq!(uv[3], Vector2::new(0.0, 1.0));

        let normals = mesh
            .attribute_values::<Vector3<f64>>(builtin::NORMAL, AttributeDomain::Face)
            .unwrap();
        assert_relative_eq!(normals[0], Vector3::z());
        assert_relative_eq!(normals[1], -Vector3::z());

        let crease = mesh.attribute(builtin::CREASE).unwrap();
        assert_eq!(crease.len(), mesh.element_count(AttributeDomain::Edge));
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn rewelding_is_a_no_op() {
        for params in [WeldParams::smooth(30.0), WeldParams::default()] {
            let first = import_mesh(&cube_soup(), &params).unwrap();
            let (second, summary) = weld_mesh(&first, &params).unwrap();
            assert!(!summary.had_changes());
            assert_eq!(second, first);
        }
    }

    #[test]
    fn rewelding_keeps_every_attribute() {
        let uvs = vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(1.0, 1.0),
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 1.0),
            Vector2::new(0.0, 1.0),
        ];
        let mut first = import_mesh(&quad_soup().with_uvs(uvs), &WeldParams::default()).unwrap();
        first
            .store_attribute(Attribute::from_values(
                "temp",
                AttributeDomain::Face,
                vec![20.5_f64, 21.0],
            ))
            .unwrap();

        let (second, _) = weld_mesh(&first, &WeldParams::default()).unwrap();
        assert_eq!(second, first);
        let uv = second
            .attribute_values::<Vector2<f64>>(builtin::UV, AttributeDomain::FaceCorner)
            .unwrap();
        assert_relative_eq!(uv[2], Vector2::new(1.0, 1.0));
        assert_relative_eq!(uv[5], Vector2::new(0.0, 1.0));
        assert_eq!(
            second
                .attribute_values::<f64>("temp", AttributeDomain::Face)
                .unwrap(),
            vec![20.5, 21.0]
        );
    }

    #[test]
    fn rewelding_merged_pieces_carries_attributes() {
        // The two halves of the square, imported separately and merged
        // without welding.
        let lower = MeshImport::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ])
        .with_submesh(vec![0, 1, 2]);
        let upper = MeshImport::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ])
        .with_submesh(vec![0, 1, 2]);
        let mut mesh = import_mesh(&lower, &WeldParams::default())
            .unwrap()
            .merged(&import_mesh(&upper, &WeldParams::default()).unwrap())
            .unwrap();
        mesh.store_attribute(Attribute::from_values(
            "id",
            AttributeDomain::Vertex,
            vec![10_i32, 11, 12, 13, 14, 15],
        ))
        .unwrap();
        mesh.store_attribute(Attribute::from_values(
            "seam",
            AttributeDomain::Edge,
            vec![0_i32, 1, 2, 3, 4, 5],
        ))
        .unwrap();

        let (welded, summary) = weld_mesh(&mesh, &WeldParams::default()).unwrap();
        assert_eq!(summary.vertices_welded, 2);
        assert_eq!(summary.edges_welded, 1);
        assert_eq!(welded.vertex_count(), 4);
        assert_eq!(welded.edge_count(), 5);
        assert_eq!(welded.submesh_count(), 2);
        assert_eq!(welded.topology().faces()[0].adjacent_faces, vec![1]);

        // Vertices 3 and 4 fold into 0 and 2; edge 3 (upper 0-2) into edge 2.
        let id = welded
            .attribute_values::<i32>("id", AttributeDomain::Vertex)
            .unwrap();
        assert_eq!(id, vec![10, 11, 12, 15]);
        let seam = welded
            .attribute_values::<i32>("seam", AttributeDomain::Edge)
            .unwrap();
        assert_eq!(seam, vec![0, 1, 2, 4, 5]);
        let materials = welded
            .attribute_values::<i32>(builtin::MATERIAL_INDEX, AttributeDomain::Face)
            .unwrap();
        assert_eq!(materials, vec![0, 1]);
        assert!(welded.validate().is_ok());
    }

    #[test]
    fn summary_display() {
        let (_, summary) = import_mesh_with_summary(&quad_soup(), &WeldParams::default()).unwrap();
        assert_eq!(
            format!("{summary}"),
            "Weld: 4 verts (2 welded), 5 edges (1 welded), 2 faces"
        );
    }
}
