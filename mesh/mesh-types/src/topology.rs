//! Element tables and adjacency derivation.

use mesh_attributes::{AttributeDomain, ElementTopology};
use tracing::error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Edge, Face, FaceCorner, TopologyError, TopologyResult, Vertex};

/// The four element tables of a triangle mesh.
///
/// Faces, edges and corners reference each other by `u32` index. The
/// vertex incidence lists and face adjacency lists are derived data,
/// rebuilt by [`fill_adjacency`](Self::fill_adjacency).
///
/// # Example
///
/// ```
/// use mesh_types::{Edge, Face, FaceCorner, Topology, Vertex};
///
/// let mut topology = Topology::from_tables(
///     vec![Vertex::default(); 3],
///     vec![Edge::new(0, 1, 0), Edge::new(1, 2, 0), Edge::new(2, 0, 0)],
///     vec![Face::new([0, 1, 2], [0, 1, 2], [0, 1, 2])],
///     vec![
///         FaceCorner { face: 0, vert: 0 },
///         FaceCorner { face: 0, vert: 1 },
///         FaceCorner { face: 0, vert: 2 },
///     ],
/// );
/// topology.fill_adjacency();
///
/// assert_eq!(topology.vertices()[1].edges, vec![0, 1]);
/// assert!(topology.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Topology {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    faces: Vec<Face>,
    face_corners: Vec<FaceCorner>,
}

impl Topology {
    /// Empty tables.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
            face_corners: Vec::new(),
        }
    }

    /// Tables from parts. Adjacency is not derived; call
    /// [`fill_adjacency`](Self::fill_adjacency) afterwards.
    #[must_use]
    pub const fn from_tables(
        vertices: Vec<Vertex>,
        edges: Vec<Edge>,
        faces: Vec<Face>,
        face_corners: Vec<FaceCorner>,
    ) -> Self {
        Self {
            vertices,
            edges,
            faces,
            face_corners,
        }
    }

    /// The vertex table.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// The edge table.
    #[inline]
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The face table.
    #[inline]
    #[must_use]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// The face-corner table.
    #[inline]
    #[must_use]
    pub fn face_corners(&self) -> &[FaceCorner] {
        &self.face_corners
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of face corners.
    #[inline]
    #[must_use]
    pub fn face_corner_count(&self) -> usize {
        self.face_corners.len()
    }

    /// Whether the tables hold no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Split into the four tables.
    #[must_use]
    pub fn into_tables(self) -> (Vec<Vertex>, Vec<Edge>, Vec<Face>, Vec<FaceCorner>) {
        (self.vertices, self.edges, self.faces, self.face_corners)
    }

    /// Append `other`'s tables, offsetting every index it holds.
    ///
    /// Adjacency of the result is not derived.
    pub fn append(&mut self, other: &Self) {
        let v = index_len(self.vertices.len());
        let e = index_len(self.edges.len());
        let f = index_len(self.faces.len());
        let c = index_len(self.face_corners.len());

        self.vertices
            .extend(other.vertices.iter().map(|_| Vertex::default()));
        self.edges.extend(other.edges.iter().map(|edge| Edge {
            vert_a: edge.vert_a + v,
            vert_b: edge.vert_b + v,
            face_a: edge.face_a + f,
            face_b: edge.face_b.map(|b| b + f),
        }));
        self.faces.extend(other.faces.iter().map(|face| {
            Face::new(
                face.vertices().map(|i| i + v),
                face.corners().map(|i| i + c),
                face.edges().map(|i| i + e),
            )
        }));
        self.face_corners
            .extend(other.face_corners.iter().map(|corner| FaceCorner {
                face: corner.face + f,
                vert: corner.vert + v,
            }));
    }

    /// Rebuild every derived list.
    ///
    /// Vertex edge, face and corner lists are filled from the edge, face and
    /// corner tables; each face's adjacent faces are the faces on either
    /// side of its three edges, minus itself. All lists come out sorted and
    /// duplicate-free.
    pub fn fill_adjacency(&mut self) {
        for vertex in &mut self.vertices {
            vertex.edges.clear();
            vertex.faces.clear();
            vertex.face_corners.clear();
        }

        for (i, edge) in self.edges.iter().enumerate() {
            let i = index_len(i);
            for v in edge.vertices() {
                if let Some(vertex) = self.vertices.get_mut(v as usize) {
                    push_unique(&mut vertex.edges, i);
                }
            }
        }
        for (i, face) in self.faces.iter().enumerate() {
            let i = index_len(i);
            for v in face.vertices() {
                if let Some(vertex) = self.vertices.get_mut(v as usize) {
                    push_unique(&mut vertex.faces, i);
                }
            }
        }
        for (i, corner) in self.face_corners.iter().enumerate() {
            if let Some(vertex) = self.vertices.get_mut(corner.vert as usize) {
                push_unique(&mut vertex.face_corners, index_len(i));
            }
        }

        let edges = &self.edges;
        for (i, face) in self.faces.iter_mut().enumerate() {
            let i = index_len(i);
            let mut adjacent: Vec<u32> = face
                .edges()
                .iter()
                .filter_map(|&e| edges.get(e as usize))
                .flat_map(|edge| std::iter::once(edge.face_a).chain(edge.face_b))
                .filter(|&other| other != i)
                .collect();
            adjacent.sort_unstable();
            adjacent.dedup();
            face.adjacent_faces = adjacent;
        }
    }

    /// Reassign every edge's face slots from the faces that list it.
    ///
    /// The first face (by index) listing an edge becomes `face_a`, the next
    /// different one `face_b`. Edges no face lists keep their slots.
    pub fn link_edge_faces(&mut self) {
        let mut linked = vec![false; self.edges.len()];
        for (f, face) in self.faces.iter().enumerate() {
            let f = index_len(f);
            for e in face.edges() {
                let Some(edge) = self.edges.get_mut(e as usize) else {
                    continue;
                };
                let seen = &mut linked[e as usize];
                if !*seen {
                    *seen = true;
                    edge.face_a = f;
                    edge.face_b = None;
                } else if edge.face_a != f && edge.face_b.is_none() {
                    edge.face_b = Some(f);
                }
            }
        }
    }

    /// Check every cross reference.
    ///
    /// Each violation is logged at `error!` level; the first one is returned.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::IndexOutOfRange`] for a dangling index,
    /// [`TopologyError::EdgeNotLinked`] when a face lists an edge that does
    /// not border it, or [`TopologyError::EdgeOffFace`] when a listed edge
    /// does not join two of the face's vertices. The order of a face's edge
    /// list is not checked.
    pub fn validate(&self) -> TopologyResult<()> {
        let mut first: Option<TopologyError> = None;
        let mut report = |err: TopologyError| {
            error!(%err, "topology integrity violation");
            first.get_or_insert(err);
        };

        let nv = self.vertices.len();
        let ne = self.edges.len();
        let nf = self.faces.len();
        let nc = self.face_corners.len();

        for (i, edge) in self.edges.iter().enumerate() {
            check(&mut report, "edge", i, "vert_a", edge.vert_a, nv);
            check(&mut report, "edge", i, "vert_b", edge.vert_b, nv);
            check(&mut report, "edge", i, "face_a", edge.face_a, nf);
            if let Some(b) = edge.face_b {
                check(&mut report, "edge", i, "face_b", b, nf);
            }
        }

        for (i, face) in self.faces.iter().enumerate() {
            let [va, vb, vc] = face.vertices();
            check(&mut report, "face", i, "vert_a", va, nv);
            check(&mut report, "face", i, "vert_b", vb, nv);
            check(&mut report, "face", i, "vert_c", vc, nv);
            let [ca, cb, cc] = face.corners();
            check(&mut report, "face", i, "face_corner_a", ca, nc);
            check(&mut report, "face", i, "face_corner_b", cb, nc);
            check(&mut report, "face", i, "face_corner_c", cc, nc);
            for (field, e) in ["edge_a", "edge_b", "edge_c"].into_iter().zip(face.edges()) {
                check(&mut report, "face", i, field, e, ne);
                if let Some(edge) = self.edges.get(e as usize) {
                    if !edge.borders(index_len(i)) {
                        report(TopologyError::EdgeNotLinked { face: i, edge: e });
                    }
                    let verts = face.vertices();
                    if !verts.contains(&edge.vert_a) || !verts.contains(&edge.vert_b) {
                        report(TopologyError::EdgeOffFace { face: i, edge: e });
                    }
                }
            }
            for &adjacent in &face.adjacent_faces {
                check(&mut report, "face", i, "adjacent_faces", adjacent, nf);
            }
        }

        for (i, corner) in self.face_corners.iter().enumerate() {
            check(&mut report, "face_corner", i, "face", corner.face, nf);
            check(&mut report, "face_corner", i, "vert", corner.vert, nv);
        }

        for (i, vertex) in self.vertices.iter().enumerate() {
            for &e in &vertex.edges {
                check(&mut report, "vertex", i, "edges", e, ne);
            }
            for &f in &vertex.faces {
                check(&mut report, "vertex", i, "faces", f, nf);
            }
            for &c in &vertex.face_corners {
                check(&mut report, "vertex", i, "face_corners", c, nc);
            }
        }

        first.map_or(Ok(()), Err)
    }
}

fn check<F>(report: &mut F, element: &'static str, index: usize, field: &'static str, target: u32, len: usize)
where
    F: FnMut(TopologyError),
{
    if target as usize >= len {
        report(TopologyError::IndexOutOfRange {
            element,
            index,
            field,
            target,
            len,
        });
    }
}

fn push_unique(list: &mut Vec<u32>, value: u32) {
    if list.last() != Some(&value) {
        list.push(value);
    }
}

/// Table lengths are kept below `u32::MAX` by construction.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub(crate) const fn index_len(len: usize) -> u32 {
    len as u32
}

impl ElementTopology for Topology {
    fn element_count(&self, domain: AttributeDomain) -> usize {
        match domain {
            AttributeDomain::Vertex => self.vertices.len(),
            AttributeDomain::Edge => self.edges.len(),
            AttributeDomain::Face => self.faces.len(),
            AttributeDomain::FaceCorner => self.face_corners.len(),
        }
    }

    fn edge_vertices(&self, edge: u32) -> [u32; 2] {
        self.edges[edge as usize].vertices()
    }

    fn edge_faces(&self, edge: u32) -> (u32, Option<u32>) {
        let edge = &self.edges[edge as usize];
        (edge.face_a, edge.face_b)
    }

    fn face_vertices(&self, face: u32) -> [u32; 3] {
        self.faces[face as usize].vertices()
    }

    fn face_edges(&self, face: u32) -> [u32; 3] {
        self.faces[face as usize].edges()
    }

    fn face_corners(&self, face: u32) -> [u32; 3] {
        self.faces[face as usize].corners()
    }

    fn corner_vertex(&self, corner: u32) -> u32 {
        self.face_corners[corner as usize].vert
    }

    fn corner_face(&self, corner: u32) -> u32 {
        self.face_corners[corner as usize].face
    }

    fn vertex_edges(&self, vertex: u32) -> &[u32] {
        &self.vertices[vertex as usize].edges
    }

    fn vertex_faces(&self, vertex: u32) -> &[u32] {
        &self.vertices[vertex as usize].faces
    }

    fn vertex_face_corners(&self, vertex: u32) -> &[u32] {
        &self.vertices[vertex as usize].face_corners
    }
}
