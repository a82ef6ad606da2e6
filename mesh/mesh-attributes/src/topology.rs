//! The element relations domain conversion needs.

use crate::AttributeDomain;

/// Read access to a triangle mesh's element relations.
///
/// Domain conversion only needs these lookups, so the attribute crate stays
/// independent of the concrete element tables. Index arguments are element
/// indices in their own domain; implementations may panic on out-of-range
/// indices, callers iterate `0..element_count(domain)`.
pub trait ElementTopology {
    /// Number of elements in a domain.
    fn element_count(&self, domain: AttributeDomain) -> usize;

    /// The two endpoint vertices of an edge.
    fn edge_vertices(&self, edge: u32) -> [u32; 2];

    /// The face(s) an edge borders. The second is `None` on boundary edges.
    fn edge_faces(&self, edge: u32) -> (u32, Option<u32>);

    /// The three vertices of a face.
    fn face_vertices(&self, face: u32) -> [u32; 3];

    /// The three edges of a face.
    fn face_edges(&self, face: u32) -> [u32; 3];

    /// The three corners of a face.
    fn face_corners(&self, face: u32) -> [u32; 3];

    /// The vertex a corner sits on.
    fn corner_vertex(&self, corner: u32) -> u32;

    /// The face a corner belongs to.
    fn corner_face(&self, corner: u32) -> u32;

    /// Edges incident to a vertex.
    fn vertex_edges(&self, vertex: u32) -> &[u32];

    /// Faces incident to a vertex.
    fn vertex_faces(&self, vertex: u32) -> &[u32];

    /// Face corners sitting on a vertex.
    fn vertex_face_corners(&self, vertex: u32) -> &[u32];
}
