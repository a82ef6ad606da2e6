//! Element records of the topology tables.
//!
//! All cross references are `u32` indices into the sibling tables of a
//! [`Topology`](crate::Topology).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A vertex and its derived incidence lists.
///
/// Positions live in the `position` attribute, not here. The lists are
/// filled by [`Topology::fill_adjacency`](crate::Topology::fill_adjacency)
/// and hold no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// Edges with this vertex as an endpoint.
    pub edges: Vec<u32>,
    /// Faces with this vertex as a corner.
    pub faces: Vec<u32>,
    /// Face corners sitting on this vertex.
    pub face_corners: Vec<u32>,
}

/// An undirected edge between two vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    /// First endpoint.
    pub vert_a: u32,
    /// Second endpoint.
    pub vert_b: u32,
    /// The face this edge was created for.
    pub face_a: u32,
    /// The face on the other side, if any. `None` marks a boundary edge.
    pub face_b: Option<u32>,
}

impl Edge {
    /// A boundary edge owned by `face`.
    #[inline]
    #[must_use]
    pub const fn new(vert_a: u32, vert_b: u32, face: u32) -> Self {
        Self {
            vert_a,
            vert_b,
            face_a: face,
            face_b: None,
        }
    }

    /// Both endpoints.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [u32; 2] {
        [self.vert_a, self.vert_b]
    }

    /// Whether `vertex` is an endpoint.
    #[inline]
    #[must_use]
    pub const fn has_vertex(&self, vertex: u32) -> bool {
        self.vert_a == vertex || self.vert_b == vertex
    }

    /// Whether `face` is on either side.
    #[inline]
    #[must_use]
    pub fn borders(&self, face: u32) -> bool {
        self.face_a == face || self.face_b == Some(face)
    }

    /// Whether only one face borders this edge.
    #[inline]
    #[must_use]
    pub const fn is_boundary(&self) -> bool {
        self.face_b.is_none()
    }
}

/// A triangle with its vertex, corner and edge references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Face {
    /// First vertex.
    pub vert_a: u32,
    /// Second vertex.
    pub vert_b: u32,
    /// Third vertex.
    pub vert_c: u32,
    /// Corner on `vert_a`.
    pub face_corner_a: u32,
    /// Corner on `vert_b`.
    pub face_corner_b: u32,
    /// Corner on `vert_c`.
    pub face_corner_c: u32,
    /// Edge `vert_a`-`vert_b`.
    pub edge_a: u32,
    /// Edge `vert_b`-`vert_c`.
    pub edge_b: u32,
    /// Edge `vert_c`-`vert_a`.
    pub edge_c: u32,
    /// Faces sharing an edge with this one (self excluded).
    pub adjacent_faces: Vec<u32>,
}

impl Face {
    /// A face from its vertices, corners and edges, with no adjacency yet.
    #[must_use]
    pub const fn new(vertices: [u32; 3], corners: [u32; 3], edges: [u32; 3]) -> Self {
        Self {
            vert_a: vertices[0],
            vert_b: vertices[1],
            vert_c: vertices[2],
            face_corner_a: corners[0],
            face_corner_b: corners[1],
            face_corner_c: corners[2],
            edge_a: edges[0],
            edge_b: edges[1],
            edge_c: edges[2],
            adjacent_faces: Vec::new(),
        }
    }

    /// The three vertices, in winding order.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [u32; 3] {
        [self.vert_a, self.vert_b, self.vert_c]
    }

    /// The three corners.
    #[inline]
    #[must_use]
    pub const fn corners(&self) -> [u32; 3] {
        [self.face_corner_a, self.face_corner_b, self.face_corner_c]
    }

    /// The three edges.
    #[inline]
    #[must_use]
    pub const fn edges(&self) -> [u32; 3] {
        [self.edge_a, self.edge_b, self.edge_c]
    }
}

/// One corner of one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaceCorner {
    /// Owning face.
    pub face: u32,
    /// Vertex the corner sits on.
    pub vert: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_queries() {
        let mut edge = Edge::new(3, 7, 0);
        assert!(edge.is_boundary());
        assert!(edge.has_vertex(7));
        assert!(!edge.has_vertex(1));
        edge.face_b = Some(4);
        assert!(edge.borders(4));
        assert!(edge.borders(0));
        assert!(!edge.borders(1));
        assert!(!edge.is_boundary());
    }

    #[test]
    fn face_accessors() {
        let face = Face::new([0, 1, 2], [3, 4, 5], [6, 7, 8]);
        assert_eq!(face.vertices(), [0, 1, 2]);
        assert_eq!(face.corners(), [3, 4, 5]);
        assert_eq!(face.edges(), [6, 7, 8]);
        assert!(face.adjacent_faces.is_empty());
    }
}
