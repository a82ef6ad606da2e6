//! Moving attribute values between element domains.
//!
//! Each target element resolves to a set of source elements through the
//! mesh's adjacency, and the values of that set are averaged with the kind's
//! [`Blend`](crate::Blend) operator:
//!
//! | from \ to   | Vertex            | Edge              | Face          | FaceCorner                |
//! |-------------|-------------------|-------------------|---------------|---------------------------|
//! | Vertex      | -                 | both endpoints    | three verts   | the corner's vertex       |
//! | Edge        | incident edges    | -                 | three edges   | edges at the corner's vertex |
//! | Face        | incident faces    | face A and face B | -             | the owning face           |
//! | FaceCorner  | corners on vertex | corners of the edge's faces on its endpoints | three corners | - |

use crate::{AttributeData, AttributeDomain, AttributeError, AttributeResult, ElementTopology};

/// Source element indices for every element of `to`.
///
/// `groups[i]` lists the `from`-domain elements that contribute to element
/// `i` of `to`. Converting a domain to itself yields singleton groups.
#[must_use]
pub fn source_groups<T>(topology: &T, from: AttributeDomain, to: AttributeDomain) -> Vec<Vec<usize>>
where
    T: ElementTopology + ?Sized,
{
    use AttributeDomain as D;

    let target_count = topology.element_count(to);

    (0..target_count)
        .map(|target| {
            #[allow(clippy::cast_possible_truncation)]
            let t = target as u32;
            match (from, to) {
                (D::Vertex, D::Vertex)
                | (D::Edge, D::Edge)
                | (D::Face, D::Face)
                | (D::FaceCorner, D::FaceCorner) => vec![target],

                (D::Vertex, D::Edge) => widen(&topology.edge_vertices(t)),
                (D::Vertex, D::Face) => widen(&topology.face_vertices(t)),
                (D::Vertex, D::FaceCorner) => vec![topology.corner_vertex(t) as usize],

                (D::Edge, D::Vertex) => widen(topology.vertex_edges(t)),
                (D::Edge, D::Face) => widen(&topology.face_edges(t)),
                (D::Edge, D::FaceCorner) => widen(topology.vertex_edges(topology.corner_vertex(t))),

                (D::Face, D::Vertex) => widen(topology.vertex_faces(t)),
                (D::Face, D::Edge) => {
                    let (a, b) = topology.edge_faces(t);
                    std::iter::once(a).chain(b).map(|f| f as usize).collect()
                }
                (D::Face, D::FaceCorner) => vec![topology.corner_face(t) as usize],

                (D::FaceCorner, D::Vertex) => widen(topology.vertex_face_corners(t)),
                (D::FaceCorner, D::Edge) => edge_corners(topology, t),
                (D::FaceCorner, D::Face) => widen(&topology.face_corners(t)),
            }
        })
        .collect()
}

fn widen(ids: &[u32]) -> Vec<usize> {
    ids.iter().map(|&i| i as usize).collect()
}

/// Corners of an edge's faces that sit on one of the edge's endpoints.
fn edge_corners<T>(topology: &T, edge: u32) -> Vec<usize>
where
    T: ElementTopology + ?Sized,
{
    let ends = topology.edge_vertices(edge);
    let (a, b) = topology.edge_faces(edge);
    std::iter::once(a)
        .chain(b)
        .flat_map(|face| topology.face_corners(face))
        .filter(|&corner| ends.contains(&topology.corner_vertex(corner)))
        .map(|corner| corner as usize)
        .collect()
}

/// Convert `data`, aligned to `from`, into values aligned to `to`.
///
/// # Errors
///
/// Returns [`AttributeError::LengthMismatch`] if `data` does not have one
/// value per element of `from`.
pub fn convert_domain<T>(
    name: &str,
    data: &AttributeData,
    from: AttributeDomain,
    to: AttributeDomain,
    topology: &T,
) -> AttributeResult<AttributeData>
where
    T: ElementTopology + ?Sized,
{
    let expected = topology.element_count(from);
    if data.len() != expected {
        return Err(AttributeError::LengthMismatch {
            name: name.to_string(),
            domain: from,
            expected,
            actual: data.len(),
        });
    }
    if from == to {
        return Ok(data.clone());
    }
    Ok(data.blend_groups(&source_groups(topology, from, to)))
}
