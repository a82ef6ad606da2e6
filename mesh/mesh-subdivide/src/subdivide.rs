//! Midpoint subdivision.
//!
//! Index layout of one level, for an input with `V` vertices, `E` edges and
//! `F` faces:
//!
//! - vertex `v < V` is kept; vertex `V + e` is the midpoint of edge `e`
//! - edges `2e` and `2e + 1` are the halves of edge `e`, from `vert_a` to
//!   the midpoint and from the midpoint to `vert_b`; edges `2E + 3f + k`
//!   are the three spokes inside face `f`
//! - faces `4f .. 4f + 4` replace face `f`: centre, then the corners at
//!   `vert_a`, `vert_b`, `vert_c`
//! - every child face has three fresh corners, numbered with it

// Algorithm uses many indexing operations
#![allow(clippy::cast_possible_truncation)]

use mesh_types::{
    Attribute, AttributeData, AttributeDomain, AttributeStore, Edge, Face, FaceCorner,
    GeometryMesh, Topology, TopologyError, Vertex, builtin,
};
use tracing::debug;

use crate::error::{SubdivideError, SubdivideResult};
use crate::params::SubdivideParams;
use crate::result::SubdivisionResult;

/// Subdivide a mesh `levels` times. Zero levels returns a clone.
///
/// # Errors
///
/// Returns an error if the result fails the integrity check.
///
/// # Examples
///
/// ```
/// use mesh_subdivide::subdivide;
/// use mesh_types::GeometryMesh;
///
/// let mesh = GeometryMesh::empty();
/// assert!(subdivide(&mesh, 2)?.is_empty());
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
pub fn subdivide(mesh: &GeometryMesh, levels: u32) -> SubdivideResult<GeometryMesh> {
    subdivide_mesh(
        mesh,
        &SubdivideParams::new()
            .with_levels(levels)
            .with_max_faces(usize::MAX),
    )
    .map(|result| result.mesh)
}

/// Subdivide a mesh using the specified parameters.
///
/// Every triangle is split into four through its edge midpoints. Vertex
/// attributes are blended onto midpoints, edge attributes are copied onto
/// both halves, face attributes onto all four children, and corner
/// attributes are kept at original corners and blended at midpoint corners.
/// The three spokes inside a face copy the edge attributes of the edge each
/// one runs parallel to, except `crease`, which is 0 on spokes.
///
/// # Errors
///
/// Returns an error if:
/// - The resulting mesh would exceed `max_faces`
/// - A face lists an edge that does not join two of its vertices
/// - The result fails the integrity check
///
/// # Examples
///
/// ```
/// use mesh_subdivide::{subdivide_mesh, SubdivideParams};
/// use mesh_types::{
///     Attribute, AttributeDomain, AttributeStore, Edge, Face, FaceCorner, GeometryMesh,
///     Topology, Vector3, Vertex,
/// };
///
/// let topology = Topology::from_tables(
///     vec![Vertex::default(); 3],
///     vec![Edge::new(0, 1, 0), Edge::new(1, 2, 0), Edge::new(2, 0, 0)],
///     vec![Face::new([0, 1, 2], [0, 1, 2], [0, 1, 2])],
///     (0..3).map(|v| FaceCorner { face: 0, vert: v }).collect(),
/// );
/// let mut attributes = AttributeStore::new();
/// attributes.insert(Attribute::from_values(
///     "position",
///     AttributeDomain::Vertex,
///     vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.5, 1.0, 0.0)],
/// ));
/// let mesh = GeometryMesh::from_parts(topology, attributes, 1)?;
///
/// // Subdivide once (each triangle becomes 4)
/// let result = subdivide_mesh(&mesh, &SubdivideParams::default())?;
///
/// assert_eq!(result.final_faces, 4);
/// assert_eq!(result.final_vertices, 6);
/// assert_eq!(result.final_edges, 9);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn subdivide_mesh(
    mesh: &GeometryMesh,
    params: &SubdivideParams,
) -> SubdivideResult<SubdivisionResult> {
    // Check projected size
    let projected = params.expected_faces(mesh.face_count());
    if projected > params.max_faces {
        return Err(SubdivideError::MeshTooLarge {
            current: mesh.face_count(),
            projected,
            max: params.max_faces,
        });
    }

    debug!(
        faces = mesh.face_count(),
        edges = mesh.edge_count(),
        vertices = mesh.vertex_count(),
        levels = params.levels,
        "subdividing mesh"
    );

    let mut current = mesh.clone();
    for level in 0..params.levels {
        current = subdivide_once(&current)?;
        debug!(
            level = level + 1,
            faces = current.face_count(),
            edges = current.edge_count(),
            vertices = current.vertex_count(),
            "subdivision level done"
        );
    }

    Ok(SubdivisionResult {
        original_faces: mesh.face_count(),
        final_faces: current.face_count(),
        original_edges: mesh.edge_count(),
        final_edges: current.edge_count(),
        original_vertices: mesh.vertex_count(),
        final_vertices: current.vertex_count(),
        levels: params.levels,
        mesh: current,
    })
}

/// Index sources for one level: which input elements each output element
/// takes its attribute values from.
struct Sources {
    /// Per midpoint vertex, the two endpoints to blend.
    midpoint_ends: Vec<[usize; 2]>,
    /// Per output edge, the input edge to copy from.
    edge_source: Vec<usize>,
    /// Per output face, the input face to copy from.
    face_source: Vec<usize>,
    /// Per face, the three input corner pairs to blend into midpoint corners.
    midpoint_corners: Vec<[usize; 2]>,
    /// Per output corner, an index into the input corners followed by the
    /// blended midpoint corners.
    corner_source: Vec<usize>,
}

/// One level of 1-to-4 splitting.
fn subdivide_once(mesh: &GeometryMesh) -> SubdivideResult<GeometryMesh> {
    let topology = mesh.topology();
    let in_vertices = topology.vertex_count();
    let in_edges = topology.edges();
    let in_faces = topology.faces();
    let in_corners = topology.face_corner_count();

    let v = in_vertices as u32;
    let e_count = in_edges.len() as u32;

    let mut edges: Vec<Edge> = Vec::with_capacity(in_edges.len() * 2 + in_faces.len() * 3);
    let mut faces: Vec<Face> = Vec::with_capacity(in_faces.len() * 4);
    let mut corners: Vec<FaceCorner> = Vec::with_capacity(in_faces.len() * 12);

    let mut sources = Sources {
        midpoint_ends: Vec::with_capacity(in_edges.len()),
        edge_source: Vec::with_capacity(edges.capacity()),
        face_source: Vec::with_capacity(faces.capacity()),
        midpoint_corners: Vec::with_capacity(in_faces.len() * 3),
        corner_source: Vec::with_capacity(corners.capacity()),
    };

    // Halves. Face slots are placeholders until `link_edge_faces`.
    for (e, edge) in in_edges.iter().enumerate() {
        let mid = v + e as u32;
        let placeholder = edge.face_a * 4;
        edges.push(Edge::new(edge.vert_a, mid, placeholder));
        edges.push(Edge::new(mid, edge.vert_b, placeholder));
        sources.edge_source.extend([e, e]);
        sources
            .midpoint_ends
            .push([edge.vert_a as usize, edge.vert_b as usize]);
    }

    for (f, face) in in_faces.iter().enumerate() {
        let [x, y, z] = face.vertices();
        let [ea, eb, ec] = ordered_edges(face, f, in_edges)?;
        let [cx, cy, cz] = face.corners();
        let (xm, ym, zm) = (v + ea, v + eb, v + ec);

        // Half of each input edge on either end, as seen from this face.
        let (x_ea, y_ea) = halves(&in_edges[ea as usize], ea, x);
        let (y_eb, z_eb) = halves(&in_edges[eb as usize], eb, y);
        let (z_ec, x_ec) = halves(&in_edges[ec as usize], ec, z);

        let child = 4 * f as u32;
        let spoke = 2 * e_count + 3 * f as u32;
        edges.push(Edge::new(xm, ym, child));
        edges.push(Edge::new(ym, zm, child));
        edges.push(Edge::new(zm, xm, child));
        sources
            .edge_source
            .extend([ea as usize, eb as usize, ec as usize]);

        let children: [([u32; 3], [u32; 3]); 4] = [
            ([xm, ym, zm], [spoke, spoke + 1, spoke + 2]),
            ([x, xm, zm], [x_ea, spoke + 2, x_ec]),
            ([xm, y, ym], [y_ea, y_eb, spoke]),
            ([ym, z, zm], [z_eb, z_ec, spoke + 1]),
        ];

        // Corner sources: input corners as-is, midpoint corners after them.
        let base = in_corners + 3 * f;
        let (mx, my, mz) = (base, base + 1, base + 2);
        let (cx, cy, cz) = (cx as usize, cy as usize, cz as usize);
        sources
            .midpoint_corners
            .extend([[cx, cy], [cy, cz], [cz, cx]]);
        let child_corners = [[mx, my, mz], [cx, mx, mz], [mx, cy, my], [my, cz, mz]];

        for (j, ((verts, child_edges), corner_sources)) in
            children.into_iter().zip(child_corners).enumerate()
        {
            let face_index = child + j as u32;
            let k = corners.len() as u32;
            faces.push(Face::new(verts, [k, k + 1, k + 2], child_edges));
            corners.extend(verts.map(|vert| FaceCorner {
                face: face_index,
                vert,
            }));
            sources.face_source.push(f);
            sources.corner_source.extend(corner_sources);
        }
    }

    let vertex_count = in_vertices + in_edges.len();
    let mut topology = Topology::from_tables(
        vec![Vertex::default(); vertex_count],
        edges,
        faces,
        corners,
    );
    topology.link_edge_faces();

    let mut attributes = AttributeStore::new();
    for attribute in mesh.attributes().iter() {
        let data = propagate(attribute, &sources, in_edges.len());
        attributes.insert(Attribute::new(attribute.name(), attribute.domain(), data));
    }

    Ok(GeometryMesh::from_parts(
        topology,
        attributes,
        mesh.submesh_count(),
    )?)
}

/// The face's edges ordered to run X-Y, Y-Z, Z-X, found by their
/// endpoints rather than by their slot in the face.
fn ordered_edges(face: &Face, f: usize, edges: &[Edge]) -> Result<[u32; 3], TopologyError> {
    let [x, y, z] = face.vertices();
    let listed = face.edges();
    let joins = |k: usize, p: u32, q: u32| {
        edges.get(listed[k] as usize).is_some_and(|edge| {
            (edge.vert_a == p && edge.vert_b == q) || (edge.vert_a == q && edge.vert_b == p)
        })
    };

    let mut used = [false; 3];
    let mut ordered = [0_u32; 3];
    for (slot, (p, q)) in [(x, y), (y, z), (z, x)].into_iter().enumerate() {
        // A face may list one edge twice when two of its vertices coincide.
        let k = (0..3)
            .find(|&k| !used[k] && joins(k, p, q))
            .or_else(|| (0..3).find(|&k| joins(k, p, q)))
            .ok_or(TopologyError::EdgeOffFace {
                face: f,
                edge: listed[slot],
            })?;
        used[k] = true;
        ordered[slot] = listed[k];
    }
    Ok(ordered)
}

/// The halves of input edge `e` touching `from` and the other end.
const fn halves(edge: &Edge, e: u32, from: u32) -> (u32, u32) {
    if edge.vert_a == from {
        (2 * e, 2 * e + 1)
    } else {
        (2 * e + 1, 2 * e)
    }
}

fn propagate(attribute: &Attribute, sources: &Sources, in_edges: usize) -> AttributeData {
    let data = attribute.data();
    match attribute.domain() {
        AttributeDomain::Vertex => {
            let mut out = data.clone();
            for ends in &sources.midpoint_ends {
                out.push_blend(ends);
            }
            out
        }
        AttributeDomain::Edge => {
            if attribute.name() == builtin::CREASE {
                let halves = 2 * in_edges;
                let mut out = data.select(&sources.edge_source[..halves]);
                out.resize(sources.edge_source.len());
                out
            } else {
                data.select(&sources.edge_source)
            }
        }
        AttributeDomain::Face => data.select(&sources.face_source),
        AttributeDomain::FaceCorner => {
            let mut combined = data.clone();
            for pair in &sources.midpoint_corners {
                combined.push_blend(pair);
            }
            combined.select(&sources.corner_source)
        }
    }
}
