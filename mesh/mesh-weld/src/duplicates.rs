//! Detection of coincident edges.
//!
//! Two edges are candidates when their endpoint positions are bitwise equal,
//! in the same or swapped order. A candidate pair is confirmed when the
//! normals of the two faces owning the edges are within the angle
//! threshold, and each edge is confirmed at most once.

use hashbrown::HashMap;
use mesh_types::{Edge, angle_degrees};
use nalgebra::Vector3;

type PositionKey = [u64; 3];

/// A confirmed pair of coincident edges. `remove` collapses into `keep`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DuplicateEdge {
    pub keep: u32,
    pub remove: u32,
    /// Whether `keep.vert_a` sits on `remove.vert_a` (rather than on
    /// `remove.vert_b`).
    pub same_orientation: bool,
}

impl DuplicateEdge {
    /// The two coincident vertex pairs, each ordered lower index first.
    pub fn vertex_pairs(&self, edges: &[Edge]) -> [(u32, u32); 2] {
        let keep = &edges[self.keep as usize];
        let remove = &edges[self.remove as usize];
        let pairs = if self.same_orientation {
            [(keep.vert_a, remove.vert_a), (keep.vert_b, remove.vert_b)]
        } else {
            [(keep.vert_a, remove.vert_b), (keep.vert_b, remove.vert_a)]
        };
        pairs.map(|(a, b)| (a.min(b), a.max(b)))
    }
}

/// Exact key of a position. `-0.0 + 0.0` is `+0.0`, so both zeros share a key.
fn position_key(p: &Vector3<f64>) -> PositionKey {
    [p.x, p.y, p.z].map(|c| (c + 0.0).to_bits())
}

/// Groups of two or more geometrically coincident edges, each in ascending
/// edge order, groups ordered by their first edge.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn coincident_edge_groups(positions: &[Vector3<f64>], edges: &[Edge]) -> Vec<Vec<u32>> {
    let mut slots: HashMap<(PositionKey, PositionKey), usize> = HashMap::new();
    let mut groups: Vec<Vec<u32>> = Vec::new();

    for (i, edge) in edges.iter().enumerate() {
        let a = position_key(&positions[edge.vert_a as usize]);
        let b = position_key(&positions[edge.vert_b as usize]);
        let key = if a <= b { (a, b) } else { (b, a) };
        let slot = *slots.entry(key).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(i as u32);
    }

    groups.retain(|group| group.len() > 1);
    groups
}

/// Confirm duplicate edges and link each kept edge to the face of the edge
/// it absorbs.
///
/// Pairs are visited per group in `(0,1), (0,2), .., (1,2), ..` order; the
/// first confirmed pair claims both of its edges. Edges that already border
/// two faces start out claimed.
pub(crate) fn find_duplicate_edges(
    positions: &[Vector3<f64>],
    edges: &mut [Edge],
    face_normals: &[Vector3<f64>],
    angle_threshold_deg: f64,
) -> Vec<DuplicateEdge> {
    let groups = coincident_edge_groups(positions, edges);
    let mut claimed: Vec<bool> = edges.iter().map(|edge| !edge.is_boundary()).collect();
    let mut duplicates = Vec::new();

    for group in &groups {
        for (i, &keep) in group.iter().enumerate() {
            for &remove in &group[i + 1..] {
                if claimed[keep as usize] || claimed[remove as usize] {
                    continue;
                }
                let a = edges[keep as usize];
                let b = edges[remove as usize];
                let angle = angle_degrees(
                    &face_normals[a.face_a as usize],
                    &face_normals[b.face_a as usize],
                );
                if angle > angle_threshold_deg {
                    continue;
                }

                claimed[keep as usize] = true;
                claimed[remove as usize] = true;

                let same_orientation = position_key(&positions[a.vert_a as usize])
                    == position_key(&positions[b.vert_a as usize])
                    && position_key(&positions[a.vert_b as usize])
                        == position_key(&positions[b.vert_b as usize]);

                edges[keep as usize].face_b = Some(b.face_a);
                duplicates.push(DuplicateEdge {
                    keep,
                    remove,
                    same_orientation,
                });
            }
        }
    }

    duplicates
}
