//! Disjoint sets over vertex indices.

/// Union-find where every set is represented by its lowest index.
#[derive(Debug, Clone)]
pub(crate) struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    /// `len` singleton sets.
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len as u32).collect(),
        }
    }

    /// Representative of `x`'s set, compressing the path on the way.
    pub fn find(&mut self, x: u32) -> u32 {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }
        let mut node = x;
        while self.parent[node as usize] != root {
            let next = self.parent[node as usize];
            self.parent[node as usize] = root;
            node = next;
        }
        root
    }

    /// Join the sets of `a` and `b`. Returns whether they were separate.
    pub fn union(&mut self, a: u32, b: u32) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        match ra.cmp(&rb) {
            std::cmp::Ordering::Equal => false,
            std::cmp::Ordering::Less => {
                self.parent[rb as usize] = ra;
                true
            }
            std::cmp::Ordering::Greater => {
                self.parent[ra as usize] = rb;
                true
            }
        }
    }
}
