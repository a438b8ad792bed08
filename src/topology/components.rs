//! Zero-Dimensional Persistence: Connected Components
//!
//! Edges are added in filtration order; each edge joining two components
//! kills the younger one (elder rule). This is Kruskal's algorithm on the
//! distance graph and needs no matrix reduction.
//!
//! Edges that merge components are the pivots of dimension 0 and are
//! handed to dimension 1 as cleared columns.

use std::collections::HashSet;

use super::binomial::SimplexIndex;
use super::persistence::Death;
use super::vietoris_rips::{SimplexLevel, VietorisRips};

/// Disjoint sets with per-component birth tracking
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
    /// Birth of the component rooted here
    birth: Vec<f64>,
    /// Smallest vertex of the component rooted here
    min_vertex: Vec<usize>,
}

/// Outcome of merging two vertices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Merge {
    /// Birth of the component that died
    pub birth: f64,
    /// Smallest vertex of the component that died
    pub vertex: usize,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            birth: vec![0.0; n],
            min_vertex: (0..n).collect(),
        }
    }

    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merge the components of x and y
    ///
    /// Returns the component that dies: the one born later, or on equal
    /// births the one whose smallest vertex is larger. `None` if x and y
    /// were already connected.
    pub fn union(&mut self, x: usize, y: usize) -> Option<Merge> {
        let (rx, ry) = (self.find(x), self.find(y));
        if rx == ry {
            return None;
        }

        let key = |r: usize| (self.birth[r], self.min_vertex[r]);
        let (elder, younger) = if key(rx) < key(ry) { (rx, ry) } else { (ry, rx) };
        let merge = Merge {
            birth: self.birth[younger],
            vertex: self.min_vertex[younger],
        };

        let (birth, min_vertex) = (self.birth[elder], self.min_vertex[elder]);
        let root = match self.rank[rx].cmp(&self.rank[ry]) {
            std::cmp::Ordering::Less => {
                self.parent[rx] = ry;
                ry
            }
            std::cmp::Ordering::Greater => {
                self.parent[ry] = rx;
                rx
            }
            std::cmp::Ordering::Equal => {
                self.parent[ry] = rx;
                self.rank[rx] += 1;
                rx
            }
        };
        self.birth[root] = birth;
        self.min_vertex[root] = min_vertex;

        Some(merge)
    }

    /// Birth of the component containing x
    pub fn birth_of(&mut self, x: usize) -> f64 {
        let root = self.find(x);
        self.birth[root]
    }

    /// Roots of all components
    pub fn roots(&mut self) -> Vec<usize> {
        (0..self.parent.len()).filter(|&i| self.find(i) == i).collect()
    }

    pub fn count_roots(&mut self) -> usize {
        self.roots().len()
    }
}

/// H0 intervals plus the edges that dimension 1 must skip
#[derive(Debug, Clone, Default)]
pub struct ComponentPairs {
    pub intervals: Vec<(f64, Death)>,
    pub cleared: HashSet<SimplexIndex>,
}

/// Compute zero-dimensional persistence from the edges in filtration order
///
/// Zero-length intervals (edges of diameter 0) are kept so the number of
/// finite intervals is always n minus the number of components.
pub fn compute_components(complex: &VietorisRips<'_>, edges: &SimplexLevel) -> ComponentPairs {
    debug_assert_eq!(edges.dim(), 1);
    let n = complex.n_points();
    let mut components = UnionFind::new(n);
    let mut pairs = ComponentPairs::default();
    let mut vertices = [0usize; 2];

    for edge in edges.iter() {
        complex
            .binomial()
            .decode_into(edge.index, 1, n, &mut vertices);

        if let Some(merge) = components.union(vertices[0], vertices[1]) {
            pairs
                .intervals
                .push((merge.birth, Death::Finite(edge.diameter)));
            pairs.cleared.insert(edge.index);
        }
    }

    for root in components.roots() {
        let birth = components.birth_of(root);
        pairs.intervals.push((birth, Death::Infinite));
    }

    tracing::debug!(
        finite = pairs.cleared.len(),
        essential = pairs.intervals.len() - pairs.cleared.len(),
        "dimension 0 reduced"
    );
    pairs
}
