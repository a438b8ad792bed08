//! Vietoris-Rips Complex Construction
//!
//! The Vietoris-Rips complex VR_ε(X) is a simplicial complex where:
//! - 0-simplices are the points in X
//! - A k-simplex [v₀, ..., vₖ] exists iff d(vᵢ, vⱼ) ≤ ε for all i,j
//!
//! A simplex enters the filtration at its diameter, the largest pairwise
//! distance among its vertices. Within one dimension simplices are ordered
//! by (diameter, combinatorial index); across dimensions a face precedes
//! its cofaces on equal diameter.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use rayon::prelude::*;

use super::binomial::{BinomialTable, SimplexIndex};
use super::components::UnionFind;
use super::distance::DistanceMatrix;
use crate::error::{RipsError, RipsResult};

/// A simplex with the filtration value at which it appears
///
/// Ordering is filtration order: diameter first, then index.
#[derive(Debug, Clone, Copy)]
pub struct FilteredSimplex {
    pub index: SimplexIndex,
    pub diameter: f64,
}

impl FilteredSimplex {
    pub fn new(index: SimplexIndex, diameter: f64) -> Self {
        Self { index, diameter }
    }
}

impl Ord for FilteredSimplex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.diameter
            .total_cmp(&other.diameter)
            .then(self.index.cmp(&other.index))
    }
}

impl PartialOrd for FilteredSimplex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FilteredSimplex {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FilteredSimplex {}

/// All simplices of one dimension within the threshold, in filtration order
#[derive(Debug, Clone)]
pub struct SimplexLevel {
    dim: usize,
    simplices: Vec<FilteredSimplex>,
}

impl SimplexLevel {
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.simplices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.simplices.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilteredSimplex> {
        self.simplices.iter()
    }

    pub fn as_slice(&self) -> &[FilteredSimplex] {
        &self.simplices
    }
}

/// Vietoris-Rips filtration builder
pub struct VietorisRips<'a> {
    distances: &'a DistanceMatrix,
    binomial: &'a BinomialTable,
    /// Maximum filtration value
    threshold: f64,
    /// Cap on simplices materialized in one dimension
    max_simplices: usize,
}

impl<'a> VietorisRips<'a> {
    /// The binomial table must cover C(n, k + 2) for every dimension k whose
    /// coboundary is queried.
    pub fn new(distances: &'a DistanceMatrix, binomial: &'a BinomialTable, threshold: f64) -> Self {
        Self {
            distances,
            binomial,
            threshold,
            max_simplices: usize::MAX,
        }
    }

    pub fn with_max_simplices(mut self, max_simplices: usize) -> Self {
        self.max_simplices = max_simplices;
        self
    }

    /// Number of points
    pub fn n_points(&self) -> usize {
        self.distances.n_points()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn binomial(&self) -> &BinomialTable {
        self.binomial
    }

    /// 0-simplices: every point, born at 0
    pub fn vertices(&self) -> SimplexLevel {
        SimplexLevel {
            dim: 0,
            simplices: (0..self.n_points())
                .map(|v| FilteredSimplex::new(v as SimplexIndex, 0.0))
                .collect(),
        }
    }

    /// All k-simplices within the threshold, in filtration order
    ///
    /// Restartable: every call rebuilds the levels from the vertices up.
    pub fn enumerate(&self, k: usize) -> RipsResult<SimplexLevel> {
        let mut level = self.vertices();
        while level.dim() < k {
            level = self.extend(&level)?;
        }
        Ok(level)
    }

    /// The (k+1)-simplices obtained by adding a larger vertex to each k-simplex
    ///
    /// Each (k+1)-simplex has exactly one such parent (itself minus its top
    /// vertex), so nothing is produced twice.
    ///
    /// # Errors
    ///
    /// Returns [`RipsError::ResourceExhaustion`] as soon as the running count
    /// of extensions exceeds `max_simplices`. A level of exactly
    /// `max_simplices` simplices is accepted.
    pub fn extend(&self, level: &SimplexLevel) -> RipsResult<SimplexLevel> {
        let dim = level.dim() + 1;
        let produced = AtomicUsize::new(0);

        let batches: Vec<Vec<FilteredSimplex>> = level
            .simplices
            .par_iter()
            .map(|simplex| {
                let batch = self.extensions_of(simplex, level.dim());
                let total = produced.fetch_add(batch.len(), AtomicOrdering::Relaxed) + batch.len();
                if total > self.max_simplices {
                    return Err(RipsError::exhausted(format!(
                        "more than {} simplices of dimension {} below threshold {}",
                        self.max_simplices, dim, self.threshold
                    )));
                }
                Ok(batch)
            })
            .collect::<RipsResult<_>>()?;

        let mut simplices = Vec::with_capacity(produced.into_inner());
        for batch in batches {
            simplices.extend(batch);
        }
        simplices.par_sort_unstable();

        tracing::debug!(dim, count = simplices.len(), "enumerated simplices");
        Ok(SimplexLevel { dim, simplices })
    }

    fn extensions_of(&self, simplex: &FilteredSimplex, dim: usize) -> Vec<FilteredSimplex> {
        let n = self.n_points();
        let vertices = self.binomial.vertices_of(simplex.index, dim, n);
        let top = vertices[dim];

        (top + 1..n)
            .filter_map(|v| {
                let reach = self.reach(&vertices, v);
                (reach <= self.threshold).then(|| {
                    FilteredSimplex::new(
                        simplex.index + self.binomial.get(v, dim + 2),
                        simplex.diameter.max(reach),
                    )
                })
            })
            .collect()
    }

    /// Largest distance from v to any of the given vertices
    #[inline]
    fn reach(&self, vertices: &[usize], v: usize) -> f64 {
        vertices
            .iter()
            .map(|&u| self.distances.distance(u, v))
            .fold(0.0, f64::max)
    }

    /// Diameter of the simplex spanned by the given vertices
    pub fn diameter_of(&self, vertices: &[usize]) -> f64 {
        let mut diameter: f64 = 0.0;
        for (i, &u) in vertices.iter().enumerate() {
            for &v in &vertices[i + 1..] {
                diameter = diameter.max(self.distances.distance(u, v));
            }
        }
        diameter
    }

    /// Ascending vertices of a simplex of the given dimension
    pub fn vertices_of(&self, simplex: &FilteredSimplex, dim: usize) -> Vec<usize> {
        self.binomial.vertices_of(simplex.index, dim, self.n_points())
    }

    /// Visit every cofacet of a dim-simplex that lies within the threshold
    pub fn for_each_cofacet(
        &self,
        simplex: &FilteredSimplex,
        dim: usize,
        mut visit: impl FnMut(FilteredSimplex),
    ) {
        let vertices = self.vertices_of(simplex, dim);
        let mut cofacet = Vec::with_capacity(dim + 2);
        let mut next = 0;

        for v in 0..self.n_points() {
            if next < vertices.len() && vertices[next] == v {
                next += 1;
                continue;
            }
            let reach = self.reach(&vertices, v);
            if reach > self.threshold {
                continue;
            }

            cofacet.clear();
            cofacet.extend_from_slice(&vertices[..next]);
            cofacet.push(v);
            cofacet.extend_from_slice(&vertices[next..]);

            visit(FilteredSimplex::new(
                self.binomial.combinatorial_index(&cofacet),
                simplex.diameter.max(reach),
            ));
        }
    }

    /// Coboundary of a dim-simplex restricted to the threshold, unsorted
    pub fn coboundary(&self, simplex: &FilteredSimplex, dim: usize) -> Vec<FilteredSimplex> {
        let mut cofacets = Vec::new();
        self.for_each_cofacet(simplex, dim, |cofacet| cofacets.push(cofacet));
        cofacets
    }

    /// Earliest cofacet in filtration order
    pub fn min_cofacet(&self, simplex: &FilteredSimplex, dim: usize) -> Option<FilteredSimplex> {
        let mut min: Option<FilteredSimplex> = None;
        self.for_each_cofacet(simplex, dim, |cofacet| {
            if min.map_or(true, |m| cofacet < m) {
                min = Some(cofacet);
            }
        });
        min
    }

    /// Latest facet in filtration order of a simplex of dimension dim ≥ 1
    pub fn max_facet(&self, simplex: &FilteredSimplex, dim: usize) -> Option<FilteredSimplex> {
        if dim == 0 {
            return None;
        }
        let vertices = self.vertices_of(simplex, dim);
        let mut facet = Vec::with_capacity(dim);

        (0..vertices.len())
            .map(|skip| {
                facet.clear();
                facet.extend(
                    vertices
                        .iter()
                        .enumerate()
                        .filter(|&(i, _)| i != skip)
                        .map(|(_, &v)| v),
                );
                FilteredSimplex::new(
                    self.binomial.combinatorial_index(&facet),
                    self.diameter_of(&facet),
                )
            })
            .max()
    }

    /// The cofacet τ forming an apparent pair with this simplex, if any
    ///
    /// (σ, τ) is apparent when τ is the earliest cofacet of σ and σ is the
    /// latest facet of τ. Such a pair is a persistence pair without any
    /// reduction.
    pub fn apparent_cofacet(&self, simplex: &FilteredSimplex, dim: usize) -> Option<FilteredSimplex> {
        let cofacet = self.min_cofacet(simplex, dim)?;
        let facet = self.max_facet(&cofacet, dim + 1)?;
        (facet.index == simplex.index).then_some(cofacet)
    }

    /// Count connected components of the complex at the threshold
    pub fn count_components(&self) -> usize {
        let n = self.n_points();
        let mut components = UnionFind::new(n);
        for i in 0..n {
            for j in i + 1..n {
                if self.distances.distance(i, j) <= self.threshold {
                    components.union(i, j);
                }
            }
        }
        components.count_roots()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn unit_square() -> DistanceMatrix {
        let points = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
        DistanceMatrix::from_points(points.view()).unwrap()
    }

    #[test]
    fn test_triangle() {
        // Equilateral triangle with side 1
        let points = array![[0.0, 0.0], [1.0, 0.0], [0.5, 0.866]];
        let dm = DistanceMatrix::from_points(points.view()).unwrap();
        let binomial = BinomialTable::new(3, 3).unwrap();

        // Below the side length: three components
        assert_eq!(VietorisRips::new(&dm, &binomial, 0.8).count_components(), 3);

        // Above it: one component, and the 2-simplex is present
        let vr = VietorisRips::new(&dm, &binomial, 1.2);
        assert_eq!(vr.count_components(), 1);
        assert_eq!(vr.enumerate(2).unwrap().len(), 1);
    }

    #[test]
    fn test_levels_are_in_filtration_order() {
        let dm = unit_square();
        let binomial = BinomialTable::new(4, 4).unwrap();
        let vr = VietorisRips::new(&dm, &binomial, 2.0);

        let edges = vr.enumerate(1).unwrap();
        assert_eq!(edges.dim(), 1);
        assert_eq!(edges.len(), 6);
        assert!(edges.as_slice().windows(2).all(|w| w[0] < w[1]));
        assert_eq!(edges.iter().filter(|e| e.diameter == 1.0).count(), 4);

        let triangles = vr.enumerate(2).unwrap();
        assert_eq!(triangles.len(), 4);
        for t in triangles.iter() {
            let vertices = vr.vertices_of(t, 2);
            assert_eq!(vr.diameter_of(&vertices), t.diameter);
        }

        assert_eq!(vr.enumerate(3).unwrap().len(), 1);
    }

    #[test]
    fn test_threshold_filters_simplices() {
        let dm = unit_square();
        let binomial = BinomialTable::new(4, 4).unwrap();

        let sides_only = VietorisRips::new(&dm, &binomial, 1.0);
        assert_eq!(sides_only.enumerate(1).unwrap().len(), 4);
        assert!(sides_only.enumerate(2).unwrap().is_empty());

        let nothing = VietorisRips::new(&dm, &binomial, 0.0);
        assert_eq!(nothing.enumerate(0).unwrap().len(), 4);
        assert!(nothing.enumerate(1).unwrap().is_empty());
    }

    #[test]
    fn test_simplex_budget() {
        let dm = unit_square();
        let binomial = BinomialTable::new(4, 4).unwrap();
        let vr = VietorisRips::new(&dm, &binomial, 2.0).with_max_simplices(5);

        let err = vr.enumerate(1).unwrap_err();
        assert!(matches!(err, RipsError::ResourceExhaustion { .. }));

        // The cap is inclusive: six edges fit a budget of six
        let exact = VietorisRips::new(&dm, &binomial, 2.0).with_max_simplices(6);
        assert_eq!(exact.enumerate(1).unwrap().len(), 6);
        assert!(exact.enumerate(2).is_ok());
    }

    #[test]
    fn test_coboundary_and_facets() {
        let dm = unit_square();
        let binomial = BinomialTable::new(4, 4).unwrap();
        let vr = VietorisRips::new(&dm, &binomial, 2.0);

        let edge = FilteredSimplex::new(binomial.combinatorial_index(&[0, 1]), 1.0);
        let mut cofacets = vr.coboundary(&edge, 1);
        cofacets.sort();
        let vertex_sets: Vec<Vec<usize>> = cofacets.iter().map(|c| vr.vertices_of(c, 2)).collect();
        assert_eq!(vertex_sets, vec![vec![0, 1, 2], vec![0, 1, 3]]);
        assert!(cofacets.iter().all(|c| (c.diameter - 2.0_f64.sqrt()).abs() < 1e-12));

        // Below the diagonal no cofacet exists
        let tight = VietorisRips::new(&dm, &binomial, 1.0);
        assert!(tight.min_cofacet(&edge, 1).is_none());
    }

    #[test]
    fn test_apparent_pairs() {
        let dm = unit_square();
        let binomial = BinomialTable::new(4, 4).unwrap();
        let vr = VietorisRips::new(&dm, &binomial, 2.0);
        let s2 = 2.0_f64.sqrt();

        // The side {0,1} is not the latest facet of its earliest cofacet
        let side = FilteredSimplex::new(binomial.combinatorial_index(&[0, 1]), 1.0);
        assert!(vr.apparent_cofacet(&side, 1).is_none());

        // The diagonal {1,2} pairs with {0,1,2}
        let diagonal = FilteredSimplex::new(binomial.combinatorial_index(&[1, 2]), s2);
        let partner = vr.apparent_cofacet(&diagonal, 1).unwrap();
        assert_eq!(vr.vertices_of(&partner, 2), vec![0, 1, 2]);
    }
}
