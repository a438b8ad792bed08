//! Simplex Indexer: Combinatorial Number System
//!
//! A k-simplex with sorted vertices v₀ < v₁ < ... < vₖ is stored as the
//! single integer
//!
//!   index = C(v₀, 1) + C(v₁, 2) + ... + C(vₖ, k+1)
//!
//! which is a bijection onto 0..C(n, k+1). Counting upwards through the
//! indices visits the k-simplices in colexicographic order, i.e. in
//! lexicographic order of the descending vertex tuple.

use crate::error::{RipsError, RipsResult};

/// Combinatorial simplex index
pub type SimplexIndex = u64;

/// Binomial coefficients C(i, j) for 0 ≤ i ≤ n_max, 0 ≤ j ≤ k_max
///
/// Stored as one flat arena, row-major in j, because lookups walk i for a
/// fixed j.
#[derive(Debug, Clone)]
pub struct BinomialTable {
    n_max: usize,
    k_max: usize,
    table: Vec<SimplexIndex>,
}

impl BinomialTable {
    /// Build the table with Pascal's rule
    ///
    /// # Errors
    ///
    /// Returns [`RipsError::ResourceExhaustion`] if any coefficient overflows
    /// the index type, since simplex indices up to that size would be needed.
    pub fn new(n_max: usize, k_max: usize) -> RipsResult<Self> {
        let width = n_max + 1;
        let mut table: Vec<SimplexIndex> = vec![0; width * (k_max + 1)];

        for i in 0..=n_max {
            table[i] = 1;
            for j in 1..=k_max.min(i) {
                let above = table[(j - 1) * width + i - 1];
                let left = table[j * width + i - 1];
                table[j * width + i] = above.checked_add(left).ok_or_else(|| {
                    RipsError::exhausted(format!(
                        "simplex index C({}, {}) overflows a {}-bit index",
                        i,
                        j,
                        SimplexIndex::BITS
                    ))
                })?;
            }
        }

        Ok(Self {
            n_max,
            k_max,
            table,
        })
    }

    /// C(n, k), zero when k > n
    ///
    /// # Panics
    ///
    /// Panics if `n > n_max` or `k > k_max` (with k ≤ n).
    #[inline]
    pub fn get(&self, n: usize, k: usize) -> SimplexIndex {
        if k > n {
            return 0;
        }
        assert!(
            n <= self.n_max && k <= self.k_max,
            "C({}, {}) outside table ({}, {})",
            n,
            k,
            self.n_max,
            self.k_max
        );
        self.table[k * (self.n_max + 1) + n]
    }

    /// Number of k-simplices on n vertices
    pub fn n_simplices(&self, n: usize, k: usize) -> SimplexIndex {
        self.get(n, k + 1)
    }

    /// Index of the simplex with the given ascending vertices
    #[inline]
    pub fn combinatorial_index(&self, vertices: &[usize]) -> SimplexIndex {
        debug_assert!(vertices.windows(2).all(|w| w[0] < w[1]));
        vertices
            .iter()
            .enumerate()
            .map(|(i, &v)| self.get(v, i + 1))
            .sum()
    }

    /// Ascending vertices of the k-simplex with the given index
    pub fn vertices_of(&self, index: SimplexIndex, k: usize, n: usize) -> Vec<usize> {
        let mut vertices = vec![0; k + 1];
        self.decode_into(index, k, n, &mut vertices);
        vertices
    }

    /// Allocation-free form of [`Self::vertices_of`]; `out.len()` must be k + 1
    pub fn decode_into(&self, mut index: SimplexIndex, k: usize, n: usize, out: &mut [usize]) {
        debug_assert_eq!(out.len(), k + 1);
        let mut upper = n;
        for j in (1..=k + 1).rev() {
            let v = self.max_vertex(index, j, upper);
            out[j - 1] = v;
            index -= self.get(v, j);
            upper = v;
        }
    }

    /// Largest v < upper with C(v, j) ≤ index
    fn max_vertex(&self, index: SimplexIndex, j: usize, upper: usize) -> usize {
        let (mut lo, mut hi) = (0, upper);
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if self.get(mid, j) <= index {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients() {
        let table = BinomialTable::new(10, 4).unwrap();
        assert_eq!(table.get(5, 2), 10);
        assert_eq!(table.get(6, 3), 20);
        assert_eq!(table.get(10, 4), 210);
        assert_eq!(table.get(7, 0), 1);
        assert_eq!(table.get(2, 3), 0);
        assert_eq!(table.n_simplices(4, 1), 6);
    }

    #[test]
    fn test_edge_indices() {
        let table = BinomialTable::new(4, 3).unwrap();
        // Colex order: {0,1} {0,2} {1,2} {0,3} {1,3} {2,3}
        let expected: [[usize; 2]; 6] = [[0, 1], [0, 2], [1, 2], [0, 3], [1, 3], [2, 3]];
        for (index, edge) in expected.iter().enumerate() {
            assert_eq!(table.combinatorial_index(edge), index as SimplexIndex);
            assert_eq!(table.vertices_of(index as SimplexIndex, 1, 4), edge.to_vec());
        }
    }

    #[test]
    fn test_enumeration_is_bijective() {
        let n = 7;
        let table = BinomialTable::new(n, 4).unwrap();
        for k in 0..4 {
            let count = table.n_simplices(n, k);
            let mut previous: Option<Vec<usize>> = None;
            for index in 0..count {
                let vertices = table.vertices_of(index, k, n);
                assert_eq!(vertices.len(), k + 1);
                assert!(vertices.windows(2).all(|w| w[0] < w[1]));
                assert!(*vertices.last().unwrap() < n);
                assert_eq!(table.combinatorial_index(&vertices), index);

                // Strictly increasing in descending-tuple lexicographic order
                if let Some(prev) = previous {
                    let a: Vec<usize> = prev.iter().rev().copied().collect();
                    let b: Vec<usize> = vertices.iter().rev().copied().collect();
                    assert!(a < b);
                }
                previous = Some(vertices);
            }
        }
    }

    #[test]
    fn test_largest_coefficients_fit() {
        // C(67, 33) is the largest central coefficient below 2^64
        let table = BinomialTable::new(67, 33).unwrap();
        let top = table.get(67, 33);
        assert_eq!(top, table.get(66, 33) + table.get(66, 32));
        assert!(top > 10_000_000_000_000_000_000);

        // C(68, 34) = 2 C(67, 33) does not
        let err = BinomialTable::new(68, 34).unwrap_err();
        assert!(matches!(err, RipsError::ResourceExhaustion { .. }));
    }

    #[test]
    fn test_overflow_is_reported() {
        let err = BinomialTable::new(100_000, 6).unwrap_err();
        assert!(matches!(err, RipsError::ResourceExhaustion { .. }));
    }
}
