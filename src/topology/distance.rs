//! Distance Provider: Uniform Pairwise Distances
//!
//! The Rips complex only ever asks one question of its input: how far apart
//! are elements i and j? Point clouds and precomputed matrices are both
//! resolved here, once, into a dense symmetric [`DistanceMatrix`].

use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;

use crate::error::{RipsError, RipsResult};

/// The two accepted input kinds
#[derive(Debug, Clone, Copy)]
pub enum RipsInput<'a> {
    /// n×d coordinates, one point per row
    PointCloud(ArrayView2<'a, f64>),
    /// n×n pairwise distances
    DistanceMatrix(ArrayView2<'a, f64>),
}

impl<'a> RipsInput<'a> {
    /// Tag a matrix according to the `input_is_distance_matrix` flag
    pub fn new(matrix: ArrayView2<'a, f64>, is_distance_matrix: bool) -> Self {
        if is_distance_matrix {
            Self::DistanceMatrix(matrix)
        } else {
            Self::PointCloud(matrix)
        }
    }
}

/// Dense symmetric distance matrix with zero diagonal
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    distances: Array2<f64>,
}

impl DistanceMatrix {
    /// Resolve either input kind into distances
    ///
    /// # Errors
    ///
    /// Returns [`RipsError::InvalidInput`] for empty input, non-finite values,
    /// or a distance matrix that is not square, non-negative, zero on the
    /// diagonal and symmetric within `symmetry_tolerance`.
    pub fn build(input: RipsInput<'_>, symmetry_tolerance: f64) -> RipsResult<Self> {
        match input {
            RipsInput::PointCloud(points) => Self::from_points(points),
            RipsInput::DistanceMatrix(matrix) => Self::from_matrix(matrix, symmetry_tolerance),
        }
    }

    /// Build from rows of unequal provenance (vector-of-vectors input)
    ///
    /// Every row must have the same length; for a distance matrix that length
    /// must equal the number of rows.
    pub fn from_rows(
        rows: &[Vec<f64>],
        is_distance_matrix: bool,
        symmetry_tolerance: f64,
    ) -> RipsResult<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(RipsError::invalid_input("input has no rows"));
        }
        let width = rows[0].len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(RipsError::invalid_input(format!(
                "row {} has {} entries, expected {}",
                i,
                row.len(),
                width
            )));
        }

        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        let matrix = Array2::from_shape_vec((n, width), flat)
            .map_err(|e| RipsError::invalid_input(e.to_string()))?;
        Self::build(
            RipsInput::new(matrix.view(), is_distance_matrix),
            symmetry_tolerance,
        )
    }

    /// Euclidean distances between the rows of a point cloud
    pub fn from_points(points: ArrayView2<'_, f64>) -> RipsResult<Self> {
        let n = points.nrows();
        if n == 0 || points.ncols() == 0 {
            return Err(RipsError::invalid_input(format!(
                "point cloud must be non-empty, got {}x{}",
                n,
                points.ncols()
            )));
        }
        if let Some(((i, d), _)) = points.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(RipsError::invalid_input(format!(
                "coordinate ({}, {}) is not finite",
                i, d
            )));
        }

        let flat: Vec<f64> = (0..n * n)
            .into_par_iter()
            .map(|idx| {
                let (i, j) = (idx / n, idx % n);
                if i == j {
                    return 0.0;
                }
                points
                    .row(i)
                    .iter()
                    .zip(points.row(j).iter())
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum::<f64>()
                    .sqrt()
            })
            .collect();

        let distances = Array2::from_shape_vec((n, n), flat)
            .map_err(|e| RipsError::invalid_input(e.to_string()))?;
        Ok(Self { distances })
    }

    /// Validate a precomputed matrix
    ///
    /// Entry pairs that disagree by at most `symmetry_tolerance` are replaced
    /// by their mean; larger disagreements are rejected.
    pub fn from_matrix(matrix: ArrayView2<'_, f64>, symmetry_tolerance: f64) -> RipsResult<Self> {
        let n = matrix.nrows();
        if n == 0 {
            return Err(RipsError::invalid_input("distance matrix is empty"));
        }
        if matrix.ncols() != n {
            return Err(RipsError::invalid_input(format!(
                "distance matrix must be square, got {}x{}",
                n,
                matrix.ncols()
            )));
        }
        if let Some(((i, j), v)) = matrix
            .indexed_iter()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(RipsError::invalid_input(format!(
                "distance ({}, {}) = {} is not a finite non-negative value",
                i, j, v
            )));
        }

        // -0.0 would sort before 0.0 in filtration order
        let mut distances = matrix.mapv(|d| if d == 0.0 { 0.0 } else { d });
        let mut symmetrized = 0usize;
        for i in 0..n {
            if distances[[i, i]] > symmetry_tolerance {
                return Err(RipsError::invalid_input(format!(
                    "diagonal entry ({}, {}) = {} is not zero",
                    i,
                    i,
                    distances[[i, i]]
                )));
            }
            distances[[i, i]] = 0.0;

            for j in i + 1..n {
                let (a, b) = (distances[[i, j]], distances[[j, i]]);
                if a == b {
                    continue;
                }
                if (a - b).abs() > symmetry_tolerance {
                    return Err(RipsError::invalid_input(format!(
                        "distance matrix is not symmetric: d({}, {}) = {} but d({}, {}) = {}",
                        i, j, a, j, i, b
                    )));
                }
                let mean = 0.5 * (a + b);
                distances[[i, j]] = mean;
                distances[[j, i]] = mean;
                symmetrized += 1;
            }
        }

        if symmetrized > 0 {
            tracing::warn!(
                entries = symmetrized,
                tolerance = symmetry_tolerance,
                "averaged asymmetric distance pairs"
            );
        }

        Ok(Self { distances })
    }

    /// Number of input elements
    pub fn n_points(&self) -> usize {
        self.distances.nrows()
    }

    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distances[[i, j]]
    }

    /// Smallest radius at which some element is within reach of all others
    ///
    /// Above this value the Rips complex is a cone, so no homology in
    /// dimension ≥ 1 is born or survives past it.
    pub fn enclosing_radius(&self) -> f64 {
        self.distances
            .rows()
            .into_iter()
            .map(|row| row.iter().copied().fold(0.0, f64::max))
            .fold(f64::INFINITY, f64::min)
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.distances
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_points_to_distances() {
        let points = array![[0.0, 0.0], [3.0, 0.0], [0.0, 4.0]];
        let dm = DistanceMatrix::build(RipsInput::new(points.view(), false), 0.0).unwrap();

        assert_eq!(dm.n_points(), 3);
        assert_relative_eq!(dm.distance(0, 1), 3.0);
        assert_relative_eq!(dm.distance(0, 2), 4.0);
        assert_relative_eq!(dm.distance(1, 2), 5.0);
        assert_relative_eq!(dm.distance(2, 1), 5.0);
        assert_eq!(dm.distance(1, 1), 0.0);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let rows = vec![vec![0.0, 0.0], vec![1.0]];
        let err = DistanceMatrix::from_rows(&rows, false, 0.0).unwrap_err();
        assert!(matches!(err, RipsError::InvalidInput { .. }));
    }

    #[test]
    fn test_empty_rejected() {
        let rows: Vec<Vec<f64>> = Vec::new();
        assert!(DistanceMatrix::from_rows(&rows, false, 0.0).is_err());

        let points = Array2::<f64>::zeros((0, 3));
        assert!(DistanceMatrix::from_points(points.view()).is_err());
    }

    #[test]
    fn test_non_square_rejected() {
        let matrix = array![[0.0, 1.0, 2.0], [1.0, 0.0, 1.0]];
        let err = DistanceMatrix::from_matrix(matrix.view(), 0.0).unwrap_err();
        assert!(err.to_string().contains("square"));
    }

    #[test]
    fn test_asymmetry_strict_by_default() {
        let matrix = array![[0.0, 1.0], [1.0 + 1e-12, 0.0]];
        assert!(DistanceMatrix::from_matrix(matrix.view(), 0.0).is_err());

        let dm = DistanceMatrix::from_matrix(matrix.view(), 1e-9).unwrap();
        assert_relative_eq!(dm.distance(0, 1), dm.distance(1, 0));
        assert_relative_eq!(dm.distance(0, 1), 1.0 + 0.5e-12, epsilon = 1e-15);
    }

    #[test]
    fn test_nonzero_diagonal_rejected() {
        let matrix = array![[0.5, 1.0], [1.0, 0.0]];
        assert!(DistanceMatrix::from_matrix(matrix.view(), 0.0).is_err());
    }

    #[test]
    fn test_negative_and_nan_rejected() {
        let negative = array![[0.0, -1.0], [-1.0, 0.0]];
        assert!(DistanceMatrix::from_matrix(negative.view(), 0.0).is_err());

        let nan = array![[0.0, f64::NAN], [f64::NAN, 0.0]];
        assert!(DistanceMatrix::from_matrix(nan.view(), 0.0).is_err());

        let points = array![[0.0, f64::INFINITY]];
        assert!(DistanceMatrix::from_points(points.view()).is_err());
    }

    #[test]
    fn test_enclosing_radius() {
        // Star: center 0 at distance 1 from the others, leaves 2 apart
        let matrix = array![
            [0.0, 1.0, 1.0, 1.0],
            [1.0, 0.0, 2.0, 2.0],
            [1.0, 2.0, 0.0, 2.0],
            [1.0, 2.0, 2.0, 0.0]
        ];
        let dm = DistanceMatrix::from_matrix(matrix.view(), 0.0).unwrap();
        assert_relative_eq!(dm.enclosing_radius(), 1.0);
    }
}
