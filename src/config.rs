//! Rips Configuration: Options for a Persistence Computation
//!
//! All options are plain values validated once, before any distance is
//! computed. A configuration is immutable for the duration of a run.

use crate::error::{RipsError, RipsResult};

/// Default cap on the number of simplices materialized per dimension.
pub const DEFAULT_MAX_SIMPLICES: usize = 50_000_000;

/// Options for a Vietoris-Rips persistence computation
#[derive(Debug, Clone, PartialEq)]
pub struct RipsConfig {
    /// Highest homology dimension to compute
    pub max_dim: usize,
    /// Maximum simplex diameter (`f64::INFINITY` for no cutoff)
    pub threshold: f64,
    /// Interpret the input as an n×n distance matrix instead of coordinates
    pub input_is_distance_matrix: bool,
    /// Worker threads (`None` = available processors)
    pub n_threads: Option<usize>,
    /// Largest asymmetry |d(i,j) - d(j,i)| averaged away instead of rejected
    pub symmetry_tolerance: f64,
    /// Upper bound on simplices enumerated in any one dimension
    pub max_simplices: usize,
    /// Clamp an infinite threshold to the enclosing radius
    pub use_enclosing_radius: bool,
}

impl Default for RipsConfig {
    fn default() -> Self {
        Self {
            max_dim: 1,
            threshold: 1.0,
            input_is_distance_matrix: false,
            n_threads: None,
            symmetry_tolerance: 0.0,
            max_simplices: DEFAULT_MAX_SIMPLICES,
            use_enclosing_radius: true,
        }
    }
}

impl RipsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_dim(mut self, max_dim: usize) -> Self {
        self.max_dim = max_dim;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_distance_matrix(mut self, input_is_distance_matrix: bool) -> Self {
        self.input_is_distance_matrix = input_is_distance_matrix;
        self
    }

    pub fn with_threads(mut self, n_threads: usize) -> Self {
        self.n_threads = Some(n_threads);
        self
    }

    pub fn with_symmetry_tolerance(mut self, tolerance: f64) -> Self {
        self.symmetry_tolerance = tolerance;
        self
    }

    pub fn with_max_simplices(mut self, max_simplices: usize) -> Self {
        self.max_simplices = max_simplices;
        self
    }

    pub fn with_enclosing_radius(mut self, enabled: bool) -> Self {
        self.use_enclosing_radius = enabled;
        self
    }

    /// Reject option values that cannot describe a computation
    ///
    /// # Errors
    ///
    /// Returns [`RipsError::InvalidConfiguration`] for a negative or NaN
    /// threshold or tolerance, or a zero thread count.
    pub fn validate(&self) -> RipsResult<()> {
        if self.threshold.is_nan() || self.threshold < 0.0 {
            return Err(RipsError::invalid_config(format!(
                "threshold must be non-negative, got {}",
                self.threshold
            )));
        }
        if !self.symmetry_tolerance.is_finite() || self.symmetry_tolerance < 0.0 {
            return Err(RipsError::invalid_config(format!(
                "symmetry tolerance must be finite and non-negative, got {}",
                self.symmetry_tolerance
            )));
        }
        if self.n_threads == Some(0) {
            return Err(RipsError::invalid_config("thread count must be at least 1"));
        }
        Ok(())
    }
}
