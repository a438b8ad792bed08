//! Rips Persistence: Entry Points
//!
//! ```text
//! input ─► DistanceMatrix ─► VietorisRips ─┬─► H0 (union-find) ────────┐
//!                                          └─► H1..Hk (cohomology) ────┴─► PersistenceDiagram
//! ```
//!
//! Each run owns its worker pool, binomial table and reduction state; nothing
//! outlives the call.

use ndarray::ArrayView2;

use crate::config::RipsConfig;
use crate::error::{RipsError, RipsResult};
use crate::topology::{
    compute_cohomology, compute_components, BinomialTable, DistanceMatrix, PersistenceDiagram,
    RipsInput, VietorisRips,
};

/// Vietoris-Rips persistence diagram computation with fixed options
///
/// # Examples
///
/// ```rust
/// use rips_persistence::{RipsConfig, RipsPersistenceDiagram};
///
/// let square = vec![
///     vec![0.0, 0.0],
///     vec![1.0, 0.0],
///     vec![0.0, 1.0],
///     vec![1.0, 1.0],
/// ];
/// let rips = RipsPersistenceDiagram::new(RipsConfig::new().with_threshold(2.0));
/// let diagram = rips.execute(&square).unwrap();
///
/// assert_eq!(diagram.finite_pairs(0).len(), 3);
/// assert_eq!(diagram.essential_pairs(0).len(), 1);
/// assert_eq!(diagram.dim(1).len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RipsPersistenceDiagram {
    config: RipsConfig,
}

impl RipsPersistenceDiagram {
    pub fn new(config: RipsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RipsConfig {
        &self.config
    }

    /// Compute the diagram of row-wise input (points, or distance rows)
    pub fn execute(&self, rows: &[Vec<f64>]) -> RipsResult<PersistenceDiagram> {
        self.config.validate()?;
        let config = &self.config;
        with_pool(config, || {
            let distances = DistanceMatrix::from_rows(
                rows,
                config.input_is_distance_matrix,
                config.symmetry_tolerance,
            )?;
            diagram_of(&distances, config)
        })
    }

    /// Compute the diagram of a matrix input
    pub fn execute_array(&self, input: ArrayView2<'_, f64>) -> RipsResult<PersistenceDiagram> {
        compute_rips_persistence(input, &self.config)
    }
}

/// Persistence diagram of the Rips filtration of a point cloud or
/// distance matrix
///
/// # Errors
///
/// - [`RipsError::InvalidConfiguration`] before any work if the options are invalid
/// - [`RipsError::InvalidInput`] if the matrix is malformed
/// - [`RipsError::ResourceExhaustion`] if the filtration would be too large
pub fn compute_rips_persistence(
    input: ArrayView2<'_, f64>,
    config: &RipsConfig,
) -> RipsResult<PersistenceDiagram> {
    config.validate()?;
    with_pool(config, || {
        let distances = DistanceMatrix::build(
            RipsInput::new(input, config.input_is_distance_matrix),
            config.symmetry_tolerance,
        )?;
        diagram_of(&distances, config)
    })
}

/// Run `op` on a pool sized by the configuration
fn with_pool<T, F>(config: &RipsConfig, op: F) -> RipsResult<T>
where
    T: Send,
    F: FnOnce() -> RipsResult<T> + Send,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.n_threads.unwrap_or(0))
        .build()
        .map_err(|e| RipsError::exhausted(format!("cannot start worker pool: {}", e)))?;
    pool.install(op)
}

/// Persistence diagram of validated distances
pub fn diagram_of(distances: &DistanceMatrix, config: &RipsConfig) -> RipsResult<PersistenceDiagram> {
    let n = distances.n_points();
    let threshold = if config.threshold.is_infinite() && config.use_enclosing_radius {
        distances.enclosing_radius()
    } else {
        config.threshold
    };
    // No simplex has more than n vertices
    let top_dim = config.max_dim.min(n.saturating_sub(1));

    let binomial = BinomialTable::new(n, top_dim + 2)?;
    let complex = VietorisRips::new(distances, &binomial, threshold)
        .with_max_simplices(config.max_simplices);

    let mut level = complex.extend(&complex.vertices())?;
    let components = compute_components(&complex, &level);
    let mut cleared = components.cleared;
    let mut pairs_per_dimension = vec![(0, components.intervals)];

    for dim in 1..=top_dim {
        if dim > 1 {
            level = complex.extend(&level)?;
        }
        if level.is_empty() {
            break;
        }
        let pairs = compute_cohomology(&complex, dim, &level, &cleared);
        cleared = pairs.cleared;
        pairs_per_dimension.push((dim, pairs.intervals));
    }

    let diagram = PersistenceDiagram::assemble(pairs_per_dimension);
    tracing::info!(
        n_points = n,
        max_dim = top_dim,
        threshold,
        pairs = diagram.len(),
        "rips persistence computed"
    );
    Ok(diagram)
}
