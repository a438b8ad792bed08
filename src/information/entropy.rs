//! Topological Entropy: Information Content of Persistence Diagrams

use crate::topology::PersistenceDiagram;

/// Entropy measures of one homology dimension
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopologicalEntropy {
    pub dimension: usize,
    /// Persistent entropy (Shannon)
    pub persistent_entropy: f64,
    /// Normalized entropy in [0, 1]
    pub normalized_entropy: f64,
    /// Total lifetime (normalization constant)
    pub total_lifetime: f64,
    /// Finite pairs with positive lifetime
    pub n_intervals: usize,
}

impl TopologicalEntropy {
    /// Compute all entropy measures for dimension d
    pub fn from_diagram(pd: &PersistenceDiagram, d: usize) -> Self {
        let lifetimes: Vec<f64> = pd
            .iter()
            .filter(|p| p.dimension == d)
            .filter_map(|p| p.persistence())
            .filter(|&l| l > 0.0)
            .collect();
        let total_lifetime: f64 = lifetimes.iter().sum();

        let persistent_entropy = if total_lifetime > 0.0 {
            -lifetimes
                .iter()
                .map(|l| l / total_lifetime)
                .map(|p| p * p.ln())
                .sum::<f64>()
        } else {
            0.0
        };

        // ln(m) is the entropy of m equal lifetimes
        let normalized_entropy = if lifetimes.len() > 1 {
            persistent_entropy / (lifetimes.len() as f64).ln()
        } else {
            0.0
        };

        Self {
            dimension: d,
            persistent_entropy,
            normalized_entropy,
            total_lifetime,
            n_intervals: lifetimes.len(),
        }
    }
}

/// Entropy of every dimension present in the diagram
pub fn compute_entropy(pd: &PersistenceDiagram) -> Vec<TopologicalEntropy> {
    let n_dims = pd.max_dimension().map_or(0, |d| d + 1);
    (0..n_dims)
        .map(|d| TopologicalEntropy::from_diagram(pd, d))
        .collect()
}
