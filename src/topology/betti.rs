//! Betti Numbers from a Persistence Diagram
//!
//! No complex is rebuilt here. The rank of Hₖ(VR_ε) is the number of
//! k-dimensional pairs whose interval [birth, death) contains ε, so every
//! scale is answered by one pass over the diagram. Scales past the
//! threshold of the run see the essential pairs only.

use super::persistence::PersistenceDiagram;

/// Betti numbers at a specific filtration value
#[derive(Debug, Clone, PartialEq)]
pub struct BettiNumbers {
    /// βₖ for k = 0..=max dimension of the diagram
    pub betti: Vec<usize>,
    /// Filtration scale
    pub epsilon: f64,
}

impl BettiNumbers {
    /// Count the pairs alive at `epsilon` in every dimension
    pub fn at_scale(diagram: &PersistenceDiagram, epsilon: f64) -> Self {
        let n_dims = diagram.max_dimension().map_or(0, |d| d + 1);
        let mut betti = vec![0; n_dims];
        for pair in diagram.iter().filter(|p| p.is_alive_at(epsilon)) {
            betti[pair.dimension] += 1;
        }
        Self { betti, epsilon }
    }

    /// βₖ, zero beyond the computed dimensions
    pub fn beta(&self, k: usize) -> usize {
        self.betti.get(k).copied().unwrap_or(0)
    }

    /// Total topological complexity
    pub fn total(&self) -> usize {
        self.betti.iter().sum()
    }

    /// Euler characteristic χ = β₀ - β₁ + β₂ - ...
    pub fn euler_characteristic(&self) -> i64 {
        self.betti
            .iter()
            .enumerate()
            .map(|(k, &b)| if k % 2 == 0 { b as i64 } else { -(b as i64) })
            .sum()
    }
}

/// Betti curve: Betti numbers over evenly spaced scales
#[derive(Debug, Clone)]
pub struct BettiCurve {
    pub values: Vec<BettiNumbers>,
}

impl BettiCurve {
    /// Sample n_steps + 1 scales from 0 to max_epsilon
    pub fn compute(diagram: &PersistenceDiagram, max_epsilon: f64, n_steps: usize) -> Self {
        let steps = n_steps.max(1);
        let values = (0..=steps)
            .map(|step| {
                let epsilon = max_epsilon * step as f64 / steps as f64;
                BettiNumbers::at_scale(diagram, epsilon)
            })
            .collect();
        Self { values }
    }

    /// (ε, βₖ) samples
    pub fn curve(&self, k: usize) -> Vec<(f64, usize)> {
        self.values.iter().map(|b| (b.epsilon, b.beta(k))).collect()
    }

    /// Area under the βₖ curve (trapezoidal rule)
    pub fn integrated(&self, k: usize) -> f64 {
        self.values
            .windows(2)
            .map(|w| {
                let de = w[1].epsilon - w[0].epsilon;
                de * (w[0].beta(k) + w[1].beta(k)) as f64 / 2.0
            })
            .sum()
    }
}
