//! Persistence Diagrams
//!
//! A persistence pair (k, b, d) records a k-dimensional feature that is
//! born at filtration value b and dies at d. Features that never die within
//! the threshold carry [`Death::Infinite`], which is a distinct variant and
//! never a stand-in float.
//!
//! ## Interpretation
//!
//! - Long-lived features (large d-b) represent robust topological structure
//! - Short-lived features may be noise or transient phenomena

use std::cmp::Ordering;
use std::fmt;

/// When a feature dies
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Death {
    Finite(f64),
    /// Still alive at the threshold
    Infinite,
}

impl Death {
    pub fn is_infinite(&self) -> bool {
        matches!(self, Death::Infinite)
    }

    /// The death value, `None` for an essential feature
    pub fn value(&self) -> Option<f64> {
        match self {
            Death::Finite(d) => Some(*d),
            Death::Infinite => None,
        }
    }

    /// Total order placing every finite value before `Infinite`
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Death::Finite(a), Death::Finite(b)) => a.total_cmp(b),
            (Death::Finite(_), Death::Infinite) => Ordering::Less,
            (Death::Infinite, Death::Finite(_)) => Ordering::Greater,
            (Death::Infinite, Death::Infinite) => Ordering::Equal,
        }
    }
}

impl fmt::Display for Death {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Death::Finite(d) => write!(f, "{}", d),
            Death::Infinite => write!(f, "inf"),
        }
    }
}

/// A persistence pair [birth, death) in one homology dimension
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersistencePair {
    pub dimension: usize,
    pub birth: f64,
    pub death: Death,
}

impl PersistencePair {
    pub fn new(dimension: usize, birth: f64, death: Death) -> Self {
        Self {
            dimension,
            birth,
            death,
        }
    }

    /// Lifetime of the feature, `None` if it never dies
    pub fn persistence(&self) -> Option<f64> {
        self.death.value().map(|d| d - self.birth)
    }

    /// Is this an essential feature (infinite persistence)?
    pub fn is_essential(&self) -> bool {
        self.death.is_infinite()
    }

    /// Alive at scale ε: born at or before ε, not yet dead
    pub fn is_alive_at(&self, epsilon: f64) -> bool {
        self.birth <= epsilon
            && match self.death {
                Death::Finite(d) => epsilon < d,
                Death::Infinite => true,
            }
    }

    fn diagram_cmp(&self, other: &Self) -> Ordering {
        self.dimension
            .cmp(&other.dimension)
            .then(self.birth.total_cmp(&other.birth))
            .then(self.death.total_cmp(&other.death))
    }
}

impl fmt::Display for PersistencePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}: [{}, {})", self.dimension, self.birth, self.death)
    }
}

/// Persistence diagram: all pairs, sorted by dimension, birth, death
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistenceDiagram {
    pairs: Vec<PersistencePair>,
}

impl PersistenceDiagram {
    /// Tag per-dimension (birth, death) intervals and sort them
    ///
    /// Essential pairs are kept; callers decide whether to show them.
    pub fn assemble<I>(pairs_per_dimension: I) -> Self
    where
        I: IntoIterator<Item = (usize, Vec<(f64, Death)>)>,
    {
        let mut pairs: Vec<PersistencePair> = pairs_per_dimension
            .into_iter()
            .flat_map(|(dimension, intervals)| {
                intervals
                    .into_iter()
                    .map(move |(birth, death)| PersistencePair::new(dimension, birth, death))
            })
            .collect();
        pairs.sort_by(PersistencePair::diagram_cmp);
        Self { pairs }
    }

    pub fn pairs(&self) -> &[PersistencePair] {
        &self.pairs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PersistencePair> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Highest dimension with at least one pair
    pub fn max_dimension(&self) -> Option<usize> {
        self.pairs.last().map(|p| p.dimension)
    }

    /// Get all pairs for a given dimension
    pub fn dim(&self, d: usize) -> Vec<&PersistencePair> {
        self.pairs.iter().filter(|p| p.dimension == d).collect()
    }

    /// Pairs of dimension d that die within the threshold
    pub fn finite_pairs(&self, d: usize) -> Vec<&PersistencePair> {
        self.pairs
            .iter()
            .filter(|p| p.dimension == d && !p.is_essential())
            .collect()
    }

    /// Pairs of dimension d that never die
    pub fn essential_pairs(&self, d: usize) -> Vec<&PersistencePair> {
        self.pairs
            .iter()
            .filter(|p| p.dimension == d && p.is_essential())
            .collect()
    }

    /// Total persistence in dimension d
    pub fn total_persistence(&self, d: usize) -> f64 {
        self.pairs
            .iter()
            .filter(|p| p.dimension == d)
            .filter_map(|p| p.persistence())
            .sum()
    }

    /// Maximum finite persistence in dimension d
    pub fn max_persistence(&self, d: usize) -> f64 {
        self.pairs
            .iter()
            .filter(|p| p.dimension == d)
            .filter_map(|p| p.persistence())
            .fold(0.0, f64::max)
    }
}

impl<'a> IntoIterator for &'a PersistenceDiagram {
    type Item = &'a PersistencePair;
    type IntoIter = std::slice::Iter<'a, PersistencePair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}
