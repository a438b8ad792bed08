//! Persistent Cohomology in Dimensions ≥ 1
//!
//! ## Algorithm Overview
//!
//! For dimension k the columns are the k-simplices, processed in reverse
//! filtration order, and each column holds the coboundary of its simplex
//! over Z/2. The pivot of a column is its earliest entry in filtration
//! order. A column is reduced by adding previously reduced columns with the
//! same pivot until its pivot is new (a finite pair) or it vanishes (an
//! essential class).
//!
//! Two shortcuts keep this tractable:
//!
//! - **Apparent pairs**: when τ, the earliest cofacet of σ, has σ as its
//!   latest facet, (σ, τ) is a persistence pair and σ's coboundary already
//!   has pivot τ. No reduction, and no stored column: it is regenerated from
//!   σ when needed.
//! - **Clearing**: every pivot of dimension k is a (k+1)-simplex that is
//!   known to reduce to zero in dimension k+1, so it is never a column there.
//!
//! ## Reference
//!
//! Bauer (2021). "Ripser: efficient computation of Vietoris-Rips
//! persistence barcodes". Journal of Applied and Computational Topology.

use std::collections::{BTreeSet, HashMap, HashSet};

use rayon::prelude::*;

use super::binomial::SimplexIndex;
use super::persistence::Death;
use super::vietoris_rips::{FilteredSimplex, SimplexLevel, VietorisRips};

/// Sparse column over Z/2, ordered by filtration
#[derive(Debug, Clone, Default)]
struct WorkingColumn {
    entries: BTreeSet<FilteredSimplex>,
}

impl WorkingColumn {
    fn from_entries(entries: impl IntoIterator<Item = FilteredSimplex>) -> Self {
        let mut column = Self::default();
        for entry in entries {
            column.add(entry);
        }
        column
    }

    /// Earliest entry in filtration order
    fn pivot(&self) -> Option<FilteredSimplex> {
        self.entries.first().copied()
    }

    /// Addition in Z/2: an entry present twice cancels
    fn add(&mut self, entry: FilteredSimplex) {
        if !self.entries.remove(&entry) {
            self.entries.insert(entry);
        }
    }

    fn add_all(&mut self, other: &[FilteredSimplex]) {
        for &entry in other {
            self.add(entry);
        }
    }

    fn into_vec(self) -> Vec<FilteredSimplex> {
        self.entries.into_iter().collect()
    }
}

/// Which column owns a pivot
#[derive(Debug, Clone, Copy)]
enum PivotOwner {
    /// Unreduced coboundary of this simplex (apparent pair)
    Apparent(FilteredSimplex),
    /// Stored reduced column
    Reduced(usize),
}

/// Counters for one dimension
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReductionStats {
    /// Columns left after clearing
    pub columns: usize,
    /// Columns skipped because their simplex was a pivot one dimension down
    pub cleared: usize,
    /// Columns resolved as apparent pairs
    pub apparent: usize,
    /// Column additions performed during reduction
    pub additions: usize,
    /// Columns that reduced to zero
    pub essential: usize,
}

/// Intervals of one dimension plus the simplices cleared for the next
#[derive(Debug, Clone, Default)]
pub struct DimensionPairs {
    pub intervals: Vec<(f64, Death)>,
    pub cleared: HashSet<SimplexIndex>,
    pub stats: ReductionStats,
}

/// Working state of one dimension's reduction
///
/// Owned by a single call to [`ReductionContext::compute`] and dropped with
/// it; no state crosses dimensions except the returned cleared set.
pub struct ReductionContext<'c, 'a> {
    complex: &'c VietorisRips<'a>,
    dim: usize,
    pivots: HashMap<SimplexIndex, PivotOwner>,
    reduced: Vec<Vec<FilteredSimplex>>,
    stats: ReductionStats,
}

impl<'c, 'a> ReductionContext<'c, 'a> {
    pub fn new(complex: &'c VietorisRips<'a>, dim: usize) -> Self {
        Self {
            complex,
            dim,
            pivots: HashMap::new(),
            reduced: Vec::new(),
            stats: ReductionStats::default(),
        }
    }

    /// Reduce every non-cleared simplex of the level
    ///
    /// `simplices` must be the dimension's level in filtration order and
    /// `cleared` the pivots found one dimension down.
    pub fn compute(
        mut self,
        simplices: &SimplexLevel,
        cleared: &HashSet<SimplexIndex>,
    ) -> DimensionPairs {
        debug_assert_eq!(simplices.dim(), self.dim);
        let columns: Vec<FilteredSimplex> = simplices
            .iter()
            .rev()
            .filter(|s| !cleared.contains(&s.index))
            .copied()
            .collect();
        self.stats.columns = columns.len();
        self.stats.cleared = simplices.len() - columns.len();

        let complex = self.complex;
        let dim = self.dim;
        let apparent: Vec<Option<FilteredSimplex>> = columns
            .par_iter()
            .map(|column| complex.apparent_cofacet(column, dim))
            .collect();

        let mut out = DimensionPairs::default();
        for (column, partner) in columns.iter().zip(apparent) {
            let pivot = match partner {
                Some(cofacet) => {
                    self.stats.apparent += 1;
                    self.pivots
                        .insert(cofacet.index, PivotOwner::Apparent(*column));
                    Some(cofacet)
                }
                None => self.reduce(column),
            };

            match pivot {
                Some(death) => {
                    out.cleared.insert(death.index);
                    if death.diameter > column.diameter {
                        out.intervals
                            .push((column.diameter, Death::Finite(death.diameter)));
                    }
                }
                None => {
                    self.stats.essential += 1;
                    out.intervals.push((column.diameter, Death::Infinite));
                }
            }
        }

        tracing::debug!(
            dim,
            columns = self.stats.columns,
            cleared = self.stats.cleared,
            apparent = self.stats.apparent,
            additions = self.stats.additions,
            essential = self.stats.essential,
            pairs = out.intervals.len(),
            "dimension reduced"
        );
        out.stats = self.stats;
        out
    }

    /// Reduce one column; returns its new pivot, or `None` if it vanishes
    fn reduce(&mut self, column: &FilteredSimplex) -> Option<FilteredSimplex> {
        let mut working = WorkingColumn::from_entries(self.complex.coboundary(column, self.dim));

        while let Some(pivot) = working.pivot() {
            match self.pivots.get(&pivot.index) {
                Some(PivotOwner::Apparent(owner)) => {
                    working.add_all(&self.complex.coboundary(owner, self.dim));
                }
                Some(PivotOwner::Reduced(slot)) => {
                    working.add_all(&self.reduced[*slot]);
                }
                None => {
                    self.pivots
                        .insert(pivot.index, PivotOwner::Reduced(self.reduced.len()));
                    self.reduced.push(working.into_vec());
                    return Some(pivot);
                }
            }
            self.stats.additions += 1;
        }
        None
    }
}

/// Persistence pairs of dimension `dim` ≥ 1
pub fn compute_cohomology(
    complex: &VietorisRips<'_>,
    dim: usize,
    simplices: &SimplexLevel,
    cleared: &HashSet<SimplexIndex>,
) -> DimensionPairs {
    ReductionContext::new(complex, dim).compute(simplices, cleared)
}
