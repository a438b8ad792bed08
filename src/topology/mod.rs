//! Topology Module: Vietoris-Rips Persistent Homology
//!
//! For a point cloud X we construct the filtration of simplicial complexes
//! VR_ε(X) indexed by the scale parameter ε, and track the birth and death
//! of topological features (connected components, loops, voids) across it.
//!
//! ## Pipeline
//!
//! - `distance.rs`: resolves points or a matrix into pairwise distances
//! - `binomial.rs`: combinatorial indexing of simplices
//! - `vietoris_rips.rs`: simplices in filtration order, cofacets, apparent pairs
//! - `components.rs`: H0 by union-find
//! - `cohomology.rs`: H≥1 by coboundary reduction with clearing
//! - `persistence.rs`: the assembled diagram
//! - `betti.rs`: Betti numbers read off the diagram

mod betti;
mod binomial;
mod cohomology;
mod components;
mod distance;
mod persistence;
mod vietoris_rips;

pub use betti::{BettiCurve, BettiNumbers};
pub use binomial::{BinomialTable, SimplexIndex};
pub use cohomology::{compute_cohomology, DimensionPairs, ReductionContext, ReductionStats};
pub use components::{compute_components, ComponentPairs, Merge, UnionFind};
pub use distance::{DistanceMatrix, RipsInput};
pub use persistence::{Death, PersistenceDiagram, PersistencePair};
pub use vietoris_rips::{FilteredSimplex, SimplexLevel, VietorisRips};
