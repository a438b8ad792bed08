//! # rips-persistence
//!
//! Persistence diagrams of Vietoris-Rips filtrations.
//!
//! Given a point cloud or a pairwise-distance matrix, the crate computes the
//! multiset of (dimension, birth, death) triples describing how connected
//! components, loops, voids and their higher analogues appear and disappear
//! as the proximity threshold grows.
//!
//! ## Methodology
//!
//! 1. **Distances**: points or a validated matrix become one symmetric
//!    distance function
//!
//! 2. **Filtration**: simplices are indexed by the combinatorial number
//!    system and ordered by diameter
//!
//! 3. **H0**: union-find over edges in filtration order (elder rule)
//!
//! 4. **H≥1**: persistent cohomology by sparse coboundary reduction, with
//!    apparent pairs and clearing
//!
//! ## Example
//!
//! ```rust
//! use ndarray::array;
//! use rips_persistence::{compute_rips_persistence, Death, RipsConfig};
//!
//! let square = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
//! let config = RipsConfig::new().with_max_dim(1).with_threshold(2.0);
//! let diagram = compute_rips_persistence(square.view(), &config).unwrap();
//!
//! let h1 = diagram.dim(1);
//! assert_eq!(h1.len(), 1);
//! assert_eq!(h1[0].birth, 1.0);
//! assert_eq!(h1[0].death, Death::Finite(2.0_f64.sqrt()));
//! ```
//!
//! ## References
//!
//! - Edelsbrunner & Harer, "Computational Topology" (2010)
//! - de Silva, Morozov & Vejdemo-Johansson, "Dualities in persistent
//!   (co)homology" (2011)
//! - Bauer, "Ripser: efficient computation of Vietoris-Rips persistence
//!   barcodes" (2021)

pub mod config;
pub mod error;
pub mod information;
pub mod rips;
pub mod topology;

pub use config::RipsConfig;
pub use error::{RipsError, RipsResult};
pub use rips::{compute_rips_persistence, RipsPersistenceDiagram};

// Re-exports from topology
pub use topology::{
    // Diagram
    Death,
    PersistenceDiagram,
    PersistencePair,
    // Construction
    DistanceMatrix,
    RipsInput,
    VietorisRips,
    // Summaries
    BettiCurve,
    BettiNumbers,
};

// Re-exports from information
pub use information::{compute_entropy, TopologicalEntropy};
