//! Property-based tests for Rips persistence diagrams.
//!
//! This module uses proptest to verify properties that hold for every
//! point cloud:
//! - Every pair is born no later than it dies
//! - H0 has one essential class per connected component
//! - Relabelling the points does not change the diagram
//! - Lowering the threshold truncates the diagram
//! - The worker count does not change the diagram

use ndarray::Array2;
use proptest::prelude::*;
use rips_persistence::topology::BinomialTable;
use rips_persistence::{
    compute_rips_persistence, Death, DistanceMatrix, PersistenceDiagram, RipsConfig,
    VietorisRips,
};

// =============================================================================
// TEST CONFIGURATION
// =============================================================================

/// Small planar point clouds
fn point_cloud() -> impl Strategy<Value = Vec<[f64; 2]>> {
    prop::collection::vec(prop::array::uniform2(-1.0..1.0), 1..=10)
}

fn to_array(points: &[[f64; 2]]) -> Array2<f64> {
    let mut out = Array2::zeros((points.len(), 2));
    for (i, p) in points.iter().enumerate() {
        out[[i, 0]] = p[0];
        out[[i, 1]] = p[1];
    }
    out
}

fn diagram(points: &[[f64; 2]], config: &RipsConfig) -> PersistenceDiagram {
    compute_rips_persistence(to_array(points).view(), config).unwrap()
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    /// Property: births precede deaths and H0 is born at zero
    #[test]
    fn prop_pairs_are_ordered(points in point_cloud(), threshold in 0.0..3.0f64) {
        let config = RipsConfig::new().with_max_dim(2).with_threshold(threshold);
        let pd = diagram(&points, &config);

        for pair in &pd {
            prop_assert!(pair.birth >= 0.0);
            prop_assert!(pair.birth <= threshold);
            if let Death::Finite(death) = pair.death {
                prop_assert!(pair.birth <= death, "{}", pair);
                prop_assert!(death <= threshold, "{}", pair);
                if pair.dimension > 0 {
                    prop_assert!(pair.birth < death, "{}", pair);
                }
            }
            if pair.dimension == 0 {
                prop_assert_eq!(pair.birth, 0.0);
            }
        }
    }

    /// Property: H0 has n - c finite and c essential pairs for c components
    #[test]
    fn prop_components_counted(points in point_cloud(), threshold in 0.0..3.0f64) {
        let config = RipsConfig::new().with_max_dim(1).with_threshold(threshold);
        let pd = diagram(&points, &config);

        let distances = DistanceMatrix::from_points(to_array(&points).view()).unwrap();
        let binomial = BinomialTable::new(points.len(), 2).unwrap();
        let components = VietorisRips::new(&distances, &binomial, threshold).count_components();

        prop_assert_eq!(pd.essential_pairs(0).len(), components);
        prop_assert_eq!(pd.finite_pairs(0).len(), points.len() - components);
    }

    /// Property: the diagram does not depend on the order of the points
    #[test]
    fn prop_permutation_invariant(
        (points, order) in point_cloud().prop_flat_map(|points| {
            let n = points.len();
            (Just(points), Just((0..n).collect::<Vec<_>>()).prop_shuffle())
        }),
        threshold in 0.0..3.0f64,
    ) {
        let config = RipsConfig::new().with_max_dim(2).with_threshold(threshold);
        let shuffled: Vec<[f64; 2]> = order.iter().map(|&i| points[i]).collect();

        prop_assert_eq!(diagram(&points, &config), diagram(&shuffled, &config));
    }

    /// Property: a lower threshold sees the prefix of the filtration
    #[test]
    fn prop_threshold_truncates(
        points in point_cloud(),
        high in 0.0..3.0f64,
        fraction in 0.0..1.0f64,
    ) {
        let low = high * fraction;
        let full = diagram(&points, &RipsConfig::new().with_max_dim(2).with_threshold(high));
        let truncated = diagram(&points, &RipsConfig::new().with_max_dim(2).with_threshold(low));

        let expected = PersistenceDiagram::assemble((0..=2).map(|d| {
            let intervals = full
                .dim(d)
                .into_iter()
                .filter(|p| p.birth <= low)
                .map(|p| match p.death {
                    Death::Finite(death) if death <= low => (p.birth, p.death),
                    _ => (p.birth, Death::Infinite),
                })
                .collect();
            (d, intervals)
        }));

        prop_assert_eq!(truncated, expected);
    }

    /// Property: repeated and single-threaded runs agree
    #[test]
    fn prop_deterministic(points in point_cloud()) {
        let config = RipsConfig::new()
            .with_max_dim(2)
            .with_threshold(f64::INFINITY);
        let first = diagram(&points, &config);

        prop_assert_eq!(&first, &diagram(&points, &config));
        prop_assert_eq!(&first, &diagram(&points, &config.clone().with_threads(1)));
    }
}
