//! Information Module: Entropy of Persistence Diagrams
//!
//! Given the finite pairs {(bᵢ, dᵢ)} of one dimension, the persistent
//! entropy is
//!
//!   H_P = -Σᵢ pᵢ log(pᵢ)
//!
//! where pᵢ = lᵢ / L, lᵢ = dᵢ - bᵢ is the lifetime of generator i,
//! and L = Σⱼ lⱼ is the total lifetime. Essential pairs have no finite
//! lifetime and are left out.

mod entropy;

pub use entropy::{compute_entropy, TopologicalEntropy};
