//! Crossing-minimizing node ordering for hierarchically clustered graphs.
//!
//! Computes the linear ordering a NodeTrix-style rendering needs (clusters
//! drawn as adjacency matrices, inter-cluster links as curves): a
//! tree-contiguous initial layout driven by propagated edge weights, an exact
//! pairwise crossing oracle with all-edge and inter-cluster-visible counting
//! modes, and a bounded sibling-group local search that only ever trades
//! layouts through contiguity-preserving moves.

pub mod balance;
pub mod error;
pub mod model;
pub mod order;
pub mod solver;

pub use balance::EdgeBalance;
pub use error::{Error, Result};
pub use model::{EdgeSpec, GraphDoc, HierarchyGraph, NodeKind, NodeSpec};
pub use order::{CrossingCounts, SearchOutcome};
pub use solver::{SolveOptions, SolveResult, SolveStats, solve, solve_with_rng};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
