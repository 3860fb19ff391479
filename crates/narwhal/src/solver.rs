//! End-to-end heuristic solve: weigh, lay out, count, optimize.

use crate::balance::EdgeBalance;
use crate::model::HierarchyGraph;
use crate::order::{self, CrossingCounts, SearchOutcome};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct SolveOptions {
    /// Seed for the bounded random moves. `None` seeds from entropy; fixing
    /// it makes the whole solve reproducible.
    pub seed: Option<u64>,
    /// Cap on local-search rounds.
    pub max_rounds: usize,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            seed: None,
            max_rounds: order::MAX_ROUNDS,
        }
    }
}

/// Per-solve figures, kept so callers can log or report them.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SolveStats {
    pub node_count: usize,
    pub bottom_edge_count: usize,
    pub visible_edge_count: usize,
    pub initial_crossings: CrossingCounts,
    pub final_crossings: CrossingCounts,
    pub rounds: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SolveResult {
    /// The final ordering. Contains every node of the hierarchy, internal
    /// cluster ids included, unlike the exact solver's leaf-only output.
    pub layout: Vec<String>,
    pub stats: SolveStats,
}

/// Runs the full heuristic: edge-balance weighing, weighted DFS layout,
/// baseline crossing counts, then the bounded sibling-group search.
pub fn solve(g: &HierarchyGraph, options: SolveOptions) -> SolveResult {
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    solve_with_rng(g, options.max_rounds, &mut rng)
}

/// [`solve`] with a caller-supplied move generator, the seam tests use to
/// make the random moves fully deterministic.
pub fn solve_with_rng<R: rand::Rng>(
    g: &HierarchyGraph,
    max_rounds: usize,
    rng: &mut R,
) -> SolveResult {
    let mut balance = EdgeBalance::new(g);
    let layout = order::init_layout(g, &mut balance);

    let initial = CrossingCounts::of(g, &layout);
    debug!(
        nodes = g.node_count(),
        visible = initial.visible,
        all = initial.all,
        "initial layout built"
    );

    let SearchOutcome {
        layout,
        counts,
        rounds,
    } = order::optimize(g, layout, max_rounds, rng);

    debug!(
        visible = counts.visible,
        all = counts.all,
        rounds, "sibling search finished"
    );

    SolveResult {
        stats: SolveStats {
            node_count: g.node_count(),
            bottom_edge_count: g.bottom_edges().len(),
            visible_edge_count: order::visible_bottom_edges(g).len(),
            initial_crossings: initial,
            final_crossings: counts,
            rounds,
        },
        layout,
    }
}
