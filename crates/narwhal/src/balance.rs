//! Edge-balance weighing: the per-node priorities that steer the initial
//! traversal.

use crate::model::HierarchyGraph;
use rustc_hash::FxHashMap as HashMap;

/// Caller-owned scratch weight table, scoped to a single solve.
///
/// The traversal mutates these weights as nodes are placed, so two concurrent
/// solves must each build their own table.
#[derive(Debug, Clone, Default)]
pub struct EdgeBalance {
    weights: HashMap<String, i64>,
}

impl EdgeBalance {
    /// Weighs every node: +1 to both endpoints of each bottom edge, and +1 to
    /// every ancestor strictly between an endpoint and the pair's lowest
    /// common ancestor. A subtree's weight ends up counting the bottom edges
    /// that leave it for a different branch.
    pub fn new(g: &HierarchyGraph) -> Self {
        let mut weights: HashMap<String, i64> = HashMap::default();
        for id in g.ids() {
            weights.insert(id.clone(), 0);
        }

        for (u, v) in g.bottom_edges() {
            *weights.get_mut(u.as_str()).expect("endpoint is declared") += 1;
            *weights.get_mut(v.as_str()).expect("endpoint is declared") += 1;

            let au = g.ancestors(u);
            let av = g.ancestors(v);

            // Drop the shared root-side prefix of the two chains; what is
            // left on each side lies strictly between the endpoint and the
            // lowest common ancestor.
            let mut i = au.len();
            let mut j = av.len();
            while i > 0 && j > 0 && au[i - 1] == av[j - 1] {
                i -= 1;
                j -= 1;
            }
            for a in &au[..i] {
                *weights.get_mut(*a).expect("ancestor is declared") += 1;
            }
            for a in &av[..j] {
                *weights.get_mut(*a).expect("ancestor is declared") += 1;
            }
        }

        Self { weights }
    }

    pub fn weight(&self, id: &str) -> i64 {
        self.weights.get(id).copied().unwrap_or(0)
    }

    pub fn add(&mut self, id: &str, delta: i64) {
        if let Some(w) = self.weights.get_mut(id) {
            *w += delta;
        }
    }
}
