//! Local search over sibling groups.
//!
//! Every move reorders the direct children of one parent and carries each
//! child's whole descendant block along unchanged, so subtree contiguity is
//! preserved by construction and top edges can never start crossing.

use crate::model::HierarchyGraph;
use crate::order::CrossingCounts;
use rand::Rng;
use rand::seq::SliceRandom;
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use std::cmp::Ordering;
use tracing::debug;

/// Round cap for the local search. The search is greedy and usually plateaus
/// on a local optimum well before the cap.
pub const MAX_ROUNDS: usize = 3;

/// Random shuffles tried per sibling group.
const RANDOM_ATTEMPTS: usize = 5;

/// Random moves are only worth trying on groups small enough that a handful
/// of shuffles has a realistic chance of hitting a better permutation.
const RANDOM_GROUP_LIMIT: usize = 6;

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub layout: Vec<String>,
    pub counts: CrossingCounts,
    /// Rounds actually run; 0 when the input was already crossing-free.
    pub rounds: usize,
}

/// Reduces crossings by reordering sibling groups, first improvement wins.
///
/// Per group the candidates are, in order: the barycenter order, the reversed
/// order, and (for groups of at most [`RANDOM_GROUP_LIMIT`]) the best of
/// [`RANDOM_ATTEMPTS`] random shuffles. A candidate is accepted iff its
/// counts are lexicographically lower: fewer visible crossings, or equally
/// many and fewer crossings overall. Halts after a round with no accepted
/// move, or at `max_rounds`.
pub fn optimize<R: Rng>(
    g: &HierarchyGraph,
    layout: Vec<String>,
    max_rounds: usize,
    rng: &mut R,
) -> SearchOutcome {
    let mut current = layout;
    let mut counts = CrossingCounts::of(g, &current);

    if counts.is_zero() {
        return SearchOutcome {
            layout: current,
            counts,
            rounds: 0,
        };
    }

    debug!(
        visible = counts.visible,
        all = counts.all,
        "starting sibling search"
    );

    let groups: Vec<&[String]> = g
        .ids()
        .iter()
        .map(|id| g.children(id))
        .filter(|kids| kids.len() > 1)
        .collect();

    let mut rounds = 0;
    let mut improved = true;
    while improved && rounds < max_rounds {
        improved = false;
        rounds += 1;

        for siblings in &groups {
            let members: HashSet<&str> = siblings.iter().map(String::as_str).collect();
            let current_order: Vec<String> = current
                .iter()
                .filter(|v| members.contains(v.as_str()))
                .cloned()
                .collect();

            let candidate = barycenter_order(g, siblings, &current);
            if candidate != current_order {
                let layout = apply_sibling_order(g, &current, siblings, &candidate);
                let candidate_counts = CrossingCounts::of(g, &layout);
                if candidate_counts < counts {
                    current = layout;
                    counts = candidate_counts;
                    improved = true;
                    continue;
                }
            }

            let reversed: Vec<String> = current_order.iter().rev().cloned().collect();
            if reversed != current_order {
                let layout = apply_sibling_order(g, &current, siblings, &reversed);
                let candidate_counts = CrossingCounts::of(g, &layout);
                if candidate_counts < counts {
                    current = layout;
                    counts = candidate_counts;
                    improved = true;
                    continue;
                }
            }

            if siblings.len() <= RANDOM_GROUP_LIMIT {
                let mut best: Option<(Vec<String>, CrossingCounts)> = None;
                for _ in 0..RANDOM_ATTEMPTS {
                    let mut shuffled = current_order.clone();
                    shuffled.shuffle(rng);
                    if shuffled == current_order {
                        continue;
                    }
                    let layout = apply_sibling_order(g, &current, siblings, &shuffled);
                    let candidate_counts = CrossingCounts::of(g, &layout);
                    let to_beat = best.as_ref().map_or(counts, |(_, c)| *c);
                    if candidate_counts < to_beat {
                        best = Some((layout, candidate_counts));
                    }
                }
                if let Some((layout, best_counts)) = best {
                    current = layout;
                    counts = best_counts;
                    improved = true;
                }
            }
        }

        if improved {
            debug!(
                round = rounds,
                visible = counts.visible,
                all = counts.all,
                "round reduced crossings"
            );
        }
    }

    SearchOutcome {
        layout: current,
        counts,
        rounds,
    }
}

/// Orders the group ascending by the mean current position of the bottom-edge
/// neighbors of each sibling's structural leaves. A sibling whose leaves have
/// no neighbors keeps its own current position as the key. Ties fall back to
/// the node id so the sort stays deterministic.
fn barycenter_order(g: &HierarchyGraph, siblings: &[String], layout: &[String]) -> Vec<String> {
    let mut pos: HashMap<&str, usize> = HashMap::default();
    for (idx, v) in layout.iter().enumerate() {
        pos.insert(v.as_str(), idx);
    }

    let mut entries: Vec<(f64, &String)> = siblings
        .iter()
        .map(|s| {
            let mut total = 0.0;
            let mut count = 0usize;
            for leaf in g.leaves(s) {
                for w in g.bottom_neighbors(leaf) {
                    if let Some(&p) = pos.get(w.as_str()) {
                        total += p as f64;
                        count += 1;
                    }
                }
            }
            let mean = if count > 0 {
                total / count as f64
            } else {
                pos.get(s.as_str()).copied().unwrap_or(0) as f64
            };
            (mean, s)
        })
        .collect();

    entries.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.1.cmp(b.1))
    });
    entries.into_iter().map(|(_, s)| s.clone()).collect()
}

/// Rebuilds a layout under a new sibling sequence: the first position owned
/// by the group emits the first sibling's whole descendant block (keeping the
/// block's internal order), and so on; every position outside the group stays
/// where it was.
pub fn apply_sibling_order(
    g: &HierarchyGraph,
    layout: &[String],
    siblings: &[String],
    new_order: &[String],
) -> Vec<String> {
    let mut owner: HashMap<&str, usize> = HashMap::default();
    for (ix, s) in siblings.iter().enumerate() {
        for d in g.descendants(s) {
            owner.insert(d.as_str(), ix);
        }
    }

    let mut blocks: Vec<Vec<String>> = vec![Vec::new(); siblings.len()];
    for v in layout {
        if let Some(&ix) = owner.get(v.as_str()) {
            blocks[ix].push(v.clone());
        }
    }

    let index_of: HashMap<&str, usize> = siblings
        .iter()
        .enumerate()
        .map(|(ix, s)| (s.as_str(), ix))
        .collect();

    let mut out: Vec<String> = Vec::with_capacity(layout.len());
    let mut next = new_order.iter();
    let mut pending = 0usize;
    for v in layout {
        if owner.contains_key(v.as_str()) {
            if pending > 0 {
                pending -= 1;
                continue;
            }
            let s = next.next().expect("one block per sibling in the new order");
            let ix = *index_of
                .get(s.as_str())
                .expect("new order permutes the sibling group");
            out.extend(blocks[ix].iter().cloned());
            pending = blocks[ix].len() - 1;
        } else {
            out.push(v.clone());
        }
    }
    out
}
