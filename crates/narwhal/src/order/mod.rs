//! Node ordering: the initial tree-contiguous layout, the crossing oracle,
//! and the sibling-group local search.

mod cross_count;
pub use cross_count::{
    CrossingCounts, count_all_crossings, count_crossings, count_top_crossings,
    count_visible_crossings, visible_bottom_edges,
};

mod init_layout;
pub use init_layout::init_layout;

mod sibling_search;
pub use sibling_search::{MAX_ROUNDS, SearchOutcome, apply_sibling_order, optimize};
