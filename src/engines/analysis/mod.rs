pub mod frequency;
pub mod neighbor;
pub mod pairs;
pub mod streak;
pub mod transition;

pub use neighbor::{compute_neighbor_match, CircularLayout, DEFAULT_RADIUS};
pub use pairs::compute_pair_stats;
pub use streak::{
    bridging_subsequences, compute_family_streaks, compute_streaks, detect_runs, disjoint_families,
};
pub use transition::{compute_cross_follow, count_ordered_membership};
