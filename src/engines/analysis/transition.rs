use crate::{
    error::Result,
    types::{ensure_sequence, CrossFollowStats, Group, OrderedMembership, Symbol},
};

/// Directed adjacency counts between two groups over consecutive spins.
pub fn compute_cross_follow(
    sequence: &[Symbol],
    group_a: &Group,
    group_b: &Group,
) -> Result<CrossFollowStats> {
    ensure_sequence(sequence)?;

    let mut stats = CrossFollowStats::default();
    for pair in sequence.windows(2) {
        let (current, next) = (pair[0], pair[1]);

        if group_a.contains(current) {
            if group_b.contains(next) {
                stats.a_follows_b += 1;
            } else {
                stats.a_not_follows_b += 1;
            }
        }
        if group_b.contains(current) {
            if group_a.contains(next) {
                stats.b_follows_a += 1;
            } else {
                stats.b_not_follows_a += 1;
            }
        }
    }

    Ok(stats)
}

/// Classify the first two symbols of each subsequence. With overlapping
/// groups a prefix can fall into more than one bucket.
pub fn count_ordered_membership(
    subsequences: &[Vec<Symbol>],
    group_a: &Group,
    group_b: &Group,
) -> OrderedMembership {
    let mut counts = OrderedMembership::default();

    for sub in subsequences.iter().filter(|s| s.len() >= 2) {
        let (first, second) = (sub[0], sub[1]);
        let (first_a, first_b) = (group_a.contains(first), group_b.contains(first));
        let (second_a, second_b) = (group_a.contains(second), group_b.contains(second));

        if first_a && second_b {
            counts.a_then_b += 1;
        }
        if first_b && second_a {
            counts.b_then_a += 1;
        }
        if first_a && second_a {
            counts.a_then_a += 1;
        }
        if first_b && second_b {
            counts.b_then_b += 1;
        }
    }

    counts
}
