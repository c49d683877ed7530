use crate::{
    error::Result,
    types::{ensure_sequence, Group, PairStats, Symbol, TriplePolicy},
};

/// Count in-group doubles and triples against their near misses.
pub fn compute_pair_stats(
    sequence: &[Symbol],
    group: &Group,
    triple_policy: TriplePolicy,
) -> Result<PairStats> {
    ensure_sequence(sequence)?;

    let (doubles, failed_doubles) = count_doubles(sequence, group);
    let (triples, failed_triples) = count_triples(sequence, group, triple_policy);

    Ok(PairStats {
        doubles,
        failed_doubles,
        triples,
        failed_triples,
    })
}

fn count_doubles(sequence: &[Symbol], group: &Group) -> (usize, usize) {
    sequence
        .windows(2)
        .filter(|w| group.contains(w[0]))
        .fold((0, 0), |(hit, miss), w| {
            if group.contains(w[1]) {
                (hit + 1, miss)
            } else {
                (hit, miss + 1)
            }
        })
}

fn count_triples(sequence: &[Symbol], group: &Group, policy: TriplePolicy) -> (usize, usize) {
    let mut triples = 0;
    let mut failed = 0;
    let mut i = 0;

    while i + 2 < sequence.len() {
        let in_group = sequence[i..i + 3]
            .iter()
            .filter(|&&s| group.contains(s))
            .count();

        match in_group {
            3 => {
                triples += 1;
                if policy == TriplePolicy::Consume {
                    i += 3;
                    continue;
                }
            }
            2 => failed += 1,
            _ => {}
        }
        i += 1;
    }

    (triples, failed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(members: &[i64]) -> Group {
        Group::new("G", members.iter().copied()).unwrap()
    }

    #[test]
    fn test_doubles_and_failed_doubles() {
        let g = group(&[1, 2]);
        let stats = compute_pair_stats(&[1, 2, 3, 1, 1], &g, TriplePolicy::Overlapping).unwrap();

        // (1,2) (1,1) hit; (2,3) miss; (3,1) ignored
        assert_eq!(stats.doubles, 2);
        assert_eq!(stats.failed_doubles, 1);
    }

    #[test]
    fn test_failed_triples_count_every_outlier_position() {
        let g = group(&[1]);
        // windows: [1,1,0] [1,0,1] [0,1,1] each have exactly two members
        let stats = compute_pair_stats(&[1, 1, 0, 1, 1], &g, TriplePolicy::Overlapping).unwrap();
        assert_eq!(stats.triples, 0);
        assert_eq!(stats.failed_triples, 3);
    }

    #[test]
    fn test_triple_policies() {
        let g = group(&[1]);
        let seq = [1, 1, 1, 1, 1, 0];

        let overlapping = compute_pair_stats(&seq, &g, TriplePolicy::Overlapping).unwrap();
        assert_eq!(overlapping.triples, 3);
        assert_eq!(overlapping.failed_triples, 1);

        // [1,1,1] consumed, then [1,1,0] is a near miss
        let consume = compute_pair_stats(&seq, &g, TriplePolicy::Consume).unwrap();
        assert_eq!(consume.triples, 1);
        assert_eq!(consume.failed_triples, 1);
    }

    #[test]
    fn test_short_sequences() {
        let g = group(&[1]);
        assert_eq!(
            compute_pair_stats(&[], &g, TriplePolicy::Overlapping).unwrap(),
            PairStats::default()
        );
        let one = compute_pair_stats(&[1], &g, TriplePolicy::Overlapping).unwrap();
        assert_eq!(one, PairStats::default());
    }
}
