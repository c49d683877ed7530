use spinbias::{
    engines::analysis::{compute_pair_stats, compute_streaks, detect_runs, streak::resolve_owner},
    groups::GroupRegistry,
    types::{Group, Symbol, TriplePolicy},
};

/// Deterministic pseudo-random spins
fn spins(seed: u64, len: usize) -> Vec<Symbol> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((state >> 33) % 37) as Symbol
        })
        .collect()
}

#[test]
fn test_streak_example() {
    let group = Group::new("Ones", vec![1]).unwrap();
    let stats = compute_streaks(&[1, 1, 0, 1], &[group]).unwrap();

    let ones = &stats["Ones"];
    assert_eq!(ones.runs, vec![2, 1]);
    assert_eq!(ones.run_count, 2);
    assert_eq!(ones.total_after_first, 1);
    assert_eq!(ones.avg_run_length, 1.5);
}

#[test]
fn test_runs_plus_unresolved_cover_sequence() {
    let registry = GroupRegistry::with_presets();
    let groups = registry.ordered(&["Orphelins", "Dozen 3"]).unwrap();

    for seed in 0..20 {
        let sequence = spins(seed, 200);
        let runs = detect_runs(&sequence, &groups).unwrap();

        let covered: usize = runs.iter().map(|r| r.length).sum();
        let unresolved = sequence
            .iter()
            .filter(|&&s| resolve_owner(s, &groups).is_none())
            .count();
        assert_eq!(covered + unresolved, sequence.len());

        // Adjacent runs with the same group must be separated by a gap
        for pair in runs.windows(2) {
            if pair[0].group_name == pair[1].group_name {
                assert!(pair[0].start_index + pair[0].length < pair[1].start_index);
            }
        }
    }
}

#[test]
fn test_derived_stats_match_runs() {
    let groups = GroupRegistry::with_presets().snapshot();

    for seed in 0..10 {
        let sequence = spins(seed, 150);
        let stats = compute_streaks(&sequence, &groups).unwrap();
        assert_eq!(stats.len(), groups.len());

        for s in stats.values() {
            assert_eq!(s.run_count, s.runs.len());
            assert_eq!(s.total_after_first, s.run_count.saturating_sub(1));
            if s.run_count > 0 {
                let avg = s.runs.iter().sum::<usize>() as f64 / s.run_count as f64;
                assert!((s.avg_run_length - avg).abs() < 1e-12);
            } else {
                assert_eq!(s.avg_run_length, 0.0);
            }
        }
    }
}

#[test]
fn test_doubles_partition_in_group_starts() {
    let registry = GroupRegistry::with_presets();
    for name in ["Red", "Voisins", "Dozen 1"] {
        let group = registry.get(name).unwrap();
        for seed in 0..10 {
            let sequence = spins(seed, 120);
            let stats = compute_pair_stats(&sequence, group, TriplePolicy::Overlapping).unwrap();

            let starts = sequence[..sequence.len() - 1]
                .iter()
                .filter(|&&s| group.contains(s))
                .count();
            assert_eq!(stats.doubles + stats.failed_doubles, starts);
        }
    }
}

#[test]
fn test_consume_never_finds_more_triples() {
    let group = GroupRegistry::with_presets().get("Voisins").unwrap().clone();
    for seed in 0..10 {
        let sequence = spins(seed, 300);
        let overlapping = compute_pair_stats(&sequence, &group, TriplePolicy::Overlapping).unwrap();
        let consume = compute_pair_stats(&sequence, &group, TriplePolicy::Consume).unwrap();
        assert!(consume.triples <= overlapping.triples);
        assert_eq!(consume.doubles, overlapping.doubles);
    }
}
