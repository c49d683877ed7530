use crate::{
    config::AppConfig,
    engines::{
        analysis::{
            bridging_subsequences, compute_cross_follow, compute_family_streaks, compute_pair_stats,
            count_ordered_membership, frequency,
        },
        analyzer::SpinAnalyzer,
        simulation::{WagerMetrics, WagerSimulator},
    },
    error::Result,
    types::{
        CrossFollowStats, Group, NeighborStats, OrderedMembership, PairStats, StreakStats, Symbol,
        WagerOutcome,
    },
};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupPairStats {
    pub group: String,
    pub stats: PairStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionStats {
    pub group_a: String,
    pub group_b: String,
    pub cross_follow: CrossFollowStats,
    pub ordered: OrderedMembership,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WagerSummary {
    pub outcome: WagerOutcome,
    pub metrics: WagerMetrics,
}

/// Every analysis over one sequence and one registry snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub spins: usize,
    pub groups: Vec<String>,
    pub streaks: HashMap<String, StreakStats>,
    pub pairs: Vec<GroupPairStats>,
    pub transitions: Vec<TransitionStats>,
    pub group_counts: Vec<(String, usize)>,
    pub dozen_counts: [usize; 3],
    pub neighbors: NeighborStats,
    pub wager: Option<WagerSummary>,
}

impl AnalysisReport {
    /// Independent analyses run in parallel; each scan is still an
    /// in-order fold over the sequence.
    pub fn build(sequence: &[Symbol], groups: &[Group], config: &AppConfig) -> Result<Self> {
        let analyzer = SpinAnalyzer::new(config.analysis.clone())?;
        let sequence = analyzer.prepare(sequence)?;
        let sequence: &[Symbol] = &sequence;

        log::info!(
            "Building report for {} spins across {} groups",
            sequence.len(),
            groups.len()
        );

        let ((streaks, pairs), (transitions, neighbors)) = rayon::join(
            || {
                rayon::join(
                    || compute_family_streaks(sequence, groups),
                    || Self::pair_stats(sequence, groups, config),
                )
            },
            || {
                rayon::join(
                    || Self::transitions(sequence, groups, config),
                    || analyzer.neighbors(sequence),
                )
            },
        );

        let wager = Self::wager(sequence, config)?;

        Ok(Self {
            generated_at: Utc::now(),
            spins: sequence.len(),
            groups: groups.iter().map(|g| g.name().to_string()).collect(),
            streaks: streaks?,
            pairs: pairs?,
            transitions: transitions?,
            group_counts: frequency::count_by_group(sequence, groups)?,
            dozen_counts: frequency::dozen_counts(sequence),
            neighbors: neighbors?,
            wager,
        })
    }

    fn pair_stats(
        sequence: &[Symbol],
        groups: &[Group],
        config: &AppConfig,
    ) -> Result<Vec<GroupPairStats>> {
        groups
            .par_iter()
            .map(|group| {
                Ok(GroupPairStats {
                    group: group.name().to_string(),
                    stats: compute_pair_stats(sequence, group, config.analysis.triple_policy)?,
                })
            })
            .collect()
    }

    /// Every ordered pair of distinct groups, in registry order.
    fn transitions(
        sequence: &[Symbol],
        groups: &[Group],
        config: &AppConfig,
    ) -> Result<Vec<TransitionStats>> {
        let pairs: Vec<(&Group, &Group)> = groups
            .iter()
            .enumerate()
            .flat_map(|(i, a)| {
                groups
                    .iter()
                    .enumerate()
                    .filter(move |&(j, _)| j != i)
                    .map(move |(_, b)| (a, b))
            })
            .collect();

        pairs
            .par_iter()
            .map(|(a, b)| {
                let subsequences = bridging_subsequences(a, sequence, config.analysis.boundary)?;
                Ok(TransitionStats {
                    group_a: a.name().to_string(),
                    group_b: b.name().to_string(),
                    cross_follow: compute_cross_follow(sequence, a, b)?,
                    ordered: count_ordered_membership(&subsequences, a, b),
                })
            })
            .collect()
    }

    fn wager(sequence: &[Symbol], config: &AppConfig) -> Result<Option<WagerSummary>> {
        let wager = &config.wager;
        if wager.bets.is_empty() {
            log::debug!("No bets configured, skipping wager simulation");
            return Ok(None);
        }

        let outcome =
            WagerSimulator::new(wager.gap_threshold, wager.use_martingale, wager.initial_balance)?
                .run(sequence, &wager.bets)?;
        let metrics = WagerMetrics::calculate(&outcome);

        Ok(Some(WagerSummary { outcome, metrics }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::GroupRegistry;
    use crate::types::BetDefinition;

    #[test]
    fn test_report_covers_every_group_pair() {
        let registry = GroupRegistry::with_presets();
        let groups = registry.snapshot();
        let report = AnalysisReport::build(&[0, 32, 15, 1, 20, 33], &groups, &AppConfig::default())
            .unwrap();

        let n = groups.len();
        assert_eq!(report.spins, 6);
        assert_eq!(report.streaks.len(), n);
        assert_eq!(report.pairs.len(), n);
        assert_eq!(report.transitions.len(), n * (n - 1));
        assert_eq!(report.transitions[0].group_a, "Voisins");
        assert_eq!(report.transitions[0].group_b, "Orphelins");
        assert!(report
            .transitions
            .iter()
            .any(|t| t.group_a == "Orphelins" && t.group_b == "Voisins"));
        assert!(report.wager.is_none());
    }

    #[test]
    fn test_report_streaks_cover_overlapping_presets() {
        let groups = GroupRegistry::with_presets().snapshot();
        let sequence: Vec<Symbol> = (0..370).map(|i| (i % 37) as Symbol).collect();
        let report = AnalysisReport::build(&sequence, &groups, &AppConfig::default()).unwrap();

        for name in ["Voisins", "Red", "Black", "Dozen 1", "Dozen 2", "Dozen 3"] {
            assert!(report.streaks[name].run_count > 0, "{} has no runs", name);
        }
        // 1..=12 in order, once per cycle
        assert_eq!(report.streaks["Dozen 1"].runs, vec![12; 10]);
    }

    #[test]
    fn test_report_runs_configured_bets() {
        let mut config = AppConfig::default();
        config.wager.gap_threshold = 1;
        config.wager.bets = vec![BetDefinition::new([0], 1.0)];

        let groups = GroupRegistry::with_presets().snapshot();
        let report = AnalysisReport::build(&[5, 5, 0], &groups, &config).unwrap();
        let wager = report.wager.unwrap();

        assert_eq!(wager.outcome.final_balance, 1.0);
        assert_eq!(wager.metrics.bets_lost, 1);
    }
}
