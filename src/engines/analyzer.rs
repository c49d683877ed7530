use crate::{
    config::{AnalysisConfig, WagerConfig},
    data::sequence::apply_policy,
    engines::{
        analysis::{
            bridging_subsequences, compute_cross_follow, compute_pair_stats, compute_streaks,
            count_ordered_membership, neighbor, CircularLayout,
        },
        simulation::WagerSimulator,
    },
    error::Result,
    types::{
        BetDefinition, CrossFollowStats, Group, InvalidSymbolPolicy, NeighborStats,
        OrderedMembership, PairStats, StreakStats, Symbol, WagerOutcome,
    },
};
use std::borrow::Cow;
use std::collections::HashMap;

/// Entry point for front ends: applies the configured invalid-symbol
/// policy and defaults, then delegates to the individual analyzers.
#[derive(Debug, Clone)]
pub struct SpinAnalyzer {
    config: AnalysisConfig,
    layout: CircularLayout,
}

impl SpinAnalyzer {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        let layout = CircularLayout::new(&config.wheel_layout)?;
        Ok(Self { config, layout })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// The sequence the analyzers will see under the configured policy.
    pub fn prepare<'a>(&self, sequence: &'a [Symbol]) -> Result<Cow<'a, [Symbol]>> {
        match self.config.invalid_symbols {
            InvalidSymbolPolicy::Reject => Ok(Cow::Borrowed(sequence)),
            InvalidSymbolPolicy::Skip => Ok(Cow::Owned(apply_policy(
                sequence,
                InvalidSymbolPolicy::Skip,
            )?)),
        }
    }

    pub fn streaks(
        &self,
        sequence: &[Symbol],
        ordered_groups: &[Group],
    ) -> Result<HashMap<String, StreakStats>> {
        compute_streaks(&self.prepare(sequence)?, ordered_groups)
    }

    pub fn pairs(&self, sequence: &[Symbol], group: &Group) -> Result<PairStats> {
        compute_pair_stats(&self.prepare(sequence)?, group, self.config.triple_policy)
    }

    pub fn cross_follow(
        &self,
        sequence: &[Symbol],
        group_a: &Group,
        group_b: &Group,
    ) -> Result<CrossFollowStats> {
        compute_cross_follow(&self.prepare(sequence)?, group_a, group_b)
    }

    /// Bridging subsequences of `group_a` classified by their first two symbols.
    pub fn ordered_membership(
        &self,
        sequence: &[Symbol],
        group_a: &Group,
        group_b: &Group,
    ) -> Result<OrderedMembership> {
        let subsequences =
            bridging_subsequences(group_a, &self.prepare(sequence)?, self.config.boundary)?;
        Ok(count_ordered_membership(&subsequences, group_a, group_b))
    }

    pub fn neighbors(&self, sequence: &[Symbol]) -> Result<NeighborStats> {
        neighbor::compute_with_layout(
            &self.prepare(sequence)?,
            &self.layout,
            self.config.neighbor_radius,
        )
    }

    pub fn simulate(
        &self,
        sequence: &[Symbol],
        bets: &[BetDefinition],
        wager: &WagerConfig,
    ) -> Result<WagerOutcome> {
        WagerSimulator::new(wager.gap_threshold, wager.use_martingale, wager.initial_balance)?
            .run(&self.prepare(sequence)?, bets)
    }
}
