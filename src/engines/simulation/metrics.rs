use crate::types::WagerOutcome;
use serde::{Deserialize, Serialize};

/// Summary of a wager simulation ledger
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WagerMetrics {
    pub final_balance: f64,
    pub net_profit: f64,
    pub rounds: usize,
    pub rounds_wagered: usize,
    pub bets_won: usize,
    pub bets_lost: usize,
    pub hit_rate: f64,
    pub total_staked: f64,
    pub peak_stake: f64,
    pub max_drawdown: f64,
    pub longest_losing_run: usize,
}

impl WagerMetrics {
    pub fn calculate(outcome: &WagerOutcome) -> Self {
        let initial_balance = outcome.history.first().copied().unwrap_or(outcome.final_balance);

        let mut metrics = Self {
            final_balance: outcome.final_balance,
            net_profit: outcome.final_balance - initial_balance,
            rounds: outcome.ledger.len(),
            ..Self::default()
        };

        let mut losing_run = 0;
        for round in &outcome.ledger {
            if round.amount_at_risk > 0.0 {
                metrics.rounds_wagered += 1;
                metrics.total_staked += round.amount_at_risk;
                metrics.peak_stake = metrics.peak_stake.max(round.amount_at_risk);
            }

            metrics.bets_won += round.bet_deltas.iter().filter(|&&d| d > 0.0).count();
            metrics.bets_lost += round.bet_deltas.iter().filter(|&&d| d < 0.0).count();

            if round.delta < 0.0 {
                losing_run += 1;
                metrics.longest_losing_run = metrics.longest_losing_run.max(losing_run);
            } else if round.delta > 0.0 {
                losing_run = 0;
            }
        }

        let settled = metrics.bets_won + metrics.bets_lost;
        if settled > 0 {
            metrics.hit_rate = metrics.bets_won as f64 / settled as f64 * 100.0;
        }
        metrics.max_drawdown = Self::max_drawdown(&outcome.history);

        metrics
    }

    /// Largest absolute fall from a running peak. Balances may start at
    /// zero, so this is not expressed as a percentage.
    fn max_drawdown(history: &[f64]) -> f64 {
        let mut peak = match history.first() {
            Some(&first) => first,
            None => return 0.0,
        };
        let mut max_dd: f64 = 0.0;

        for &value in history {
            if value > peak {
                peak = value;
            }
            max_dd = max_dd.max(peak - value);
        }

        max_dd
    }
}
