use crate::{
    engines::simulation::bet::BetState,
    error::{Result, SpinbiasError},
    types::{ensure_sequence, BetDefinition, RoundRecord, Symbol, WagerOutcome},
};

/// Replays a spin sequence against a set of gap-triggered progressive bets.
#[derive(Debug, Clone)]
pub struct WagerSimulator {
    gap_threshold: usize,
    use_martingale: bool,
    initial_balance: f64,
}

impl WagerSimulator {
    pub fn new(gap_threshold: usize, use_martingale: bool, initial_balance: f64) -> Result<Self> {
        if gap_threshold < 1 {
            return Err(SpinbiasError::Configuration(
                "Gap threshold must be at least 1".to_string(),
            ));
        }
        if !initial_balance.is_finite() {
            return Err(SpinbiasError::Configuration(
                "Initial balance must be finite".to_string(),
            ));
        }

        Ok(Self {
            gap_threshold,
            use_martingale,
            initial_balance,
        })
    }

    pub fn run(&self, sequence: &[Symbol], bets: &[BetDefinition]) -> Result<WagerOutcome> {
        if bets.is_empty() {
            return Err(SpinbiasError::Configuration(
                "At least one bet is required".to_string(),
            ));
        }
        ensure_sequence(sequence)?;

        let mut states = bets.iter().map(BetState::new).collect::<Result<Vec<_>>>()?;

        let mut balance = self.initial_balance;
        let mut cumulative_profit = 0.0;
        let mut cumulative_loss = 0.0;
        let mut history = Vec::with_capacity(sequence.len() + 1);
        let mut ledger = Vec::with_capacity(sequence.len());
        history.push(balance);

        for (index, &symbol) in sequence.iter().enumerate() {
            let amount_at_risk: f64 = states.iter().map(BetState::at_risk).sum();

            let bet_deltas: Vec<f64> = states
                .iter_mut()
                .map(|state| state.step(symbol, self.gap_threshold, self.use_martingale))
                .collect();
            let net: f64 = bet_deltas.iter().sum();

            balance += net;
            cumulative_profit += net.max(0.0);
            cumulative_loss += (-net).max(0.0);
            history.push(balance);

            ledger.push(RoundRecord {
                index,
                symbol,
                amount_at_risk,
                delta: net,
                balance,
                cumulative_profit,
                cumulative_loss,
                bet_deltas,
            });
        }

        log::debug!(
            "Simulated {} spins over {} bets, final balance {}",
            sequence.len(),
            bets.len(),
            balance
        );

        Ok(WagerOutcome {
            final_balance: balance,
            history,
            ledger,
        })
    }
}

pub fn simulate_wager(
    sequence: &[Symbol],
    bets: &[BetDefinition],
    gap_threshold: usize,
    use_martingale: bool,
    initial_balance: f64,
) -> Result<WagerOutcome> {
    WagerSimulator::new(gap_threshold, use_martingale, initial_balance)?.run(sequence, bets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_hit_reset_pattern() {
        let bets = vec![BetDefinition::new([0], 1.0)];
        let outcome = simulate_wager(&[3, 4, 0, 4, 4, 0], &bets, 2, true, 0.0).unwrap();

        let at_risk: Vec<f64> = outcome.ledger.iter().map(|r| r.amount_at_risk).collect();
        let deltas: Vec<f64> = outcome.ledger.iter().map(|r| r.delta).collect();

        assert_eq!(at_risk, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
        assert_eq!(deltas, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
        assert_eq!(outcome.ledger[2].balance, 1.0);
        assert_eq!(outcome.history, vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        assert_eq!(outcome.final_balance, 2.0);
    }

    #[test]
    fn test_net_delta_across_bets() {
        let bets = vec![BetDefinition::new([0], 1.0), BetDefinition::new([7], 2.0)];
        let outcome = simulate_wager(&[5, 0], &bets, 1, true, 10.0).unwrap();

        // Both active after the first spin; 0 wins bet one and loses bet two
        let round = &outcome.ledger[1];
        assert_eq!(round.amount_at_risk, 3.0);
        assert_eq!(round.bet_deltas, vec![1.0, -2.0]);
        assert_eq!(round.delta, -1.0);
        assert_eq!(round.balance, 9.0);
        assert_eq!(round.cumulative_profit, 0.0);
        assert_eq!(round.cumulative_loss, 1.0);
    }

    #[test]
    fn test_configuration_errors() {
        let bets = vec![BetDefinition::new([0], 1.0)];
        assert!(matches!(
            simulate_wager(&[1], &bets, 0, true, 0.0),
            Err(SpinbiasError::Configuration(_))
        ));
        assert!(matches!(
            simulate_wager(&[1], &[], 1, true, 0.0),
            Err(SpinbiasError::Configuration(_))
        ));
        assert!(matches!(
            simulate_wager(&[1, 99], &bets, 1, true, 0.0),
            Err(SpinbiasError::Data { index: 1, value: 99 })
        ));
    }

    #[test]
    fn test_empty_sequence_keeps_initial_balance() {
        let bets = vec![BetDefinition::new([0], 1.0)];
        let outcome = simulate_wager(&[], &bets, 1, true, 5.0).unwrap();
        assert_eq!(outcome.final_balance, 5.0);
        assert_eq!(outcome.history, vec![5.0]);
        assert!(outcome.ledger.is_empty());
    }
}
