use crate::{
    error::{Result, SpinbiasError},
    types::{BetDefinition, Symbol, MAX_SYMBOL},
};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetPhase {
    /// Counting consecutive misses before a wager is placed
    Waiting { gap: usize },
    Active,
}

/// Progression state of one bet across a simulation run.
#[derive(Debug, Clone)]
pub struct BetState {
    pub target_set: BTreeSet<Symbol>,
    pub base_amount: f64,
    pub current_amount: f64,
    pub phase: BetPhase,
}

impl BetState {
    pub fn new(definition: &BetDefinition) -> Result<Self> {
        if !definition.base_amount.is_finite() || definition.base_amount <= 0.0 {
            return Err(SpinbiasError::Validation(format!(
                "Bet amount must be positive, got {}",
                definition.base_amount
            )));
        }
        if let Some(bad) = definition.target_set.iter().find(|&&s| s > MAX_SYMBOL) {
            return Err(SpinbiasError::Validation(format!(
                "Bet target {} is outside 0..=36",
                bad
            )));
        }

        Ok(Self {
            target_set: definition.target_set.clone(),
            base_amount: definition.base_amount,
            current_amount: definition.base_amount,
            phase: BetPhase::Waiting { gap: 0 },
        })
    }

    pub fn is_active(&self) -> bool {
        self.phase == BetPhase::Active
    }

    pub fn gap(&self) -> usize {
        match self.phase {
            BetPhase::Waiting { gap } => gap,
            BetPhase::Active => 0,
        }
    }

    /// Stake riding on the next spin.
    pub fn at_risk(&self) -> f64 {
        if self.is_active() {
            self.current_amount
        } else {
            0.0
        }
    }

    /// Apply one spin and return the realized profit or loss.
    pub fn step(&mut self, symbol: Symbol, gap_threshold: usize, use_martingale: bool) -> f64 {
        let hit = self.target_set.contains(&symbol);

        match self.phase {
            BetPhase::Waiting { gap } => {
                if hit {
                    self.phase = BetPhase::Waiting { gap: 0 };
                } else if gap + 1 >= gap_threshold {
                    self.current_amount = self.base_amount;
                    self.phase = BetPhase::Active;
                } else {
                    self.phase = BetPhase::Waiting { gap: gap + 1 };
                }
                0.0
            }
            BetPhase::Active => {
                let stake = self.current_amount;
                if hit {
                    self.current_amount = self.base_amount;
                    self.phase = BetPhase::Waiting { gap: 0 };
                    stake
                } else {
                    if use_martingale {
                        self.double_stake();
                    }
                    -stake
                }
            }
        }
    }

    /// The stake stops growing once doubling would overflow to infinity,
    /// which an unbroken losing run reaches after roughly 1000 losses.
    fn double_stake(&mut self) {
        let doubled = self.current_amount * 2.0;
        if doubled.is_finite() {
            self.current_amount = doubled;
        } else {
            log::warn!(
                "Stake capped at {} after an unbroken losing run",
                self.current_amount
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bet(targets: &[Symbol], amount: f64) -> BetState {
        BetState::new(&BetDefinition::new(targets.iter().copied(), amount)).unwrap()
    }

    #[test]
    fn test_activates_after_gap_threshold() {
        let mut state = bet(&[0], 1.0);
        assert_eq!(state.step(5, 2, true), 0.0);
        assert_eq!(state.gap(), 1);
        assert_eq!(state.step(5, 2, true), 0.0);
        assert!(state.is_active());
        assert_eq!(state.at_risk(), 1.0);
    }

    #[test]
    fn test_hit_while_waiting_resets_gap() {
        let mut state = bet(&[0], 1.0);
        state.step(5, 3, true);
        state.step(5, 3, true);
        state.step(0, 3, true);
        assert_eq!(state.phase, BetPhase::Waiting { gap: 0 });
    }

    #[test]
    fn test_martingale_doubles_then_resets() {
        let mut state = bet(&[0], 2.0);
        state.step(5, 1, true);
        assert_eq!(state.step(5, 1, true), -2.0);
        assert_eq!(state.step(5, 1, true), -4.0);
        assert_eq!(state.current_amount, 8.0);
        assert_eq!(state.step(0, 1, true), 8.0);
        assert_eq!(state.current_amount, 2.0);
        assert!(!state.is_active());
    }

    #[test]
    fn test_flat_stake_without_martingale() {
        let mut state = bet(&[0], 2.0);
        state.step(5, 1, false);
        assert_eq!(state.step(5, 1, false), -2.0);
        assert_eq!(state.step(5, 1, false), -2.0);
        assert_eq!(state.current_amount, 2.0);
    }

    #[test]
    fn test_rejects_bad_definitions() {
        for amount in [0.0, -1.0, f64::NAN] {
            let def = BetDefinition::new([1], amount);
            assert!(matches!(BetState::new(&def), Err(SpinbiasError::Validation(_))));
        }
        let def = BetDefinition::new([40], 1.0);
        assert!(BetState::new(&def).is_err());
    }

    #[test]
    fn test_stake_stays_finite_on_endless_losses() {
        let mut state = bet(&[], 1.0);
        state.step(5, 1, true);
        for _ in 0..1100 {
            assert!(state.step(5, 1, true).is_finite());
        }
        assert!(state.at_risk().is_finite());
        assert!(state.at_risk() > 1e300);
    }
}
