use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::error::SpinbiasError;
use crate::types::{BetDefinition, MAX_SYMBOL};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WagerConfig {
    pub gap_threshold: usize,
    pub use_martingale: bool,
    pub initial_balance: f64,
    pub bets: Vec<BetDefinition>,
}

impl Default for WagerConfig {
    fn default() -> Self {
        Self {
            gap_threshold: 3,
            use_martingale: true,
            initial_balance: 0.0,
            bets: Vec::new(),
        }
    }
}

impl ConfigSection for WagerConfig {
    fn section_name() -> &'static str {
        "wager"
    }

    // An empty bet list is allowed here; the simulator rejects it when run.
    fn validate(&self) -> Result<(), SpinbiasError> {
        if self.gap_threshold < 1 {
            return Err(SpinbiasError::Configuration(
                "Gap threshold must be at least 1".to_string(),
            ));
        }
        if !self.initial_balance.is_finite() {
            return Err(SpinbiasError::Configuration(
                "Initial balance must be finite".to_string(),
            ));
        }
        if let Some(bet) = self.bets.iter().find(|b| !b.base_amount.is_finite() || b.base_amount <= 0.0) {
            return Err(SpinbiasError::Configuration(format!(
                "Bet amount must be positive, got {}",
                bet.base_amount
            )));
        }
        if let Some(target) = self
            .bets
            .iter()
            .flat_map(|b| b.target_set.iter())
            .find(|&&s| s > MAX_SYMBOL)
        {
            return Err(SpinbiasError::Configuration(format!(
                "Bet target {} is outside 0..=36",
                target
            )));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Wager".to_string(),
            fields: vec![
                FieldManifest::new(
                    "gap_threshold",
                    "integer",
                    serde_json::json!(3),
                    "Consecutive misses before a bet is placed",
                )
                .with_range(1.0, 100.0),
                FieldManifest::new(
                    "use_martingale",
                    "bool",
                    serde_json::json!(true),
                    "Double the stake after every loss",
                ),
                FieldManifest::new(
                    "initial_balance",
                    "float",
                    serde_json::json!(0.0),
                    "Balance before the first spin",
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation() {
        assert!(WagerConfig::default().validate().is_ok());

        let config = WagerConfig {
            gap_threshold: 0,
            ..WagerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = WagerConfig {
            bets: vec![BetDefinition::new([1], 0.0)],
            ..WagerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_out_of_range_targets() {
        let config = WagerConfig {
            bets: vec![BetDefinition::new([1], 1.0), BetDefinition::new([0, 37], 1.0)],
            ..WagerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SpinbiasError::Configuration(msg)) if msg.contains("37")
        ));
    }
}
