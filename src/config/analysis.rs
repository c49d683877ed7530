use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::engines::analysis::{CircularLayout, DEFAULT_RADIUS};
use crate::error::SpinbiasError;
use crate::groups::EUROPEAN_WHEEL;
use crate::types::{BoundaryMode, InvalidSymbolPolicy, Symbol, TriplePolicy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub neighbor_radius: usize,
    pub invalid_symbols: InvalidSymbolPolicy,
    pub triple_policy: TriplePolicy,
    pub boundary: BoundaryMode,
    pub wheel_layout: Vec<Symbol>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            neighbor_radius: DEFAULT_RADIUS,
            invalid_symbols: InvalidSymbolPolicy::Reject,
            triple_policy: TriplePolicy::Overlapping,
            boundary: BoundaryMode::Trailing,
            wheel_layout: EUROPEAN_WHEEL.to_vec(),
        }
    }
}

impl ConfigSection for AnalysisConfig {
    fn section_name() -> &'static str {
        "analysis"
    }

    fn validate(&self) -> Result<(), SpinbiasError> {
        if self.neighbor_radius == 0 {
            return Err(SpinbiasError::Configuration(
                "Neighbor radius must be at least 1".to_string(),
            ));
        }
        CircularLayout::new(&self.wheel_layout)
            .map_err(|e| SpinbiasError::Configuration(format!("Invalid wheel layout: {}", e)))?;
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Analysis".to_string(),
            fields: vec![
                FieldManifest::new(
                    "neighbor_radius",
                    "integer",
                    serde_json::json!(DEFAULT_RADIUS),
                    "Pockets on each side counted as a neighbor",
                )
                .with_range(1.0, 18.0),
                FieldManifest::new(
                    "invalid_symbols",
                    "enum",
                    serde_json::json!("Reject"),
                    "Reject or Skip spins outside 0-36",
                ),
                FieldManifest::new(
                    "triple_policy",
                    "enum",
                    serde_json::json!("Overlapping"),
                    "Whether a successful triple consumes its symbols",
                ),
                FieldManifest::new(
                    "boundary",
                    "enum",
                    serde_json::json!("Trailing"),
                    "Boundary symbols kept on bridging subsequences",
                ),
                FieldManifest::new(
                    "wheel_layout",
                    "list",
                    serde_json::json!(EUROPEAN_WHEEL.to_vec()),
                    "Circular pocket order used for neighbor matching",
                ),
            ],
        }
    }
}
