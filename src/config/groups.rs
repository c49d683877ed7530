use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::error::SpinbiasError;
use crate::groups::GroupRegistry;
use crate::types::{Group, GroupSpec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupsConfig {
    pub use_presets: bool,
    pub custom: Vec<GroupSpec>,
}

impl Default for GroupsConfig {
    fn default() -> Self {
        Self {
            use_presets: true,
            custom: Vec::new(),
        }
    }
}

impl GroupsConfig {
    /// Presets first (when enabled), then custom groups in file order.
    pub fn build_registry(&self) -> Result<GroupRegistry, SpinbiasError> {
        let mut registry = if self.use_presets {
            GroupRegistry::with_presets()
        } else {
            GroupRegistry::new()
        };
        for spec in &self.custom {
            registry.insert(Group::try_from(spec.clone())?)?;
        }
        Ok(registry)
    }
}

impl ConfigSection for GroupsConfig {
    fn section_name() -> &'static str {
        "groups"
    }

    fn validate(&self) -> Result<(), SpinbiasError> {
        self.build_registry().map(|_| ())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Groups".to_string(),
            fields: vec![FieldManifest::new(
                "use_presets",
                "bool",
                serde_json::json!(true),
                "Register wheel sectors, colors and dozens",
            )],
        }
    }
}
