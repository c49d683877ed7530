use super::{
    analysis::AnalysisConfig,
    groups::GroupsConfig,
    traits::{ConfigManifest, ConfigSection},
    wager::WagerConfig,
};
use crate::error::SpinbiasError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

pub const ENV_PREFIX: &str = "SPINBIAS";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub analysis: AnalysisConfig,
    pub wager: WagerConfig,
    pub groups: GroupsConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), SpinbiasError> {
        self.analysis.validate()?;
        self.wager.validate()?;
        self.groups.validate()?;
        Ok(())
    }

    pub fn manifests(&self) -> Vec<ConfigManifest> {
        vec![
            self.analysis.to_manifest(),
            self.wager.to_manifest(),
            self.groups.to_manifest(),
        ]
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SpinbiasError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SpinbiasError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| SpinbiasError::Configuration(format!("Failed to parse config: {}", e)))?;

        self.replace(config)
    }

    /// Optional TOML file overlaid with `SPINBIAS__SECTION__FIELD`
    /// environment variables.
    pub fn load_layered<P: AsRef<Path>>(&self, path: P) -> Result<(), SpinbiasError> {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| SpinbiasError::Configuration(format!("Failed to load config: {}", e)))?;

        self.replace(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SpinbiasError> {
        let config = self.get();
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| SpinbiasError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| SpinbiasError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Apply `f` to a copy and commit it only if the result validates.
    pub fn update<F>(&self, f: F) -> Result<(), SpinbiasError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.get();
        f(&mut config);
        self.replace(config)
    }

    fn replace(&self, config: AppConfig) -> Result<(), SpinbiasError> {
        config.validate()?;
        *self
            .config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = config;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
