use super::{
    evolution::EvolutionConfig, mission::MissionConfig, physics::PhysicsConfig,
    scoring::ScoringConfig, traits::{ConfigManifest, ConfigSection},
};
use crate::error::LanderError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Environment prefix for layered overrides, e.g. `MOONLANDER__EVOLUTION__SEED=7`
pub const ENV_PREFIX: &str = "MOONLANDER";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub physics: PhysicsConfig,
    pub mission: MissionConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), LanderError> {
        self.evolution.validate()?;
        self.physics.validate()?;
        self.mission.validate()?;
        self.scoring.validate()?;
        Ok(())
    }

    pub fn manifests(&self) -> Vec<ConfigManifest> {
        vec![
            self.evolution.to_manifest(),
            self.physics.to_manifest(),
            self.mission.to_manifest(),
            self.scoring.to_manifest(),
        ]
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), LanderError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| LanderError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;

        *self.config.write().unwrap_or_else(|e| e.into_inner()) = config;
        Ok(())
    }

    /// Load defaults, then the file if one is given, then `MOONLANDER__*` environment
    /// overrides. A given file that does not exist is an error.
    pub fn load_layered<P: AsRef<Path>>(&self, path: Option<P>) -> Result<(), LanderError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path.as_ref()).required(true));
        }
        let settings = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;

        log::debug!("Loaded layered configuration: {:?}", config);
        *self.config.write().unwrap_or_else(|e| e.into_inner()) = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), LanderError> {
        let toml_str = {
            let config = self.config.read().unwrap_or_else(|e| e.into_inner());
            toml::to_string_pretty(&*config)?
        };

        std::fs::write(path, toml_str)
            .map_err(|e| LanderError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Apply `f` and keep the result only if it still validates
    pub fn update<F>(&self, f: F) -> Result<(), LanderError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().unwrap_or_else(|e| e.into_inner());
        let mut candidate = config.clone();
        f(&mut candidate);
        candidate.validate()?;
        *config = candidate;
        Ok(())
    }
}
