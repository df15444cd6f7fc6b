use crate::error::Result;
use crate::risk::FactorPolicy;
use crate::types::{RiskFactors, SubScores};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct GuardianConfig {
    pub factor_policy: FactorPolicy,
    /// Sub-scores used to seed a new session.
    pub defaults: SubScores,
}

impl Default for GuardianConfig {
    fn default() -> Self {
        Self {
            factor_policy: FactorPolicy::default(),
            defaults: RiskFactors::demo().scores(),
        }
    }
}

impl GuardianConfig {
    /// Demo display fields are kept when the configured scores match them.
    pub fn seed_factors(&self) -> Result<RiskFactors> {
        let demo = RiskFactors::demo();
        if self.defaults == demo.scores() {
            return Ok(demo);
        }
        RiskFactors::from_scores(&self.defaults, self.factor_policy)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    Some(config_dir()?.join("trail-guardian").join("config.json"))
}

pub fn read_config(path: &Path) -> Result<GuardianConfig> {
    let contents = fs::read_to_string(path)?;
    let config = serde_json::from_str(&contents)?;
    info!(path = %path.display(), "loaded configuration");
    Ok(config)
}

/// An explicit path must exist and parse; the per-user file is optional.
pub fn load_config(path: Option<&Path>) -> Result<GuardianConfig> {
    if let Some(path) = path {
        return read_config(path);
    }

    match default_config_path() {
        Some(default_path) if default_path.is_file() => read_config(&default_path),
        _ => {
            info!("no configuration file found, using defaults");
            Ok(GuardianConfig::default())
        }
    }
}

pub fn write_config(path: &Path, config: &GuardianConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_string_pretty(config)?;
    fs::write(path, data)?;
    Ok(())
}
