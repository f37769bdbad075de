use crate::error::{PlannerError, Result};
use crate::model::{Category, Priority};
use crate::persist::EmptySlotPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for the planner, stored in `<data-dir>/config.json`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlannerConfig {
    /// What saving an empty collection does to its slot.
    #[serde(default)]
    pub empty_slot: EmptySlotPolicy,

    /// Category given to new items when none is specified.
    #[serde(default)]
    pub default_category: Category,

    /// Priority given to new tasks when none is specified.
    #[serde(default)]
    pub default_priority: Priority,
}

impl PlannerConfig {
    /// Keys accepted by [`PlannerConfig::get`] and [`PlannerConfig::set`].
    pub const KEYS: [&'static str; 3] = ["empty-slot", "default-category", "default-priority"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(PlannerError::Io)?;
        let config: PlannerConfig =
            serde_json::from_str(&content).map_err(PlannerError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(PlannerError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(PlannerError::Serialization)?;
        fs::write(config_path, content).map_err(PlannerError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "empty-slot" => Ok(self.empty_slot.to_string()),
            "default-category" => Ok(self.default_category.to_string()),
            "default-priority" => Ok(self.default_priority.to_string()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "empty-slot" => self.empty_slot = value.parse()?,
            "default-category" => {
                self.default_category = value
                    .parse()
                    .map_err(|_| PlannerError::Config(format!("Unknown category: {}", value)))?
            }
            "default-priority" => {
                self.default_priority = value
                    .parse()
                    .map_err(|_| PlannerError::Config(format!("Unknown priority: {}", value)))?
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }

    /// All settings as `(key, value)` pairs, in [`PlannerConfig::KEYS`] order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        Self::KEYS
            .iter()
            .filter_map(|key| self.get(key).ok().map(|value| (*key, value)))
            .collect()
    }
}

fn unknown_key(key: &str) -> PlannerError {
    PlannerError::Config(format!(
        "Unknown config key: {} (expected one of {})",
        key,
        PlannerConfig::KEYS.join(", ")
    ))
}
