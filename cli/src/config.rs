// Configuration management for the anonroute CLI
//
// Cross-platform config stored in:
// - macOS: ~/Library/Application Support/anonroute/config.json
// - Linux: ~/.config/anonroute/config.json
// - Windows: %APPDATA%\anonroute\config.json

use anonroute_core::SimulationConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Defaults for `anonroute run`
    pub simulation: SimulationConfig,

    /// Directory for DOT and JSON output when `--out` is not given
    pub output_dir: Option<String>,
}

impl Config {
    /// Get the config directory path (cross-platform)
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("anonroute");

        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;

        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file()?)
    }

    /// Load config from `path`, or write and return the default if absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path).context("Failed to read config file")?;
            let config: Config =
                serde_json::from_str(&contents).context("Failed to parse config file")?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, contents).context("Failed to write config file")?;
        Ok(())
    }

    /// Set a config value
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "num_nodes" => {
                self.simulation.num_nodes = value.parse().context("Invalid number")?;
            }
            "num_edges" => {
                self.simulation.num_edges = value.parse().context("Invalid number")?;
            }
            "hide_ratio" => {
                let ratio: f64 = value.parse().context("Invalid ratio")?;
                if !(0.0..=1.0).contains(&ratio) {
                    anyhow::bail!("hide_ratio must be between 0 and 1");
                }
                self.simulation.hide_ratio = ratio;
            }
            "seed" => {
                self.simulation.seed = if value.is_empty() {
                    None
                } else {
                    Some(value.parse().context("Invalid seed")?)
                };
            }
            "output_dir" => {
                self.output_dir = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            _ => anyhow::bail!("Unknown config key: {}", key),
        }
        Ok(())
    }

    /// Get a config value
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "num_nodes" => Some(self.simulation.num_nodes.to_string()),
            "num_edges" => Some(self.simulation.num_edges.to_string()),
            "hide_ratio" => Some(self.simulation.hide_ratio.to_string()),
            "seed" => self.simulation.seed.map(|s| s.to_string()),
            "output_dir" => self.output_dir.clone(),
            _ => None,
        }
    }

    /// List all config values
    pub fn list(&self) -> Vec<(String, String)> {
        vec![
            ("num_nodes".to_string(), self.simulation.num_nodes.to_string()),
            ("num_edges".to_string(), self.simulation.num_edges.to_string()),
            ("hide_ratio".to_string(), self.simulation.hide_ratio.to_string()),
            (
                "seed".to_string(),
                self.simulation
                    .seed
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "(random)".to_string()),
            ),
            (
                "output_dir".to_string(),
                self.output_dir.clone().unwrap_or_else(|| "(none)".to_string()),
            ),
        ]
    }
}
