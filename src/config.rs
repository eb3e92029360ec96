use crate::error::{HarvestError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const INPUT_DIR_ENV: &str = "RO_HARVEST_INPUT_DIR";
pub const OUTPUT_ENV: &str = "RO_HARVEST_OUTPUT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Folder scanned for report workbooks
    pub input_dir: Option<PathBuf>,
    /// Master CSV
    pub output_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: None,
            output_path: PathBuf::from("master.csv"),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| HarvestError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("ro-harvest").join("config.json"))
    }

    /// Input folder: argument, then environment, then config file
    pub fn resolve_input_dir(&self, arg: Option<PathBuf>) -> Result<PathBuf> {
        arg.or_else(|| env_path(INPUT_DIR_ENV))
            .or_else(|| self.input_dir.clone())
            .ok_or(HarvestError::MissingInputDir)
    }

    /// Output CSV: argument, then environment, then config file
    pub fn resolve_output_path(&self, arg: Option<PathBuf>) -> PathBuf {
        arg.or_else(|| env_path(OUTPUT_ENV))
            .unwrap_or_else(|| self.output_path.clone())
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
