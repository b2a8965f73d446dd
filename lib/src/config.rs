// lib/src/config.rs
//! CLI configuration, loaded from an optional YAML file with defaults for
//! every field.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "clinicdb_config.yaml";
pub const DEFAULT_DATA_PATH: &str = "clinicdb_records.json";
pub const DEFAULT_HISTORY_PATH: &str = "clinicdb_cli_history.txt";
pub const DEFAULT_PROMPT: &str = "ClinicDB> ";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub data_path: PathBuf,
    pub history_path: PathBuf,
    pub prompt: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            history_path: PathBuf::from(DEFAULT_HISTORY_PATH),
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

/// Load the CLI config. A missing file (or no path at all) yields the
/// defaults; an unreadable or malformed file logs a warning and also falls
/// back rather than refusing to start.
pub fn load_cli_config(path: Option<&Path>) -> CliConfig {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
    if !path.exists() {
        return CliConfig::default();
    }
    match fs::read_to_string(path) {
        Ok(raw) => match serde_yaml::from_str::<CliConfig>(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("ignoring malformed config {}: {}", path.display(), e);
                CliConfig::default()
            }
        },
        Err(e) => {
            warn!("could not read config {}: {}", path.display(), e);
            CliConfig::default()
        }
    }
}
