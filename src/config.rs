use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::api;
use crate::extract;
use crate::summary::DayPolicy;

/// Runtime configuration, read from `config.toml`.
///
/// Required keys: `nonapa_user_id`, `season`, `region_id`, `realm_id`,
/// `dest_format`, `dest_path`. Optional: `base_url`, `day_policy`
/// (`"offset"` or `"delta-match"`), `data_occurrence`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub nonapa_user_id: u64,
    pub season: u32,
    pub region_id: u32,
    pub realm_id: u32,
    pub dest_format: String,
    pub dest_path: PathBuf,

    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub day_policy: DayPolicy,
    #[serde(default = "default_data_occurrence")]
    pub data_occurrence: usize,
}

fn default_base_url() -> String {
    api::DEFAULT_BASE_URL.to_string()
}

fn default_data_occurrence() -> usize {
    extract::DEFAULT_DATA_OCCURRENCE
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))?;
        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("failed to parse {}: {}", path.display(), e))?;
        Ok(config)
    }
}
