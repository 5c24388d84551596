use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::transport::TransportOptions;

/// Global configuration loaded from `~/.config/fetchkit/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchkitConfig {
    /// Default concurrency bound for bounded fetches (`--jobs` overrides it).
    pub max_concurrent: usize,
    /// Seconds allowed for establishing a connection.
    pub connect_timeout_secs: u64,
    /// Optional ceiling in seconds for a whole fetch (None = no ceiling).
    /// Never applied to hashing.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Maximum number of redirects followed per request.
    pub max_redirections: u32,
    /// Optional User-Agent header.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for FetchkitConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 4,
            connect_timeout_secs: 30,
            request_timeout_secs: None,
            max_redirections: 10,
            user_agent: None,
        }
    }
}

impl FetchkitConfig {
    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            max_redirections: self.max_redirections,
            user_agent: self.user_agent.clone(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fetchkit")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchkitConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FetchkitConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: FetchkitConfig = toml::from_str(&data)?;
    Ok(cfg)
}
