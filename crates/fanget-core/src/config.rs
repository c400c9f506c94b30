use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Retry policy parameters (optional `[retry]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per segment (including the first).
    pub max_attempts: u32,
    /// Delay in milliseconds before the second attempt.
    pub base_delay_ms: u64,
    /// Cap on the backoff delay, in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay_ms: 250,
            max_delay_secs: 20,
        }
    }
}

impl RetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_millis(self.base_delay_ms),
            max_delay: Duration::from_secs(self.max_delay_secs),
        }
    }
}

/// Global configuration loaded from `~/.config/fanget/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FangetConfig {
    /// Number of parts when the caller does not ask for a specific count.
    pub default_parts: usize,
    /// Cap on concurrent segment workers, independent of the part count.
    pub max_workers: usize,
    /// Connect timeout for the probe and each segment request, in seconds.
    pub connect_timeout_secs: u64,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
    /// Parent directory for request working directories (default: the
    /// system temp dir).
    #[serde(default)]
    pub work_root: Option<PathBuf>,
}

impl Default for FangetConfig {
    fn default() -> Self {
        Self {
            default_parts: 4,
            max_workers: 8,
            connect_timeout_secs: 15,
            retry: None,
            work_root: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fanget")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FangetConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FangetConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: FangetConfig = toml::from_str(&data)?;
    Ok(cfg)
}
