use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::HookType;
use crate::error::{Result, SidecarError};
use crate::queue::lock;

/// Directory under the user's home that holds all sidecar state.
pub const SIDECAR_DIR_NAME: &str = ".claude-sidecar";
/// Environment variable overriding the sidecar directory.
pub const SIDECAR_HOME_ENV: &str = "CLAUDE_SIDECAR_HOME";

pub const QUEUE_FILE_NAME: &str = "queue.json";
pub const LOCK_FILE_NAME: &str = "queue.lock";
pub const CONFIG_FILE_NAME: &str = "config.json";

/// What a bare `claude-sidecar` invocation does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultAction {
    #[default]
    Interactive,
    Help,
}

/// Sidecar configuration loaded from `<sidecar dir>/config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidecarConfig {
    #[serde(default = "default_lock_retries")]
    pub lock_retries: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    #[serde(default = "default_stale_lock_ms")]
    pub stale_lock_ms: u64,
    #[serde(default)]
    pub hook_variant: HookType,
    #[serde(default)]
    pub default_action: DefaultAction,
}

fn default_lock_retries() -> u32 {
    lock::DEFAULT_MAX_RETRIES
}

fn default_retry_delay_ms() -> u64 {
    lock::DEFAULT_RETRY_DELAY.as_millis() as u64
}

fn default_stale_lock_ms() -> u64 {
    lock::DEFAULT_STALE_AFTER.as_millis() as u64
}

impl Default for SidecarConfig {
    fn default() -> Self {
        Self {
            lock_retries: default_lock_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            stale_lock_ms: default_stale_lock_ms(),
            hook_variant: HookType::default(),
            default_action: DefaultAction::default(),
        }
    }
}

impl SidecarConfig {
    /// Load config from `<sidecar_dir>/config.json`
    pub fn load(sidecar_dir: &Path) -> Result<Self> {
        Self::load_from_path(&Self::config_path(sidecar_dir))
    }

    /// Load config, falling back to defaults if the file is unreadable.
    ///
    /// Used on the hook path, which must never fail because of configuration.
    pub fn load_or_default(sidecar_dir: &Path) -> Self {
        Self::load(sidecar_dir).unwrap_or_default()
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                SidecarError::Config(format!("Failed to read config file: {}", e))
            })?;
            let config: SidecarConfig = serde_json::from_str(&content).map_err(|e| {
                SidecarError::Config(format!("Failed to parse config JSON: {}", e))
            })?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn config_path(sidecar_dir: &Path) -> PathBuf {
        sidecar_dir.join(CONFIG_FILE_NAME)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn stale_after(&self) -> Duration {
        Duration::from_millis(self.stale_lock_ms)
    }
}

/// The per-user sidecar directory (`~/.claude-sidecar`)
pub fn default_sidecar_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(SIDECAR_DIR_NAME)
}

/// Resolve the sidecar directory: explicit path, then `CLAUDE_SIDECAR_HOME`, then home.
pub fn resolve_sidecar_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    match std::env::var(SIDECAR_HOME_ENV) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => default_sidecar_dir(),
    }
}

// ============================================================================
// Tests
// ============================================================================
