//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    #[serde(default = "default_version")]
    pub config_version: u32,

    /// Service-level settings
    #[serde(default)]
    pub service: RawServiceConfig,

    /// Enforcement engine tunables
    #[serde(default)]
    pub engine: RawEngineConfig,
}

fn default_version() -> u32 {
    crate::CURRENT_CONFIG_VERSION
}

/// Service-level settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawServiceConfig {
    /// Data directory for the store (default: $XDG_DATA_HOME/focusd)
    pub data_dir: Option<PathBuf>,

    /// Bypass audit log path (default: <data_dir>/focus_log.md)
    pub audit_log_path: Option<PathBuf>,

    /// Our own app identifier, exempt from enforcement
    pub own_app: Option<String>,
}

/// Enforcement engine tunables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawEngineConfig {
    /// Cooldown after enforcing an app, in seconds
    pub cooldown_seconds: Option<u64>,

    /// Delay before showing the bypass prompt, in milliseconds
    pub settle_delay_ms: Option<u64>,

    /// Slack added to bypass expiry timers, in milliseconds
    pub expiry_buffer_ms: Option<u64>,

    /// Apps never subject to enforcement. Replaces the built-in list
    /// when present.
    pub excluded_apps: Option<Vec<String>>,
}
