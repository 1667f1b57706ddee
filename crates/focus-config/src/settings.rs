//! Validated settings (converted from raw config)

use focus_core::EngineConfig;
use focus_util::{AppId, default_audit_log_path, default_data_dir};
use std::path::PathBuf;

use crate::schema::RawConfig;

/// Validated daemon settings with all defaults applied.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory holding the SQLite store.
    pub data_dir: PathBuf,
    /// Bypass audit log.
    pub audit_log_path: PathBuf,
    /// Engine tunables and exclusion set.
    pub engine: EngineConfig,
}

impl Settings {
    /// Convert a validated raw config, filling defaults.
    pub fn from_raw(raw: RawConfig) -> Self {
        let data_dir = raw.service.data_dir.unwrap_or_else(default_data_dir);
        let audit_log_path = raw
            .service
            .audit_log_path
            .unwrap_or_else(default_audit_log_path);

        let mut engine = EngineConfig::default();
        engine.own_app = raw.service.own_app.map(AppId::new);
        if let Some(secs) = raw.engine.cooldown_seconds {
            engine.cooldown_window = std::time::Duration::from_secs(secs);
        }
        if let Some(ms) = raw.engine.settle_delay_ms {
            engine.settle_delay = std::time::Duration::from_millis(ms);
        }
        if let Some(ms) = raw.engine.expiry_buffer_ms {
            engine.expiry_buffer = std::time::Duration::from_millis(ms);
        }
        if let Some(apps) = raw.engine.excluded_apps {
            engine.excluded_apps = apps.into_iter().map(AppId::new).collect();
        }

        Settings {
            data_dir,
            audit_log_path,
            engine,
        }
    }

    /// Path of the SQLite database inside the data directory.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("focusd.db")
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_raw(RawConfig::default())
    }
}
