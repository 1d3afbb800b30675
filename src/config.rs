//! Application-level configuration loading, including the presence tunables.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "MATCH_PULSE_BACK_CONFIG_PATH";
/// Minutes a player may go without a heartbeat before counting as inactive.
const DEFAULT_STALE_AFTER_MINUTES: f64 = 2.0;
/// Minutes an abandoned presence record survives before the sweep drops it.
const DEFAULT_RETENTION_MINUTES: u64 = 24 * 60;

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    stale_after_minutes: f64,
    retention: Duration,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        stale_after_minutes = app_config.stale_after_minutes,
                        "loaded presence tunables from config"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Staleness threshold in minutes; a player whose last heartbeat is older
    /// than this (strictly) counts as inactive.
    pub fn stale_after_minutes(&self) -> f64 {
        self.stale_after_minutes
    }

    /// Retention window after which abandoned records are swept out.
    pub fn retention(&self) -> Duration {
        self.retention
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            stale_after_minutes: DEFAULT_STALE_AFTER_MINUTES,
            retention: Duration::from_secs(DEFAULT_RETENTION_MINUTES * 60),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    stale_after_minutes: Option<f64>,
    #[serde(default)]
    retention_minutes: Option<u64>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = AppConfig::default();
        Self {
            stale_after_minutes: value
                .stale_after_minutes
                .filter(|minutes| minutes.is_finite() && *minutes > 0.0)
                .unwrap_or(defaults.stale_after_minutes),
            retention: value
                .retention_minutes
                .map(|minutes| Duration::from_secs(minutes * 60))
                .unwrap_or(defaults.retention),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
