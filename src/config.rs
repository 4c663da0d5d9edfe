//! Engine configuration: attempt-cap defaults per difficulty, the
//! wrong-guess flash duration, and the local-store namespace key.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

use crate::model::Difficulty;

/// Default location on disk where embedders drop the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/engine.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "LINKUP_ENGINE_CONFIG_PATH";

/// Immutable runtime configuration shared across the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    easy_attempts: u32,
    medium_attempts: u32,
    hard_attempts: u32,
    wrong_flash_ms: u64,
    local_store_key: String,
}

impl EngineConfig {
    /// Load the configuration from disk, falling back to baked-in defaults
    /// when the file is missing, unreadable, or malformed.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(path = %path.display(), "loaded engine config");
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse engine config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "engine config not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read engine config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Attempt cap applied when a puzzle does not carry an explicit override.
    pub fn default_max_attempts(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy_attempts,
            Difficulty::Medium => self.medium_attempts,
            Difficulty::Hard => self.hard_attempts,
        }
    }

    /// How long the UI should keep the wrong-guess flash raised before
    /// calling [`crate::session::GameSession::acknowledge_wrong`].
    pub fn wrong_flash(&self) -> Duration {
        Duration::from_millis(self.wrong_flash_ms)
    }

    /// Namespace key under which the local store keeps its per-puzzle record.
    pub fn local_store_key(&self) -> &str {
        &self.local_store_key
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            easy_attempts: 8,
            medium_attempts: 6,
            hard_attempts: 4,
            wrong_flash_ms: 1_200,
            local_store_key: "linkup.games".into(),
        }
    }
}

/// JSON representation of the configuration file.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    attempts: RawAttempts,
    wrong_flash_ms: Option<u64>,
    local_store_key: Option<String>,
}

/// Per-difficulty attempt caps inside the configuration file.
#[derive(Debug, Deserialize, Default)]
struct RawAttempts {
    easy: Option<u32>,
    medium: Option<u32>,
    hard: Option<u32>,
}

impl From<RawConfig> for EngineConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = EngineConfig::default();
        Self {
            easy_attempts: value.attempts.easy.unwrap_or(defaults.easy_attempts),
            medium_attempts: value.attempts.medium.unwrap_or(defaults.medium_attempts),
            hard_attempts: value.attempts.hard.unwrap_or(defaults.hard_attempts),
            wrong_flash_ms: value.wrong_flash_ms.unwrap_or(defaults.wrong_flash_ms),
            local_store_key: value
                .local_store_key
                .unwrap_or(defaults.local_store_key),
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
