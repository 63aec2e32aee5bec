//! Settings type definitions.
//!
//! Field names are camelCase on disk. Every section is `#[serde(default)]`,
//! so a settings file only needs the keys it overrides.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SettingsError};

/// Largest accepted replay chunk size, in bytes.
pub const MAX_REPLAY_CHUNK_SIZE: usize = 1_048_576;

/// Root settings type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RovoSettings {
    /// Response parser behaviour.
    pub parser: ParserSettings,
    /// Log output.
    pub logging: LoggingSettings,
    /// Transcript replay tool.
    pub replay: ReplaySettings,
}

impl RovoSettings {
    /// Reject values that deserialize but make no sense.
    pub fn validate(&self) -> Result<()> {
        if self.replay.chunk_size > MAX_REPLAY_CHUNK_SIZE {
            return Err(SettingsError::InvalidValue(format!(
                "replay.chunkSize {} exceeds {MAX_REPLAY_CHUNK_SIZE}",
                self.replay.chunk_size
            )));
        }
        if self.logging.level.trim().is_empty() {
            return Err(SettingsError::InvalidValue(
                "logging.level must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Response parser behaviour.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParserSettings {
    /// Hold streamed text until the part completes instead of emitting every increment.
    pub merge_all_chunks: bool,
}

/// Log output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Transcript replay tool.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReplaySettings {
    /// Bytes fed per `parse` call; `0` feeds the whole transcript at once.
    pub chunk_size: usize,
}
