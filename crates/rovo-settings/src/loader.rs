//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`RovoSettings::default()`]
//! 2. If `~/.rovo/settings.json` exists, deep-merge it over the defaults
//! 3. Apply `ROVO_*` environment overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::types::{MAX_REPLAY_CHUNK_SIZE, RovoSettings};

/// Env var toggling merge-all-chunks parsing.
pub const ENV_MERGE_ALL_CHUNKS: &str = "ROVO_MERGE_ALL_CHUNKS";
/// Env var overriding the log level.
pub const ENV_LOG_LEVEL: &str = "ROVO_LOG_LEVEL";
/// Env var overriding the replay chunk size.
pub const ENV_REPLAY_CHUNK_SIZE: &str = "ROVO_REPLAY_CHUNK_SIZE";

/// Path to the user settings file (`~/.rovo/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".rovo").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<RovoSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from `path` with env var overrides.
///
/// A missing file yields defaults; an unreadable or invalid file is an error.
pub fn load_settings_from_path(path: &Path) -> Result<RovoSettings> {
    let mut settings = load_file_layer(path)?;
    apply_overrides(&mut settings, |name| std::env::var(name).ok());
    settings.validate()?;
    Ok(settings)
}

/// Defaults merged with the file at `path`, without env overrides.
fn load_file_layer(path: &Path) -> Result<RovoSettings> {
    let defaults = serde_json::to_value(RovoSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    Ok(serde_json::from_value(merged)?)
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = match target_map.remove(&key) {
                    Some(target_val) => deep_merge(target_val, source_val),
                    None => source_val,
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply `ROVO_*` overrides using `lookup` to read variables.
///
/// Unparseable values are ignored with a warning, leaving the file/default value.
pub fn apply_overrides<F>(settings: &mut RovoSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(ENV_MERGE_ALL_CHUNKS) {
        match parse_bool(&raw) {
            Some(v) => settings.parser.merge_all_chunks = v,
            None => warn!(key = ENV_MERGE_ALL_CHUNKS, value = %raw, "invalid boolean env var, ignoring"),
        }
    }
    if let Some(raw) = lookup(ENV_LOG_LEVEL).filter(|v| !v.trim().is_empty()) {
        settings.logging.level = raw;
    }
    if let Some(raw) = lookup(ENV_REPLAY_CHUNK_SIZE) {
        match parse_usize_range(&raw, 1, MAX_REPLAY_CHUNK_SIZE) {
            Some(v) => settings.replay.chunk_size = v,
            None => warn!(key = ENV_REPLAY_CHUNK_SIZE, value = %raw, "invalid chunk size env var, ignoring"),
        }
    }
}

// ── Pure parsing functions ──────────────────────────────────────────────────

/// Parse a boolean: `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`, any case.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a `usize` within `min..=max`.
pub fn parse_usize_range(val: &str, min: usize, max: usize) -> Option<usize> {
    let n: usize = val.trim().parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
