//! # rovo-settings
//!
//! Layered settings for the Rovo stream tools.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`RovoSettings::default()`]
//! 2. **User file**: `~/.rovo/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `ROVO_*` overrides (highest priority)
//!
//! The parser itself never reads settings; callers map
//! [`ParserSettings`] onto the parser's constructor options.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{apply_overrides, deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::{LoggingSettings, ParserSettings, ReplaySettings, RovoSettings};
