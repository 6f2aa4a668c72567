//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.lectern/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::scanner::DEFAULT_SCAN_DEPTH;
use crate::gateway::providers::bible_api::DEFAULT_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LecternConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_translation: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GatewayConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SearchConfig {
    pub scan_depth: Option<u32>,
    pub book_notice_secs: Option<u64>,
    pub scan_notice_secs: Option<u64>,
    pub highlight_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TRANSLATION: &str = "kjv";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_BOOK_NOTICE_SECS: u64 = 4;
pub const DEFAULT_SCAN_NOTICE_SECS: u64 = 5;
pub const DEFAULT_HIGHLIGHT_SECS: u64 = 3;

/// How long transient UI states stay visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// "No book found" and "select a translation" notices.
    pub book_notice: Duration,
    /// Verse search result notices.
    pub scan_notice: Duration,
    /// Highlight on a verse reached from a search result.
    pub highlight: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            book_notice: Duration::from_secs(DEFAULT_BOOK_NOTICE_SECS),
            scan_notice: Duration::from_secs(DEFAULT_SCAN_NOTICE_SECS),
            highlight: Duration::from_secs(DEFAULT_HIGHLIGHT_SECS),
        }
    }
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub translation: String,
    pub base_url: String,
    pub timeout: Duration,
    pub scan_depth: u32,
    pub timings: Timings,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.lectern/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".lectern").join("config.toml"))
}

/// Load config from `~/.lectern/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `LecternConfig::default()`.
pub fn load_config() -> Result<LecternConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(LecternConfig::default())
        }
    }
}

pub fn load_config_from(path: &Path) -> Result<LecternConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(LecternConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: LecternConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Lectern Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_translation = "kjv"        # Or set LECTERN_TRANSLATION env var

# [gateway]
# base_url = "https://bible-api.com" # Or set LECTERN_BASE_URL env var
# timeout_secs = 15

# [search]
# scan_depth = 3                     # Chapters per book read by verse search
# book_notice_secs = 4
# scan_notice_secs = 5
# highlight_secs = 3
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// CLI overrides (None = flag not given).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub translation: Option<String>,
    pub base_url: Option<String>,
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &LecternConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Translation: CLI → env → config → default
    let translation = cli
        .translation
        .clone()
        .or_else(|| std::env::var("LECTERN_TRANSLATION").ok())
        .or_else(|| config.general.default_translation.clone())
        .unwrap_or_else(|| DEFAULT_TRANSLATION.to_string());

    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("LECTERN_BASE_URL").ok())
        .or_else(|| config.gateway.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let search = &config.search;
    let defaults = Timings::default();
    let timings = Timings {
        book_notice: search
            .book_notice_secs
            .map_or(defaults.book_notice, Duration::from_secs),
        scan_notice: search
            .scan_notice_secs
            .map_or(defaults.scan_notice, Duration::from_secs),
        highlight: search
            .highlight_secs
            .map_or(defaults.highlight, Duration::from_secs),
    };

    ResolvedConfig {
        translation,
        base_url,
        timeout: Duration::from_secs(config.gateway.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        // Zero depth is treated as unset
        scan_depth: search.scan_depth.filter(|d| *d > 0).unwrap_or(DEFAULT_SCAN_DEPTH),
        timings,
    }
}
