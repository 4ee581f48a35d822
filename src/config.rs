//! Persisted user preferences.
//!
//! Two values are configurable; every other window the engine times is a
//! fixed constant in [`constants`]. Loading goes through [`RawConfig`] and a
//! range validator, so an out-of-range file is rejected with a message
//! instead of silently arming the engine with nonsense windows.

pub(crate) mod config_validator;
pub mod constants;
pub mod raw_config;

use std::{
    io,
    path::{Path, PathBuf},
};

use constants::{DEFAULT_IDLE_THRESHOLD_MS, DEFAULT_NAV_WINDOW_MS};
pub use raw_config::RawConfig;
use serde::{Deserialize, Deserializer, Serialize};

const APP_DIR: &str = "scriptswitch";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_PATH_ENV: &str = "SCRIPTSWITCH_CONFIG";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Config {
    /// Window after a navigation key inside which a Latin-looking left
    /// character may flip Foreign to Latin.
    pub nav_window_ms: u32,
    /// Idle gap between keystrokes beyond which the same flip is allowed
    /// without navigation.
    pub idle_threshold_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nav_window_ms: DEFAULT_NAV_WINDOW_MS,
            idle_threshold_ms: DEFAULT_IDLE_THRESHOLD_MS,
        }
    }
}

/// Resolves the config file location: the `SCRIPTSWITCH_CONFIG` environment
/// variable when set, else the XDG config directory.
pub fn config_path() -> io::Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }

    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "neither SCRIPTSWITCH_CONFIG, XDG_CONFIG_HOME nor HOME is set",
            )
        })?;

    Ok(base.join(APP_DIR).join(CONFIG_FILE))
}

fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    let Some(dir) = path.parent() else {
        return Ok(());
    };
    std::fs::create_dir_all(dir)
}

fn confy_err(e: confy::ConfyError) -> io::Error {
    io::Error::other(e)
}

/// Loads the configuration, creating the file with defaults when absent.
pub fn load() -> io::Result<Config> {
    let path = config_path()?;
    ensure_parent_dir(&path)?;

    confy::load_path(&path).map_err(confy_err)
}

pub fn save(cfg: &Config) -> io::Result<()> {
    cfg.validate()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let path = config_path()?;
    ensure_parent_dir(&path)?;
    confy::store_path(path, cfg).map_err(confy_err)
}

impl TryFrom<RawConfig> for Config {
    type Error = String;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let cfg = Self {
            nav_window_ms: raw.nav_window_ms,
            idle_threshold_ms: raw.idle_threshold_ms,
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawConfig::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}
