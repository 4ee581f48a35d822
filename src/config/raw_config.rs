//! The on-disk shape of the configuration, before range checking.

use serde::{Deserialize, Serialize};

use crate::config::constants::{DEFAULT_IDLE_THRESHOLD_MS, DEFAULT_NAV_WINDOW_MS};

/// Exactly the fields of [`crate::config::Config`], accepting whatever serde
/// can read. Range checking happens in the `TryFrom<RawConfig>` conversion,
/// so a hand-edited file fails the load with a message instead of arming the
/// engine with nonsense windows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawConfig {
    #[serde(default = "default_nav_window_ms")]
    pub nav_window_ms: u32,
    #[serde(default = "default_idle_threshold_ms")]
    pub idle_threshold_ms: u32,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            nav_window_ms: DEFAULT_NAV_WINDOW_MS,
            idle_threshold_ms: DEFAULT_IDLE_THRESHOLD_MS,
        }
    }
}

fn default_nav_window_ms() -> u32 {
    DEFAULT_NAV_WINDOW_MS
}

fn default_idle_threshold_ms() -> u32 {
    DEFAULT_IDLE_THRESHOLD_MS
}
