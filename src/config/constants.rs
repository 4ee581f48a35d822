//! Fixed timing windows of the switching engine.
//!
//! Only the two windows in [`crate::config::Config`] are user preferences;
//! everything here is engine tuning and changes with the code.

use std::ops::RangeInclusive;

use scriptswitch_core::TickMs;

/// Grace window after an explicit user toggle during which no automatic
/// decision is made.
pub const USER_TOGGLE_GRACE_MS: TickMs = 450;

/// A letter arriving this soon after a navigation key is decided on a delay,
/// once the caret has settled.
pub const NAV_DEFER_WINDOW_MS: TickMs = 120;

/// Settle delay of the post-navigation deferred decision.
pub const NAV_DEFER_DELAY_MS: TickMs = 40;

/// Settle delay before a synchronous switch decision is committed.
pub const CONFIRM_DELAY_MS: TickMs = 7;

/// How long one foreign keystroke keeps the composition hold alive.
pub const COMPOSITION_HOLD_MS: TickMs = 1500;

/// Hold after a session is erased by backspaces, during which the engine
/// does not flip to Latin.
pub const CANCELED_HOLD_MS: TickMs = 600;

/// How long a just-requested mode is defended against external reversal.
pub const ENFORCE_WINDOW_MS: TickMs = 600;

/// Delay of the single enforcement re-check.
pub const ENFORCE_RECHECK_DELAY_MS: TickMs = 20;

/// Window inside which identical source-change notifications count as
/// duplicates of one platform event.
pub const SOURCE_CHANGE_DEDUP_MS: TickMs = 200;

/// Window after a programmatic switch during which the opposite switch is
/// barred.
pub const ANTI_FLAP_MS: TickMs = 300;

/// Minimum spacing of pass-through diagnostics.
pub const DIAG_THROTTLE_MS: TickMs = 250;

/// Default for [`crate::config::Config::nav_window_ms`].
pub const DEFAULT_NAV_WINDOW_MS: u32 = 300;

/// Default for [`crate::config::Config::idle_threshold_ms`].
pub const DEFAULT_IDLE_THRESHOLD_MS: u32 = 200;

/// Accepted range for the navigation window preference. The floor keeps the
/// Foreign-to-Latin flip reachable; zero would disable it with no
/// replacement.
pub const NAV_WINDOW_RANGE_MS: RangeInclusive<u32> = 50..=5000;

/// Accepted range for the idle threshold preference.
pub const IDLE_THRESHOLD_RANGE_MS: RangeInclusive<u32> = 50..=2000;
