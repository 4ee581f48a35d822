//! Session and suppression bookkeeping derived from the raw key stream.
//!
//! All timing/flag state the policy consults lives in one [`SuppressionState`]
//! owned here, mutated only through the named transitions below. The engine
//! calls [`SessionTracker::on_key_down`] before every policy evaluation, so
//! the flags are current for the keystroke being decided.

use scriptswitch_core::{Key, Mode, Modifiers, TickMs};

use crate::config::constants::{
    ANTI_FLAP_MS, CANCELED_HOLD_MS, COMPOSITION_HOLD_MS, USER_TOGGLE_GRACE_MS,
};

/// Timestamps and flags distilled from the event stream.
///
/// `_until` fields are absolute expiry ticks; `_at` fields are last-occurrence
/// ticks compared against a window at query time.
#[derive(Debug, Default, Clone)]
pub struct SuppressionState {
    composition_hold_until: Option<TickMs>,
    session_active: bool,
    session_count: u32,
    last_navigation_at: Option<TickMs>,
    last_user_toggle_at: Option<TickMs>,
    last_typing_at: Option<TickMs>,
    space_held: bool,
    anti_flap_until: Option<TickMs>,
    anti_flap_mode: Option<Mode>,
    canceled_hold_until: Option<TickMs>,
}

/// Owner of [`SuppressionState`]; the tap callback is its only writer.
#[derive(Debug, Default)]
pub struct SessionTracker {
    state: SuppressionState,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the key-down transitions, in fixed precedence order, before the
    /// decision policy sees the keystroke.
    pub fn on_key_down(&mut self, key: Key, mods: Modifiers, mode: Option<Mode>, now: TickMs) {
        // Navigation moves the caret somewhere new: whatever was being
        // composed no longer sits left of the caret.
        if key.is_navigation() {
            if self.state.session_active {
                tracing::trace!("session ended by navigation");
            }
            self.state.last_navigation_at = Some(now);
            self.state.composition_hold_until = None;
            self.state.space_held = false;
            self.state.canceled_hold_until = None;
            self.state.session_count = 0;
            self.state.session_active = false;
            return;
        }

        if key == Key::Backspace {
            if mods.has_blocking() {
                self.cancel_session(now);
            } else if self.state.session_count > 0 {
                self.state.session_count -= 1;
                if self.state.session_count == 0 {
                    self.cancel_session(now);
                }
            }
            return;
        }

        if key.is_modifier() || mods.has_blocking() {
            return;
        }

        if key.is_commit() {
            if self.state.session_active {
                tracing::trace!(key = ?key, "session committed");
            }
            self.state.composition_hold_until = None;
            self.state.session_count = 0;
            self.state.session_active = false;
            return;
        }

        // Plain typing while the composer is active counts toward the foreign
        // session and keeps the composition hold alive.
        if mode == Some(Mode::Foreign) {
            self.state.composition_hold_until = Some(now + COMPOSITION_HOLD_MS);
            self.state.session_active = true;
            self.state.session_count += 1;
            if key == Key::Space {
                self.state.space_held = true;
            }
        }
    }

    pub fn on_key_up(&mut self, key: Key) {
        if key == Key::Space {
            self.state.space_held = false;
        }
    }

    /// Ends the session and opens the canceled hold: the user just erased a
    /// foreign word, so a Latin-looking left char is not a reason to flip.
    fn cancel_session(&mut self, now: TickMs) {
        if self.state.session_active {
            tracing::trace!("session canceled by backspace");
        }
        self.state.session_count = 0;
        self.state.session_active = false;
        self.state.canceled_hold_until = Some(now + CANCELED_HOLD_MS);
    }

    /// Returns the gap since the previous letter keystroke and stamps this
    /// one. `None` on the first letter seen.
    pub fn touch_typing(&mut self, now: TickMs) -> Option<TickMs> {
        let gap = self
            .state
            .last_typing_at
            .map(|t| now.saturating_sub(t));
        self.state.last_typing_at = Some(now);
        gap
    }

    pub fn note_user_toggle(&mut self, now: TickMs) {
        self.state.last_user_toggle_at = Some(now);
    }

    /// Arms the anti-flap window after a programmatic switch: for its
    /// duration the policy may not request the opposite mode back.
    pub fn note_program_switch(&mut self, mode: Mode, now: TickMs) {
        self.state.anti_flap_mode = Some(mode);
        self.state.anti_flap_until = Some(now + ANTI_FLAP_MS);
    }

    pub fn composition_hold_active(&self, now: TickMs) -> bool {
        self.state.composition_hold_until.is_some_and(|u| now < u)
    }

    pub fn session_active(&self) -> bool {
        self.state.session_active
    }

    #[cfg(test)]
    pub fn session_count(&self) -> u32 {
        self.state.session_count
    }

    pub fn space_held(&self) -> bool {
        self.state.space_held
    }

    pub fn navigated_within(&self, window: TickMs, now: TickMs) -> bool {
        self.state
            .last_navigation_at
            .is_some_and(|t| now.saturating_sub(t) <= window)
    }

    pub fn canceled_hold_active(&self, now: TickMs) -> bool {
        self.state.canceled_hold_until.is_some_and(|u| now < u)
    }

    pub fn recent_user_toggle(&self, now: TickMs) -> bool {
        self.state
            .last_user_toggle_at
            .is_some_and(|t| now.saturating_sub(t) <= USER_TOGGLE_GRACE_MS)
    }

    /// Target mode currently barred by anti-flap: the opposite of the last
    /// programmatic switch, while its window is live.
    pub fn anti_flap_barred(&self, now: TickMs) -> Option<Mode> {
        if self.state.anti_flap_until.is_some_and(|u| now < u) {
            self.state.anti_flap_mode.map(Mode::other)
        } else {
            None
        }
    }
}
