//! Key-down dispatch and the primary letter path.

use scriptswitch_core::{Decision, Key, Modifiers, TickMs, decide};

use crate::config::constants::{CONFIRM_DELAY_MS, NAV_DEFER_DELAY_MS, NAV_DEFER_WINDOW_MS};
use crate::events::{KeyEvent, TapDecision, Task};
use crate::platform::Host;

use super::{Engine, fetch_context};

impl Engine {
    /// Handles one raw key-down. Session transitions run for every key;
    /// only a plain letter can end up consumed.
    pub(super) fn handle_keydown<H: Host>(&mut self, host: &mut H, ev: &KeyEvent) -> TapDecision {
        self.session
            .on_key_down(ev.key, ev.mods, self.mode.believed_mode(), ev.at);

        if ev.key.is_navigation() || ev.key.is_modifier() {
            return TapDecision::Pass;
        }
        // Chorded shortcuts are none of our business; a source change they
        // cause arrives through the notification instead.
        if ev.mods.has_blocking() {
            return TapDecision::Pass;
        }
        if !ev.key.is_letter() {
            return TapDecision::Pass;
        }

        self.letter_keydown(host, ev.key, ev.mods, ev.at)
    }

    fn letter_keydown<H: Host>(
        &mut self,
        host: &mut H,
        key: Key,
        mods: Modifiers,
        now: TickMs,
    ) -> TapDecision {
        let gap = self.session.touch_typing(now);

        if self.session.recent_user_toggle(now) {
            return TapDecision::Pass;
        }

        // Right after navigation the reported caret can lag the real one.
        // Hold the keystroke back until it settles, then decide.
        if self.session.navigated_within(NAV_DEFER_WINDOW_MS, now) {
            self.pending.mark(key);
            host.schedule_once(NAV_DEFER_DELAY_MS, Task::DeferredDecision { key, mods, gap });
            return TapDecision::Swallow;
        }

        let mode = self.mode.sample_mode(host);
        let ctx = fetch_context(host);
        let input = self.policy_input(ctx, mode, gap, now);
        match decide(&input) {
            Decision::Switch(target) => {
                // decide() only switches off a real snapshot.
                let Some(snap) = ctx else {
                    return TapDecision::Pass;
                };
                self.pending.mark(key);
                host.schedule_once(
                    CONFIRM_DELAY_MS,
                    Task::ConfirmSwitch {
                        key,
                        mods,
                        target,
                        caret: snap.caret,
                        left: snap.left,
                    },
                );
                TapDecision::Swallow
            }
            Decision::Stay(reason) => {
                self.throttle.note_stay(reason, now);
                TapDecision::Pass
            }
        }
    }
}
