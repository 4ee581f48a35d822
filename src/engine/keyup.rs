//! Key-up dispatch: release bookkeeping and suppression of the ups whose
//! downs were consumed.

use crate::events::{KeyEvent, TapDecision};

use super::Engine;

impl Engine {
    /// Handles one raw key-up. Runs even while paused or disabled: a
    /// key-down consumed just before must still have its matching up
    /// suppressed, and a held space must not stick.
    pub(super) fn handle_keyup(&mut self, ev: &KeyEvent) -> TapDecision {
        self.session.on_key_up(ev.key);

        if self.pending.clear(ev.key) {
            tracing::trace!(key = ?ev.key, "key-up of a consumed key-down suppressed");
            return TapDecision::Swallow;
        }
        TapDecision::Pass
    }
}
