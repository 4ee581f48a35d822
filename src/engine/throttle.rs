//! Rate-limited tracing of pass-through outcomes.
//!
//! The letter path runs for every keystroke in the system and most of them
//! pass through; logging each one would swamp any collector. Correctness
//! never depends on this module.

use scriptswitch_core::{StayReason, TickMs};

use crate::config::constants::DIAG_THROTTLE_MS;

#[derive(Debug, Default)]
pub(super) struct DiagThrottle {
    last_emit: Option<TickMs>,
    suppressed: u32,
}

impl DiagThrottle {
    /// Traces the stay reason, at most once per throttle window.
    pub(super) fn note_stay(&mut self, reason: StayReason, now: TickMs) {
        if self
            .last_emit
            .is_some_and(|t| now.saturating_sub(t) < DIAG_THROTTLE_MS)
        {
            self.suppressed = self.suppressed.saturating_add(1);
            return;
        }
        tracing::trace!(
            reason = reason.as_str(),
            suppressed = self.suppressed,
            "keystroke passed through"
        );
        self.last_emit = Some(now);
        self.suppressed = 0;
    }
}
