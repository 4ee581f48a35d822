//! Believed-mode tracking, switch intents, and the enforcement window.
//!
//! The true input source is platform state that changes asynchronously; this
//! tracker keeps the engine's best-effort belief, remembers the most recent
//! switch request (ours or observed), and for a short window after our own
//! requests actively reverts external changes away from the requested mode.

use scriptswitch_core::{Mode, TickMs};

use crate::config::constants::{
    ENFORCE_RECHECK_DELAY_MS, ENFORCE_WINDOW_MS, SOURCE_CHANGE_DEDUP_MS,
};
use crate::events::Task;
use crate::platform::{SelectError, SourceSelector, TaskQueue};

/// Who caused the most recent mode change request.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum IntentOrigin {
    /// This engine asked for it.
    Program,
    /// An explicit user action during its grace window.
    User,
    /// An external change nothing explains.
    Unknown,
}

/// The most recent mode-change request made or observed.
///
/// A `Program` intent starts unfulfilled and is marked fulfilled when the
/// matching change notification arrives. Observed changes are recorded
/// already fulfilled and are never reclassified as `Program` afterwards.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SwitchIntent {
    pub at: TickMs,
    pub mode: Mode,
    pub origin: IntentOrigin,
    pub fulfilled: bool,
}

/// Outcome of [`ModeTracker::request_mode`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RequestOutcome {
    /// The switch primitive was invoked; completion arrives asynchronously.
    Requested,
    /// The platform is already in the requested mode; nothing was invoked.
    AlreadyCurrent,
    /// The switch primitive reported failure; no fallback is attempted.
    Failed,
}

#[derive(Copy, Clone, Debug)]
struct Enforcement {
    mode: Mode,
    until: TickMs,
}

#[derive(Debug, Default)]
pub struct ModeTracker {
    believed: Option<Mode>,
    intent: Option<SwitchIntent>,
    enforcement: Option<Enforcement>,
    recheck_scheduled: bool,
    last_change: Option<(String, TickMs)>,
    warned_missing: [bool; 2],
}

impl ModeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live mode read; refreshes the belief when the platform answers.
    pub fn sample_mode<S: SourceSelector>(&mut self, src: &mut S) -> Option<Mode> {
        let live = src.current_mode();
        if live.is_some() {
            self.believed = live;
        }
        live
    }

    pub fn believed_mode(&self) -> Option<Mode> {
        self.believed
    }

    pub fn intent(&self) -> Option<SwitchIntent> {
        self.intent
    }

    /// Requests a switch to `target`. Never invokes the switch primitive when
    /// the platform already reports `target`.
    pub fn request_mode<S: SourceSelector>(
        &mut self,
        src: &mut S,
        target: Mode,
        now: TickMs,
    ) -> RequestOutcome {
        if self.sample_mode(src) == Some(target) {
            return RequestOutcome::AlreadyCurrent;
        }

        self.intent = Some(SwitchIntent {
            at: now,
            mode: target,
            origin: IntentOrigin::Program,
            fulfilled: false,
        });

        match src.select(target) {
            Ok(()) => {
                tracing::debug!(mode = target.as_str(), "switch requested");
                RequestOutcome::Requested
            }
            Err(e) => {
                // A failed request must not linger as a pending intent a
                // later unrelated notification could "fulfill".
                self.intent = None;
                self.report_select_failure(target, &e);
                RequestOutcome::Failed
            }
        }
    }

    fn report_select_failure(&mut self, target: Mode, e: &SelectError) {
        let idx = match target {
            Mode::Foreign => 0,
            Mode::Latin => 1,
        };
        if matches!(e, SelectError::NoMatchingSource(_)) {
            if !self.warned_missing[idx] {
                self.warned_missing[idx] = true;
                tracing::warn!(mode = target.as_str(), error = %e, "input source switch failed");
            }
        } else {
            tracing::warn!(mode = target.as_str(), error = %e, "input source switch failed");
        }
    }

    /// Handles one out-of-band source-change notification.
    ///
    /// `user_hint` is whether an explicit user toggle is inside its grace
    /// window, which classifies otherwise unexplained changes as `User`.
    pub fn on_external_change<H: SourceSelector + TaskQueue>(
        &mut self,
        host: &mut H,
        source_id: &str,
        now: TickMs,
        user_hint: bool,
    ) {
        // The platform fires duplicate notifications for one change; a
        // sliding window on the last identical id absorbs them.
        if let Some((last_id, at)) = &self.last_change
            && last_id == source_id
            && now.saturating_sub(*at) <= SOURCE_CHANGE_DEDUP_MS
        {
            self.last_change = Some((source_id.to_owned(), now));
            tracing::trace!(source_id, "duplicate change notification dropped");
            return;
        }
        self.last_change = Some((source_id.to_owned(), now));

        let observed = self.sample_mode(host);
        tracing::trace!(source_id, observed = ?observed.map(Mode::as_str), "source changed");

        match (&mut self.intent, observed) {
            (Some(intent), Some(mode))
                if intent.origin == IntentOrigin::Program
                    && !intent.fulfilled
                    && intent.mode == mode =>
            {
                intent.fulfilled = true;
            }
            (_, Some(mode)) => {
                let origin = if user_hint {
                    IntentOrigin::User
                } else {
                    IntentOrigin::Unknown
                };
                self.intent = Some(SwitchIntent {
                    at: now,
                    mode,
                    origin,
                    fulfilled: true,
                });
            }
            // Mode unreadable: nothing to classify.
            (_, None) => {}
        }

        self.apply_enforcement(host, observed, now);
    }

    /// While armed, an observed mode other than the enforced one gets one
    /// immediate corrective request plus at most one scheduled re-check.
    fn apply_enforcement<H: SourceSelector + TaskQueue>(
        &mut self,
        host: &mut H,
        observed: Option<Mode>,
        now: TickMs,
    ) {
        let Some(enf) = self.enforcement else {
            return;
        };
        if now >= enf.until {
            self.enforcement = None;
            return;
        }
        if observed.is_some_and(|m| m != enf.mode) {
            tracing::debug!(mode = enf.mode.as_str(), "external reversal inside enforcement window, reverting");
            let _ = self.request_mode(host, enf.mode, now);
            if !self.recheck_scheduled {
                self.recheck_scheduled = true;
                host.schedule_once(ENFORCE_RECHECK_DELAY_MS, Task::EnforceRecheck);
            }
        }
    }

    /// Arms the enforcement window for a just-requested mode.
    pub fn enforce(&mut self, mode: Mode, now: TickMs) {
        self.enforcement = Some(Enforcement {
            mode,
            until: now + ENFORCE_WINDOW_MS,
        });
        self.recheck_scheduled = false;
    }

    /// One-shot follow-up after a corrective request: catches a switch that
    /// was still in flight when the corrective went out. Issues at most one
    /// more request; never reschedules itself.
    pub fn enforce_recheck<S: SourceSelector>(&mut self, src: &mut S, now: TickMs) {
        self.recheck_scheduled = false;
        let Some(enf) = self.enforcement else {
            return;
        };
        if now >= enf.until {
            self.enforcement = None;
            return;
        }
        if self.sample_mode(src).is_some_and(|m| m != enf.mode) {
            tracing::debug!(mode = enf.mode.as_str(), "enforce recheck: still reverted, correcting once more");
            let _ = self.request_mode(src, enf.mode, now);
        }
    }

    /// Disarms enforcement; used when the engine is paused so no corrective
    /// fires against a deliberate manual change.
    pub fn clear_enforcement(&mut self) {
        self.enforcement = None;
        self.recheck_scheduled = false;
    }

    #[cfg(test)]
    pub fn enforcement_armed(&self) -> bool {
        self.enforcement.is_some()
    }
}
