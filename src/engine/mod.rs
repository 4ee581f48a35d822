//! The event interceptor and replayer.
//!
//! [`Engine`] sits in the host's global key-event tap. For every plain
//! alphabetic key-down it samples the live mode, snapshots the caret context,
//! runs the decision policy, and either lets the event through or consumes it,
//! switches the input source, and replays a marked synthetic copy. Everything
//! else passes through, updating suppression state on the way.
//!
//! The engine owns all mutable state and never touches the platform directly:
//! the host is handed in per call, and delayed work comes back through
//! [`Engine::run_task`]. No clocks are read here; event timestamps and task
//! wake times carry the time.

mod keydown;
mod keyup;
mod replay;
mod throttle;

use scriptswitch_core::{ContextSnapshot, Decision, Key, Mode, Modifiers, PolicyInput, TickMs, decide};

use crate::config::Config;
use crate::events::{KeyEvent, TapDecision, Task};
use crate::mode::{ModeTracker, RequestOutcome};
use crate::platform::{Host, SetupError};
use crate::session::SessionTracker;

use self::replay::PendingReplays;
use self::throttle::DiagThrottle;

pub struct Engine {
    nav_window_ms: TickMs,
    idle_threshold_ms: TickMs,
    session: SessionTracker,
    mode: ModeTracker,
    pending: PendingReplays,
    throttle: DiagThrottle,
    paused: bool,
    disabled: bool,
}

impl Engine {
    pub fn new(cfg: &Config) -> Self {
        Self {
            nav_window_ms: TickMs::from(cfg.nav_window_ms),
            idle_threshold_ms: TickMs::from(cfg.idle_threshold_ms),
            session: SessionTracker::new(),
            mode: ModeTracker::new(),
            pending: PendingReplays::default(),
            throttle: DiagThrottle::default(),
            paused: false,
            disabled: false,
        }
    }

    /// Tap entry point: decides the fate of one raw event.
    ///
    /// Must stay cheap; it runs synchronously on the event-tap thread for
    /// every keystroke in the system.
    pub fn handle_key<H: Host>(&mut self, host: &mut H, ev: &KeyEvent) -> TapDecision {
        if ev.is_replay() {
            // Our own injection re-entering the tap. The consumed original
            // already ran the session transitions; running them again would
            // double-count.
            return TapDecision::Pass;
        }
        if !ev.down {
            return self.handle_keyup(ev);
        }
        if self.disabled || self.paused {
            return TapDecision::Pass;
        }
        self.handle_keydown(host, ev)
    }

    /// Delayed-continuation entry point; the host calls this on the
    /// coordinating thread for every task it accepted via
    /// [`crate::platform::TaskQueue::schedule_once`].
    pub fn run_task<H: Host>(&mut self, host: &mut H, task: Task, now: TickMs) {
        match task {
            Task::DeferredDecision { key, mods, gap } => {
                self.run_deferred(host, key, mods, gap, now);
            }
            Task::ConfirmSwitch {
                key,
                mods,
                target,
                caret,
                left,
            } => self.run_confirm(host, key, mods, target, caret, left, now),
            Task::EnforceRecheck => self.mode.enforce_recheck(host, now),
        }
    }

    /// Whether a woken continuation may still act. Pause, the fail-open
    /// latch, and the user-toggle grace can all have arrived after the task
    /// was scheduled.
    fn can_act(&self, now: TickMs) -> bool {
        !self.disabled && !self.paused && !self.session.recent_user_toggle(now)
    }

    /// Post-navigation continuation: the caret has settled, so decide now.
    /// The consumed original is replayed no matter what was decided.
    fn run_deferred<H: Host>(
        &mut self,
        host: &mut H,
        key: Key,
        mods: Modifiers,
        gap: Option<TickMs>,
        now: TickMs,
    ) {
        if self.can_act(now) {
            let mode = self.mode.sample_mode(host);
            let ctx = fetch_context(host);
            let input = self.policy_input(ctx, mode, gap, now);
            match decide(&input) {
                Decision::Switch(target) => self.commit_switch(host, target, now),
                Decision::Stay(reason) => {
                    tracing::trace!(reason = reason.as_str(), "deferred decision stayed");
                }
            }
        }
        self.post_replay(host, key, mods, now);
    }

    /// Stability continuation for a synchronous switch decision: commit only
    /// if the caret and its left character are where they were when the
    /// decision was made. The replay goes out either way.
    #[allow(clippy::too_many_arguments)]
    fn run_confirm<H: Host>(
        &mut self,
        host: &mut H,
        key: Key,
        mods: Modifiers,
        target: Mode,
        caret: u32,
        left: Option<char>,
        now: TickMs,
    ) {
        if self.can_act(now) {
            let fresh = host.caret_context();
            if fresh.is_some_and(|c| c.caret == caret && c.left == left) {
                self.commit_switch(host, target, now);
            } else {
                tracing::trace!(
                    mode = target.as_str(),
                    "context moved during settle, switch dropped"
                );
            }
        }
        self.post_replay(host, key, mods, now);
    }

    /// Issues the switch and, when one actually went out, arms anti-flap and
    /// enforcement for it.
    fn commit_switch<H: Host>(&mut self, host: &mut H, target: Mode, now: TickMs) {
        match self.mode.request_mode(host, target, now) {
            RequestOutcome::Requested => {
                self.session.note_program_switch(target, now);
                self.mode.enforce(target, now);
            }
            // The platform got there on its own; nothing to guard.
            RequestOutcome::AlreadyCurrent => {}
            // Already reported by the tracker.
            RequestOutcome::Failed => {}
        }
    }

    /// Forwards a platform input-source change notification.
    pub fn on_source_change<H: Host>(&mut self, host: &mut H, source_id: &str, now: TickMs) {
        if self.disabled {
            return;
        }
        let user_hint = self.session.recent_user_toggle(now);
        self.mode.on_external_change(host, source_id, now, user_hint);
    }

    /// Called when the platform interception facility could not be
    /// established. Latches the engine off; every event then passes through
    /// unmodified. Logged once, no retry.
    pub fn on_setup_failure(&mut self, err: &SetupError) {
        if self.disabled {
            return;
        }
        self.disabled = true;
        tracing::warn!(error = %err, "event interception unavailable, auto-switching disabled");
    }

    /// The contract for explicit "force mode X" UI actions: records the user
    /// toggle (opening its grace window) immediately before requesting.
    pub fn force_mode<H: Host>(&mut self, host: &mut H, mode: Mode, now: TickMs) -> RequestOutcome {
        self.session.note_user_toggle(now);
        self.mode.request_mode(host, mode, now)
    }

    /// Records an explicit user toggle performed outside the engine (menu,
    /// hotkey) so decisions are suppressed for the grace window.
    pub fn mark_user_toggle(&mut self, now: TickMs) {
        self.session.note_user_toggle(now);
    }

    /// Pauses or resumes automatic switching. Pausing disarms any live
    /// enforcement window so a deliberate manual change is not fought.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        if paused {
            self.mode.clear_enforcement();
        }
        tracing::debug!(paused, "auto-switching pause toggled");
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Assembles the policy's view of the world for one evaluation.
    fn policy_input(
        &self,
        ctx: Option<ContextSnapshot>,
        mode: Option<Mode>,
        gap: Option<TickMs>,
        now: TickMs,
    ) -> PolicyInput {
        PolicyInput {
            ctx,
            mode,
            user_toggle_recent: self.session.recent_user_toggle(now),
            navigated_recently: self.session.navigated_within(self.nav_window_ms, now),
            // No prior keystroke counts as an exceeded gap.
            idle_exceeded: gap.is_none_or(|g| g > self.idle_threshold_ms),
            session_active: self.session.session_active(),
            composition_hold: self.session.composition_hold_active(now),
            space_held: self.session.space_held(),
            canceled_hold: self.session.canceled_hold_active(now),
            anti_flap_barred: self.session.anti_flap_barred(now),
        }
    }
}

/// One combined caret/composition fetch. Absent context stays `None`; the
/// policy turns that into a no-op.
fn fetch_context<H: Host>(host: &mut H) -> Option<ContextSnapshot> {
    let ctx = host.caret_context()?;
    Some(ContextSnapshot {
        caret: ctx.caret,
        left: ctx.left,
        right: ctx.right,
        composing: host.is_composing(),
    })
}
