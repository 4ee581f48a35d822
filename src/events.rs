//! Values that cross the engine/host boundary: key events as the tap delivers
//! them, the pass/swallow verdict handed back, and the one-shot tasks the
//! engine asks the host to fire later.

use scriptswitch_core::{Key, Mode, Modifiers, TickMs};

/// Private signature stamped on the extra-info field of every event this
/// engine injects. Chosen so it cannot collide with timestamps or key codes a
/// platform would put there.
pub(crate) const REPLAY_MARKER: u64 = 0x5357_4954_4348_4552;

/// One raw or synthesized keystroke, as seen by the event tap.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct KeyEvent {
    pub key: Key,
    pub mods: Modifiers,
    /// `true` for key-down, `false` for key-up.
    pub down: bool,
    /// Event time on the host's monotonic tick clock.
    pub at: TickMs,
    /// Opaque extra-info value round-tripped through the platform event. The
    /// engine stamps its own injections; adapters must preserve it verbatim.
    pub marker: Option<u64>,
}

impl KeyEvent {
    #[must_use]
    pub fn down(key: Key, mods: Modifiers, at: TickMs) -> Self {
        Self {
            key,
            mods,
            down: true,
            at,
            marker: None,
        }
    }

    #[must_use]
    pub fn up(key: Key, mods: Modifiers, at: TickMs) -> Self {
        Self {
            key,
            mods,
            down: false,
            at,
            marker: None,
        }
    }

    /// True when this event is one of the engine's own injections.
    #[must_use]
    pub fn is_replay(&self) -> bool {
        self.marker == Some(REPLAY_MARKER)
    }

    /// The marked down+up pair replacing one consumed key-down. Key and
    /// modifiers are carried over unchanged.
    pub(crate) fn replay_pair(key: Key, mods: Modifiers, at: TickMs) -> [Self; 2] {
        let mut down = Self::down(key, mods, at);
        let mut up = Self::up(key, mods, at);
        down.marker = Some(REPLAY_MARKER);
        up.marker = Some(REPLAY_MARKER);
        [down, up]
    }
}

/// What the tap callback should do with the event it just handed us.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TapDecision {
    /// Deliver the original event to the focused application.
    Pass,
    /// Consume the event; the engine owns its replay.
    Swallow,
}

impl TapDecision {
    #[must_use]
    pub fn should_swallow(self) -> bool {
        matches!(self, Self::Swallow)
    }
}

/// A delayed continuation the engine schedules through the host's task queue
/// and expects back, exactly once, via [`crate::Engine::run_task`].
///
/// Tasks carry the inputs captured at scheduling time; everything else is
/// re-validated against live state on wake.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Task {
    /// Decide for a letter consumed right after navigation, once the caret
    /// has settled. `gap` is the idle gap captured when the original was
    /// consumed, measured against the keystroke before it.
    DeferredDecision {
        key: Key,
        mods: Modifiers,
        gap: Option<TickMs>,
    },
    /// Commit a synchronous switch decision, but only if the context it was
    /// based on is still in place.
    ConfirmSwitch {
        key: Key,
        mods: Modifiers,
        target: Mode,
        caret: u32,
        left: Option<char>,
    },
    /// Re-check an armed enforcement window once, to catch a switch that was
    /// still in flight when the corrective request went out.
    EnforceRecheck,
}
