//! Pending-suppression bookkeeping and synthetic replay of consumed keys.

use scriptswitch_core::{Key, Modifiers, TickMs};

use crate::events::KeyEvent;
use crate::platform::KeyInjector;

use super::Engine;

/// Letters whose key-down was consumed and whose next key-up must be
/// suppressed. Only plain letters are ever consumed, so one bit per letter
/// suffices.
#[derive(Debug, Default)]
pub(super) struct PendingReplays(u32);

impl PendingReplays {
    pub(super) fn mark(&mut self, key: Key) {
        if let Some(bit) = Self::bit(key) {
            self.0 |= bit;
        }
    }

    /// Clears the mark for `key`, reporting whether it was set.
    pub(super) fn clear(&mut self, key: Key) -> bool {
        let Some(bit) = Self::bit(key) else {
            return false;
        };
        let was_marked = self.0 & bit != 0;
        self.0 &= !bit;
        was_marked
    }

    fn bit(key: Key) -> Option<u32> {
        match key {
            Key::Letter(c @ b'a'..=b'z') => Some(1 << (c - b'a')),
            _ => None,
        }
    }
}

impl Engine {
    /// Posts the marked down+up pair replacing one consumed key-down.
    /// Called exactly once per consumed original, from the continuation that
    /// owns it.
    pub(super) fn post_replay<I: KeyInjector>(
        &mut self,
        injector: &mut I,
        key: Key,
        mods: Modifiers,
        at: TickMs,
    ) {
        let [down, up] = KeyEvent::replay_pair(key, mods, at);
        let down_ok = injector.post_key(&down);
        let up_ok = injector.post_key(&up);
        if !down_ok || !up_ok {
            tracing::error!(key = ?key, down_ok, up_ok, "failed to post synthetic replay pair");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_and_clear_track_per_letter() {
        let mut pending = PendingReplays::default();
        pending.mark(Key::Letter(b'a'));
        pending.mark(Key::Letter(b'z'));

        assert!(pending.clear(Key::Letter(b'a')));
        assert!(!pending.clear(Key::Letter(b'a')));
        assert!(pending.clear(Key::Letter(b'z')));
    }

    #[test]
    fn non_letters_are_never_marked() {
        let mut pending = PendingReplays::default();
        pending.mark(Key::Space);
        pending.mark(Key::Other(0x41));

        assert!(!pending.clear(Key::Space));
        assert!(!pending.clear(Key::Other(0x41)));
    }
}
