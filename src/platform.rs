//! The platform seam: everything the engine needs from the host system,
//! expressed as traits.
//!
//! The crate contains no platform code. An embedding shell implements these
//! traits over its native facilities (event tap, input-source APIs,
//! accessibility queries, run-loop timers) and drives [`crate::Engine`] from
//! its callback thread. All four traits take `&mut self` so test hosts can
//! record calls without interior mutability.

use scriptswitch_core::{Mode, TickMs};

use crate::events::{KeyEvent, Task};

/// Caret position and neighboring characters of the focused text element,
/// as reported by the platform accessibility layer.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CaretContext {
    /// Caret offset in chars from the start of the element.
    pub caret: u32,
    /// Character immediately left of the caret.
    pub left: Option<char>,
    /// Character immediately right of the caret.
    pub right: Option<char>,
}

/// On-demand access to the text around the caret.
///
/// Unavailability (no focused field, an app that exposes nothing) is a normal
/// answer, not an error; the policy treats it as a no-op.
pub trait ContextProvider {
    fn caret_context(&mut self) -> Option<CaretContext>;

    /// Whether the focused element reports an uncommitted composition.
    fn is_composing(&mut self) -> bool;
}

/// The input-source switch primitive.
///
/// `select` is asynchronous on real platforms: the switch completes later and
/// is observed through an out-of-band change notification, which the shell
/// must forward to [`crate::Engine::on_source_change`].
pub trait SourceSelector {
    /// Live read of the active mode. `None` when the platform state cannot
    /// be interpreted as either mode.
    fn current_mode(&mut self) -> Option<Mode>;

    fn select(&mut self, mode: Mode) -> Result<(), SelectError>;
}

/// Injection of synthetic key events into the system event stream.
pub trait KeyInjector {
    /// Posts one event. The `marker` field must be round-tripped through the
    /// platform's private event data so the engine recognizes its own
    /// injections when they re-enter the tap. Returns `false` when the
    /// platform refused the event.
    fn post_key(&mut self, ev: &KeyEvent) -> bool;
}

/// One-shot delayed execution on the coordinating thread.
///
/// Contract: every scheduled task fires exactly once, no earlier than
/// `delay_ms` after scheduling, serialized with event delivery and with other
/// tasks. There is no cancellation; tasks re-validate on wake instead.
pub trait TaskQueue {
    fn schedule_once(&mut self, delay_ms: TickMs, task: Task);
}

/// Everything the engine needs from its embedder, in one bound.
pub trait Host: ContextProvider + SourceSelector + KeyInjector + TaskQueue {}

impl<T: ContextProvider + SourceSelector + KeyInjector + TaskQueue> Host for T {}

/// Failure to select an input source.
#[derive(Debug, thiserror::Error)]
pub enum SelectError {
    /// No installed input source matches the requested mode. There is no
    /// fallback; the system stays in whatever source is active.
    #[error("no installed input source matches {0:?} mode")]
    NoMatchingSource(Mode),
    /// The platform switch call itself failed.
    #[error("input source switch failed: {0}")]
    Backend(String),
}

/// Failure to establish the system-wide event interception facility.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// The user has not granted the input-monitoring permission.
    #[error("event interception unavailable: permission denied")]
    PermissionDenied,
    /// Any other reason the tap could not be installed.
    #[error("event interception unavailable: {0}")]
    TapUnavailable(String),
}
