//! The switching decision policy.
//!
//! [`decide`] is a pure function from one fully-sampled [`PolicyInput`] to a
//! [`Decision`]. Rules are evaluated strictly top to bottom and the first
//! match wins, so suppression always beats candidate selection. The caller
//! samples mode, context, and every timing window before calling; nothing in
//! here touches a clock or the platform.

use crate::script::{ScriptClass, classify_char, is_line_break};
use crate::types::{ContextSnapshot, Mode};

/// Everything the policy is allowed to look at, pre-sampled by the engine.
#[derive(Copy, Clone, Debug, Default)]
pub struct PolicyInput {
    /// Caret context, if the focused element exposed one.
    pub ctx: Option<ContextSnapshot>,
    /// Live input mode as last sampled, if readable.
    pub mode: Option<Mode>,
    /// An explicit user toggle happened within its grace window.
    pub user_toggle_recent: bool,
    /// A navigation key was pressed within the configured navigation window.
    pub navigated_recently: bool,
    /// The gap since the previous keystroke exceeds the configured idle
    /// threshold. A missing previous keystroke counts as exceeded.
    pub idle_exceeded: bool,
    /// A foreign typing session is in progress.
    pub session_active: bool,
    /// The composition hold from recent foreign typing is still live.
    pub composition_hold: bool,
    /// Space is physically held while Foreign (candidate navigation in a
    /// composer popup).
    pub space_held: bool,
    /// A session was recently dismissed by backspaces; mildly favor staying
    /// Foreign.
    pub canceled_hold: bool,
    /// Target mode currently barred by the anti-flap window, if any.
    pub anti_flap_barred: Option<Mode>,
}

/// Outcome of a policy evaluation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Decision {
    /// Leave the mode alone; the reason names the rule that fired.
    Stay(StayReason),
    /// Switch to the given mode before the keystroke is delivered.
    Switch(Mode),
}

/// Why the policy chose not to switch. Diagnostic only; every reason is a
/// no-op at runtime.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StayReason {
    UserToggleGrace,
    ContextUnavailable,
    Composing,
    CaretAtStart,
    LeftUnavailable,
    LineBreak,
    ModeUnknown,
    AlreadyLatin,
    AlreadyForeign,
    CanceledHold,
    MidWord,
    AntiFlap,
    SessionActive,
    CompositionHold,
    SpaceHeld,
    Neutral,
}

impl StayReason {
    /// Stable name for log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserToggleGrace => "user_toggle_grace",
            Self::ContextUnavailable => "context_unavailable",
            Self::Composing => "composing",
            Self::CaretAtStart => "caret_at_start",
            Self::LeftUnavailable => "left_unavailable",
            Self::LineBreak => "line_break",
            Self::ModeUnknown => "mode_unknown",
            Self::AlreadyLatin => "already_latin",
            Self::AlreadyForeign => "already_foreign",
            Self::CanceledHold => "canceled_hold",
            Self::MidWord => "mid_word",
            Self::AntiFlap => "anti_flap",
            Self::SessionActive => "session_active",
            Self::CompositionHold => "composition_hold",
            Self::SpaceHeld => "space_held",
            Self::Neutral => "neutral",
        }
    }
}

/// Evaluates the switching policy for one letter keystroke.
#[must_use]
pub fn decide(input: &PolicyInput) -> Decision {
    use Decision::{Stay, Switch};
    use StayReason as R;

    if input.user_toggle_recent {
        return Stay(R::UserToggleGrace);
    }
    let Some(ctx) = input.ctx else {
        return Stay(R::ContextUnavailable);
    };
    if ctx.composing {
        return Stay(R::Composing);
    }
    if ctx.caret == 0 {
        return Stay(R::CaretAtStart);
    }
    let Some(left) = ctx.left else {
        return Stay(R::LeftUnavailable);
    };
    if is_line_break(left) {
        return Stay(R::LineBreak);
    }

    match classify_char(left) {
        ScriptClass::Alnum => match input.mode {
            None => Stay(R::ModeUnknown),
            Some(Mode::Latin) => Stay(R::AlreadyLatin),
            Some(Mode::Foreign) => {
                if input.canceled_hold {
                    return Stay(R::CanceledHold);
                }
                // Leaving Foreign mid-word would cut a transliteration in
                // half; require the caret to have just moved here or a real
                // pause in typing.
                if !(input.navigated_recently || input.idle_exceeded) {
                    return Stay(R::MidWord);
                }
                if input.anti_flap_barred == Some(Mode::Latin) {
                    return Stay(R::AntiFlap);
                }
                Switch(Mode::Latin)
            }
        },
        ScriptClass::Foreign => match input.mode {
            None => Stay(R::ModeUnknown),
            Some(Mode::Foreign) => Stay(R::AlreadyForeign),
            Some(Mode::Latin) => {
                if input.anti_flap_barred == Some(Mode::Foreign) {
                    return Stay(R::AntiFlap);
                }
                Switch(Mode::Foreign)
            }
        },
        ScriptClass::Other => {
            if input.session_active {
                Stay(R::SessionActive)
            } else if input.composition_hold {
                Stay(R::CompositionHold)
            } else if input.mode == Some(Mode::Foreign) && input.space_held {
                Stay(R::SpaceHeld)
            } else {
                Stay(R::Neutral)
            }
        }
    }
}
