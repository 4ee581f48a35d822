//! Shared plain-data types used across the decision core and the engine.

/// Milliseconds on the host's monotonic tick clock.
///
/// The core never reads a clock; callers stamp events and task wakeups with
/// this value and thread it through explicitly.
pub type TickMs = u64;

/// The two input modes the switcher arbitrates between.
///
/// "Unknown" is deliberately not a variant: a mode that could not be read is
/// an `Option::None` at the query site, never a stored third state.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Mode {
    /// A non-Latin script input source with composition (e.g. a CJK composer).
    Foreign,
    /// Direct Latin alphanumeric input.
    Latin,
}

impl Mode {
    /// The opposite mode.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Foreign => Self::Latin,
            Self::Latin => Self::Foreign,
        }
    }

    /// Stable lowercase name for log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Foreign => "foreign",
            Self::Latin => "latin",
        }
    }
}

/// Snapshot of the text context around the caret, captured immediately before
/// a decision.
///
/// Snapshots are throwaway values: fetched fresh for every decision and for
/// every re-validation on a continuation wakeup, never cached across
/// keystrokes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ContextSnapshot {
    /// Caret offset in chars from the start of the focused text element.
    pub caret: u32,
    /// Character immediately left of the caret, if any.
    pub left: Option<char>,
    /// Character immediately right of the caret, if any.
    pub right: Option<char>,
    /// Whether an uncommitted composition is in progress in the focused
    /// element.
    pub composing: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_flips_between_the_two_modes() {
        assert_eq!(Mode::Foreign.other(), Mode::Latin);
        assert_eq!(Mode::Latin.other(), Mode::Foreign);
        assert_eq!(Mode::Latin.other().other(), Mode::Latin);
    }

    #[test]
    fn mode_names_are_stable() {
        assert_eq!(Mode::Foreign.as_str(), "foreign");
        assert_eq!(Mode::Latin.as_str(), "latin");
    }
}
