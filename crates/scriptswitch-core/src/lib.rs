//! Pure decision core for scriptswitch.
//!
//! Everything in this crate is deterministic and platform-free: plain data
//! types, script classification over fixed Unicode ranges, and the switching
//! policy itself. Time enters only as explicit millisecond arguments and all
//! platform state arrives pre-sampled, so every path here is unit-testable
//! without mocks.

pub mod keys;
pub mod policy;
pub mod script;
pub mod types;

pub use keys::{Key, Modifiers};
pub use policy::{Decision, PolicyInput, StayReason, decide};
pub use script::{ScriptClass, classify_char, is_line_break};
pub use types::{ContextSnapshot, Mode, TickMs};
