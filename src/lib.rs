//! Caret-context automatic input-source switching.
//!
//! The crate is the live half of a script switcher: an embedding shell owns
//! the platform (event tap, input-source APIs, accessibility queries, timers)
//! and drives [`Engine`] with raw key events; the engine decides, per
//! alphabetic keystroke, whether the active input source should flip between
//! a Foreign composer and direct Latin input, and owns the consume-and-replay
//! of the keystrokes it acts on. The decision rules themselves live in the
//! dependency-free `scriptswitch-core` crate.

pub mod config;
mod engine;
pub mod events;
mod mode;
pub mod platform;
mod session;
#[cfg(feature = "debug-tracing")]
pub mod util;

pub use engine::Engine;
pub use events::{KeyEvent, TapDecision, Task};
pub use mode::RequestOutcome;
pub use scriptswitch_core::{Key, Mode, Modifiers, TickMs};
