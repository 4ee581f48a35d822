#![allow(dead_code)]

use scriptswitch::platform::{
    CaretContext, ContextProvider, KeyInjector, SelectError, SourceSelector, TaskQueue,
};
use scriptswitch::{Key, KeyEvent, Mode, Modifiers, Task, TickMs};

/// Scriptable host standing in for the platform: caret context and mode are
/// plain fields, selects and injected events are recorded, scheduled tasks
/// are captured for the test to fire by hand.
pub struct TestHost {
    pub context: Option<CaretContext>,
    pub composing: bool,
    pub mode: Option<Mode>,
    pub selects: Vec<Mode>,
    pub posted: Vec<KeyEvent>,
    pub tasks: Vec<(TickMs, Task)>,
    /// Apply a successful select to `mode` immediately. Turn off to model a
    /// switch still in flight.
    pub apply_selects: bool,
    /// Pretend this mode has no installed input source.
    pub missing_source: Option<Mode>,
    /// Refuse injected events, as a platform out of posting rights would.
    pub refuse_posts: bool,
}

impl TestHost {
    pub fn new(mode: Mode) -> Self {
        Self {
            context: None,
            composing: false,
            mode: Some(mode),
            selects: Vec::new(),
            posted: Vec::new(),
            tasks: Vec::new(),
            apply_selects: true,
            missing_source: None,
            refuse_posts: false,
        }
    }

    /// Host in `mode` with the caret at `caret` and `left` right before it.
    pub fn with_context(mode: Mode, caret: u32, left: char) -> Self {
        let mut host = Self::new(mode);
        host.context = Some(ctx(caret, Some(left), None));
        host
    }

    /// Takes everything scheduled so far, oldest first.
    pub fn drain_tasks(&mut self) -> Vec<(TickMs, Task)> {
        std::mem::take(&mut self.tasks)
    }
}

impl ContextProvider for TestHost {
    fn caret_context(&mut self) -> Option<CaretContext> {
        self.context
    }

    fn is_composing(&mut self) -> bool {
        self.composing
    }
}

impl SourceSelector for TestHost {
    fn current_mode(&mut self) -> Option<Mode> {
        self.mode
    }

    fn select(&mut self, mode: Mode) -> Result<(), SelectError> {
        self.selects.push(mode);
        if self.missing_source == Some(mode) {
            return Err(SelectError::NoMatchingSource(mode));
        }
        if self.apply_selects {
            self.mode = Some(mode);
        }
        Ok(())
    }
}

impl KeyInjector for TestHost {
    fn post_key(&mut self, ev: &KeyEvent) -> bool {
        if self.refuse_posts {
            return false;
        }
        self.posted.push(*ev);
        true
    }
}

impl TaskQueue for TestHost {
    fn schedule_once(&mut self, delay_ms: TickMs, task: Task) {
        self.tasks.push((delay_ms, task));
    }
}

pub fn ctx(caret: u32, left: Option<char>, right: Option<char>) -> CaretContext {
    CaretContext { caret, left, right }
}

pub fn letter_down(c: u8, at: TickMs) -> KeyEvent {
    KeyEvent::down(Key::Letter(c), Modifiers::NONE, at)
}

pub fn letter_up(c: u8, at: TickMs) -> KeyEvent {
    KeyEvent::up(Key::Letter(c), Modifiers::NONE, at)
}
