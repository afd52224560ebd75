//! Discrete operator control events.

use std::collections::VecDeque;

/// One operator signal read per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// Accept the current sample as the round definition
    Confirm,
    /// Abort the current round and go back to sampling
    ResetRequest,
    /// Stop the game loop
    Quit,
}

/// Non-blocking source of control events, polled once per frame.
pub trait ControlSource {
    fn poll(&mut self) -> Option<ControlEvent>;
}

/// Replays a fixed script of per-frame control events.
///
/// Each `poll` consumes one entry; once the script runs out every poll
/// returns `None`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedControl {
    script: VecDeque<Option<ControlEvent>>,
}

impl ScriptedControl {
    /// Script with one entry per frame; `None` means no event.
    pub fn new<I: IntoIterator<Item = Option<ControlEvent>>>(script: I) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Queue an event for a later frame.
    pub fn push(&mut self, event: Option<ControlEvent>) {
        self.script.push_back(event);
    }

    /// Entries not yet polled.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl ControlSource for ScriptedControl {
    fn poll(&mut self) -> Option<ControlEvent> {
        self.script.pop_front().flatten()
    }
}
