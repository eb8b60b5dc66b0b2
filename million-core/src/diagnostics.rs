//! Warning reporting handed to the calculations that can degrade gracefully.
//!
//! Components never reach for a process-wide logger on their own; callers
//! pass a [`WarningSink`] in. The CLI uses [`TracingWarnings`], tests use
//! [`CollectedWarnings`] to assert on what was reported.

use std::cell::RefCell;

pub trait WarningSink {
    fn warn(
        &self,
        message: &str,
    );
}

/// Forwards warnings to the active `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingWarnings;

impl WarningSink for TracingWarnings {
    fn warn(
        &self,
        message: &str,
    ) {
        tracing::warn!("{message}");
    }
}

/// Keeps every warning in memory.
#[derive(Debug, Default)]
pub struct CollectedWarnings {
    messages: RefCell<Vec<String>>,
}

impl CollectedWarnings {
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl WarningSink for CollectedWarnings {
    fn warn(
        &self,
        message: &str,
    ) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
