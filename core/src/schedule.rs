use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// How long a freshly found mineral sparkles before settling.
pub const FOUND_ANIMATION_MS: u32 = 600;

/// How long the "correct!" confirmation stays up before the prompt closes.
pub const CORRECT_DISMISS_MS: u32 = 1500;

/// An event a controller wants fed back to it after a pause.
///
/// State machines stay synchronous: they only queue these, and whoever drives the timers hands
/// each event back once `after_ms` has elapsed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delayed<E> {
    pub after_ms: u32,
    pub event: E,
}

impl<E> Delayed<E> {
    pub const fn new(after_ms: u32, event: E) -> Self {
        Self { after_ms, event }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule<E> {
    queue: Vec<Delayed<E>>,
}

impl<E> Default for Schedule<E> {
    fn default() -> Self {
        Self { queue: Vec::new() }
    }
}

impl<E> Schedule<E> {
    pub fn push(&mut self, after_ms: u32, event: E) {
        self.queue.push(Delayed::new(after_ms, event));
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Hands every queued event to the caller, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<Delayed<E>> {
        core::mem::take(&mut self.queue)
    }
}
