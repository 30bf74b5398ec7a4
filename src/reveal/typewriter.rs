//! Character-by-character text reveal.
//!
//! A `Typewriter` owns the reveal state for one text segment: a growing
//! prefix, advanced one character per scheduled tick. Completion is
//! reported exactly once per text value, when the prefix reaches the full
//! string. Replacing the text cancels the pending tick for the old text so
//! no stale append can land, and restarts from character zero.

use std::time::{Duration, Instant};

use crate::reveal::timer::{Scheduler, TimerId};

/// Outcome of feeding a fired timer to a typewriter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypewriterEvent {
    /// One more character became visible.
    Advanced,
    /// The full text is now visible. Fired once per text value.
    Completed,
    /// The timer did not belong to this typewriter's current text.
    Stale,
}

#[derive(Debug)]
pub struct Typewriter {
    text: String,
    /// Total characters in `text`.
    chars: usize,
    /// Revealed prefix length, in characters. Never exceeds `chars`.
    shown: usize,
    /// Byte offset matching `shown`, so `visible()` can slice.
    shown_bytes: usize,
    speed: Duration,
    pending: Option<TimerId>,
    completed: bool,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, speed: Duration) -> Self {
        let text = text.into();
        let chars = text.chars().count();
        Self {
            text,
            chars,
            shown: 0,
            shown_bytes: 0,
            speed,
            pending: None,
            completed: false,
        }
    }

    /// Begin revealing. An empty text completes immediately, with no tick
    /// scheduled; otherwise the first character is due after one interval.
    pub fn start(&mut self, sched: &mut Scheduler, now: Instant) -> Option<TypewriterEvent> {
        if self.completed || self.pending.is_some() {
            return None; // already running or finished
        }
        if self.chars == 0 {
            self.completed = true;
            return Some(TypewriterEvent::Completed);
        }
        self.pending = Some(sched.schedule(now, self.speed));
        None
    }

    /// Replace the text. The pending tick for the old text is cancelled
    /// before anything is scheduled for the new one, the prefix resets to
    /// empty, and completion becomes eligible to fire again.
    pub fn set_text(
        &mut self,
        text: impl Into<String>,
        sched: &mut Scheduler,
        now: Instant,
    ) -> Option<TypewriterEvent> {
        if let Some(id) = self.pending.take() {
            sched.cancel(id);
        }
        self.text = text.into();
        self.chars = self.text.chars().count();
        self.shown = 0;
        self.shown_bytes = 0;
        self.completed = false;
        self.start(sched, now)
    }

    /// Whether `id` is this typewriter's pending tick.
    pub fn owns(&self, id: TimerId) -> bool {
        self.pending == Some(id)
    }

    /// Feed a fired timer. Advances the prefix by one character and
    /// schedules the next tick, or reports completion on the last one.
    pub fn handle_timer(
        &mut self,
        id: TimerId,
        sched: &mut Scheduler,
        now: Instant,
    ) -> TypewriterEvent {
        if !self.owns(id) {
            return TypewriterEvent::Stale;
        }
        self.pending = None;

        if let Some(c) = self.text[self.shown_bytes..].chars().next() {
            self.shown += 1;
            self.shown_bytes += c.len_utf8();
        }

        if self.shown == self.chars {
            self.completed = true;
            TypewriterEvent::Completed
        } else {
            self.pending = Some(sched.schedule(now, self.speed));
            TypewriterEvent::Advanced
        }
    }

    /// Cancel the in-flight reveal, e.g. on unmount. Safe to call twice.
    pub fn stop(&mut self, sched: &mut Scheduler) {
        if let Some(id) = self.pending.take() {
            sched.cancel(id);
        }
    }

    /// The currently revealed prefix.
    pub fn visible(&self) -> &str {
        &self.text[..self.shown_bytes]
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }
}
