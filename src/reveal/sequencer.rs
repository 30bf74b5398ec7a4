//! Staged segment entrances.
//!
//! The `Sequencer` walks an ordered list of story segments and makes them
//! visible one at a time, a fixed stagger apart. It owns no reveal state
//! beyond the entrance cursor; per-segment typewriters run independently.
//!
//! Overall completion is tied to the final *entrance*, not to the last
//! typewriter finishing its characters. A segment's text can still be
//! typing when the sequence reports complete; see DESIGN.md for why this
//! coupling is kept loose.

use std::time::{Duration, Instant};

use crate::reveal::timer::{Scheduler, TimerId};

/// Default delay between consecutive segment entrances.
pub const DEFAULT_STAGGER: Duration = Duration::from_millis(800);

/// Outcome of feeding a fired timer to the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerEvent {
    /// Segment `index` became visible. `last` marks the final entrance,
    /// after which the sequence is complete and no timer remains.
    Entered { index: usize, last: bool },
    /// The timer did not belong to the current sequence.
    Stale,
}

#[derive(Debug)]
pub struct Sequencer {
    total: usize,
    stagger: Duration,
    /// Number of segments that have entered, 0..=total.
    entered: usize,
    pending: Option<TimerId>,
    complete: bool,
}

impl Sequencer {
    pub fn new(total: usize, stagger: Duration) -> Self {
        Self {
            total,
            stagger,
            entered: 0,
            pending: None,
            complete: false,
        }
    }

    /// Begin the sequence. Segment 0 enters immediately; an empty sequence
    /// completes at once and returns `None`.
    pub fn start(&mut self, sched: &mut Scheduler, now: Instant) -> Option<SequencerEvent> {
        if self.entered > 0 || self.complete {
            return None; // already started
        }
        if self.total == 0 {
            self.complete = true;
            return None;
        }
        self.entered = 1;
        if self.entered == self.total {
            self.complete = true;
            Some(SequencerEvent::Entered {
                index: 0,
                last: true,
            })
        } else {
            self.pending = Some(sched.schedule(now, self.stagger));
            Some(SequencerEvent::Entered {
                index: 0,
                last: false,
            })
        }
    }

    /// Whether `id` is the sequence's pending stagger timer.
    pub fn owns(&self, id: TimerId) -> bool {
        self.pending == Some(id)
    }

    /// Feed a fired stagger timer: the next segment enters, and another
    /// stagger is scheduled unless it was the last.
    pub fn handle_timer(
        &mut self,
        id: TimerId,
        sched: &mut Scheduler,
        now: Instant,
    ) -> SequencerEvent {
        if !self.owns(id) {
            return SequencerEvent::Stale;
        }
        self.pending = None;

        let index = self.entered;
        self.entered += 1;
        if self.entered == self.total {
            self.complete = true;
            SequencerEvent::Entered { index, last: true }
        } else {
            self.pending = Some(sched.schedule(now, self.stagger));
            SequencerEvent::Entered { index, last: false }
        }
    }

    /// Cancel the pending stagger, e.g. on unmount. Safe to call twice.
    pub fn stop(&mut self, sched: &mut Scheduler) {
        if let Some(id) = self.pending.take() {
            sched.cancel(id);
        }
    }

    /// How many segments are currently visible.
    pub fn visible_count(&self) -> usize {
        self.entered
    }

    /// True once the final entrance has played (or the list was empty).
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}
