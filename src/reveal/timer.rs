//! Cancellable timer scheduling for the reveal state machines.
//!
//! The state machines never read a clock of their own; the UI loop passes
//! the current instant in, schedules delays here, and routes fired timers
//! back out. Cancellation is idempotent and safe after a timer has fired.

use std::time::{Duration, Instant};

/// Opaque handle for a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct TimerEntry {
    id: TimerId,
    deadline: Instant,
}

/// Deadline-ordered timer queue driven by the UI loop.
#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    pending: Vec<TimerEntry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a timer to fire `delay` after `now`. Returns its handle.
    pub fn schedule(&mut self, now: Instant, delay: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending.push(TimerEntry {
            id,
            deadline: now + delay,
        });
        id
    }

    /// Cancel a timer. A no-op if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) {
        self.pending.retain(|e| e.id != id);
    }

    /// Remove and return the earliest timer whose deadline has passed,
    /// along with that deadline.
    ///
    /// Call in a loop each tick until it returns `None`; ties fire in
    /// scheduling order. Handlers that reschedule should do so relative
    /// to the returned deadline, so a coarse tick cannot stretch the
    /// cadence.
    pub fn pop_due(&mut self, now: Instant) -> Option<(TimerId, Instant)> {
        let mut best: Option<usize> = None;
        for (i, e) in self.pending.iter().enumerate() {
            if e.deadline > now {
                continue;
            }
            match best {
                Some(b) if self.pending[b].deadline <= e.deadline => {}
                _ => best = Some(i),
            }
        }
        best.map(|i| {
            let entry = self.pending.remove(i);
            (entry.id, entry.deadline)
        })
    }

    /// Deadline of the next pending timer, used to size the event poll.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|e| e.deadline).min()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_deadline_order() {
        let mut sched = Scheduler::new();
        let now = Instant::now();
        let slow = sched.schedule(now, Duration::from_millis(50));
        let fast = sched.schedule(now, Duration::from_millis(10));

        let later = now + Duration::from_millis(60);
        assert_eq!(
            sched.pop_due(later),
            Some((fast, now + Duration::from_millis(10)))
        );
        assert_eq!(
            sched.pop_due(later),
            Some((slow, now + Duration::from_millis(50)))
        );
        assert_eq!(sched.pop_due(later), None);
        assert!(sched.is_idle());
    }

    #[test]
    fn test_not_due_before_deadline() {
        let mut sched = Scheduler::new();
        let now = Instant::now();
        sched.schedule(now, Duration::from_millis(100));
        assert_eq!(sched.pop_due(now + Duration::from_millis(50)), None);
        assert!(!sched.is_idle());
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut sched = Scheduler::new();
        let now = Instant::now();
        let id = sched.schedule(now, Duration::from_millis(10));
        sched.cancel(id);
        assert_eq!(sched.pop_due(now + Duration::from_millis(20)), None);
    }

    #[test]
    fn test_cancel_after_fire_is_noop() {
        let mut sched = Scheduler::new();
        let now = Instant::now();
        let id = sched.schedule(now, Duration::from_millis(10));
        let _other = sched.schedule(now, Duration::from_millis(500));

        let (fired, _) = sched.pop_due(now + Duration::from_millis(20)).unwrap();
        assert_eq!(fired, id);
        sched.cancel(id);
        sched.cancel(id);
        // The unrelated timer is untouched
        assert_eq!(sched.next_deadline(), Some(now + Duration::from_millis(500)));
    }

    #[test]
    fn test_ties_fire_in_scheduling_order() {
        let mut sched = Scheduler::new();
        let now = Instant::now();
        let first = sched.schedule(now, Duration::from_millis(10));
        let second = sched.schedule(now, Duration::from_millis(10));

        let later = now + Duration::from_millis(10);
        assert_eq!(sched.pop_due(later).map(|(id, _)| id), Some(first));
        assert_eq!(sched.pop_due(later).map(|(id, _)| id), Some(second));
    }

    #[test]
    fn test_next_deadline_tracks_minimum() {
        let mut sched = Scheduler::new();
        let now = Instant::now();
        assert_eq!(sched.next_deadline(), None);
        sched.schedule(now, Duration::from_millis(80));
        let near = sched.schedule(now, Duration::from_millis(20));
        assert_eq!(sched.next_deadline(), Some(now + Duration::from_millis(20)));
        sched.cancel(near);
        assert_eq!(sched.next_deadline(), Some(now + Duration::from_millis(80)));
    }
}
