//! Scheduler for delayed transition actions
//!
//! Every animation-timed step of the board (focus entrance, focus exit,
//! completion animation) is a scheduled action on a logical clock. The
//! clock only moves when the owner calls [`Scheduler::pop_due`] or
//! [`Scheduler::settle`], which makes timing fully deterministic in tests.
//!
//! Actions fire in due order; actions with the same due time fire in the
//! order they were scheduled. Cancelled actions never fire.

use std::time::Duration;

use tracing::{debug, trace};

/// Handle for a scheduled action, used to cancel it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<A> {
    id: TimerId,
    due: Duration,
    action: A,
}

/// Logical-clock timer queue
#[derive(Debug)]
pub struct Scheduler<A> {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry<A>>,
}

impl<A: std::fmt::Debug> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: std::fmt::Debug> Scheduler<A> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Current logical time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `action` to fire `delay` after the current logical time
    pub fn schedule(&mut self, delay: Duration, action: A) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due = self.now + delay;
        debug!(?id, ?due, ?action, "Scheduler::schedule");
        self.entries.push(Entry { id, due, action });
        id
    }

    /// Cancel a pending action
    ///
    /// Returns false if the action already fired or was already cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let cancelled = self.entries.len() != before;
        debug!(?id, cancelled, "Scheduler::cancel");
        cancelled
    }

    /// Whether an action is still waiting to fire
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Number of actions waiting to fire
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Pop the earliest action due at or before `deadline`
    ///
    /// The clock moves forward to that action's due time, so anything the
    /// caller schedules while handling it is timed from the right instant.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<A> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= deadline)
            .min_by_key(|(_, e)| (e.due, e.id))
            .map(|(idx, _)| idx)?;

        let entry = self.entries.remove(idx);
        if entry.due > self.now {
            self.now = entry.due;
        }
        trace!(id = ?entry.id, now = ?self.now, "Scheduler::pop_due: firing");
        Some(entry.action)
    }

    /// Move the clock to `deadline` once nothing else is due
    pub fn settle(&mut self, deadline: Duration) {
        if deadline > self.now {
            self.now = deadline;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn drain(s: &mut Scheduler<&'static str>, elapsed: Duration) -> Vec<&'static str> {
        let deadline = s.now() + elapsed;
        let mut fired = Vec::new();
        while let Some(a) = s.pop_due(deadline) {
            fired.push(a);
        }
        s.settle(deadline);
        fired
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut s = Scheduler::new();
        s.schedule(ms(300), "late");
        s.schedule(ms(100), "early");
        s.schedule(ms(200), "middle");

        assert_eq!(drain(&mut s, ms(250)), vec!["early", "middle"]);
        assert_eq!(s.now(), ms(250));
        assert_eq!(drain(&mut s, ms(50)), vec!["late"]);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn test_ties_fire_in_schedule_order() {
        let mut s = Scheduler::new();
        s.schedule(ms(50), "first");
        s.schedule(ms(50), "second");
        assert_eq!(drain(&mut s, ms(50)), vec!["first", "second"]);
    }

    #[test]
    fn test_cancelled_action_never_fires() {
        let mut s = Scheduler::new();
        let keep = s.schedule(ms(10), "keep");
        let drop = s.schedule(ms(10), "drop");

        assert!(s.cancel(drop));
        assert!(!s.cancel(drop));
        assert!(s.is_pending(keep));
        assert_eq!(drain(&mut s, ms(100)), vec!["keep"]);
        assert!(!s.is_pending(keep));
    }

    #[test]
    fn test_pop_due_advances_clock_to_due_time() {
        let mut s = Scheduler::new();
        s.schedule(ms(500), "exit");
        assert_eq!(s.pop_due(ms(1000)), Some("exit"));
        assert_eq!(s.now(), ms(500));

        // Chained action is timed from the firing instant, not the deadline
        s.schedule(ms(100), "chained");
        assert_eq!(s.pop_due(ms(1000)), Some("chained"));
        assert_eq!(s.now(), ms(600));
    }

    #[test]
    fn test_nothing_due_before_deadline() {
        let mut s = Scheduler::new();
        s.schedule(ms(100), "later");
        assert_eq!(drain(&mut s, ms(99)), Vec::<&str>::new());
        assert_eq!(s.pending(), 1);
    }
}
