//! Virtual-time timers
//!
//! The host drives time forward with frame deltas; nothing here reads a
//! wall clock. Tasks are plain `Copy` values that the owner interprets
//! when they come due, so a timer never holds a reference back into its
//! owner.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use poc_core::timer::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! timers.set_interval(Duration::from_millis(300), "poll");
//!
//! // missed periods collapse into one run
//! let deadline = timers.deadline_after(Duration::from_millis(650));
//! let mut fired = Vec::new();
//! while let Some(task) = timers.pop_due(deadline) {
//!     fired.push(task);
//! }
//! assert_eq!(fired, vec!["poll"]);
//! ```

use std::time::Duration;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a scheduled timer
    pub struct TimerId;
}

struct TimerEntry<T> {
    due: Duration,
    period: Option<Duration>,
    task: T,
    seq: u64,
}

/// One-shot and interval timers ordered by due time
pub struct TimerQueue<T: Copy> {
    timers: SlotMap<TimerId, TimerEntry<T>>,
    now: Duration,
    seq: u64,
}

impl<T: Copy> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            now: Duration::ZERO,
            seq: 0,
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `task` once after `delay`
    pub fn set_timeout(&mut self, delay: Duration, task: T) -> TimerId {
        self.insert(delay, None, task)
    }

    /// Run `task` every `period`
    ///
    /// A zero period is bumped to one millisecond.
    pub fn set_interval(&mut self, period: Duration, task: T) -> TimerId {
        let period = period.max(Duration::from_millis(1));
        self.insert(period, Some(period), task)
    }

    /// Cancel a timer, returning whether it was still scheduled
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(id).is_some()
    }

    /// Number of scheduled timers
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Cancel everything
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// The virtual time reached after `elapsed` more time passes
    pub fn deadline_after(&self, elapsed: Duration) -> Duration {
        self.now.saturating_add(elapsed)
    }

    /// Take the earliest task due at or before `deadline`
    ///
    /// Time advances to that task's due time. Interval timers run at most
    /// once per deadline: they are rescheduled to their first period
    /// boundary after `deadline`. One-shots are removed. Returns `None`
    /// once nothing else is due, leaving time at `deadline`. Timers
    /// cancelled between calls never fire.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<T> {
        let next = self
            .timers
            .iter()
            .filter(|(_, entry)| entry.due <= deadline)
            .min_by_key(|(_, entry)| (entry.due, entry.seq))
            .map(|(id, _)| id);

        let Some(id) = next else {
            self.now = self.now.max(deadline);
            return None;
        };

        let entry = self.timers.get_mut(id)?;
        self.now = self.now.max(entry.due);
        let task = entry.task;
        let period = entry.period;
        match period {
            Some(period) => entry.due = next_due(entry.due, period, deadline),
            None => {
                self.timers.remove(id);
            }
        }
        Some(task)
    }

    fn insert(&mut self, delay: Duration, period: Option<Duration>, task: T) -> TimerId {
        self.seq += 1;
        self.timers.insert(TimerEntry {
            due: self.now + delay,
            period,
            task,
            seq: self.seq,
        })
    }
}

/// First `due + k * period` (k >= 1) later than `deadline`
fn next_due(due: Duration, period: Duration, deadline: Duration) -> Duration {
    let next = due.saturating_add(period);
    if next > deadline {
        return next;
    }
    let period_nanos = period.as_nanos().max(1);
    let missed = deadline.saturating_sub(due).as_nanos() / period_nanos;
    let nanos = due.as_nanos().saturating_add((missed + 1).saturating_mul(period_nanos));
    let secs = u64::try_from(nanos / 1_000_000_000).unwrap_or(u64::MAX);
    Duration::new(secs, (nanos % 1_000_000_000) as u32)
}

/// Collapses bursts of triggers into one task after a quiet period
#[derive(Debug)]
pub struct Debouncer {
    wait: Duration,
    pending: Option<TimerId>,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    /// Restart the quiet period, replacing any pending task
    pub fn trigger<T: Copy>(&mut self, timers: &mut TimerQueue<T>, task: T) -> TimerId {
        if let Some(previous) = self.pending.take() {
            timers.cancel(previous);
        }
        let id = timers.set_timeout(self.wait, task);
        self.pending = Some(id);
        id
    }

    /// Forget the pending task after it fired
    pub fn fired(&mut self) {
        self.pending = None;
    }

    /// Cancel the pending task, if any
    pub fn cancel<T: Copy>(&mut self, timers: &mut TimerQueue<T>) {
        if let Some(id) = self.pending.take() {
            timers.cancel(id);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
