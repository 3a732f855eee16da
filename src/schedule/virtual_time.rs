//! Deterministic in-memory scheduler.
//!
//! Time only moves when the owner pops tasks or advances the clock, so a
//! whole game can be replayed instantly and reproducibly.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

use rustc_hash::FxHashSet;

use super::{ScheduledTask, Scheduler, TimerHandle};

/// Shortest repeat interval. A zero period would re-queue at the same instant forever.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Queue entry. Ordered by due time, then by scheduling sequence.
#[derive(Debug)]
struct Entry {
    due: Duration,
    seq: u64,
    handle: TimerHandle,
    period: Option<Duration>,
    task: ScheduledTask,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// Virtual-time scheduler.
///
/// ## Example
///
/// ```
/// use std::time::Duration;
/// use pairs_engine::schedule::{Generation, ScheduledTask, Scheduler, TaskKind, VirtualScheduler};
///
/// let mut scheduler = VirtualScheduler::new();
/// scheduler.after(Duration::from_millis(800), ScheduledTask::new(Generation(1), TaskKind::EvaluatePair));
///
/// assert!(scheduler.pop_due(Duration::from_millis(500)).is_none());
/// let task = scheduler.pop_due(Duration::from_secs(1)).unwrap();
/// assert_eq!(task.kind, TaskKind::EvaluatePair);
/// assert_eq!(scheduler.now(), Duration::from_millis(800));
/// ```
#[derive(Debug, Default)]
pub struct VirtualScheduler {
    now: Duration,
    next_seq: u64,
    next_handle: u64,
    queue: BinaryHeap<Reverse<Entry>>,
    /// Handles that are scheduled and not cancelled or expired.
    live: FxHashSet<TimerHandle>,
}

impl VirtualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of live handles (one-shots not yet fired plus active repeats).
    #[must_use]
    pub fn pending(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.live.contains(&handle)
    }

    /// Due time of the earliest live task.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.queue
            .iter()
            .filter(|Reverse(entry)| self.live.contains(&entry.handle))
            .map(|Reverse(entry)| entry.due)
            .min()
    }

    /// Pop the next task due at or before `until`, moving the clock to its
    /// due time. Repeating tasks are re-queued one period later.
    pub fn pop_due(&mut self, until: Duration) -> Option<ScheduledTask> {
        loop {
            let due = match self.queue.peek() {
                Some(Reverse(entry)) => entry.due,
                None => return None,
            };
            if due > until {
                return None;
            }

            let Reverse(entry) = self.queue.pop()?;
            if !self.live.contains(&entry.handle) {
                // Cancelled; drop lazily.
                continue;
            }

            self.now = self.now.max(entry.due);

            match entry.period {
                Some(period) => {
                    let task = entry.task.clone();
                    let seq = self.bump_seq();
                    self.queue.push(Reverse(Entry {
                        due: entry.due + period,
                        seq,
                        ..entry
                    }));
                    return Some(task);
                }
                None => {
                    self.live.remove(&entry.handle);
                    return Some(entry.task);
                }
            }
        }
    }

    /// Move the clock forward to `until` without firing anything.
    ///
    /// Call after draining `pop_due(until)`. Never moves time backwards.
    pub fn advance_clock(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn push(&mut self, delay: Duration, period: Option<Duration>, task: ScheduledTask) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;

        let seq = self.bump_seq();
        self.queue.push(Reverse(Entry {
            due: self.now + delay,
            seq,
            handle,
            period,
            task,
        }));
        self.live.insert(handle);
        handle
    }
}

impl Scheduler for VirtualScheduler {
    fn after(&mut self, delay: Duration, task: ScheduledTask) -> TimerHandle {
        self.push(delay, None, task)
    }

    /// Periods shorter than `MIN_PERIOD` are raised to it.
    fn every(&mut self, period: Duration, task: ScheduledTask) -> TimerHandle {
        let period = period.max(MIN_PERIOD);
        self.push(period, Some(period), task)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.live.remove(&handle);
    }
}
