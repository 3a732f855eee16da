//! Game clock.
//!
//! Counts whole seconds from the first accepted flip until the game ends.
//! The clock schedules a single repeating `ClockTick`; starting it twice
//! never double-books ticks.

use std::time::Duration;

use crate::schedule::{Generation, ScheduledTask, Scheduler, TaskKind, TimerHandle};

/// Elapsed-seconds counter driven by a host scheduler.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameTimer {
    elapsed_seconds: u32,
    ticker: Option<TimerHandle>,
}

impl GameTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Start ticking every `period`.
    ///
    /// Returns false (and schedules nothing) if already running.
    pub fn start<S: Scheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
        period: Duration,
        generation: Generation,
    ) -> bool {
        if self.ticker.is_some() {
            return false;
        }
        let handle = scheduler.every(period, ScheduledTask::new(generation, TaskKind::ClockTick));
        self.ticker = Some(handle);
        true
    }

    /// Stop ticking. Safe to call when not running.
    pub fn stop<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.ticker.take() {
            scheduler.cancel(handle);
        }
    }

    /// Stop and zero the counter.
    pub fn reset<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.stop(scheduler);
        self.elapsed_seconds = 0;
    }

    /// Count one period. Returns the new total, or `None` if stopped.
    pub fn tick(&mut self) -> Option<u32> {
        if self.ticker.is_none() {
            return None;
        }
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        Some(self.elapsed_seconds)
    }
}

/// Format seconds as `MM:SS`.
///
/// ```
/// use pairs_engine::engine::clock_label;
///
/// assert_eq!(clock_label(0), "00:00");
/// assert_eq!(clock_label(75), "01:15");
/// ```
#[must_use]
pub fn clock_label(elapsed_seconds: u32) -> String {
    format!("{:02}:{:02}", elapsed_seconds / 60, elapsed_seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::VirtualScheduler;

    const SECOND: Duration = Duration::from_secs(1);

    fn drain(scheduler: &mut VirtualScheduler, timer: &mut GameTimer, until: Duration) {
        while let Some(task) = scheduler.pop_due(until) {
            assert_eq!(task.kind, TaskKind::ClockTick);
            timer.tick();
        }
    }

    #[test]
    fn test_counts_seconds() {
        let mut scheduler = VirtualScheduler::new();
        let mut timer = GameTimer::new();

        assert!(timer.start(&mut scheduler, SECOND, Generation(1)));
        drain(&mut scheduler, &mut timer, Duration::from_secs(5));

        assert_eq!(timer.elapsed_seconds(), 5);
        assert!(timer.is_running());
    }

    #[test]
    fn test_double_start_does_not_double_schedule() {
        let mut scheduler = VirtualScheduler::new();
        let mut timer = GameTimer::new();

        assert!(timer.start(&mut scheduler, SECOND, Generation(1)));
        assert!(!timer.start(&mut scheduler, SECOND, Generation(1)));
        assert_eq!(scheduler.pending(), 1);

        drain(&mut scheduler, &mut timer, Duration::from_secs(3));
        assert_eq!(timer.elapsed_seconds(), 3);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut scheduler = VirtualScheduler::new();
        let mut timer = GameTimer::new();

        timer.stop(&mut scheduler);
        timer.start(&mut scheduler, SECOND, Generation(1));
        drain(&mut scheduler, &mut timer, Duration::from_secs(2));

        timer.stop(&mut scheduler);
        timer.stop(&mut scheduler);
        assert!(!timer.is_running());
        assert_eq!(scheduler.pending(), 0);

        drain(&mut scheduler, &mut timer, Duration::from_secs(10));
        assert_eq!(timer.elapsed_seconds(), 2);
    }

    #[test]
    fn test_tick_when_stopped() {
        let mut timer = GameTimer::new();
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.elapsed_seconds(), 0);
    }

    #[test]
    fn test_reset() {
        let mut scheduler = VirtualScheduler::new();
        let mut timer = GameTimer::new();

        timer.start(&mut scheduler, SECOND, Generation(1));
        drain(&mut scheduler, &mut timer, Duration::from_secs(4));
        timer.reset(&mut scheduler);

        assert_eq!(timer.elapsed_seconds(), 0);
        assert!(!timer.is_running());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_clock_label() {
        assert_eq!(clock_label(59), "00:59");
        assert_eq!(clock_label(600), "10:00");
        assert_eq!(clock_label(6000), "100:00");
    }
}
