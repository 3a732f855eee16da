//! Scheduling seam between the engine and its host.
//!
//! The engine never sleeps or spawns. Every delayed step (preview countdown,
//! pair evaluation, mismatch revert, end-of-game report, clock tick) is a
//! `ScheduledTask` value handed to a `Scheduler`. When the host's timer
//! fires, it passes the task back to `Session::fire`.
//!
//! ## Stale Tasks
//!
//! Each task carries the `Generation` of the game that scheduled it. A new
//! game or a reset bumps the generation and cancels outstanding handles;
//! anything that still slips through is discarded on arrival.
//!
//! `VirtualScheduler` is a deterministic in-memory implementation used by
//! tests and headless drivers.

mod virtual_time;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::card::CardId;

pub use virtual_time::{VirtualScheduler, MIN_PERIOD};

/// Identifies one game instance within a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    /// The generation that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Gen({})", self.0)
    }
}

/// Handle returned by a `Scheduler`, used for cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

/// What a scheduled callback does when it fires.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    /// Lead-in elapsed; start the countdown ticker.
    PreviewStart,
    /// One countdown step (periodic).
    PreviewTick,
    /// Compare the two selected cards.
    EvaluatePair,
    /// Turn a mismatched pair back face down.
    RevertMismatch { first: CardId, second: CardId },
    /// Stop the clock and report the final score.
    FinishGame,
    /// One second of game time (periodic).
    ClockTick,
}

/// A callback the engine wants run later.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub generation: Generation,
    pub kind: TaskKind,
}

impl ScheduledTask {
    #[must_use]
    pub fn new(generation: Generation, kind: TaskKind) -> Self {
        Self { generation, kind }
    }
}

/// Timer primitive supplied by the host.
///
/// Implementations must deliver tasks back to the engine in due order;
/// tasks due at the same instant fire in the order they were scheduled.
/// Cancelling an unknown or already-fired handle is a no-op.
pub trait Scheduler {
    /// Run `task` once after `delay`.
    fn after(&mut self, delay: Duration, task: ScheduledTask) -> TimerHandle;

    /// Run `task` every `period` until cancelled.
    fn every(&mut self, period: Duration, task: ScheduledTask) -> TimerHandle;

    /// Cancel a pending task.
    fn cancel(&mut self, handle: TimerHandle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_next() {
        let gen = Generation::default();
        assert_eq!(gen.next(), Generation(1));
        assert_eq!(Generation(u64::MAX).next(), Generation(0));
        assert_eq!(format!("{}", Generation(3)), "Gen(3)");
    }

    #[test]
    fn test_task_serde() {
        let task = ScheduledTask::new(
            Generation(2),
            TaskKind::RevertMismatch {
                first: CardId::new(1),
                second: CardId::new(4),
            },
        );

        let json = serde_json::to_string(&task).unwrap();
        let back: ScheduledTask = serde_json::from_str(&json).unwrap();
        assert_eq!(task, back);
    }
}
