//! # pairs-engine
//!
//! Game engine for a memory-matching ("pairs") card game.
//!
//! ## Design Principles
//!
//! 1. **Headless**: The engine draws nothing. Every visible change is reported
//!    through `GameObserver`; hosts render however they like.
//!
//! 2. **No Hidden Clocks**: Delays are `ScheduledTask` values handed to a
//!    host `Scheduler`. `VirtualScheduler` replays a whole game instantly
//!    and deterministically.
//!
//! 3. **One Owned Game**: Each play-through is a single `GameState`, replaced
//!    wholesale on restart. Tasks are tagged with a `Generation` so nothing
//!    from an old game can touch a new one.
//!
//! ## Modules
//!
//! - `core`: Cards, RNG, configuration, errors
//! - `deck`: Symbol catalog and pair deck builder
//! - `engine`: Game state machine, clock, scoring
//! - `schedule`: Scheduler trait and the virtual-time implementation
//! - `observer`: Presentation-layer notifications
//! - `session`: Start/reset/end orchestration

pub mod core;
pub mod deck;
pub mod engine;
pub mod observer;
pub mod schedule;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Card, CardId, Difficulty, DifficultyProfile, EngineConfig, EngineError, GameRng, Result,
    Symbol, TimingConfig,
};

pub use crate::deck::{build_deck, SymbolCatalog};

pub use crate::engine::{
    clock_label, score, FlipOutcome, GameState, GameSummary, GameTimer, PairOutcome, Phase,
    Rating, RejectReason,
};

pub use crate::observer::{EventLog, GameEvent, GameObserver};

pub use crate::schedule::{Generation, ScheduledTask, Scheduler, TaskKind, TimerHandle, VirtualScheduler};

pub use crate::session::{Progress, Session};
