//! Game engine: state machine, clock and scoring.
//!
//! - `state`: `GameState` and its phase transitions
//! - `timer`: `GameTimer`, the elapsed-seconds clock
//! - `scorer`: move count to star `Rating`

pub mod scorer;
pub mod state;
pub mod timer;

pub use scorer::{score, GameSummary, Rating};
pub use state::{FlipOutcome, GameState, PairOutcome, Phase, RejectReason};
pub use timer::{clock_label, GameTimer};
