//! Core engine types: cards, RNG, configuration, errors.
//!
//! These are the leaf building blocks shared by the deck builder, the game
//! state machine and the session controller.

pub mod card;
pub mod config;
pub mod error;
pub mod rng;

pub use card::{Card, CardId, Symbol};
pub use config::{Difficulty, DifficultyProfile, EngineConfig, TimingConfig, MAX_PREVIEW_COUNTDOWN};
pub use error::{EngineError, Result};
pub use rng::{fisher_yates, GameRng, GameRngState};
