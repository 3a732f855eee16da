//! Game state machine.
//!
//! ## Phases
//!
//! ```text
//! Idle --begin_preview--> Previewing --complete_preview--> AwaitingFirstFlip
//!                                                            |        ^
//!                                          second flip       v        | evaluate_pair
//!                                                       ProcessingPair
//!                                                            |
//!                                          last pair found   v
//!                                                         Finished
//! ```
//!
//! `GameState` is pure: it never schedules anything. Each transition returns
//! an outcome value and the session decides what to schedule from it.
//!
//! ## Invariants
//!
//! - `selection` holds 0, 1 or 2 cards; 2 only while `ProcessingPair`
//! - a matched card is never selected again
//! - `matched_pairs == pair_count` exactly when `phase == Finished`
//! - `moves` grows by one per completed pair attempt

use smallvec::SmallVec;

use crate::core::card::{Card, CardId};
use crate::core::config::{Difficulty, DifficultyProfile};

use super::timer::GameTimer;

/// Current state of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Phase {
    /// Built but not yet shown.
    Idle,
    /// Cards shown face up; flips are ignored.
    Previewing,
    /// Waiting for the player to pick a card.
    AwaitingFirstFlip,
    /// Two cards face up, comparison pending; flips are ignored.
    ProcessingPair,
    /// Every pair found.
    Finished,
}

/// Why a flip request was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// No game, or the game has not entered its preview yet.
    NotStarted,
    Previewing,
    ProcessingPair,
    AlreadyFlipped,
    AlreadyMatched,
    GameOver,
    UnknownCard,
}

/// Result of `request_flip`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Ignored. No state changed.
    Rejected(RejectReason),
    /// First card of a pair turned up.
    ///
    /// `started_clock` is set on the first accepted flip of the game.
    Selected { card: CardId, started_clock: bool },
    /// Second card turned up. The pair now awaits evaluation.
    PairSelected { first: CardId, second: CardId },
}

impl FlipOutcome {
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, FlipOutcome::Rejected(_))
    }
}

/// Result of `evaluate_pair`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairOutcome {
    /// Symbols equal. `finished` is set when this was the last pair.
    Matched { first: CardId, second: CardId, finished: bool },
    /// Symbols differ. Both cards stay face up until `revert_mismatch`.
    Mismatched { first: CardId, second: CardId },
}

/// Authoritative state of one play-through.
#[derive(Clone, Debug)]
pub struct GameState {
    difficulty: Difficulty,
    profile: DifficultyProfile,
    phase: Phase,
    deck: Vec<Card>,
    selection: SmallVec<[CardId; 2]>,
    matched_pairs: usize,
    moves: u32,
    started: bool,
    preview_remaining: u32,
    /// Game clock. Driven by the session.
    pub(crate) timer: GameTimer,
}

impl GameState {
    /// Create an idle game over a freshly built deck.
    ///
    /// `deck` must come from `build_deck(profile.pair_count, ..)`.
    #[must_use]
    pub fn new(difficulty: Difficulty, deck: Vec<Card>) -> Self {
        let profile = difficulty.profile();
        debug_assert_eq!(deck.len(), profile.card_count());

        Self {
            difficulty,
            profile,
            phase: Phase::Idle,
            deck,
            selection: SmallVec::new(),
            matched_pairs: 0,
            moves: 0,
            started: false,
            preview_remaining: 0,
            timer: GameTimer::new(),
        }
    }

    // === Queries ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn profile(&self) -> DifficultyProfile {
        self.profile
    }

    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.profile.pair_count
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.deck
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.deck.get(id.index())
    }

    /// Face-up cards awaiting evaluation, in flip order.
    #[must_use]
    pub fn selection(&self) -> &[CardId] {
        &self.selection
    }

    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> u32 {
        self.timer.elapsed_seconds()
    }

    #[must_use]
    pub fn timer(&self) -> &GameTimer {
        &self.timer
    }

    /// Has the player made the first flip?
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.matched_pairs == self.profile.pair_count
    }

    // === Preview ===

    /// Idle -> Previewing. The countdown will announce `countdown..=0`.
    ///
    /// Returns false if the game is not idle.
    pub fn begin_preview(&mut self, countdown: u32) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.phase = Phase::Previewing;
        self.preview_remaining = countdown;
        true
    }

    /// Take one countdown step.
    ///
    /// Returns the value to announce, or `None` outside the preview. The
    /// step that returns 0 is the last one; follow it with
    /// `complete_preview`.
    pub fn preview_tick(&mut self) -> Option<u32> {
        if self.phase != Phase::Previewing {
            return None;
        }
        let remaining = self.preview_remaining;
        self.preview_remaining = remaining.saturating_sub(1);
        Some(remaining)
    }

    /// Previewing -> AwaitingFirstFlip.
    pub fn complete_preview(&mut self) -> bool {
        if self.phase != Phase::Previewing {
            return false;
        }
        self.phase = Phase::AwaitingFirstFlip;
        true
    }

    // === Play ===

    /// Turn a card face up.
    ///
    /// Rejections are silent no-ops, checked in order: preview, pending
    /// evaluation, then the card's own flags.
    pub fn request_flip(&mut self, id: CardId) -> FlipOutcome {
        match self.phase {
            Phase::Previewing => return FlipOutcome::Rejected(RejectReason::Previewing),
            Phase::ProcessingPair => return FlipOutcome::Rejected(RejectReason::ProcessingPair),
            Phase::Idle => return FlipOutcome::Rejected(RejectReason::NotStarted),
            Phase::Finished => return FlipOutcome::Rejected(RejectReason::GameOver),
            Phase::AwaitingFirstFlip => {}
        }

        let Some(card) = self.deck.get_mut(id.index()) else {
            return FlipOutcome::Rejected(RejectReason::UnknownCard);
        };
        if card.is_matched {
            return FlipOutcome::Rejected(RejectReason::AlreadyMatched);
        }
        if card.is_flipped {
            return FlipOutcome::Rejected(RejectReason::AlreadyFlipped);
        }

        card.is_flipped = true;
        self.selection.push(id);

        if let &[first, second] = self.selection.as_slice() {
            self.moves += 1;
            self.phase = Phase::ProcessingPair;
            return FlipOutcome::PairSelected { first, second };
        }

        let started_clock = !self.started;
        self.started = true;
        FlipOutcome::Selected {
            card: id,
            started_clock,
        }
    }

    /// Compare the selected pair and resolve it.
    ///
    /// Returns `None` unless a pair is waiting. Clears the selection and
    /// hands control back to the player, or moves to `Finished` when the
    /// last pair is found.
    pub fn evaluate_pair(&mut self) -> Option<PairOutcome> {
        if self.phase != Phase::ProcessingPair {
            return None;
        }
        let &[first, second] = self.selection.as_slice() else {
            return None;
        };
        self.selection.clear();

        let is_match = self.deck[first.index()].pairs_with(&self.deck[second.index()]);

        let outcome = if is_match {
            self.deck[first.index()].is_matched = true;
            self.deck[second.index()].is_matched = true;
            self.matched_pairs += 1;
            PairOutcome::Matched {
                first,
                second,
                finished: self.is_complete(),
            }
        } else {
            PairOutcome::Mismatched { first, second }
        };

        self.phase = if self.is_complete() {
            Phase::Finished
        } else {
            Phase::AwaitingFirstFlip
        };

        Some(outcome)
    }

    /// Turn a mismatched pair back face down.
    ///
    /// Returns the cards actually turned down. Matched cards are left alone.
    pub fn revert_mismatch(&mut self, first: CardId, second: CardId) -> SmallVec<[CardId; 2]> {
        let mut reverted = SmallVec::new();
        for id in [first, second] {
            if let Some(card) = self.deck.get_mut(id.index()) {
                if card.is_flipped && !card.is_matched && !self.selection.contains(&id) {
                    card.is_flipped = false;
                    reverted.push(id);
                }
            }
        }
        reverted
    }
}
