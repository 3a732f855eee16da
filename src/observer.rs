//! Presentation-layer notifications.
//!
//! The engine owns no rendering. It reports every visible change through
//! `GameObserver`; all methods default to no-ops so a host implements only
//! what it draws.
//!
//! `EventLog` records every notification as a `GameEvent`, which is what the
//! tests use to assert on ordering.

use serde::{Deserialize, Serialize};

use crate::core::card::{Card, CardId};
use crate::engine::scorer::GameSummary;

/// Receiver for engine notifications.
pub trait GameObserver {
    /// A fresh deck is on the table. Hosts show it face up for the preview.
    fn on_deck_ready(&mut self, _cards: &[Card]) {}

    fn on_card_flipped(&mut self, _card: CardId) {}

    fn on_card_unflipped(&mut self, _card: CardId) {}

    fn on_pair_matched(&mut self, _first: CardId, _second: CardId) {}

    /// Transient "wrong" highlight. Cleared when both cards unflip.
    fn on_pair_mismatched(&mut self, _first: CardId, _second: CardId) {}

    fn on_preview_tick(&mut self, _remaining: u32) {}

    /// Preview over. Hosts turn the deck face down.
    fn on_preview_end(&mut self) {}

    fn on_counters_changed(&mut self, _moves: u32, _matched_pairs: usize) {}

    fn on_timer_tick(&mut self, _elapsed_seconds: u32) {}

    fn on_game_finished(&mut self, _summary: &GameSummary) {}

    /// The game was discarded. Hosts clear the board.
    fn on_reset(&mut self) {}
}

impl GameObserver for () {}

/// One recorded notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    DeckReady { cards: Vec<Card> },
    CardFlipped(CardId),
    CardUnflipped(CardId),
    PairMatched(CardId, CardId),
    PairMismatched(CardId, CardId),
    PreviewTick(u32),
    PreviewEnd,
    CountersChanged { moves: u32, matched_pairs: usize },
    TimerTick(u32),
    GameFinished(GameSummary),
    Reset,
}

/// Observer that keeps every event in order.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take the recorded events, leaving the log empty.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Count events matching a predicate.
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&GameEvent) -> bool,
    {
        self.events.iter().filter(|e| predicate(e)).count()
    }

    #[must_use]
    pub fn last(&self) -> Option<&GameEvent> {
        self.events.last()
    }
}

impl GameObserver for EventLog {
    fn on_deck_ready(&mut self, cards: &[Card]) {
        self.events.push(GameEvent::DeckReady {
            cards: cards.to_vec(),
        });
    }

    fn on_card_flipped(&mut self, card: CardId) {
        self.events.push(GameEvent::CardFlipped(card));
    }

    fn on_card_unflipped(&mut self, card: CardId) {
        self.events.push(GameEvent::CardUnflipped(card));
    }

    fn on_pair_matched(&mut self, first: CardId, second: CardId) {
        self.events.push(GameEvent::PairMatched(first, second));
    }

    fn on_pair_mismatched(&mut self, first: CardId, second: CardId) {
        self.events.push(GameEvent::PairMismatched(first, second));
    }

    fn on_preview_tick(&mut self, remaining: u32) {
        self.events.push(GameEvent::PreviewTick(remaining));
    }

    fn on_preview_end(&mut self) {
        self.events.push(GameEvent::PreviewEnd);
    }

    fn on_counters_changed(&mut self, moves: u32, matched_pairs: usize) {
        self.events.push(GameEvent::CountersChanged { moves, matched_pairs });
    }

    fn on_timer_tick(&mut self, elapsed_seconds: u32) {
        self.events.push(GameEvent::TimerTick(elapsed_seconds));
    }

    fn on_game_finished(&mut self, summary: &GameSummary) {
        self.events.push(GameEvent::GameFinished(summary.clone()));
    }

    fn on_reset(&mut self) {
        self.events.push(GameEvent::Reset);
    }
}
