//! Cards on the board.
//!
//! A `Card` is the engine-owned record for one face-down tile. The
//! presentation layer only ever refers to cards by `CardId`.

use serde::{Deserialize, Serialize};

/// Card position in the deck. Stable for the lifetime of a deck.
///
/// IDs run `0..2 * pair_count` and double as the card's index into the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into the deck.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Opaque face token. Two cards match when their symbols are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A card in play.
///
/// `symbol` never changes after the deck is built. The two flags are only
/// mutated by the game state machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub symbol: Symbol,
    /// Face up, either selected or waiting to be turned back.
    pub is_flipped: bool,
    /// Part of a found pair. Matched cards stay face up for good.
    pub is_matched: bool,
}

impl Card {
    /// Create a face-down, unmatched card.
    #[must_use]
    pub fn new(id: CardId, symbol: Symbol) -> Self {
        Self {
            id,
            symbol,
            is_flipped: false,
            is_matched: false,
        }
    }

    /// Can this card be picked by the player right now?
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        !self.is_flipped && !self.is_matched
    }

    /// Does this card form a pair with `other`?
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.id != other.id && self.symbol == other.symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(5);
        assert_eq!(id.raw(), 5);
        assert_eq!(id.index(), 5);
        assert_eq!(format!("{}", id), "Card(5)");
    }

    #[test]
    fn test_new_card_is_face_down() {
        let card = Card::new(CardId::new(0), Symbol::from("🎮"));
        assert!(!card.is_flipped);
        assert!(!card.is_matched);
        assert!(card.is_selectable());
    }

    #[test]
    fn test_selectable() {
        let mut card = Card::new(CardId::new(0), Symbol::from("🎮"));

        card.is_flipped = true;
        assert!(!card.is_selectable());

        card.is_flipped = false;
        card.is_matched = true;
        assert!(!card.is_selectable());
    }

    #[test]
    fn test_pairs_with() {
        let a = Card::new(CardId::new(0), Symbol::from("🎮"));
        let b = Card::new(CardId::new(1), Symbol::from("🎮"));
        let c = Card::new(CardId::new(2), Symbol::from("🎯"));

        assert!(a.pairs_with(&b));
        assert!(!a.pairs_with(&c));
        // A card never pairs with itself
        assert!(!a.pairs_with(&a));
    }

    #[test]
    fn test_symbol_display() {
        let symbol = Symbol::new("🧩");
        assert_eq!(symbol.as_str(), "🧩");
        assert_eq!(symbol.to_string(), "🧩");
    }
}
