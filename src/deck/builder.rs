//! Pair deck builder.

use crate::core::card::{Card, CardId};
use crate::core::error::{EngineError, Result};
use crate::core::rng::GameRng;

use super::catalog::SymbolCatalog;

/// Build a shuffled deck of `pair_count` pairs.
///
/// Takes the first `pair_count` symbols of `catalog`, lays them out twice,
/// shuffles, then numbers the cards in their final order so that
/// `deck[i].id == CardId(i)`. Every card starts face down and unmatched.
///
/// ## Example
///
/// ```
/// use pairs_engine::core::GameRng;
/// use pairs_engine::deck::{build_deck, SymbolCatalog};
///
/// let mut rng = GameRng::new(42);
/// let deck = build_deck(6, &SymbolCatalog::default(), &mut rng).unwrap();
/// assert_eq!(deck.len(), 12);
/// assert!(deck.iter().enumerate().all(|(i, c)| c.id.index() == i));
/// ```
pub fn build_deck(pair_count: usize, catalog: &SymbolCatalog, rng: &mut GameRng) -> Result<Vec<Card>> {
    if pair_count == 0 {
        return Err(EngineError::EmptyDifficulty);
    }
    if pair_count > catalog.len() {
        return Err(EngineError::PairCountExceedsCatalog {
            requested: pair_count,
            available: catalog.len(),
        });
    }

    let selected = catalog.first(pair_count);
    let mut faces: Vec<_> = selected.iter().chain(selected.iter()).cloned().collect();
    rng.shuffle(&mut faces);

    Ok(faces
        .into_iter()
        .enumerate()
        .map(|(index, symbol)| Card::new(CardId::new(index as u32), symbol))
        .collect())
}
