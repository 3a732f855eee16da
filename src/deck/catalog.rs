//! Symbol catalog.
//!
//! The catalog bounds the largest playable board: a deck of `k` pairs needs
//! `k` distinct symbols.

use rustc_hash::FxHashSet;

use crate::core::card::Symbol;
use crate::core::error::{EngineError, Result};

/// Default face symbols, in selection order.
pub const DEFAULT_SYMBOLS: [&str; 20] = [
    "🎮", "🎯", "🎨", "🎭", "🎪", "🎸", "🎹", "🎺", "🎻", "🎬", "🎤", "🎧", "🎼", "🎵", "🎶", "🎲",
    "🧩", "🎰", "🎳", "🎣",
];

/// Ordered set of distinct symbols available to the deck builder.
///
/// ## Example
///
/// ```
/// use pairs_engine::deck::SymbolCatalog;
///
/// let catalog = SymbolCatalog::new(["A", "B", "C"]).unwrap();
/// assert_eq!(catalog.len(), 3);
/// assert_eq!(catalog.first(2).len(), 2);
///
/// assert!(SymbolCatalog::new(["A", "A"]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolCatalog {
    symbols: Vec<Symbol>,
}

impl SymbolCatalog {
    /// Build a catalog from distinct tokens.
    ///
    /// Fails with `InvalidConfig` on duplicates, since a repeated symbol
    /// would put four copies of one face in the deck.
    pub fn new<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let symbols: Vec<Symbol> = tokens.into_iter().map(Symbol::new).collect();

        let mut seen = FxHashSet::default();
        for symbol in &symbols {
            if !seen.insert(symbol.as_str()) {
                return Err(EngineError::InvalidConfig(format!(
                    "duplicate symbol `{}` in catalog",
                    symbol
                )));
            }
        }

        Ok(Self { symbols })
    }

    /// Number of distinct symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The first `count` symbols (fewer if the catalog is smaller).
    #[must_use]
    pub fn first(&self, count: usize) -> &[Symbol] {
        &self.symbols[..count.min(self.symbols.len())]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }
}

impl Default for SymbolCatalog {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|&s| Symbol::from(s)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = SymbolCatalog::default();
        assert_eq!(catalog.len(), 20);
        assert_eq!(catalog.first(1)[0].as_str(), "🎮");
        assert_eq!(catalog.iter().last().map(Symbol::as_str), Some("🎣"));
    }

    #[test]
    fn test_default_symbols_are_distinct() {
        let tokens: FxHashSet<_> = DEFAULT_SYMBOLS.iter().collect();
        assert_eq!(tokens.len(), DEFAULT_SYMBOLS.len());
    }

    #[test]
    fn test_first_clamps() {
        let catalog = SymbolCatalog::new(["x", "y"]).unwrap();
        assert_eq!(catalog.first(5).len(), 2);
        assert!(catalog.first(0).is_empty());
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = SymbolCatalog::new(["x", "y", "x"]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }
}
