//! Deck construction: the symbol catalog and the pair deck builder.
//!
//! ## Key Types
//!
//! - `SymbolCatalog`: ordered list of distinct face symbols
//! - `build_deck`: picks the first `pair_count` symbols, doubles them,
//!   shuffles, and numbers the cards `0..2 * pair_count`

pub mod builder;
pub mod catalog;

pub use builder::build_deck;
pub use catalog::{SymbolCatalog, DEFAULT_SYMBOLS};
