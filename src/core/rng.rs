//! Deterministic random number generation for deck shuffling.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical deck orders
//! - **Serializable**: O(1) state capture and restore
//! - **Pluggable**: `fisher_yates` works with any `rand::Rng`, so hosts can
//!   shuffle with their own source
//!
//! ## Usage
//!
//! ```
//! use pairs_engine::core::GameRng;
//!
//! let mut rng1 = GameRng::new(42);
//! let mut rng2 = GameRng::new(42);
//!
//! let mut a = vec![1, 2, 3, 4, 5, 6];
//! let mut b = a.clone();
//! rng1.shuffle(&mut a);
//! rng2.shuffle(&mut b);
//!
//! assert_eq!(a, b);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Shuffle a slice in place with the Fisher-Yates algorithm.
///
/// Walks `i` from the last index down to 1, swapping element `i` with a
/// uniformly drawn `j` in `0..=i`. O(n) time, no allocation.
pub fn fisher_yates<T, R: Rng + ?Sized>(slice: &mut [T], rng: &mut R) {
    for i in (1..slice.len()).rev() {
        let j = rng.gen_range(0..=i);
        slice.swap(i, j);
    }
}

/// Seedable RNG used by the deck builder.
///
/// Uses ChaCha8 for speed while keeping a reproducible stream per seed.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        fisher_yates(slice, &mut self.inner);
    }

    /// Capture the stream position, e.g. to replay the next deck.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Resume a stream captured with `state`.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Saved position of a `GameRng` stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shuffled(rng: &mut GameRng) -> Vec<u32> {
        let mut faces: Vec<u32> = (0..24).collect();
        rng.shuffle(&mut faces);
        faces
    }

    #[test]
    fn test_same_seed_same_order() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..10 {
            assert_eq!(shuffled(&mut rng1), shuffled(&mut rng2));
        }
    }

    #[test]
    fn test_seed_changes_order() {
        assert_ne!(shuffled(&mut GameRng::new(1)), shuffled(&mut GameRng::new(2)));
        assert_eq!(GameRng::new(9).seed(), 9);
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut faces = shuffled(&mut GameRng::new(42));
        assert_ne!(faces, (0..24).collect::<Vec<_>>());

        faces.sort_unstable();
        assert_eq!(faces, (0..24).collect::<Vec<_>>());
    }

    #[test]
    fn test_fisher_yates_trivial_lengths() {
        let mut rng = GameRng::new(7);

        let mut empty: Vec<u8> = Vec::new();
        rng.shuffle(&mut empty);
        assert!(empty.is_empty());

        let mut single = vec![9];
        rng.shuffle(&mut single);
        assert_eq!(single, vec![9]);
    }

    #[test]
    fn test_fisher_yates_with_foreign_rng() {
        let mut a = [1, 2, 3, 4, 5, 6, 7, 8];
        let mut b = a;

        fisher_yates(&mut a, &mut ChaCha8Rng::seed_from_u64(3));
        fisher_yates(&mut b, &mut ChaCha8Rng::seed_from_u64(3));

        assert_eq!(a, b);
    }

    #[test]
    fn test_replay_from_saved_position() {
        let mut rng = GameRng::new(42);
        shuffled(&mut rng);

        let saved = rng.state();
        let next = shuffled(&mut rng);

        let mut resumed = GameRng::from_state(&saved);
        assert_eq!(shuffled(&mut resumed), next);
        assert_eq!(resumed.seed(), 42);
    }
}
