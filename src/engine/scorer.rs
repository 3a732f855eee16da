//! Star rating.
//!
//! The theoretical minimum is one move per pair. Up to three wasted moves
//! keeps all three stars, up to eight keeps two.

use serde::{Deserialize, Serialize};

use crate::core::config::Difficulty;

/// Extra moves over perfect play that still earn three stars.
pub const THREE_STAR_SLACK: u64 = 3;

/// Extra moves over perfect play that still earn two stars.
pub const TWO_STAR_SLACK: u64 = 8;

/// Discrete end-of-game rating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rating {
    OneStar,
    TwoStar,
    ThreeStar,
}

impl Rating {
    #[must_use]
    pub const fn stars(self) -> u8 {
        match self {
            Rating::OneStar => 1,
            Rating::TwoStar => 2,
            Rating::ThreeStar => 3,
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for _ in 0..self.stars() {
            f.write_str("⭐")?;
        }
        Ok(())
    }
}

/// Rate a finished game.
///
/// ```
/// use pairs_engine::engine::{score, Rating};
///
/// assert_eq!(score(6, 6), Rating::ThreeStar);
/// assert_eq!(score(10, 6), Rating::TwoStar);
/// assert_eq!(score(15, 6), Rating::OneStar);
/// ```
#[must_use]
pub fn score(moves: u32, pair_count: usize) -> Rating {
    let perfect = pair_count as u64;
    let moves = u64::from(moves);

    if moves <= perfect + THREE_STAR_SLACK {
        Rating::ThreeStar
    } else if moves <= perfect + TWO_STAR_SLACK {
        Rating::TwoStar
    } else {
        Rating::OneStar
    }
}

/// Final results of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub difficulty: Difficulty,
    pub elapsed_seconds: u32,
    pub moves: u32,
    pub rating: Rating,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        // Easy: 6 pairs
        assert_eq!(score(6, 6), Rating::ThreeStar);
        assert_eq!(score(9, 6), Rating::ThreeStar);
        assert_eq!(score(10, 6), Rating::TwoStar);
        assert_eq!(score(14, 6), Rating::TwoStar);
        assert_eq!(score(15, 6), Rating::OneStar);

        // Hard: 10 pairs
        assert_eq!(score(13, 10), Rating::ThreeStar);
        assert_eq!(score(18, 10), Rating::TwoStar);
        assert_eq!(score(19, 10), Rating::OneStar);
    }

    #[test]
    fn test_large_moves() {
        assert_eq!(score(u32::MAX, 8), Rating::OneStar);
    }

    #[test]
    fn test_display() {
        assert_eq!(Rating::ThreeStar.to_string(), "⭐⭐⭐");
        assert_eq!(Rating::TwoStar.to_string(), "⭐⭐");
        assert_eq!(Rating::OneStar.to_string(), "⭐");
    }

    #[test]
    fn test_ordering() {
        assert!(Rating::ThreeStar > Rating::TwoStar);
        assert!(Rating::TwoStar > Rating::OneStar);
    }
}
