//! Engine error type.
//!
//! Only setup can fail. Bad player input (flipping a matched card, clicking
//! during the preview) is a defined no-op and is reported through
//! `FlipOutcome`, not through this type.

/// Errors surfaced by the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid difficulty: unknown name `{0}`")]
    UnknownDifficulty(String),

    #[error("Invalid difficulty: {requested} pairs requested but the symbol catalog holds {available}")]
    PairCountExceedsCatalog { requested: usize, available: usize },

    #[error("Invalid difficulty: pair count must be at least 1")]
    EmptyDifficulty,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    /// Is this one of the `InvalidDifficulty` failures of `start_game`?
    #[must_use]
    pub fn is_invalid_difficulty(&self) -> bool {
        matches!(
            self,
            EngineError::UnknownDifficulty(_)
                | EngineError::PairCountExceedsCatalog { .. }
                | EngineError::EmptyDifficulty
        )
    }
}

impl From<toml::de::Error> for EngineError {
    fn from(err: toml::de::Error) -> Self {
        EngineError::InvalidConfig(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_difficulty_family() {
        assert!(EngineError::UnknownDifficulty("insane".into()).is_invalid_difficulty());
        assert!(EngineError::PairCountExceedsCatalog {
            requested: 30,
            available: 20
        }
        .is_invalid_difficulty());
        assert!(EngineError::EmptyDifficulty.is_invalid_difficulty());
        assert!(!EngineError::InvalidConfig("bad".into()).is_invalid_difficulty());
    }

    #[test]
    fn test_messages() {
        let err = EngineError::PairCountExceedsCatalog {
            requested: 30,
            available: 20,
        };
        assert_eq!(
            err.to_string(),
            "Invalid difficulty: 30 pairs requested but the symbol catalog holds 20"
        );
        assert_eq!(
            EngineError::UnknownDifficulty("insane".into()).to_string(),
            "Invalid difficulty: unknown name `insane`"
        );
    }
}
