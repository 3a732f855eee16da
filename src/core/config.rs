//! Engine configuration.
//!
//! - `Difficulty` / `DifficultyProfile`: the fixed board sizes, looked up by name
//! - `TimingConfig`: pacing delays for the preview and pair resolution
//! - `EngineConfig`: combines timing with an optional shuffle seed
//!
//! All timing fields are in milliseconds. `EngineConfig` can be loaded from
//! TOML; missing fields fall back to the defaults below.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};

/// Board geometry for a difficulty.
///
/// `rows * cols == 2 * pair_count` for every built-in profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub rows: u32,
    pub cols: u32,
    pub pair_count: usize,
}

impl DifficultyProfile {
    #[must_use]
    pub const fn new(rows: u32, cols: u32, pair_count: usize) -> Self {
        Self {
            rows,
            cols,
            pair_count,
        }
    }

    /// Number of cards on the board.
    #[must_use]
    pub const fn card_count(&self) -> usize {
        self.pair_count * 2
    }
}

/// Named difficulty levels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// The fixed profile for this level.
    #[must_use]
    pub const fn profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile::new(3, 4, 6),
            Difficulty::Medium => DifficultyProfile::new(4, 4, 8),
            Difficulty::Hard => DifficultyProfile::new(4, 5, 10),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(EngineError::UnknownDifficulty(name.to_string())),
        }
    }
}

/// Largest accepted `preview_countdown`.
pub const MAX_PREVIEW_COUNTDOWN: u32 = 60;

/// Pacing delays, in milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Wait before the preview countdown begins.
    pub preview_lead_in_ms: u64,
    /// First value announced by the countdown. It counts down to 0.
    pub preview_countdown: u32,
    /// Gap between countdown ticks.
    pub preview_tick_ms: u64,
    /// Wait after the second flip before the pair is compared.
    pub evaluate_delay_ms: u64,
    /// Wait before a mismatched pair is turned back down.
    pub mismatch_revert_ms: u64,
    /// Wait between the final match and the end-of-game report.
    pub finish_delay_ms: u64,
    /// Game clock period.
    pub timer_tick_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            preview_lead_in_ms: 3000,
            preview_countdown: 3,
            preview_tick_ms: 1000,
            evaluate_delay_ms: 800,
            mismatch_revert_ms: 600,
            finish_delay_ms: 500,
            timer_tick_ms: 1000,
        }
    }
}

impl TimingConfig {
    #[must_use]
    pub fn preview_lead_in(&self) -> Duration {
        Duration::from_millis(self.preview_lead_in_ms)
    }

    #[must_use]
    pub fn preview_tick(&self) -> Duration {
        Duration::from_millis(self.preview_tick_ms)
    }

    #[must_use]
    pub fn evaluate_delay(&self) -> Duration {
        Duration::from_millis(self.evaluate_delay_ms)
    }

    #[must_use]
    pub fn mismatch_revert(&self) -> Duration {
        Duration::from_millis(self.mismatch_revert_ms)
    }

    #[must_use]
    pub fn finish_delay(&self) -> Duration {
        Duration::from_millis(self.finish_delay_ms)
    }

    #[must_use]
    pub fn timer_tick(&self) -> Duration {
        Duration::from_millis(self.timer_tick_ms)
    }

    /// Time from game start until flips are accepted.
    ///
    /// The countdown announces `preview_countdown..=0`, so it takes one more
    /// tick than its starting value.
    #[must_use]
    pub fn preview_total(&self) -> Duration {
        let ticks = self.preview_countdown.saturating_add(1);
        self.preview_lead_in()
            .saturating_add(self.preview_tick().saturating_mul(ticks))
    }

    /// Reject zero periods and oversized countdowns.
    pub fn validate(&self) -> Result<()> {
        if self.preview_tick_ms == 0 || self.timer_tick_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "periodic intervals must be non-zero".to_string(),
            ));
        }
        if self.preview_countdown > MAX_PREVIEW_COUNTDOWN {
            return Err(EngineError::InvalidConfig(format!(
                "preview_countdown {} exceeds {}",
                self.preview_countdown, MAX_PREVIEW_COUNTDOWN
            )));
        }
        Ok(())
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub timing: TimingConfig,
    /// Fixed shuffle seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl EngineConfig {
    /// Parse a TOML document.
    ///
    /// ```
    /// use pairs_engine::core::EngineConfig;
    ///
    /// let config = EngineConfig::from_toml_str("seed = 7\n[timing]\nevaluate_delay_ms = 400").unwrap();
    /// assert_eq!(config.seed, Some(7));
    /// assert_eq!(config.timing.evaluate_delay_ms, 400);
    /// assert_eq!(config.timing.mismatch_revert_ms, 600);
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.timing.validate()?;
        Ok(config)
    }

    /// Set a fixed shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the timing block.
    #[must_use]
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles() {
        assert_eq!(Difficulty::Easy.profile(), DifficultyProfile::new(3, 4, 6));
        assert_eq!(Difficulty::Medium.profile(), DifficultyProfile::new(4, 4, 8));
        assert_eq!(Difficulty::Hard.profile(), DifficultyProfile::new(4, 5, 10));
    }

    #[test]
    fn test_grid_fits_pairs() {
        for difficulty in Difficulty::ALL {
            let p = difficulty.profile();
            assert_eq!((p.rows * p.cols) as usize, p.card_count(), "{}", difficulty);
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!(" Hard ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("MEDIUM".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert_eq!(
            "insane".parse::<Difficulty>(),
            Err(EngineError::UnknownDifficulty("insane".to_string()))
        );
    }

    #[test]
    fn test_default_difficulty() {
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn test_default_timing() {
        let timing = TimingConfig::default();
        assert_eq!(timing.evaluate_delay(), Duration::from_millis(800));
        assert_eq!(timing.mismatch_revert(), Duration::from_millis(600));
        assert_eq!(timing.finish_delay(), Duration::from_millis(500));
        assert_eq!(timing.preview_total(), Duration::from_secs(7));
    }

    #[test]
    fn test_from_toml_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_from_toml_rejects_zero_period() {
        let err = EngineConfig::from_toml_str("[timing]\ntimer_tick_ms = 0").unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn test_from_toml_rejects_huge_countdown() {
        let err = EngineConfig::from_toml_str("[timing]\npreview_countdown = 4294967295").unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));

        let config = EngineConfig::from_toml_str("[timing]\npreview_countdown = 60").unwrap();
        assert_eq!(config.timing.preview_total(), Duration::from_secs(3 + 61));
    }

    #[test]
    fn test_preview_total_saturates() {
        let timing = TimingConfig {
            preview_tick_ms: u64::MAX,
            preview_countdown: u32::MAX,
            ..TimingConfig::default()
        };
        assert_eq!(timing.preview_total(), Duration::MAX);
        assert!(timing.validate().is_err());
    }

    #[test]
    fn test_from_toml_parse_error() {
        let err = EngineConfig::from_toml_str("seed = \"abc\"").unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::default().with_seed(9).with_timing(TimingConfig {
            evaluate_delay_ms: 1,
            ..TimingConfig::default()
        });
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.timing.evaluate_delay_ms, 1);
    }
}
