use crate::error::MatchError;
use crate::matching::weights::{ScoringWeights, DEFAULT_WEIGHTS};

/// フルタイム相当の週あたり稼働時間（これ以上は稼働スコア 100 で頭打ち）
pub const DEFAULT_FULL_TIME_HOURS: f64 = 40.0;
/// 都市が片方でも未指定のときの所在地スコア
pub const DEFAULT_NEUTRAL_LOCATION_SCORE: f64 = 50.0;
/// この件数以上のチームは rayon で並列スコアリングする
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// スコアリング設定（環境変数から読み込み可）
#[derive(Debug, Clone, PartialEq)]
pub struct MatchingConfig {
    pub weights: ScoringWeights,
    pub full_time_hours_per_week: f64,
    pub neutral_location_score: f64,
    pub parallel_threshold: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            full_time_hours_per_week: DEFAULT_FULL_TIME_HOURS,
            neutral_location_score: DEFAULT_NEUTRAL_LOCATION_SCORE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl MatchingConfig {
    /// 環境変数から設定を読み込み（未設定・パース不能な値はデフォルト）
    pub fn from_env() -> Self {
        Self {
            weights: ScoringWeights {
                coverage: env_or("TM_WEIGHT_COVERAGE", DEFAULT_WEIGHTS.coverage),
                level: env_or("TM_WEIGHT_LEVEL", DEFAULT_WEIGHTS.level),
                availability: env_or("TM_WEIGHT_AVAILABILITY", DEFAULT_WEIGHTS.availability),
                location: env_or("TM_WEIGHT_LOCATION", DEFAULT_WEIGHTS.location),
            },
            full_time_hours_per_week: env_or("TM_FULL_TIME_HOURS", DEFAULT_FULL_TIME_HOURS),
            neutral_location_score: env_or(
                "TM_NEUTRAL_LOCATION_SCORE",
                DEFAULT_NEUTRAL_LOCATION_SCORE,
            ),
            parallel_threshold: env_or("TM_PARALLEL_THRESHOLD", DEFAULT_PARALLEL_THRESHOLD),
        }
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        self.weights.validate()?;

        if !(self.full_time_hours_per_week.is_finite() && self.full_time_hours_per_week > 0.0) {
            return Err(MatchError::invalid(format!(
                "full_time_hours_per_week must be a positive number (got {})",
                self.full_time_hours_per_week
            )));
        }

        if !(0.0..=100.0).contains(&self.neutral_location_score) {
            return Err(MatchError::invalid(format!(
                "neutral_location_score must be within [0, 100] (got {})",
                self.neutral_location_score
            )));
        }

        Ok(())
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}
