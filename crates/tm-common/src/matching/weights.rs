use serde::{Deserialize, Serialize};

use crate::error::MatchError;

/// 標準重み（ランキング用）
/// スキル充足率を最重視し、レベル余裕度・稼働時間・所在地を補助的に加点する
pub const DEFAULT_WEIGHTS: ScoringWeights = ScoringWeights {
    coverage: 60.0,
    level: 20.0,
    availability: 10.0,
    location: 10.0,
};

/// 充足率のみで並べたい場合の重み（検証・比較用）
pub const COVERAGE_ONLY_WEIGHTS: ScoringWeights = ScoringWeights {
    coverage: 100.0,
    level: 0.0,
    availability: 0.0,
    location: 0.0,
};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// 各成分（0〜100）に掛ける重み。合計は 100 であること。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub coverage: f64,
    pub level: f64,
    pub availability: f64,
    pub location: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.coverage + self.level + self.availability + self.location
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        let all = [
            ("coverage", self.coverage),
            ("level", self.level),
            ("availability", self.availability),
            ("location", self.location),
        ];

        if let Some((name, value)) = all.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(MatchError::invalid(format!(
                "weight `{name}` must be a non-negative number (got {value})"
            )));
        }

        let sum = self.sum();
        if (sum - 100.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(MatchError::invalid(format!(
                "scoring weights must sum to 100 (got {sum})"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_sum_to_hundred() {
        assert!((DEFAULT_WEIGHTS.sum() - 100.0).abs() < 1e-6);
        assert!((COVERAGE_ONLY_WEIGHTS.sum() - 100.0).abs() < 1e-6);
        assert!(DEFAULT_WEIGHTS.validate().is_ok());
    }

    #[test]
    fn rejects_wrong_sum() {
        let weights = ScoringWeights {
            coverage: 50.0,
            ..DEFAULT_WEIGHTS
        };
        let err = weights.validate().unwrap_err();
        assert!(err.to_string().contains("sum to 100"));
    }

    #[test]
    fn rejects_negative_weight() {
        let weights = ScoringWeights {
            coverage: 80.0,
            level: -10.0,
            availability: 20.0,
            location: 10.0,
        };
        let err = weights.validate().unwrap_err();
        assert!(err.to_string().contains("level"));
    }
}
