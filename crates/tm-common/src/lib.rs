pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod matching;
pub mod normalize;
pub mod run_id;

use serde::{Deserialize, Serialize};

pub use api::match_request::MatchOptions;
pub use api::match_response::{MatchResponse, MatchResult};
pub use config::MatchingConfig;
pub use error::MatchError;
pub use matching::pipeline::{compute_candidates, MatchingEngine};

/// スキルレベルの下限・上限（1〜5）
pub const MIN_SKILL_LEVEL: i64 = 1;
pub const MAX_SKILL_LEVEL: i64 = 5;

// Commonly used data models for matching functions.

/// 案件側の必須スキル（skill_id ごとに要求レベル）
///
/// `level_required` は 1〜5。範囲外は InvalidInput。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredSkill {
    pub skill_id: i64,
    #[serde(default)]
    pub skill_name: String,
    pub level_required: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequirement {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<RequiredSkill>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

/// チームが保有するスキル1件
///
/// `level` が None もしくは 1〜5 の範囲外の場合は「未設定」として扱う。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSkillEntry {
    pub skill_id: i64,
    #[serde(default)]
    pub skill_name: String,
    #[serde(default)]
    pub level: Option<i64>,
    #[serde(default)]
    pub years_experience: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamCandidate {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub avg_availability_hours_per_week: f64,
    #[serde(default)]
    pub members_count: u32,
    #[serde(default)]
    pub skills: Vec<TeamSkillEntry>,
}

impl TeamCandidate {
    /// 稼働時間（負数・NaN は 0 とみなす。+∞ はそのまま）
    pub fn availability_hours(&self) -> f64 {
        let hours = self.avg_availability_hours_per_week;
        if hours > 0.0 {
            hours
        } else {
            0.0
        }
    }
}
