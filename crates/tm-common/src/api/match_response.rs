use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::matching::{
    coverage::SkillMatchDetail,
    filter::FilterName,
    scoring::{FitBreakdown, ScoredCandidate},
};

/// 候補算出レスポンス
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    /// スコア順の候補（top 件以下）
    pub candidates: Vec<MatchResult>,
    /// 指定されたフィルタ名（候補が0件でも埋まる）
    pub filters_applied: Vec<FilterName>,

    // === メタデータ ===
    pub match_run_id: String,
    pub engine_version: String,
    pub computed_at: DateTime<Utc>,
    /// フィルタ前の候補チーム数
    pub pool_size: usize,
    /// フィルタ通過数（top で切り詰める前）
    pub survivor_count: usize,
}

impl MatchResponse {
    pub fn new(candidates: Vec<MatchResult>, filters_applied: Vec<FilterName>) -> Self {
        Self {
            survivor_count: candidates.len(),
            candidates,
            filters_applied,
            match_run_id: String::new(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            computed_at: Utc::now(),
            pool_size: 0,
        }
    }

    pub fn filter_names(&self) -> Vec<&str> {
        self.filters_applied.iter().map(|f| f.as_ref()).collect()
    }

    pub fn team_ids(&self) -> Vec<i64> {
        self.candidates.iter().map(|c| c.team_id).collect()
    }
}

/// チーム1件分の結果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub team_id: i64,
    pub team_name: String,
    /// 0〜100
    pub score: u32,
    pub breakdown: ScoreBreakdown,
    /// explain=true のときのみ
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<MatchExplanation>,
}

/// スコア内訳
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// 必須スキル充足率（0〜100）
    pub skill_coverage_percent: f64,
    pub matched_skill_names: Vec<String>,
    pub missing_skill_names: Vec<String>,
    pub members_count: u32,
    pub city: Option<String>,
    pub avg_availability_hours_per_week: f64,
    /// 成分スコア（各 0〜100）
    pub level_sufficiency: f64,
    pub availability_score: f64,
    pub location_score: f64,
}

/// 説明モードの詳細
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchExplanation {
    /// 例: "必須スキル3件中2件(67%)に合致 (一致: Node.js, React / 不足: PostgreSQL)"
    pub summary: String,
    pub components: FitBreakdown,
    pub skills: Vec<SkillMatchDetail>,
}

impl MatchResult {
    pub fn from_scored(candidate: &ScoredCandidate<'_>, explain: bool) -> Self {
        let team = candidate.team;
        let components = &candidate.fit.breakdown;

        let breakdown = ScoreBreakdown {
            skill_coverage_percent: candidate.coverage.coverage_percent,
            matched_skill_names: candidate.coverage.matched_names(),
            missing_skill_names: candidate.coverage.missing_names(),
            members_count: team.members_count,
            city: team.city.clone(),
            avg_availability_hours_per_week: team.availability_hours(),
            level_sufficiency: components.level.score,
            availability_score: components.availability.score,
            location_score: components.location.score,
        };

        let explanation = explain.then(|| MatchExplanation {
            summary: candidate.coverage.summary(),
            components: components.clone(),
            skills: candidate.coverage.details.clone(),
        });

        Self {
            team_id: team.id,
            team_name: team.name.clone(),
            score: candidate.fit.score,
            breakdown,
            explanation,
        }
    }
}
