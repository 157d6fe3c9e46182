use serde::{Deserialize, Serialize};
use strum::AsRefStr;

use super::{
    coverage::{coverage, CoverageResult},
    location::{evaluate_location, LocalityFit},
    profile::TeamSkillProfile,
    requirements::SkillRequirementIndex,
};
use crate::{config::MatchingConfig, ProjectRequirement, TeamCandidate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ComponentStatus {
    PerfectMatch,
    Match,
    PartialMatch,
    Miss,
    Unknown,
}

/// 成分スコア（0〜100）と重み、判定理由
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentScore {
    pub score: f64,
    pub weight: f64,
    pub status: ComponentStatus,
    pub details: String,
}

impl ComponentScore {
    /// 合計スコアへの寄与分（weight × score / 100）
    pub fn contribution(&self) -> f64 {
        self.weight * self.score / 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitBreakdown {
    pub coverage: ComponentScore,
    pub level: ComponentScore,
    pub availability: ComponentScore,
    pub location: ComponentScore,
}

impl FitBreakdown {
    pub fn weighted_total(&self) -> f64 {
        self.coverage.contribution()
            + self.level.contribution()
            + self.availability.contribution()
            + self.location.contribution()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FitScore {
    /// 0〜100 の整数スコア
    pub score: u32,
    pub breakdown: FitBreakdown,
}

/// 1チーム分の評価結果（フィルタ・ランキングの入力）
#[derive(Debug, Clone)]
pub struct ScoredCandidate<'a> {
    pub team: &'a TeamCandidate,
    pub coverage: CoverageResult,
    pub fit: FitScore,
    pub location_fit: LocalityFit,
}

impl ScoredCandidate<'_> {
    pub fn score(&self) -> u32 {
        self.fit.score
    }

    pub fn coverage_percent(&self) -> f64 {
        self.coverage.coverage_percent
    }
}

/// 充足率・レベル余裕度・稼働時間・所在地を合成して適合スコアを出す
#[derive(Debug, Clone, Default)]
pub struct FitScorer {
    config: MatchingConfig,
}

impl FitScorer {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// 1チームを評価する純粋関数（共有するのは不変の索引のみ）
    pub fn evaluate<'a>(
        &self,
        index: &SkillRequirementIndex,
        project: &ProjectRequirement,
        team: &'a TeamCandidate,
    ) -> ScoredCandidate<'a> {
        let profile = TeamSkillProfile::from_team(team);
        let coverage = coverage(index, &profile);
        let location = evaluate_location(project, team, self.config.neutral_location_score);
        let location_fit = location.fit;
        let fit = self.score_with_location(
            &coverage,
            team,
            location.score,
            location.fit,
            location.details,
        );

        ScoredCandidate {
            team,
            coverage,
            fit,
            location_fit,
        }
    }

    /// 充足結果・チーム・案件から合成スコアを算出する
    pub fn score(
        &self,
        coverage: &CoverageResult,
        team: &TeamCandidate,
        project: &ProjectRequirement,
    ) -> FitScore {
        let location = evaluate_location(project, team, self.config.neutral_location_score);
        self.score_with_location(
            coverage,
            team,
            location.score,
            location.fit,
            location.details,
        )
    }

    fn score_with_location(
        &self,
        coverage: &CoverageResult,
        team: &TeamCandidate,
        location_score: f64,
        location_fit: LocalityFit,
        location_details: String,
    ) -> FitScore {
        let weights = self.config.weights;

        let breakdown = FitBreakdown {
            coverage: self.score_coverage(coverage, weights.coverage),
            level: self.score_level(coverage, weights.level),
            availability: self.score_availability(team, weights.availability),
            location: ComponentScore {
                score: location_score,
                weight: weights.location,
                status: match location_fit {
                    LocalityFit::Unspecified => ComponentStatus::Unknown,
                    _ => status_from_score(location_score),
                },
                details: location_details,
            },
        };

        let score = breakdown.weighted_total().round().clamp(0.0, 100.0) as u32;

        FitScore { score, breakdown }
    }

    fn score_coverage(&self, coverage: &CoverageResult, weight: f64) -> ComponentScore {
        let score = coverage.coverage_percent.clamp(0.0, 100.0);
        ComponentScore {
            score,
            weight,
            status: if coverage.required_count() == 0 {
                ComponentStatus::Unknown
            } else {
                status_from_score(score)
            },
            details: coverage.summary(),
        }
    }

    /// 一致スキルのみを対象に min(100, 100 × チームレベル / 要求レベル) を平均する
    fn score_level(&self, coverage: &CoverageResult, weight: f64) -> ComponentScore {
        let ratios: Vec<f64> = coverage
            .matched_details()
            .filter_map(|d| d.team_level.map(|level| level_ratio(level, d.level_required)))
            .collect();

        if ratios.is_empty() {
            return ComponentScore {
                score: 0.0,
                weight,
                status: ComponentStatus::Miss,
                details: "一致スキルなし".into(),
            };
        }

        let score = ratios.iter().sum::<f64>() / ratios.len() as f64;
        ComponentScore {
            score,
            weight,
            status: status_from_score(score),
            details: format!("一致{}件のレベル充足度 平均{:.0}%", ratios.len(), score),
        }
    }

    /// フルタイム相当の稼働時間で頭打ちになる線形スコア
    fn score_availability(&self, team: &TeamCandidate, weight: f64) -> ComponentScore {
        let hours = team.availability_hours();
        let full_time = self.config.full_time_hours_per_week;

        let score = if hours <= 0.0 {
            0.0
        } else if full_time <= 0.0 {
            100.0
        } else {
            (100.0 * hours / full_time).min(100.0)
        };

        ComponentScore {
            score,
            weight,
            status: status_from_score(score),
            details: format!("稼働 {:.1}h/週 (フルタイム基準 {:.1}h)", hours, full_time),
        }
    }
}

/// level_required は索引構築時に 1〜5 を保証済み
fn level_ratio(team_level: i64, level_required: i64) -> f64 {
    (100.0 * team_level as f64 / level_required as f64).min(100.0)
}

fn status_from_score(score: f64) -> ComponentStatus {
    if score >= 90.0 {
        ComponentStatus::PerfectMatch
    } else if score >= 70.0 {
        ComponentStatus::Match
    } else if score >= 40.0 {
        ComponentStatus::PartialMatch
    } else {
        ComponentStatus::Miss
    }
}
