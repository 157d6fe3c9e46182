use serde::{Deserialize, Serialize};
use strum::AsRefStr;

use crate::{normalize::normalize_optional_locality, ProjectRequirement, TeamCandidate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LocalityFit {
    Match,
    Mismatch,
    /// 案件・チームのどちらかが未指定
    Unspecified,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationEvaluation {
    pub fit: LocalityFit,
    pub score: f64, // 0〜100
    pub details: String,
}

/// 正規化後の値同士で所在地の一致を判定する
pub fn compare_locality(project_value: Option<&str>, team_value: Option<&str>) -> LocalityFit {
    match (
        normalize_optional_locality(project_value),
        normalize_optional_locality(team_value),
    ) {
        (Some(p), Some(t)) if p == t => LocalityFit::Match,
        (Some(_), Some(_)) => LocalityFit::Mismatch,
        _ => LocalityFit::Unspecified,
    }
}

/// 都市一致によるロケーション評価（スコアリング用）
///
/// エリアはハードフィルタでのみ扱い、スコアには反映しない。
pub fn evaluate_location(
    project: &ProjectRequirement,
    team: &TeamCandidate,
    neutral_score: f64,
) -> LocationEvaluation {
    let project_city = project.city.as_deref();
    let team_city = team.city.as_deref();

    match compare_locality(project_city, team_city) {
        LocalityFit::Match => LocationEvaluation {
            fit: LocalityFit::Match,
            score: 100.0,
            details: format!("都市一致: {}", team_city.unwrap_or_default().trim()),
        },
        LocalityFit::Mismatch => LocationEvaluation {
            fit: LocalityFit::Mismatch,
            score: 0.0,
            details: format!(
                "都市不一致: project={} vs team={}",
                project_city.unwrap_or_default().trim(),
                team_city.unwrap_or_default().trim()
            ),
        },
        LocalityFit::Unspecified => LocationEvaluation {
            fit: LocalityFit::Unspecified,
            score: neutral_score,
            details: match (project_city.is_some(), team_city.is_some()) {
                (false, _) => "案件の都市が未指定のため中立スコア".to_string(),
                _ => "チームの都市が不明のため中立スコア".to_string(),
            },
        },
    }
}

/// require_area 用: 案件にエリア指定がなければ None（フィルタ対象外）
pub fn area_requirement_met(project: &ProjectRequirement, team: &TeamCandidate) -> Option<bool> {
    normalize_optional_locality(project.area.as_deref())?;
    Some(compare_locality(project.area.as_deref(), team.area.as_deref()) == LocalityFit::Match)
}

/// require_city 用: 案件に都市指定がなければ None（フィルタ対象外）
pub fn city_requirement_met(project: &ProjectRequirement, team: &TeamCandidate) -> Option<bool> {
    normalize_optional_locality(project.city.as_deref())?;
    Some(compare_locality(project.city.as_deref(), team.city.as_deref()) == LocalityFit::Match)
}
