use serde::{Deserialize, Serialize};
use strum::AsRefStr;

use super::{profile::TeamSkillProfile, requirements::SkillRequirementIndex};

/// 必須スキルを満たせなかった理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MissReason {
    /// チームがスキル自体を保有していない
    NotHeld,
    /// 保有しているがレベル未設定
    LevelUnassigned,
    /// 保有しているが要求レベル未満
    UnderLeveled,
}

/// 必須スキル1件ごとの判定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillMatchDetail {
    pub skill_id: i64,
    pub skill_name: String,
    pub level_required: i64,
    pub team_level: Option<i64>,
    pub years_experience: Option<f64>,
    pub matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub miss_reason: Option<MissReason>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoverageResult {
    /// skill_id 昇順
    pub matched_skill_ids: Vec<i64>,
    /// skill_id 昇順
    pub missing_skill_ids: Vec<i64>,
    /// 0〜100
    pub coverage_percent: f64,
    pub details: Vec<SkillMatchDetail>,
}

impl CoverageResult {
    pub fn required_count(&self) -> usize {
        self.matched_skill_ids.len() + self.missing_skill_ids.len()
    }

    /// 0〜1 の充足率（件数から直接算出）
    pub fn ratio(&self) -> f64 {
        let required = self.required_count();
        if required == 0 {
            1.0
        } else {
            self.matched_skill_ids.len() as f64 / required as f64
        }
    }

    pub fn matched_details(&self) -> impl Iterator<Item = &SkillMatchDetail> {
        self.details.iter().filter(|d| d.matched)
    }

    pub fn matched_names(&self) -> Vec<String> {
        self.details
            .iter()
            .filter(|d| d.matched)
            .map(|d| d.skill_name.clone())
            .collect()
    }

    pub fn missing_names(&self) -> Vec<String> {
        self.details
            .iter()
            .filter(|d| !d.matched)
            .map(|d| d.skill_name.clone())
            .collect()
    }

    /// 説明用の一行サマリー
    pub fn summary(&self) -> String {
        let required = self.required_count();
        if required == 0 {
            return "必須スキル要件なし".to_string();
        }

        let mut matched = self.matched_names();
        matched.sort();
        let mut missing = self.missing_names();
        missing.sort();

        format!(
            "必須スキル{}件中{}件({:.0}%)に合致 (一致: {} / 不足: {})",
            required,
            matched.len(),
            self.coverage_percent,
            if matched.is_empty() {
                "なし".to_string()
            } else {
                matched.join(", ")
            },
            if missing.is_empty() {
                "なし".to_string()
            } else {
                missing.join(", ")
            }
        )
    }
}

/// 必須スキル索引とチームプロファイルを突き合わせ、充足状況を算出する
///
/// 一致条件: チームが保有 かつ レベルが設定済み かつ チームレベル >= 要求レベル。
/// レベル未設定は要求レベル 1 であっても不一致。
pub fn coverage(index: &SkillRequirementIndex, profile: &TeamSkillProfile) -> CoverageResult {
    let mut matched_skill_ids = Vec::new();
    let mut missing_skill_ids = Vec::new();
    let mut details = Vec::with_capacity(index.len());

    for required in index.iter() {
        let holding = profile.get(required.skill_id);
        let team_level = holding.and_then(|h| h.level);

        let miss_reason = match (holding, team_level) {
            (None, _) => Some(MissReason::NotHeld),
            (Some(_), None) => Some(MissReason::LevelUnassigned),
            (Some(_), Some(level)) if level < required.level_required => {
                Some(MissReason::UnderLeveled)
            }
            (Some(_), Some(_)) => None,
        };
        let matched = miss_reason.is_none();

        if matched {
            matched_skill_ids.push(required.skill_id);
        } else {
            missing_skill_ids.push(required.skill_id);
        }

        details.push(SkillMatchDetail {
            skill_id: required.skill_id,
            skill_name: index.display_name(required.skill_id),
            level_required: required.level_required,
            team_level,
            years_experience: holding.and_then(|h| h.years_experience),
            matched,
            miss_reason,
        });
    }

    let coverage_percent = if index.is_empty() {
        100.0
    } else {
        100.0 * matched_skill_ids.len() as f64 / index.len() as f64
    };

    CoverageResult {
        matched_skill_ids,
        missing_skill_ids,
        coverage_percent,
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RequiredSkill, TeamSkillEntry};

    fn index(reqs: &[(i64, &str, i64)]) -> SkillRequirementIndex {
        let skills: Vec<_> = reqs
            .iter()
            .map(|(id, name, level)| RequiredSkill {
                skill_id: *id,
                skill_name: (*name).into(),
                level_required: *level,
            })
            .collect();
        SkillRequirementIndex::build(&skills).expect("valid requirements")
    }

    fn profile(skills: &[(i64, Option<i64>)]) -> TeamSkillProfile {
        let entries: Vec<_> = skills
            .iter()
            .map(|(id, level)| TeamSkillEntry {
                skill_id: *id,
                skill_name: String::new(),
                level: *level,
                years_experience: None,
            })
            .collect();
        TeamSkillProfile::build(1, &entries)
    }

    #[test]
    fn partial_coverage_splits_matched_and_missing() {
        let result = coverage(
            &index(&[(1, "A", 3), (2, "B", 4)]),
            &profile(&[(1, Some(5)), (2, Some(2))]),
        );

        assert_eq!(result.matched_skill_ids, vec![1]);
        assert_eq!(result.missing_skill_ids, vec![2]);
        assert!((result.coverage_percent - 50.0).abs() < f64::EPSILON);
        assert_eq!(result.ratio(), 0.5);
        assert_eq!(result.details[1].miss_reason, Some(MissReason::UnderLeveled));
    }

    #[test]
    fn unassigned_level_never_matches() {
        let result = coverage(&index(&[(1, "A", 1)]), &profile(&[(1, None)]));
        assert!(result.matched_skill_ids.is_empty());
        assert_eq!(result.missing_skill_ids, vec![1]);
        assert_eq!(result.details[0].miss_reason, Some(MissReason::LevelUnassigned));
    }

    #[test]
    fn no_requirements_is_full_coverage() {
        let result = coverage(&index(&[]), &profile(&[]));
        assert_eq!(result.coverage_percent, 100.0);
        assert_eq!(result.ratio(), 1.0);
        assert_eq!(result.summary(), "必須スキル要件なし");
    }

    #[test]
    fn skill_not_held_is_missing() {
        let result = coverage(&index(&[(1, "A", 2), (2, "B", 2)]), &profile(&[(1, Some(2))]));
        assert_eq!(result.missing_skill_ids, vec![2]);
        assert_eq!(result.details[1].miss_reason, Some(MissReason::NotHeld));
        assert_eq!(MissReason::NotHeld.as_ref(), "not_held");
    }

    #[test]
    fn summary_lists_matched_and_missing_names() {
        let result = coverage(
            &index(&[(1, "React", 4), (2, "Node.js", 4), (3, "PostgreSQL", 4)]),
            &profile(&[(1, Some(5)), (2, Some(5)), (3, Some(3))]),
        );

        let summary = result.summary();
        assert!(summary.contains("3件中2件(67%)"));
        assert!(summary.contains("一致: Node.js, React"));
        assert!(summary.contains("不足: PostgreSQL"));
    }
}
