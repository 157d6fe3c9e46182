use std::collections::HashMap;

use tracing::debug;

use crate::{TeamCandidate, TeamSkillEntry, MAX_SKILL_LEVEL, MIN_SKILL_LEVEL};

/// 正規化済みのスキル保有状況
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillHolding {
    /// None = レベル未設定（どの要求レベルも満たさない）
    pub level: Option<i64>,
    pub years_experience: Option<f64>,
}

/// チームのスキル索引（skill_id → SkillHolding）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamSkillProfile {
    holdings: HashMap<i64, SkillHolding>,
}

impl TeamSkillProfile {
    pub fn from_team(team: &TeamCandidate) -> Self {
        Self::build(team.id, &team.skills)
    }

    /// 生データからプロファイルを構築する（失敗しない）
    ///
    /// 1〜5 の範囲外のレベルは未設定扱いに落とす。同一 skill_id が複数ある場合は
    /// 有効なレベルが高い方を採用する。
    pub fn build(team_id: i64, entries: &[TeamSkillEntry]) -> Self {
        let mut holdings: HashMap<i64, SkillHolding> = HashMap::with_capacity(entries.len());

        for entry in entries {
            let level = normalize_level(entry.level);
            if level.is_none() && entry.level.is_some() {
                debug!(
                    team_id,
                    skill_id = entry.skill_id,
                    raw_level = ?entry.level,
                    "skill level out of range; treating as unassigned"
                );
            }

            let years_experience = entry
                .years_experience
                .filter(|years| years.is_finite() && *years >= 0.0);

            let candidate = SkillHolding {
                level,
                years_experience,
            };

            holdings
                .entry(entry.skill_id)
                .and_modify(|current| {
                    if candidate.level > current.level {
                        *current = candidate;
                    }
                })
                .or_insert(candidate);
        }

        Self { holdings }
    }

    pub fn get(&self, skill_id: i64) -> Option<&SkillHolding> {
        self.holdings.get(&skill_id)
    }

    /// 有効なレベル（未設定なら None）
    pub fn level(&self, skill_id: i64) -> Option<i64> {
        self.holdings.get(&skill_id).and_then(|h| h.level)
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}

fn normalize_level(raw: Option<i64>) -> Option<i64> {
    raw.filter(|level| (MIN_SKILL_LEVEL..=MAX_SKILL_LEVEL).contains(level))
}
