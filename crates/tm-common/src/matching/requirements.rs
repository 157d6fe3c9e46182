use std::collections::BTreeMap;

use crate::{error::MatchError, RequiredSkill, MAX_SKILL_LEVEL, MIN_SKILL_LEVEL};

/// 案件の必須スキル索引（skill_id → 要求レベル）
///
/// skill_id 昇順の BTreeMap で保持するため、matched/missing の並びは常に決定的。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillRequirementIndex {
    required: BTreeMap<i64, RequiredSkill>,
}

impl SkillRequirementIndex {
    /// 必須スキル一覧から索引を構築する
    ///
    /// - 同一 skill_id・同一レベルの重複は黙って1件にまとめる
    /// - 同一 skill_id でレベルが食い違う場合は InvalidInput
    /// - 要求レベルが 1〜5 の範囲外なら InvalidInput
    pub fn build(skills: &[RequiredSkill]) -> Result<Self, MatchError> {
        let mut required: BTreeMap<i64, RequiredSkill> = BTreeMap::new();

        for skill in skills {
            if !(MIN_SKILL_LEVEL..=MAX_SKILL_LEVEL).contains(&skill.level_required) {
                return Err(MatchError::invalid(format!(
                    "required level for skill {} must be within [{}, {}] (got {})",
                    skill.skill_id, MIN_SKILL_LEVEL, MAX_SKILL_LEVEL, skill.level_required
                )));
            }

            match required.get(&skill.skill_id) {
                Some(existing) if existing.level_required != skill.level_required => {
                    return Err(MatchError::invalid(format!(
                        "skill {} is required twice with conflicting levels ({} vs {})",
                        skill.skill_id, existing.level_required, skill.level_required
                    )));
                }
                Some(_) => {}
                None => {
                    required.insert(skill.skill_id, skill.clone());
                }
            }
        }

        Ok(Self { required })
    }

    pub fn len(&self) -> usize {
        self.required.len()
    }

    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
    }

    pub fn get(&self, skill_id: i64) -> Option<&RequiredSkill> {
        self.required.get(&skill_id)
    }

    pub fn level_required(&self, skill_id: i64) -> Option<i64> {
        self.required.get(&skill_id).map(|s| s.level_required)
    }

    /// skill_id 昇順で走査
    pub fn iter(&self) -> impl Iterator<Item = &RequiredSkill> {
        self.required.values()
    }

    /// 表示用のスキル名（名前が空なら `skill#<id>`）
    pub fn display_name(&self, skill_id: i64) -> String {
        match self.required.get(&skill_id) {
            Some(skill) if !skill.skill_name.trim().is_empty() => skill.skill_name.clone(),
            _ => format!("skill#{skill_id}"),
        }
    }
}
