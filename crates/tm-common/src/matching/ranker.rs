use std::cmp::Ordering;

use super::{filter::FilterName, scoring::ScoredCandidate};
use crate::api::match_response::{MatchResponse, MatchResult};

/// 並び順: score 降順 → 充足率 降順 → 稼働時間 降順 → team_id 昇順
pub fn compare_candidates(a: &ScoredCandidate<'_>, b: &ScoredCandidate<'_>) -> Ordering {
    b.score()
        .cmp(&a.score())
        .then_with(|| b.coverage.ratio().total_cmp(&a.coverage.ratio()))
        .then_with(|| {
            b.team
                .availability_hours()
                .total_cmp(&a.team.availability_hours())
        })
        .then_with(|| a.team.id.cmp(&b.team.id))
}

#[derive(Debug, Clone, Copy)]
pub struct Ranker {
    top: usize,
    explain: bool,
}

impl Ranker {
    pub fn new(top: usize, explain: bool) -> Self {
        Self { top, explain }
    }

    /// 並べ替えて上位 top 件に切り詰める。候補0件でも filters_applied は保持する。
    pub fn rank(
        &self,
        mut survivors: Vec<ScoredCandidate<'_>>,
        filters_applied: Vec<FilterName>,
    ) -> MatchResponse {
        let survivor_count = survivors.len();

        survivors.sort_by(compare_candidates);
        survivors.truncate(self.top);

        let candidates = survivors
            .iter()
            .map(|candidate| MatchResult::from_scored(candidate, self.explain))
            .collect();

        let mut response = MatchResponse::new(candidates, filters_applied);
        response.survivor_count = survivor_count;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{requirements::SkillRequirementIndex, scoring::FitScorer};
    use crate::{ProjectRequirement, RequiredSkill, TeamCandidate, TeamSkillEntry};

    fn base_project() -> ProjectRequirement {
        ProjectRequirement {
            id: 1,
            required_skills: vec![
                RequiredSkill {
                    skill_id: 1,
                    skill_name: "Rust".into(),
                    level_required: 3,
                },
                RequiredSkill {
                    skill_id: 2,
                    skill_name: "Kubernetes".into(),
                    level_required: 3,
                },
            ],
            ..ProjectRequirement::default()
        }
    }

    fn base_team(id: i64, skills: &[i64], hours: f64) -> TeamCandidate {
        TeamCandidate {
            id,
            name: format!("team-{id}"),
            avg_availability_hours_per_week: hours,
            members_count: 2,
            skills: skills
                .iter()
                .map(|skill_id| TeamSkillEntry {
                    skill_id: *skill_id,
                    skill_name: String::new(),
                    level: Some(4),
                    years_experience: None,
                })
                .collect(),
            ..TeamCandidate::default()
        }
    }

    fn score_all(teams: &[TeamCandidate]) -> Vec<ScoredCandidate<'_>> {
        let project = base_project();
        let index = SkillRequirementIndex::build(&project.required_skills).unwrap();
        let scorer = FitScorer::default();
        teams
            .iter()
            .map(|t| scorer.evaluate(&index, &project, t))
            .collect()
    }

    fn rank(teams: &[TeamCandidate], top: usize) -> MatchResponse {
        Ranker::new(top, false).rank(score_all(teams), vec![])
    }

    #[test]
    fn orders_by_score_descending() {
        let teams = [
            base_team(1, &[1], 40.0),
            base_team(2, &[1, 2], 40.0),
            base_team(3, &[], 40.0),
        ];
        let response = rank(&teams, 10);

        assert_eq!(response.team_ids(), vec![2, 1, 3]);
        assert!(response
            .candidates
            .windows(2)
            .all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn ties_break_on_availability_then_team_id() {
        // 32h / 33h はどちらも合計 93 に丸まる（93.0 / 93.25）
        let teams = [
            base_team(9, &[1, 2], 32.0),
            base_team(4, &[1, 2], 33.0),
            base_team(7, &[1, 2], 32.0),
        ];
        let response = rank(&teams, 10);

        assert!(response.candidates.iter().all(|c| c.score == 93));
        assert_eq!(response.team_ids(), vec![4, 7, 9]);

        let reversed: Vec<_> = teams.iter().rev().cloned().collect();
        assert_eq!(rank(&reversed, 10).team_ids(), vec![4, 7, 9]);
    }

    #[test]
    fn truncates_to_top_and_keeps_survivor_count() {
        let teams = [
            base_team(1, &[1], 10.0),
            base_team(2, &[1, 2], 10.0),
            base_team(3, &[2], 10.0),
        ];
        let response = rank(&teams, 2);

        assert_eq!(response.candidates.len(), 2);
        assert_eq!(response.survivor_count, 3);
        assert_eq!(response.team_ids()[0], 2);
    }

    #[test]
    fn zero_top_returns_empty_without_error() {
        let teams = [base_team(1, &[1], 10.0)];
        let response =
            Ranker::new(0, true).rank(score_all(&teams), vec![FilterName::RequireCity]);

        assert!(response.candidates.is_empty());
        assert_eq!(response.filters_applied, vec![FilterName::RequireCity]);
    }
}
