use serde::{Deserialize, Serialize};
use strum::AsRefStr;
use tracing::debug;

use super::{
    location::{area_requirement_met, city_requirement_met},
    scoring::ScoredCandidate,
};
use crate::{error::MatchError, ProjectRequirement};

/// 適用されたフィルタ名（レスポンスの filters_applied に載る）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr)]
pub enum FilterName {
    #[serde(rename = "minCoverage")]
    #[strum(serialize = "minCoverage")]
    MinCoverage,
    #[serde(rename = "requireArea")]
    #[strum(serialize = "requireArea")]
    RequireArea,
    #[serde(rename = "requireCity")]
    #[strum(serialize = "requireCity")]
    RequireCity,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterOptions {
    /// 0.0〜1.0。これ未満の充足率は除外（境界値は残す）
    pub min_coverage: f64,
    pub require_area: bool,
    pub require_city: bool,
}

impl FilterOptions {
    pub fn validate(&self) -> Result<(), MatchError> {
        if !(0.0..=1.0).contains(&self.min_coverage) {
            return Err(MatchError::invalid(format!(
                "min_coverage must be within [0, 1] (got {})",
                self.min_coverage
            )));
        }
        Ok(())
    }

    /// デフォルト以外の値で指定されたフィルタ（固定順）
    pub fn requested(&self) -> Vec<FilterName> {
        let mut names = Vec::new();
        if self.min_coverage > 0.0 {
            names.push(FilterName::MinCoverage);
        }
        if self.require_area {
            names.push(FilterName::RequireArea);
        }
        if self.require_city {
            names.push(FilterName::RequireCity);
        }
        names
    }
}

/// フィルタごとの除外件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub removed_by_min_coverage: usize,
    pub removed_by_area: usize,
    pub removed_by_city: usize,
}

impl FilterStats {
    pub fn total_removed(&self) -> usize {
        self.removed_by_min_coverage + self.removed_by_area + self.removed_by_city
    }
}

#[derive(Debug, Clone)]
pub struct FilterOutcome<'a> {
    pub survivors: Vec<ScoredCandidate<'a>>,
    pub filters_applied: Vec<FilterName>,
    pub stats: FilterStats,
}

/// 充足率の閾値判定（ratio == min は通過）
pub fn meets_min_coverage(coverage_ratio: f64, min_coverage: f64) -> bool {
    coverage_ratio >= min_coverage
}

/// 閾値フィルタ（AND 合成）
#[derive(Debug, Clone, Copy)]
pub struct FilterPipeline {
    options: FilterOptions,
}

impl FilterPipeline {
    pub fn new(options: FilterOptions) -> Result<Self, MatchError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// filters_applied は「オプションが指定されたか」で決まり、実際に除外が起きたかは問わない。
    pub fn filter<'a>(
        &self,
        project: &ProjectRequirement,
        candidates: Vec<ScoredCandidate<'a>>,
    ) -> FilterOutcome<'a> {
        let filters_applied = self.options.requested();
        let mut stats = FilterStats::default();

        let survivors: Vec<_> = candidates
            .into_iter()
            .filter(|candidate| {
                if self.options.min_coverage > 0.0
                    && !meets_min_coverage(candidate.coverage.ratio(), self.options.min_coverage)
                {
                    stats.removed_by_min_coverage += 1;
                    debug!(
                        team_id = candidate.team.id,
                        coverage_percent = candidate.coverage_percent(),
                        "dropped by minCoverage"
                    );
                    return false;
                }

                if self.options.require_area
                    && area_requirement_met(project, candidate.team) == Some(false)
                {
                    stats.removed_by_area += 1;
                    debug!(team_id = candidate.team.id, "dropped by requireArea");
                    return false;
                }

                if self.options.require_city
                    && city_requirement_met(project, candidate.team) == Some(false)
                {
                    stats.removed_by_city += 1;
                    debug!(team_id = candidate.team.id, "dropped by requireCity");
                    return false;
                }

                true
            })
            .collect();

        FilterOutcome {
            survivors,
            filters_applied,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{requirements::SkillRequirementIndex, scoring::FitScorer};
    use crate::{RequiredSkill, TeamCandidate, TeamSkillEntry};

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
                    skill_name: "AWS".into(),
                    level_required: 3,
                },
            ],
            area: Some("Kanto".into()),
            city: Some("Tokyo".into()),
            ..ProjectRequirement::default()
        }
    }

    fn team(id: i64, levels: &[(i64, i64)], area: &str, city: &str) -> TeamCandidate {
        TeamCandidate {
            id,
            name: format!("team-{id}"),
            area: Some(area.into()),
            city: Some(city.into()),
            avg_availability_hours_per_week: 30.0,
            members_count: 3,
            skills: levels
                .iter()
                .map(|(skill_id, level)| TeamSkillEntry {
                    skill_id: *skill_id,
                    skill_name: String::new(),
                    level: Some(*level),
                    years_experience: None,
                })
                .collect(),
        }
    }

    fn run(options: FilterOptions, teams: &[TeamCandidate]) -> (Vec<i64>, Vec<FilterName>) {
        let project = base_project();
        let index = SkillRequirementIndex::build(&project.required_skills).unwrap();
        let scorer = FitScorer::default();
        let scored = teams
            .iter()
            .map(|t| scorer.evaluate(&index, &project, t))
            .collect();

        let outcome = FilterPipeline::new(options).unwrap().filter(&project, scored);
        (
            outcome.survivors.iter().map(|c| c.team.id).collect(),
            outcome.filters_applied,
        )
    }

    #[test]
    fn min_coverage_boundary_is_inclusive() {
        let teams = [
            team(1, &[(1, 3), (2, 3)], "Kanto", "Tokyo"),
            team(2, &[(1, 3)], "Kanto", "Tokyo"),
            team(3, &[], "Kanto", "Tokyo"),
        ];
        let (ids, applied) = run(
            FilterOptions {
                min_coverage: 0.5,
                ..FilterOptions::default()
            },
            &teams,
        );

        assert_eq!(ids, vec![1, 2]);
        assert_eq!(applied, vec![FilterName::MinCoverage]);
        assert!(meets_min_coverage(0.5, 0.5));
        assert!(!meets_min_coverage(0.49999, 0.5));
    }

    #[test]
    fn zero_min_coverage_keeps_everyone_and_is_not_reported() {
        let teams = [team(1, &[], "Kanto", "Tokyo")];
        let (ids, applied) = run(FilterOptions::default(), &teams);

        assert_eq!(ids, vec![1]);
        assert!(applied.is_empty());
    }

    #[test]
    fn area_and_city_filters_compose_with_and() {
        let teams = [
            team(1, &[(1, 3)], "Kanto", "Tokyo"),
            team(2, &[(1, 3)], "Kansai", "Tokyo"),
            team(3, &[(1, 3)], "Kanto", "Yokohama"),
        ];
        let (ids, applied) = run(
            FilterOptions {
                require_area: true,
                require_city: true,
                ..FilterOptions::default()
            },
            &teams,
        );

        assert_eq!(ids, vec![1]);
        assert_eq!(applied, vec![FilterName::RequireArea, FilterName::RequireCity]);
    }

    #[test]
    fn requested_filter_is_reported_even_without_removals() {
        let teams = [team(1, &[(1, 3), (2, 3)], "Kanto", "Tokyo")];
        let (ids, applied) = run(
            FilterOptions {
                min_coverage: 0.1,
                require_city: true,
                ..FilterOptions::default()
            },
            &teams,
        );

        assert_eq!(ids, vec![1]);
        assert_eq!(applied, vec![FilterName::MinCoverage, FilterName::RequireCity]);
        assert_eq!(FilterName::MinCoverage.as_ref(), "minCoverage");
    }

    #[test]
    fn rejects_out_of_range_min_coverage() {
        for bad in [-0.1, 1.5, f64::NAN] {
            let err = FilterPipeline::new(FilterOptions {
                min_coverage: bad,
                ..FilterOptions::default()
            })
            .unwrap_err();
            assert!(matches!(err, MatchError::InvalidInput(_)));
        }
    }
}
