use rayon::prelude::*;
use tracing::{debug, info, info_span, warn};

use super::{
    filter::FilterPipeline,
    ranker::Ranker,
    requirements::SkillRequirementIndex,
    scoring::{FitScorer, ScoredCandidate},
};
use crate::{
    api::{match_request::MatchOptions, match_response::MatchResponse},
    config::MatchingConfig,
    error::MatchError,
    run_id, ProjectRequirement, TeamCandidate,
};

/// 案件1件 × 候補チーム群のマッチングエンジン
///
/// 呼び出しごとに索引・評価結果を作り直し、呼び出しをまたぐ状態は持たない。
#[derive(Debug, Clone, Default)]
pub struct MatchingEngine {
    scorer: FitScorer,
}

impl MatchingEngine {
    pub fn new(config: MatchingConfig) -> Result<Self, MatchError> {
        config.validate()?;
        Ok(Self {
            scorer: FitScorer::new(config),
        })
    }

    /// 環境変数の設定でエンジンを作る
    pub fn from_env() -> Result<Self, MatchError> {
        Self::new(MatchingConfig::from_env())
    }

    pub fn config(&self) -> &MatchingConfig {
        self.scorer.config()
    }

    /// 索引構築 → チームごとの評価（並列可）→ フィルタ → ランキング
    pub fn compute_candidates(
        &self,
        project: &ProjectRequirement,
        teams: &[TeamCandidate],
        options: &MatchOptions,
    ) -> Result<MatchResponse, MatchError> {
        let match_run_id = run_id::generate();
        let span = info_span!(
            "compute_candidates",
            match_run_id = %match_run_id,
            project_id = project.id,
            pool_size = teams.len()
        );
        let _entered = span.enter();

        if let Err(err) = options.validate() {
            warn!(error = %err, "rejected match options");
            return Err(err);
        }
        let top = options.top_limit()?;
        let pipeline = FilterPipeline::new(options.filter_options())?;
        let index = SkillRequirementIndex::build(&project.required_skills).map_err(|err| {
            warn!(error = %err, "rejected project requirements");
            err
        })?;

        let scored = self.score_all(&index, project, teams);
        let outcome = pipeline.filter(project, scored);

        debug!(
            removed_by_min_coverage = outcome.stats.removed_by_min_coverage,
            removed_by_area = outcome.stats.removed_by_area,
            removed_by_city = outcome.stats.removed_by_city,
            "filters evaluated"
        );

        let mut response =
            Ranker::new(top, options.explain).rank(outcome.survivors, outcome.filters_applied);
        response.match_run_id = match_run_id;
        response.pool_size = teams.len();

        info!(
            required_skills = index.len(),
            survivors = response.survivor_count,
            returned = response.candidates.len(),
            filters_applied = ?response.filter_names(),
            "match candidates computed"
        );

        Ok(response)
    }

    /// チームごとの評価は独立しているため、一定件数以上は rayon で並列化する
    fn score_all<'a>(
        &self,
        index: &SkillRequirementIndex,
        project: &ProjectRequirement,
        teams: &'a [TeamCandidate],
    ) -> Vec<ScoredCandidate<'a>> {
        if teams.len() >= self.config().parallel_threshold {
            teams
                .par_iter()
                .map(|team| self.scorer.evaluate(index, project, team))
                .collect()
        } else {
            teams
                .iter()
                .map(|team| self.scorer.evaluate(index, project, team))
                .collect()
        }
    }
}

/// デフォルト設定で候補を算出する
pub fn compute_candidates(
    project: &ProjectRequirement,
    teams: &[TeamCandidate],
    options: &MatchOptions,
) -> Result<MatchResponse, MatchError> {
    MatchingEngine::default().compute_candidates(project, teams, options)
}
