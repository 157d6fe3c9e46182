use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use tm_common::{
    MatchError, MatchOptions, MatchResponse, MatchingEngine, ProjectRequirement, TeamCandidate,
};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "tm-match",
    about = "Rank candidate teams for a project from a JSON snapshot"
)]
pub struct Cli {
    /// Snapshot file (`{"project": {...}, "teams": [...]}`); `-` reads stdin
    #[arg(default_value = "-")]
    pub snapshot: PathBuf,

    /// Maximum number of candidates to return
    #[arg(long, env = "TM_TOP", default_value_t = 50, allow_negative_numbers = true)]
    pub top: i64,

    /// Minimum skill coverage ratio (0.0-1.0)
    #[arg(long, env = "TM_MIN_COVERAGE", default_value_t = 0.0)]
    pub min_coverage: f64,

    /// Drop teams outside the project's area
    #[arg(long, env = "TM_REQUIRE_AREA", default_value_t = false)]
    pub require_area: bool,

    /// Drop teams outside the project's city
    #[arg(long, env = "TM_REQUIRE_CITY", default_value_t = false)]
    pub require_city: bool,

    /// Include per-skill detail and component explanations
    #[arg(long, env = "TM_EXPLAIN", default_value_t = false)]
    pub explain: bool,

    /// Emit compact JSON instead of pretty-printed output
    #[arg(long, default_value_t = false)]
    pub compact: bool,
}

impl Cli {
    pub fn options(&self) -> MatchOptions {
        MatchOptions {
            top: self.top,
            min_coverage: self.min_coverage,
            require_area: self.require_area,
            require_city: self.require_city,
            explain: self.explain,
        }
    }
}

/// 外部のデータ取得層が書き出したスナップショット
#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    pub project: ProjectRequirement,
    #[serde(default)]
    pub teams: Vec<TeamCandidate>,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Match(#[from] MatchError),
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot, CliError> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| CliError::Io {
                path: "<stdin>".into(),
                source,
            })?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.display().to_string(),
            source,
        })?
    };

    parse_snapshot(&raw)
}

pub fn parse_snapshot(raw: &str) -> Result<Snapshot, CliError> {
    Ok(serde_json::from_str(raw)?)
}

/// スナップショットを読み込み、マッチング結果を返す
pub fn run(cli: &Cli, engine: &MatchingEngine) -> Result<MatchResponse, CliError> {
    let snapshot = load_snapshot(&cli.snapshot)?;
    info!(
        project_id = snapshot.project.id,
        teams = snapshot.teams.len(),
        "snapshot loaded"
    );

    let response =
        engine.compute_candidates(&snapshot.project, &snapshot.teams, &cli.options())?;
    Ok(response)
}

pub fn render(response: &MatchResponse, compact: bool) -> Result<String, CliError> {
    let rendered = if compact {
        serde_json::to_string(response)?
    } else {
        serde_json::to_string_pretty(response)?
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags_into_options() {
        let cli = Cli::parse_from([
            "tm-match",
            "snapshot.json",
            "--top",
            "5",
            "--min-coverage",
            "0.5",
            "--require-city",
            "--explain",
        ]);

        let options = cli.options();
        assert_eq!(options.top, 5);
        assert_eq!(options.min_coverage, 0.5);
        assert!(options.require_city);
        assert!(!options.require_area);
        assert!(options.explain);
        assert_eq!(cli.snapshot, PathBuf::from("snapshot.json"));
    }

    #[test]
    fn rejects_malformed_snapshot() {
        let err = parse_snapshot(r#"{"teams": []}"#).unwrap_err();
        assert!(matches!(err, CliError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_snapshot(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("here.json"));
    }
}
