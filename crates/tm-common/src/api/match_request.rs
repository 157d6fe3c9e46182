use serde::{Deserialize, Serialize};

use crate::{error::MatchError, matching::filter::FilterOptions};

pub const DEFAULT_TOP: i64 = 50;

fn default_top() -> i64 {
    DEFAULT_TOP
}

/// 候補算出オプション
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOptions {
    /// 返却件数の上限。0 なら空、負数は InvalidInput
    #[serde(default = "default_top")]
    pub top: i64,
    /// 0.0〜1.0
    #[serde(default)]
    pub min_coverage: f64,
    #[serde(default)]
    pub require_area: bool,
    #[serde(default)]
    pub require_city: bool,
    /// スキル別の判定や成分スコアの説明をレスポンスに含める
    #[serde(default)]
    pub explain: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            top: DEFAULT_TOP,
            min_coverage: 0.0,
            require_area: false,
            require_city: false,
            explain: false,
        }
    }
}

impl MatchOptions {
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            min_coverage: self.min_coverage,
            require_area: self.require_area,
            require_city: self.require_city,
        }
    }

    /// top を usize に変換（負数は InvalidInput）
    pub fn top_limit(&self) -> Result<usize, MatchError> {
        usize::try_from(self.top).map_err(|_| {
            MatchError::invalid(format!("top must not be negative (got {})", self.top))
        })
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        self.filter_options().validate()?;
        self.top_limit()?;
        Ok(())
    }
}
