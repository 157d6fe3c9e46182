use thiserror::Error;

/// マッチングエンジンの致命的エラー
///
/// 入力不正のみが呼び出し元に返る。チーム側のデータ品質問題はスコア低下として吸収する。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl MatchError {
    pub fn invalid(message: impl Into<String>) -> Self {
        MatchError::InvalidInput(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            MatchError::InvalidInput(_) => "INVALID_INPUT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_invalid_input() {
        let err = MatchError::invalid("min_coverage must be within [0, 1]");
        assert_eq!(err.code(), "INVALID_INPUT");
        assert_eq!(
            err.to_string(),
            "invalid input: min_coverage must be within [0, 1]"
        );
    }
}
