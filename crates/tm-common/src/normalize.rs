use unicode_normalization::UnicodeNormalization;

/// 都市名・エリア名の正規化（NFKC → 前後空白除去 → 連続空白の圧縮 → 小文字化）
///
/// 正規化後に空になる値は「未指定」として None を返す。
pub fn normalize_locality(raw: &str) -> Option<String> {
    let normalized = raw
        .nfkc()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Option<String> 版。None / 空文字はどちらも None。
pub fn normalize_optional_locality(raw: Option<&str>) -> Option<String> {
    raw.and_then(normalize_locality)
}
