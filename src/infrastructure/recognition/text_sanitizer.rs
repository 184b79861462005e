use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static TABLE_RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|?\s*:?-{3,}:?\s*(\|\s*:?-{3,}:?\s*)*\|?$").unwrap());
static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*•]|#{1,6})\s+").unwrap());

/// Normalizes VLM OCR output into one receipt line per text line.
pub fn sanitize_ocr_text(raw: &str) -> String {
    let normalized: String = raw.nfkc().collect();

    normalized
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.starts_with("```"))
        .filter(|line| !TABLE_RULE.is_match(line))
        .map(|line| {
            let stripped = LIST_MARKER.replace(line, "");
            let cells = stripped.trim_matches('|').replace('|', " ");
            collapse_whitespace(&cells)
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collapse_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}
