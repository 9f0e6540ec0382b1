use std::sync::LazyLock;

use regex::Regex;

static SPLIT_FENCE_LANGUAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```\s*\n\[(?P<lang>.*?)\]\n").expect("fence language regex is valid")
});

/// Collapses a bare fence followed by a `[lang]` line into a single
/// ```` ```lang ```` fence line.
pub fn normalize_code_fences(markdown: &str) -> String {
    SPLIT_FENCE_LANGUAGE
        .replace_all(markdown, "```${lang}\n")
        .into_owned()
}

/// Folds U+00A0 into plain spaces.
pub fn fold_non_breaking_spaces(markdown: &str) -> String {
    markdown.replace('\u{a0}', " ")
}
