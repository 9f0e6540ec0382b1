//! Keeps manual line breaks inside blockquotes.
//!
//! Converters emit one `> ` prefix per output line, so a `<br>` inside a quote
//! paragraph would otherwise collapse into a single quoted line. Breaks are
//! swapped for [`LINE_BREAK_MARKER`] before conversion and expanded into
//! fresh quoted lines afterwards.
use std::sync::LazyLock;

use regex::{Captures, Regex};

pub const LINE_BREAK_MARKER: &str = "__BLOCKQUOTE_LINE_BREAK__";

const QUOTE_PREFIX: &str = "> ";

static BLOCKQUOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)(?P<open><blockquote(?:\s[^>]*)?>)(?P<body>.*?)(?P<close></blockquote>)")
        .expect("blockquote regex is valid")
});
static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("br regex is valid"));
static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\?_\\?_BLOCKQUOTE\\?_LINE\\?_BREAK\\?_\\?_").expect("marker regex is valid")
});

/// Replaces every `<br>` strictly inside a blockquote with the marker.
pub fn encode_line_breaks(html: &str) -> String {
    BLOCKQUOTE
        .replace_all(html, |caps: &Captures| {
            let body = LINE_BREAK.replace_all(&caps["body"], LINE_BREAK_MARKER);
            format!("{}{}{}", &caps["open"], body, &caps["close"])
        })
        .into_owned()
}

/// Splits each quoted line at its markers into consecutive quoted lines.
///
/// Every input line is emitted followed by `\n`; lines that do not start with
/// `> ` pass through unchanged.
pub fn expand_line_breaks(markdown: &str) -> String {
    let mut formatted = String::with_capacity(markdown.len());
    for line in markdown.split('\n') {
        if line.starts_with(QUOTE_PREFIX) {
            let expanded = MARKER.replace_all(line, "\n> ");
            formatted.push_str(&expanded);
        } else {
            formatted.push_str(line);
        }
        formatted.push('\n');
    }
    formatted
}
