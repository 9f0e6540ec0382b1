use std::sync::LazyLock;

use mdx_core::Converter;
use regex::Regex;

static PRE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<pre>(.*?)</pre>").unwrap());
static QUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<blockquote>(.*?)</blockquote>").unwrap());
static PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<p>(.*?)</p>").unwrap());
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Small lossy converter with the habits of real ones: it decodes `&amp;`,
/// escapes underscores and drops unknown tags in prose, and copies `<pre>`
/// contents verbatim into a fence.
pub struct LossyConverter;

impl Converter for LossyConverter {
    fn to_markdown(&self, html: &str) -> String {
        let mut out = String::new();
        let mut last = 0;
        for caps in PRE.captures_iter(html) {
            let whole = caps.get(0).unwrap();
            out.push_str(&prose(&html[last..whole.start()]));
            out.push_str(&format!("```\n{}\n```\n\n", &caps[1]));
            last = whole.end();
        }
        out.push_str(&prose(&html[last..]));
        out
    }
}

fn prose(html: &str) -> String {
    let text = QUOTE.replace_all(html, "> $1\n\n");
    let text = PARAGRAPH.replace_all(&text, "$1\n\n");
    let text = TAG.replace_all(&text, "");
    text.replace("&amp;", "&").replace('_', "\\_")
}

/// Returns a fixed string regardless of input.
pub struct CannedConverter(pub &'static str);

impl Converter for CannedConverter {
    fn to_markdown(&self, _html: &str) -> String {
        self.0.to_string()
    }
}
