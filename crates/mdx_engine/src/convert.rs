use std::sync::LazyLock;

use mdx_core::Converter;
use regex::{Captures, Regex};

static PRE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)(<pre[^>]*>)(.*?)(</pre>)").expect("pre regex is valid"));

/// `html2md` backed converter.
///
/// `html2md` parses its input as HTML, which decodes character references
/// inside `<pre>` before the text is copied into the code fence. Ampersands in
/// preformatted blocks are escaped once more so the fence receives the source
/// text unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct Html2MdConverter;

impl Converter for Html2MdConverter {
    fn to_markdown(&self, html: &str) -> String {
        html2md::parse_html(&escape_preformatted(html))
    }
}

fn escape_preformatted(html: &str) -> String {
    PRE_BLOCK
        .replace_all(html, |caps: &Captures| {
            format!("{}{}{}", &caps[1], caps[2].replace('&', "&amp;"), &caps[3])
        })
        .into_owned()
}
