//! Entity and markup shields built on the placeholder vault.
//!
//! Capture patterns are lazy regexes, not a parser: a nested element of the
//! same tag (a list inside a list, a span inside a span) ends the capture at
//! the first closing tag. That is a known limitation and is left as is.
use std::sync::LazyLock;

use regex::Regex;

use crate::vault::{self, Category, ShieldStack};

static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&[a-zA-Z0-9#]+;").expect("entity regex is valid"));
static PRE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<pre[^>]*>.*?</pre>").expect("pre regex is valid"));
static EMBED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<iframe[^>]*>.*?</iframe>").expect("iframe regex is valid")
});
static ORDERED_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<ol[^>]*>.*?</ol>").expect("ol regex is valid"));
static SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<span[^>]*>.*?</span>").expect("span regex is valid"));

/// Markup categories in extraction order. Restoration runs the reverse.
pub const MARKUP_ORDER: [Category; 3] = [Category::Embed, Category::List, Category::Span];

fn capture_pattern(category: Category) -> &'static Regex {
    match category {
        Category::Entity => &*ENTITY,
        Category::Embed => &*EMBED,
        Category::List => &*ORDERED_LIST,
        Category::Span => &*SPAN,
    }
}

/// Masks every entity reference, then puts the literal entities back inside
/// `<pre>` blocks so preformatted text reaches the converter untouched.
pub fn mask_entities(html: &str, stack: &mut ShieldStack) -> String {
    let (masked, ledger) =
        vault::extract(html, capture_pattern(Category::Entity), Category::Entity);
    let masked = vault::restore_within(&masked, &PRE_BLOCK, &ledger);
    stack.push(ledger);
    masked
}

/// Masks embeds, ordered lists and spans, in that order.
pub fn mask_markup(html: &str, stack: &mut ShieldStack) -> String {
    MARKUP_ORDER.iter().fold(html.to_string(), |text, &category| {
        let (masked, ledger) = vault::extract(&text, capture_pattern(category), category);
        stack.push(ledger);
        masked
    })
}
