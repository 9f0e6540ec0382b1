//! Reversible substitution of pattern matches with positional placeholder tokens.
//!
//! A token looks like `__SPAN_PLACEHOLDER_3__`: the category namespace plus the
//! ordinal of the captured original in its [`Ledger`]. Markdown converters tend
//! to escape underscores in prose, so restoration also accepts the escaped
//! spelling `\_\_SPAN\_PLACEHOLDER\_3\_\_`.
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Markup categories that get their own token namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Character-entity references such as `&amp;` or `&#123;`.
    Entity,
    /// Embedded frames (`<iframe>`).
    Embed,
    /// Ordered lists (`<ol>`) with their whole subtree.
    List,
    /// Inline spans (`<span>`) with their whole subtree.
    Span,
}

impl Category {
    pub fn namespace(self) -> &'static str {
        match self {
            Category::Entity => "ENTITY",
            Category::Embed => "EMBED",
            Category::List => "LIST",
            Category::Span => "SPAN",
        }
    }

    /// The token substituted for the `index`-th capture of this category.
    pub fn token(self, index: usize) -> String {
        format!("__{}_PLACEHOLDER_{index}__", self.namespace())
    }

    fn token_pattern(self) -> &'static Regex {
        match self {
            Category::Entity => &*ENTITY_TOKEN,
            Category::Embed => &*EMBED_TOKEN,
            Category::List => &*LIST_TOKEN,
            Category::Span => &*SPAN_TOKEN,
        }
    }
}

static ENTITY_TOKEN: LazyLock<Regex> = LazyLock::new(|| token_regex(Category::Entity));
static EMBED_TOKEN: LazyLock<Regex> = LazyLock::new(|| token_regex(Category::Embed));
static LIST_TOKEN: LazyLock<Regex> = LazyLock::new(|| token_regex(Category::List));
static SPAN_TOKEN: LazyLock<Regex> = LazyLock::new(|| token_regex(Category::Span));

fn token_regex(category: Category) -> Regex {
    let pattern = format!(
        r"\\?_\\?_{}\\?_PLACEHOLDER\\?_(\d+)\\?_\\?_",
        category.namespace()
    );
    Regex::new(&pattern).expect("placeholder token regex is valid")
}

/// Ordered originals captured by one masking pass of a single category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    category: Category,
    entries: Vec<String>,
}

impl Ledger {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            entries: Vec::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, original: &str) -> String {
        let token = self.category.token(self.entries.len());
        self.entries.push(original.to_string());
        token
    }
}

/// Replaces every non-overlapping match of `pattern`, left to right, with a
/// fresh token and records the original in the returned ledger.
pub fn extract(text: &str, pattern: &Regex, category: Category) -> (String, Ledger) {
    let mut ledger = Ledger::new(category);
    let masked = pattern
        .replace_all(text, |caps: &Captures| ledger.push(&caps[0]))
        .into_owned();
    (masked, ledger)
}

/// Replaces each token of the ledger's category with its original.
///
/// Tokens whose ordinal is not in the ledger are left as literal text.
pub fn restore(text: &str, ledger: &Ledger) -> String {
    if ledger.is_empty() {
        return text.to_string();
    }
    ledger
        .category
        .token_pattern()
        .replace_all(text, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| ledger.entries.get(index))
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Restores tokens only inside the regions matched by `region`; text outside
/// those regions keeps its tokens.
pub fn restore_within(text: &str, region: &Regex, ledger: &Ledger) -> String {
    if ledger.is_empty() {
        return text.to_string();
    }
    region
        .replace_all(text, |caps: &Captures| restore(&caps[0], ledger))
        .into_owned()
}

/// Ledgers from consecutive masking passes, kept in extraction order.
///
/// [`ShieldStack::restore`] walks them newest first, so a region captured by a
/// later pass (which may contain earlier tokens) is put back before the tokens
/// inside it are resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShieldStack {
    ledgers: Vec<Ledger>,
}

impl ShieldStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, ledger: Ledger) {
        self.ledgers.push(ledger);
    }

    pub fn ledgers(&self) -> &[Ledger] {
        &self.ledgers
    }

    /// Total number of captured originals across all categories.
    pub fn captured(&self) -> usize {
        self.ledgers.iter().map(Ledger::len).sum()
    }

    pub fn restore(&self, text: &str) -> String {
        self.ledgers
            .iter()
            .rev()
            .fold(text.to_string(), |acc, ledger| restore(&acc, ledger))
    }
}
