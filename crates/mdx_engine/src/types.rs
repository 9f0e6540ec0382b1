use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// One article as returned by the content API.
///
/// Only the fields the exporter renders are modelled; anything else in the
/// payload is ignored. String fields accept `null` or absence as empty so one
/// incomplete record never fails the page it arrived on.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub updated_at: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub revised_at: Option<String>,
    #[serde(default)]
    pub category: Option<NamedItem>,
    #[serde(default)]
    pub tags: Option<Vec<NamedItem>>,
    #[serde(default, rename = "toc_visible", alias = "tocVisible")]
    pub toc_visible: Option<bool>,
    #[serde(default)]
    pub htmls: Option<Vec<BodyBlock>>,
    /// Single-field body used by older schemas.
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedItem {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A repeated-field body block: `{"fieldId": "rich", "rich": "<p>..</p>"}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BodyBlock {
    #[serde(rename = "fieldId", default, deserialize_with = "null_as_empty")]
    pub field_id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// Rich-text HTML, transcoded to Markdown.
    Rich,
    /// Plain text, copied verbatim.
    Plain,
    Other(String),
}

impl BodyBlock {
    pub fn kind(&self) -> BlockKind {
        match self.field_id.as_str() {
            "rich" => BlockKind::Rich,
            "plane" => BlockKind::Plain,
            other => BlockKind::Other(other.to_string()),
        }
    }

    /// The value stored under the block's own field id, if it is a string.
    pub fn content(&self) -> Option<&str> {
        self.fields.get(&self.field_id).and_then(Value::as_str)
    }
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPage {
    #[serde(default)]
    pub contents: Vec<ArticleRecord>,
    #[serde(default)]
    pub total_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    MissingCredentials,
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::MissingCredentials => write!(f, "missing service domain or api key"),
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "malformed response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
