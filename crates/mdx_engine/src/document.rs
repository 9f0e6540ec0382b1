use engine_logging::{engine_debug, engine_info};
use mdx_core::{Converter, Transcoder};

use crate::filename::{timestamp_filename, unix_seconds, DEFAULT_EXTENSION};
use crate::{ArticleRecord, BlockKind};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssembleError {
    #[error("invalid createdAt {value:?}: {message}")]
    InvalidCreatedAt { value: String, message: String },
}

/// A rendered article: where it goes and what it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub filename: String,
    pub created_unix: i64,
    pub content: String,
}

/// Turns article records into frontmatter + Markdown documents.
#[derive(Debug, Clone)]
pub struct DocumentAssembler<C> {
    transcoder: Transcoder<C>,
    extension: String,
}

impl<C: Converter> DocumentAssembler<C> {
    pub fn new(converter: C) -> Self {
        Self {
            transcoder: Transcoder::new(converter),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn assemble(&self, record: &ArticleRecord) -> Result<RenderedDocument, AssembleError> {
        let created_unix = unix_seconds(&record.created_at)?;
        let filename = timestamp_filename(created_unix, &self.extension);
        let content = format!("{}{}", build_frontmatter(record), self.render_body(record));
        Ok(RenderedDocument {
            filename,
            created_unix,
            content,
        })
    }

    /// Body Markdown: the repeated body blocks joined by blank lines, or the
    /// legacy `content` field when there are no blocks.
    pub fn render_body(&self, record: &ArticleRecord) -> String {
        let blocks = record.htmls.as_deref().unwrap_or_default();
        if blocks.is_empty() {
            return record
                .content
                .as_deref()
                .filter(|content| !content.is_empty())
                .map(|content| self.transcoder.transcode(content))
                .unwrap_or_default();
        }

        let mut parts = Vec::with_capacity(blocks.len());
        for block in blocks {
            let Some(content) = block.content().filter(|content| !content.is_empty()) else {
                engine_info!(
                    "Empty {:?} block in article {:?} ({})",
                    block.field_id,
                    record.id,
                    record.created_at
                );
                continue;
            };
            match block.kind() {
                BlockKind::Rich => parts.push(self.transcoder.transcode(content)),
                BlockKind::Plain => parts.push(content.to_string()),
                BlockKind::Other(field_id) => {
                    engine_debug!("Skipping block with field id {:?}", field_id);
                }
            }
        }
        parts.join("\n\n").trim().to_string()
    }
}

/// YAML frontmatter, closed by `---` and a blank line.
pub fn build_frontmatter(record: &ArticleRecord) -> String {
    let mut out = format!(
        "---\ntitle: {title}\ncreatedAt: {created_at}\nupdatedAt: {updated_at}\n",
        title = quoted(&record.title),
        created_at = quoted(&record.created_at),
        updated_at = quoted(&record.updated_at),
    );
    if let Some(published_at) = record.published_at.as_deref().filter(|v| !v.is_empty()) {
        out.push_str(&format!("publishedAt: {}\n", quoted(published_at)));
    }
    if let Some(revised_at) = record.revised_at.as_deref().filter(|v| !v.is_empty()) {
        out.push_str(&format!("revisedAt: {}\n", quoted(revised_at)));
    }
    if let Some(category) = &record.category {
        out.push_str(&format!("category: {}\n", quoted(&category.name)));
    }
    if let Some(tags) = record.tags.as_deref().filter(|tags| !tags.is_empty()) {
        out.push_str("tags:\n");
        for tag in tags {
            out.push_str(&format!("  - {}\n", quoted(&tag.name)));
        }
    }
    if let Some(toc_visible) = record.toc_visible {
        out.push_str(&format!("toc_visible: {toc_visible}\n"));
    }
    out.push_str("---\n\n");
    out
}

/// Double-quoted YAML scalar.
fn quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
