//! Mdx engine: content API ingestion, document assembly and file output.
mod client;
mod convert;
mod document;
mod export;
mod filename;
mod ingest;
mod persist;
mod types;

pub use client::{ClientSettings, ContentSource, MicroCmsClient};
pub use convert::Html2MdConverter;
pub use document::{build_frontmatter, AssembleError, DocumentAssembler, RenderedDocument};
pub use export::{ExportConfig, ExportReport, Exporter};
pub use filename::{timestamp_filename, unix_seconds, FilenameRegistry, DEFAULT_EXTENSION};
pub use ingest::{fetch_all, Ingestion, DEFAULT_PAGE_LIMIT};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError, WrittenFile};
pub use types::{
    ArticleRecord, BlockKind, BodyBlock, ContentPage, FailureKind, FetchError, NamedItem,
};
