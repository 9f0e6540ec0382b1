use std::fs;
use std::path::PathBuf;

use engine_logging::{engine_info, engine_warn};
use mdx_core::Converter;

use crate::client::ContentSource;
use crate::document::DocumentAssembler;
use crate::filename::{FilenameRegistry, DEFAULT_EXTENSION};
use crate::ingest::{fetch_all, DEFAULT_PAGE_LIMIT};
use crate::persist::{ensure_output_dir, AtomicFileWriter, PersistError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub page_limit: usize,
    pub extension: String,
    /// Give same-second records distinct filenames instead of overwriting.
    pub disambiguate_collisions: bool,
}

impl ExportConfig {
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            page_limit: DEFAULT_PAGE_LIMIT,
            extension: DEFAULT_EXTENSION.to_string(),
            disambiguate_collisions: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// Records returned by the content API.
    pub total: usize,
    pub written: usize,
    pub failed: usize,
    /// Ingestion stopped on a fetch error before the listing was exhausted.
    pub partial: bool,
    pub output_dir: PathBuf,
}

/// Fetches every article and writes one document per article.
pub struct Exporter<S, C> {
    source: S,
    assembler: DocumentAssembler<C>,
    config: ExportConfig,
}

impl<S: ContentSource, C: Converter> Exporter<S, C> {
    pub fn new(source: S, converter: C, config: ExportConfig) -> Self {
        let assembler = DocumentAssembler::new(converter).with_extension(config.extension.clone());
        Self {
            source,
            assembler,
            config,
        }
    }

    /// Runs one export.
    ///
    /// Only an unusable output directory is an error. Fetch failures end
    /// ingestion early and are reported through [`ExportReport::partial`];
    /// articles that fail to render or write are logged and counted in
    /// [`ExportReport::failed`].
    pub async fn run(&self) -> Result<ExportReport, PersistError> {
        let output_dir = &self.config.output_dir;
        engine_info!("Output directory: {}", output_dir.display());
        ensure_output_dir(output_dir)?;
        let output_dir = fs::canonicalize(output_dir).unwrap_or_else(|_| output_dir.clone());

        let ingestion = fetch_all(&self.source, self.config.page_limit).await;
        if let Some(err) = &ingestion.stopped_early {
            engine_warn!(
                "Ingestion stopped early ({}); exporting the {} articles fetched so far",
                err,
                ingestion.records.len()
            );
        }

        let total = ingestion.records.len();
        let mut report = ExportReport {
            total,
            written: 0,
            failed: 0,
            partial: ingestion.is_partial(),
            output_dir: output_dir.clone(),
        };
        if total == 0 {
            engine_info!("No articles found");
            return Ok(report);
        }

        engine_info!("Converting {} articles", total);
        let writer = AtomicFileWriter::new(output_dir.clone());
        let mut filenames = FilenameRegistry::new(self.config.disambiguate_collisions);
        for record in &ingestion.records {
            let document = match self.assembler.assemble(record) {
                Ok(document) => document,
                Err(err) => {
                    engine_warn!("Skipping article {:?}: {}", record.id, err);
                    report.failed += 1;
                    continue;
                }
            };
            let filename = filenames.claim(document.filename, &record.id);
            match writer.write(&filename, &document.content) {
                Ok(written) => {
                    engine_info!("Saved {} ({} bytes)", filename, written.bytes);
                    report.written += 1;
                }
                Err(err) => {
                    engine_warn!("Failed to save {}: {}", filename, err);
                    report.failed += 1;
                }
            }
        }

        engine_info!(
            "Finished: {}/{} articles converted into {}",
            report.written,
            report.total,
            output_dir.display()
        );
        Ok(report)
    }
}
