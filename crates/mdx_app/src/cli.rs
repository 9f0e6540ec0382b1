//! Command line arguments for `mdx-export`.

use std::path::PathBuf;

use clap::Parser;
use mdx_engine::{ClientSettings, ExportConfig, DEFAULT_EXTENSION, DEFAULT_PAGE_LIMIT};

/// Export microCMS articles as Markdown/MDX documents.
#[derive(Parser, Debug)]
#[command(name = "mdx-export", version, about, long_about = None)]
pub struct Cli {
    /// Directory the documents are written to.
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,

    /// List endpoint to export.
    #[arg(short, long, default_value = "articles")]
    pub endpoint: String,

    /// microCMS service domain (the `<domain>` in `<domain>.microcms.io`).
    #[arg(short = 'd', long = "domain", env = "MICROCMS_SERVICE_DOMAIN")]
    pub service_domain: String,

    /// microCMS API key.
    #[arg(short = 'k', long = "api-key", env = "MICROCMS_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,

    /// Extension of the produced files.
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// Records requested per page.
    #[arg(
        long,
        default_value_t = DEFAULT_PAGE_LIMIT as u16,
        value_parser = clap::value_parser!(u16).range(1..=100)
    )]
    pub limit: u16,

    /// Also write the log to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Send requests to this origin instead of the service domain.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Append the record id to filenames shared by records created in the
    /// same second instead of overwriting.
    #[arg(long)]
    pub disambiguate: bool,
}

impl Cli {
    pub fn export_config(&self) -> ExportConfig {
        ExportConfig {
            page_limit: usize::from(self.limit),
            extension: self.extension.clone(),
            disambiguate_collisions: self.disambiguate,
            ..ExportConfig::default_with_output(self.output.clone())
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            ..ClientSettings::default()
        }
    }
}
