use anyhow::Context;
use engine_logging::{engine_debug, engine_info, engine_warn, LogDestination};
use mdx_engine::{Exporter, Html2MdConverter, MicroCmsClient};

use crate::cli::Cli;

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    let destination = match &cli.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    };
    engine_logging::initialize(engine_logging::level_for(cli.verbose), destination);
    engine_debug!(
        "Options: endpoint={} output={} extension={} limit={} disambiguate={}",
        cli.endpoint,
        cli.output.display(),
        cli.extension,
        cli.limit,
        cli.disambiguate
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;
    let client = MicroCmsClient::new(
        &cli.service_domain,
        &cli.api_key,
        &cli.endpoint,
        cli.client_settings(),
    )
    .context("failed to initialize the microCMS client")?;
    engine_info!("Exporting {}", client.endpoint_url());

    let exporter = Exporter::new(client, Html2MdConverter, cli.export_config());
    let report = runtime
        .block_on(exporter.run())
        .with_context(|| format!("cannot write to {}", cli.output.display()))?;

    if report.partial {
        engine_warn!("Listing was not fetched completely; the export is partial");
    }
    println!(
        "{}/{} articles converted into {}",
        report.written,
        report.total,
        report.output_dir.display()
    );
    Ok(())
}
