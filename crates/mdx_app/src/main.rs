mod app;
mod cli;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    // Values in `.env` feed the `env` fallbacks of the CLI.
    dotenvy::dotenv().ok();
    let cli = cli::Cli::parse();
    app::run_app(cli)
}
