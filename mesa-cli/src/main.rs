//! mesa: restaurant reservations from the terminal
//!
//! Every run is one page load: sign in, browse, reserve, leave for the
//! payment provider, and come back with `mesa return <url>`.

mod cli;
mod commands;
mod logger;

use std::process::ExitCode;

use clap::Parser;
use mesa_client::MesaClient;

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logger::init_logger(cli.log_level.as_deref());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.client_config();
    tracing::debug!(base_url = %config.base_url, data_dir = %config.data_dir.display(), "Starting");
    let client = MesaClient::open(config)?;
    commands::run(&client, cli.command).await
}
