mod cli;
mod error;
mod output;

use clap::Parser;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use marketview_core::{render, AlphaVantageClient, ClientConfig, UserInput};

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is normal.
    let _ = dotenvy::dotenv();
    init_tracing();

    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();

    let config = ClientConfig::from_env().with_timeout_ms(cli.timeout_ms);
    debug!(
        base_url = %config.base_url,
        timeout_ms = config.timeout_ms,
        demo_key = config.api_key.is_demo(),
        "client configured"
    );
    let source = AlphaVantageClient::new(config);

    let input = UserInput {
        symbol: cli.symbol.clone(),
        market: cli.market.clone(),
        options: cli.display_options(),
    };

    let outcome = render(&source, &input).await?;
    output::render(&outcome, cli.format, cli.pretty)?;

    Ok(ExitCode::SUCCESS)
}
