// src/main.rs
// =============================================================================
// Entry point of the seed-harvest CLI.
//
// What happens here:
// 1. Set up logging
// 2. Parse command-line arguments using clap
// 3. Build the job configuration (defaults <- config file <- flags)
// 4. Run the batch job for the chosen platform
// 5. Exit with 0 when the job completes (even if some seeds failed),
//    or 1 when it could not run at all
// =============================================================================

mod cli;
mod config;
mod extract;
mod fetch;
mod job;
mod logging;
mod output;
mod seeds;

#[cfg(test)]
mod test_server;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::{ConfigOverrides, JobConfig};

#[tokio::main]
async fn main() {
    logging::init_logging();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            tracing::error!("{:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let args = cli.command.job();

    let mut config = JobConfig::for_platform(cli.command.platform());
    if let Some(path) = &args.config {
        let file_overrides = ConfigOverrides::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?;
        config.apply(file_overrides);
    }
    config.apply(args.overrides());

    tracing::debug!(?config, "resolved job configuration");

    job::run_job(&config).await?;
    Ok(0)
}
