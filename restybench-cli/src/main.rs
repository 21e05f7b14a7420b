//! restybench CLI
//!
//! Starts OpenResty, runs ApacheBench against each benchmark location
//! forwards and backwards, prints the interesting report lines and stops
//! the server.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod run;

use anyhow::Result;
use clap::Parser;
use restybench_observability::{init_tracing, TracingConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = run::Cli::parse();

    init_tracing(&TracingConfig {
        format: cli.log_format,
        ..TracingConfig::default()
    })?;

    run::run(cli).await
}
