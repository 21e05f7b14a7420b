//! Command-line arguments and the benchmark run

use anyhow::{Context, Result};
use clap::Parser;
use restybench_common::{BenchConfig, LoadArgs};
use restybench_core::{ApacheBench, Driver, OpenResty};
use restybench_observability::LogFormat;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "restybench",
    author,
    version,
    about = "Benchmark OpenResty locations with ApacheBench",
    long_about = "Starts OpenResty, runs `ab` against each configured case, \
                  then again in reverse order, prints the relevant report lines and \
                  stops the server.\n\n\
                  Trailing arguments are forwarded to `ab` verbatim and replace the \
                  default `-n 100000 -c 5`. Short flags such as `-h` and `-V` belong \
                  to `ab`; use `--help` and `--version` for restybench itself.",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Print help
    #[arg(long, action = clap::ArgAction::Help)]
    help: Option<bool>,

    /// Print version
    #[arg(long, action = clap::ArgAction::Version)]
    version: Option<bool>,

    /// TOML config file; explicit flags take precedence over its values
    #[arg(long, env = "RESTYBENCH_CONFIG")]
    config: Option<PathBuf>,

    /// OpenResty install root
    #[arg(long, env = "RESTYBENCH_ROOT")]
    root: Option<PathBuf>,

    /// Source archive to build OpenResty from when it is not installed
    #[arg(long, env = "RESTYBENCH_SOURCE")]
    source: Option<String>,

    /// nginx config file, relative to the install root
    #[arg(long, env = "RESTYBENCH_CONF")]
    conf: Option<PathBuf>,

    /// Base URL the server answers on
    #[arg(long, env = "RESTYBENCH_BASE_URL")]
    base_url: Option<String>,

    /// ApacheBench executable
    #[arg(long = "ab", env = "RESTYBENCH_AB")]
    ab: Option<PathBuf>,

    /// Log format (text or json); logs go to stderr
    #[arg(long, default_value = "text", env = "RESTYBENCH_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Arguments forwarded to ab [default: -n 100000 -c 5]
    #[arg(
        value_name = "AB_ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    ab_args: Vec<String>,
}

impl Cli {
    /// Defaults, then the config file, then explicit flags.
    pub fn bench_config(&self) -> Result<BenchConfig> {
        let mut config = match &self.config {
            Some(path) => BenchConfig::from_file(path)?,
            None => BenchConfig::default(),
        };

        if let Some(root) = &self.root {
            config.server.root.clone_from(root);
        }
        if let Some(source) = &self.source {
            config.server.source.clone_from(source);
        }
        if let Some(conf) = &self.conf {
            config.server.conf.clone_from(conf);
        }
        if let Some(base_url) = &self.base_url {
            config.server.base_url.clone_from(base_url);
        }
        if let Some(ab) = &self.ab {
            config.load.program.clone_from(ab);
        }
        if !self.ab_args.is_empty() {
            config.load.args = LoadArgs::from_cli(self.ab_args.clone());
        }

        // nginx resolves everything against its prefix, so pin it down
        config.server.root = std::path::absolute(&config.server.root).with_context(|| {
            format!("invalid install root {}", config.server.root.display())
        })?;

        config.validate()?;
        Ok(config)
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = cli.bench_config()?;

    info!("restybench v{}", env!("CARGO_PKG_VERSION"));
    info!("  Root: {}", config.server.root.display());
    info!("  Base URL: {}", config.server.base_url);
    info!(
        "  ab: {} {}",
        config.load.program.display(),
        config.load.args.as_slice().join(" ")
    );

    let mut driver = Driver::new(
        OpenResty::new(),
        ApacheBench::new(config.load.program.clone()),
    );
    driver.run(&config, &mut std::io::stdout()).await?;
    Ok(())
}
