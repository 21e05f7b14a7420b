//! Benchmark driver.
//!
//! # Example
//!
//! ```rust,no_run
//! use restybench_common::BenchConfig;
//! use restybench_core::{ApacheBench, Driver, OpenResty};
//!
//! # async fn example() -> restybench_common::Result<()> {
//! let config = BenchConfig::default();
//! let mut driver = Driver::new(OpenResty::new(), ApacheBench::default());
//! driver.run(&config, &mut std::io::stdout()).await?;
//! # Ok(())
//! # }
//! ```

use crate::filter::filter_lines;
use crate::lifecycle::ServerLifecycle;
use crate::loadgen::LoadGenerator;
use restybench_common::{BenchConfig, LoadArgs, Result, ServerConfig};
use std::io::Write;
use tracing::{error, info, instrument};

/// Runs every case against the server, forwards then backwards, and prints
/// the relevant lines of each load generator report.
#[derive(Debug)]
pub struct Driver<S, L> {
    server: S,
    loadgen: L,
}

/// Forward order followed by the reverse order.
pub fn case_order<T: AsRef<str>>(cases: &[T]) -> Vec<&str> {
    cases
        .iter()
        .chain(cases.iter().rev())
        .map(AsRef::as_ref)
        .collect()
}

impl<S, L> Driver<S, L>
where
    S: ServerLifecycle,
    L: LoadGenerator,
{
    pub fn new(server: S, loadgen: L) -> Self {
        Self { server, loadgen }
    }

    pub fn server(&self) -> &S {
        &self.server
    }

    pub fn loadgen(&self) -> &L {
        &self.loadgen
    }

    /// Start the server. Fatal for the run; no retry.
    pub async fn setup(&mut self, config: &ServerConfig) -> Result<()> {
        info!("Starting {} server", self.server.name());
        self.server.start(config).await
    }

    /// Stop the server.
    pub async fn teardown(&mut self, config: &ServerConfig) -> Result<()> {
        info!("Stopping {} server", self.server.name());
        self.server.stop(config).await
    }

    /// Benchmark one case and write its section to `out`:
    ///
    /// ```text
    /// --> Benchmarking /case_a
    ///
    /// <relevant lines>
    ///
    /// ```
    ///
    /// A load generator failure leaves the section empty and is returned
    /// after the section has been closed.
    #[instrument(skip(self, out, args, server), fields(loadgen = self.loadgen.name()))]
    pub async fn run_case<W: Write>(
        &self,
        out: &mut W,
        case: &str,
        args: &LoadArgs,
        server: &ServerConfig,
    ) -> Result<()> {
        write!(out, "--> Benchmarking /{case}\n\n")?;
        out.flush()?;

        let url = server.case_url(case);
        let result = self.loadgen.run(&url, args).await;

        if let Ok(output) = &result {
            for line in filter_lines(output) {
                writeln!(out, "{line}")?;
            }
        }
        writeln!(out)?;
        out.flush()?;

        result.map(|_| ())
    }

    /// Full run: setup, every case forwards and backwards, teardown.
    ///
    /// Teardown runs exactly once whatever happened before it. The first
    /// error wins: setup, then the first failed case, then teardown.
    pub async fn run<W: Write>(&mut self, config: &BenchConfig, out: &mut W) -> Result<()> {
        let outcome = match self.setup(&config.server).await {
            Ok(()) => self.run_cases(config, out).await,
            Err(e) => {
                error!("Server failed to start: {}", e);
                Err(e)
            }
        };

        let teardown = self.teardown(&config.server).await;
        if let Err(e) = &teardown {
            error!("Server failed to stop: {}", e);
        }

        outcome.and(teardown)
    }

    async fn run_cases<W: Write>(&self, config: &BenchConfig, out: &mut W) -> Result<()> {
        writeln!(out)?;

        let mut first_error = None;
        let mut failed = 0usize;
        let order = case_order(&config.cases);
        for case in &order {
            if let Err(e) = self
                .run_case(out, case, &config.load.args, &config.server)
                .await
            {
                error!("Case /{} failed: {}", case, e);
                failed += 1;
                first_error.get_or_insert(e);
            }
        }

        info!("Ran {} cases ({} failed)", order.len(), failed);
        first_error.map_or(Ok(()), Err)
    }
}
