//! External load generators.

mod ab;

pub use ab::ApacheBench;

use async_trait::async_trait;
use restybench_common::{LoadArgs, Result};

/// A load generator runs to completion against one URL and hands back its
/// textual report.
#[async_trait]
pub trait LoadGenerator: Send + Sync {
    /// Name for logging
    fn name(&self) -> &str;

    /// Run against `url` with `args` forwarded verbatim, returning the
    /// combined stdout/stderr output. The exit status is not an error.
    async fn run(&self, url: &str, args: &LoadArgs) -> Result<String>;
}
