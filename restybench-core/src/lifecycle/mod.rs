//! Lifecycle of the server under test.

mod install;
mod openresty;

pub use install::install;
pub use openresty::OpenResty;

use async_trait::async_trait;
use restybench_common::{Result, ServerConfig};
use std::process::Output;
use tokio::process::Command;

/// Starts and stops the server the benchmark runs against.
///
/// `stop` must succeed when the server is not running so that it can always
/// be called after a failed `start`.
#[async_trait]
pub trait ServerLifecycle: Send {
    /// Name for logging
    fn name(&self) -> &str;

    /// Start the server. Returns once the start command has completed; no
    /// readiness check is made.
    async fn start(&mut self, config: &ServerConfig) -> Result<()>;

    /// Stop the server.
    async fn stop(&mut self, config: &ServerConfig) -> Result<()>;
}

/// Run `cmd` to completion, turning a spawn failure or a non-zero exit into
/// a message naming `step`.
pub(crate) async fn run_step(cmd: &mut Command, step: &str) -> std::result::Result<Output, String> {
    let output = cmd
        .output()
        .await
        .map_err(|e| format!("{step}: failed to spawn: {e}"))?;

    if output.status.success() {
        Ok(output)
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(format!("{step}: {} {}", output.status, stderr.trim()))
    }
}
