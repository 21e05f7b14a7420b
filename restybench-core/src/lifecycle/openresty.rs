use super::{install, run_step, ServerLifecycle};
use async_trait::async_trait;
use restybench_common::{BenchError, Result, ServerConfig};
use tokio::process::Command;
use tracing::{debug, info, warn};

/// An OpenResty distribution installed under `ServerConfig::root`, built
/// from `ServerConfig::source` on first start.
#[derive(Debug, Default)]
pub struct OpenResty {
    started: bool,
}

impl OpenResty {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `start` succeeded and `stop` has not run since.
    pub fn is_running(&self) -> bool {
        self.started
    }

    fn nginx(config: &ServerConfig) -> Command {
        let mut cmd = Command::new(config.nginx_bin());
        cmd.arg("-p").arg(&config.root).arg("-c").arg(&config.conf);
        cmd
    }
}

#[async_trait]
impl ServerLifecycle for OpenResty {
    fn name(&self) -> &str {
        "openresty"
    }

    async fn start(&mut self, config: &ServerConfig) -> Result<()> {
        if self.started {
            return Err(BenchError::Server("server already started".into()));
        }

        if !config.nginx_bin().exists() {
            info!(
                "No OpenResty install under {}, building from source",
                config.root.display()
            );
            install(config).await?;
        }

        // nginx refuses to start without its log directory
        tokio::fs::create_dir_all(config.root.join("logs")).await?;

        info!("Starting OpenResty (prefix {})", config.root.display());
        run_step(&mut Self::nginx(config), "nginx start")
            .await
            .map_err(BenchError::Server)?;

        self.started = true;
        Ok(())
    }

    async fn stop(&mut self, config: &ServerConfig) -> Result<()> {
        // Only release a server this instance started; a pid file left by
        // another server on the same prefix is not ours to stop.
        if !self.started {
            debug!("OpenResty was not started here, nothing to stop");
            return Ok(());
        }
        self.started = false;

        if !config.pid_file().exists() {
            warn!("OpenResty pid file is gone, assuming it already exited");
            return Ok(());
        }

        info!("Stopping OpenResty");
        let mut cmd = Self::nginx(config);
        cmd.args(["-s", "stop"]);
        run_step(&mut cmd, "nginx stop")
            .await
            .map(|_| ())
            .map_err(BenchError::Server)
    }
}
