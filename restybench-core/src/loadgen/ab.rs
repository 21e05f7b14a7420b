use super::LoadGenerator;
use async_trait::async_trait;
use restybench_common::{BenchError, LoadArgs, Result, DEFAULT_AB_PROGRAM};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

/// ApacheBench (`ab`), invoked as `<program> -q <args...> <url>`.
#[derive(Debug, Clone)]
pub struct ApacheBench {
    program: PathBuf,
}

impl ApacheBench {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Build the invocation as an argument vector; nothing goes through a shell.
    pub fn command(&self, url: &str, args: &LoadArgs) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-q")
            .args(args.as_slice())
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

impl Default for ApacheBench {
    fn default() -> Self {
        Self::new(DEFAULT_AB_PROGRAM)
    }
}

#[async_trait]
impl LoadGenerator for ApacheBench {
    fn name(&self) -> &str {
        "ab"
    }

    async fn run(&self, url: &str, args: &LoadArgs) -> Result<String> {
        debug!(program = %self.program.display(), ?args, url, "spawning load generator");

        let output = self.command(url, args).output().await.map_err(|e| {
            BenchError::LoadGenerator(format!("failed to run {}: {}", self.program.display(), e))
        })?;

        if !output.status.success() {
            warn!(
                program = %self.program.display(),
                url,
                status = %output.status,
                "load generator exited unsuccessfully"
            );
        }

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.stderr.is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&String::from_utf8_lossy(&output.stderr));
        }
        Ok(text)
    }
}
