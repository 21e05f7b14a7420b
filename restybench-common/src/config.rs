//! Configuration types for a `restybench` run.
//!
//! All values are threaded explicitly through the driver; nothing here is
//! process-global.

use crate::constants::{
    CASES, DEFAULT_AB_PROGRAM, DEFAULT_BASE_URL, DEFAULT_CONCURRENCY, DEFAULT_ITERATIONS,
    DEFAULT_NGINX_CONF, DEFAULT_ROOT, DEFAULT_SOURCE_URL,
};
use crate::error::{BenchError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Server distribution under test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Install root (nginx prefix)
    pub root: PathBuf,
    /// Source archive URL, used when the distribution is not installed yet
    pub source: String,
    /// nginx config file, relative to `root`
    pub conf: PathBuf,
    /// Base URL the server answers on
    pub base_url: String,
}

impl ServerConfig {
    /// Path of the nginx binary inside the install root.
    pub fn nginx_bin(&self) -> PathBuf {
        self.root.join("nginx").join("sbin").join("nginx")
    }

    /// Pid file written by a running server.
    pub fn pid_file(&self) -> PathBuf {
        self.root.join("logs").join("nginx.pid")
    }

    /// URL for a benchmark case, e.g. `http://localhost:8080/case_a`.
    pub fn case_url(&self, case: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), case)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.root.as_os_str().is_empty() {
            return Err(BenchError::Config("server root is required".into()));
        }
        if self.source.is_empty() {
            return Err(BenchError::Config("server source is required".into()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(BenchError::Config(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            source: DEFAULT_SOURCE_URL.to_string(),
            conf: PathBuf::from(DEFAULT_NGINX_CONF),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Arguments forwarded verbatim to the load generator.
///
/// A user-supplied list replaces the defaults entirely; the two are never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoadArgs(Vec<String>);

impl LoadArgs {
    /// `-n <iterations> -c <concurrency>`
    pub fn new(iterations: u64, concurrency: u32) -> Self {
        Self(vec![
            "-n".to_string(),
            iterations.to_string(),
            "-c".to_string(),
            concurrency.to_string(),
        ])
    }

    /// Use `args` as given, or the defaults when it is empty.
    pub fn from_cli(args: Vec<String>) -> Self {
        if args.is_empty() {
            Self::default()
        } else {
            Self(args)
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Default for LoadArgs {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS, DEFAULT_CONCURRENCY)
    }
}

/// Load generator invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Load generator executable
    pub program: PathBuf,
    /// Pass-through arguments
    pub args: LoadArgs,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_AB_PROGRAM),
            args: LoadArgs::default(),
        }
    }
}

/// A complete benchmark run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub server: ServerConfig,
    pub load: LoadConfig,
    /// Cases in forward order
    pub cases: Vec<String>,
}

impl BenchConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Load a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            BenchError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&data)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        if self.load.program.as_os_str().is_empty() {
            return Err(BenchError::Config("load generator program is required".into()));
        }
        if self.cases.is_empty() {
            return Err(BenchError::Config("at least one case is required".into()));
        }
        if let Some(case) = self
            .cases
            .iter()
            .find(|c| c.is_empty() || c.starts_with('/'))
        {
            return Err(BenchError::Config(format!(
                "case must be a non-empty path segment without a leading '/': {:?}",
                case
            )));
        }
        Ok(())
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            load: LoadConfig::default(),
            cases: CASES.iter().map(ToString::to_string).collect(),
        }
    }
}
