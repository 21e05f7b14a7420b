//! Common utilities and types for `restybench`

pub mod config;
pub mod constants;
pub mod error;

pub use config::{BenchConfig, LoadArgs, LoadConfig, ServerConfig};
pub use constants::{
    CASES, DEFAULT_AB_PROGRAM, DEFAULT_BASE_URL, DEFAULT_CONCURRENCY, DEFAULT_ITERATIONS,
    DEFAULT_NGINX_CONF, DEFAULT_ROOT, DEFAULT_SOURCE_URL,
};
pub use error::{BenchError, Result};
