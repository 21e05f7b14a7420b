//! Default values shared by the library and the CLI.
//!
//! Use these constants instead of magic strings so defaults stay consistent
//! between the config types, the CLI flags and the tests.

/// Benchmark cases, in forward order. The driver replays them reversed afterwards.
pub const CASES: [&str; 3] = ["case_a", "case_b", "plain"];

/// Default number of requests passed to the load generator (`-n`).
pub const DEFAULT_ITERATIONS: u64 = 100_000;

/// Default number of concurrent requests passed to the load generator (`-c`).
pub const DEFAULT_CONCURRENCY: u32 = 5;

/// Default install root of the server distribution.
pub const DEFAULT_ROOT: &str = "resty";

/// Default source archive the server distribution is built from.
pub const DEFAULT_SOURCE_URL: &str =
    "http://openresty.org/download/ngx_openresty-1.4.2.8.tar.gz";

/// Default nginx config, relative to the install root.
pub const DEFAULT_NGINX_CONF: &str = "conf/nginx.conf";

/// Default base URL the server under test answers on.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default load generator executable (ApacheBench).
pub const DEFAULT_AB_PROGRAM: &str = "ab";
