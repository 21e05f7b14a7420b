#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for `restybench`
//!
//! `driver_test` drives mock collaborators in-process; `process_test` runs
//! the real OpenResty/ApacheBench adapters against fake executables.

mod driver_test;

use restybench_common::{BenchConfig, LoadArgs};

/// Default config with the given `ab` arguments.
pub fn config_with_args(args: &[&str]) -> BenchConfig {
    let mut config = BenchConfig::default();
    config.load.args = LoadArgs::from_cli(args.iter().map(ToString::to_string).collect());
    config
}

/// The report the driver prints when every case yields `lines`.
pub fn expected_report(cases: &[&str], lines: &[&str]) -> String {
    let mut report = String::from("\n");
    for case in cases {
        report.push_str(&format!("--> Benchmarking /{case}\n\n"));
        for line in lines {
            report.push_str(line);
            report.push('\n');
        }
        report.push('\n');
    }
    report
}
