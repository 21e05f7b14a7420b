//! Driver tests against in-process mocks
//!
//! Cover case ordering, argument forwarding, guaranteed teardown and the
//! printed report.

use crate::{config_with_args, expected_report};
use restybench_common::{BenchConfig, BenchError};
use restybench_core::Driver;
use restybench_tests::{MockLoadgen, MockServer, RPS_LINE};

const ORDER: [&str; 6] = ["case_a", "case_b", "plain", "plain", "case_b", "case_a"];

/// Cases run forwards, then backwards
#[tokio::test]
async fn test_case_order() {
    let mut driver = Driver::new(MockServer::default(), MockLoadgen::default());

    driver
        .run(&BenchConfig::default(), &mut std::io::sink())
        .await
        .unwrap();

    assert_eq!(driver.loadgen().cases(), ORDER);
    assert!(driver
        .loadgen()
        .calls()
        .iter()
        .all(|c| c.url.starts_with("http://localhost:8080/")));
}

/// Without arguments every invocation gets `-n 100000 -c 5`
#[tokio::test]
async fn test_default_args_forwarded() {
    let mut driver = Driver::new(MockServer::default(), MockLoadgen::default());

    driver
        .run(&config_with_args(&[]), &mut std::io::sink())
        .await
        .unwrap();

    let calls = driver.loadgen().calls();
    assert_eq!(calls.len(), 6);
    for call in calls {
        assert_eq!(call.args, ["-n", "100000", "-c", "5"]);
    }
}

/// User arguments replace the defaults entirely
#[tokio::test]
async fn test_cli_args_override_defaults() {
    let mut driver = Driver::new(MockServer::default(), MockLoadgen::default());

    driver
        .run(&config_with_args(&["-n", "10", "-c", "2"]), &mut std::io::sink())
        .await
        .unwrap();

    for call in driver.loadgen().calls() {
        assert_eq!(call.args, ["-n", "10", "-c", "2"]);
    }

    let mut driver = Driver::new(MockServer::default(), MockLoadgen::default());
    driver
        .run(&config_with_args(&["-t", "5"]), &mut std::io::sink())
        .await
        .unwrap();

    for call in driver.loadgen().calls() {
        assert_eq!(call.args, ["-t", "5"]);
    }
}

/// Six sections, each with its header, the metric line and a blank line
#[tokio::test]
async fn test_end_to_end_report() {
    let mut driver = Driver::new(MockServer::default(), MockLoadgen::default());
    let mut out = Vec::new();

    driver.run(&BenchConfig::default(), &mut out).await.unwrap();

    let report = String::from_utf8(out).unwrap();
    assert_eq!(report, expected_report(&ORDER, &[RPS_LINE]));

    let headers: Vec<&str> = report
        .lines()
        .filter(|l| l.starts_with("--> Benchmarking /"))
        .collect();
    assert_eq!(headers.len(), 6);
    assert_eq!(report.matches(RPS_LINE).count(), 6);
}

/// Irrelevant report lines never reach the output
#[tokio::test]
async fn test_report_is_filtered() {
    let loadgen = MockLoadgen::echoing(
        "This is ApacheBench, Version 2.3\n\
         Server Software: openresty\n\
         Document Path: /x\n\
         Complete requests: 10\n\
         Failed requests: 0\n\
         Time per request: 0.2 [ms] (mean)\n",
    );
    let mut driver = Driver::new(MockServer::default(), loadgen);
    let mut out = Vec::new();

    driver.run(&BenchConfig::default(), &mut out).await.unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        expected_report(&ORDER, &["Document Path: /x", "Failed requests: 0"])
    );
}

/// Teardown runs exactly once on success
#[tokio::test]
async fn test_teardown_once() {
    let mut driver = Driver::new(MockServer::default(), MockLoadgen::default());

    driver
        .run(&BenchConfig::default(), &mut std::io::sink())
        .await
        .unwrap();

    assert_eq!(driver.server().starts, 1);
    assert_eq!(driver.server().stops, 1);
}

/// A failing case leaves an empty section, the run goes on and the server
/// is still stopped once
#[tokio::test]
async fn test_teardown_once_when_case_fails() {
    let mut driver = Driver::new(
        MockServer::default(),
        MockLoadgen::default().failing_on("case_b"),
    );
    let mut out = Vec::new();

    let result = driver.run(&BenchConfig::default(), &mut out).await;

    assert!(matches!(result, Err(BenchError::LoadGenerator(_))));
    assert_eq!(driver.loadgen().cases(), ORDER);
    assert_eq!(driver.server().stops, 1);

    let report = String::from_utf8(out).unwrap();
    assert_eq!(report.matches(RPS_LINE).count(), 4);
    assert_eq!(report.matches("--> Benchmarking /case_b\n\n\n").count(), 2);
}

/// Setup failure: no case runs, teardown still runs once, the start error wins
#[tokio::test]
async fn test_teardown_once_when_setup_fails() {
    let mut driver = Driver::new(MockServer::failing_start(), MockLoadgen::default());
    let mut out: Vec<u8> = Vec::new();

    let err = driver
        .run(&BenchConfig::default(), &mut out)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("refused to start"), "{err}");
    assert!(driver.loadgen().calls().is_empty());
    assert_eq!(driver.server().stops, 1);
    assert!(out.is_empty());
}

/// A stop failure is reported, but only after the whole report was printed
#[tokio::test]
async fn test_teardown_failure_after_report() {
    let mut driver = Driver::new(MockServer::failing_stop(), MockLoadgen::default());
    let mut out = Vec::new();

    let err = driver
        .run(&BenchConfig::default(), &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, BenchError::Server(_)));
    assert_eq!(
        String::from_utf8(out).unwrap(),
        expected_report(&ORDER, &[RPS_LINE])
    );
}

/// Custom case lists are replayed the same way
#[tokio::test]
async fn test_custom_cases() {
    let mut config = BenchConfig::default();
    config.cases = vec!["hello".into(), "world".into()];
    config.server.base_url = "http://127.0.0.1:9000/".into();

    let mut driver = Driver::new(MockServer::default(), MockLoadgen::default());
    driver.run(&config, &mut std::io::sink()).await.unwrap();

    let urls: Vec<String> = driver.loadgen().calls().into_iter().map(|c| c.url).collect();
    assert_eq!(
        urls,
        [
            "http://127.0.0.1:9000/hello",
            "http://127.0.0.1:9000/world",
            "http://127.0.0.1:9000/world",
            "http://127.0.0.1:9000/hello",
        ]
    );
}
