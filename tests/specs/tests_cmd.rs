//! Behavioral specs for the tests command.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

/// > Lists every leaf of the run with its suite and status
#[test]
fn tests_lists_all_leaves() {
    tests("e2e").on("dump").runs().stdout_eq(
        "\
e2e: 5 tests
[junit_01.xml] [sig-node] Pods should be submitted and removed [Conformance]: passed
[junit_01.xml] [sig-apps] Deployment should roll back <fast> [Conformance]: failed
  failure: timed out waiting for the condition
  system-out: STEP: creating deployment
[junit_01.xml] [sig-storage] CSI volume expansion: skipped
[junit_01.xml] [sig-network] Services should serve endpoints on same port: passed
[junit_01.xml] [sig-cli] Kubectl logs should be able to retrieve logs: timeout
",
    );
}

/// > --failed keeps failed and timed-out leaves only
#[test]
fn tests_failed_only() {
    tests("e2e")
        .on("dump")
        .args(["--failed"])
        .runs()
        .stdout_has("e2e: 2 failed tests\n")
        .stdout_has("Deployment should roll back")
        .stdout_has("Kubectl logs")
        .stdout_lacks(": passed")
        .stdout_lacks(": skipped");
}

/// > Runs can be selected by artifact path
#[test]
fn tests_by_source() {
    tests("results_dump_systemd_logs.yaml")
        .on("dump")
        .runs()
        .stdout_has("systemd-logs: 2 tests\n[worker-1] systemd_logs: passed\n");
}

/// > An unknown plugin falls back to the first run with a warning
#[test]
fn tests_unknown_plugin_falls_back() {
    tests("nope")
        .on("dump")
        .runs()
        .stdout_has("e2e: 5 tests")
        .stderr_has("warning: no plugin named `nope`, showing `e2e`");
}

/// > JSON lists the tests with failure details
#[test]
fn tests_json_format() {
    let json = tests("e2e").on("dump").json().args(["--failed"]).json_output();
    assert_eq!(json["view"], "failed");
    let tests = json["tests"].as_array().unwrap();
    assert_eq!(tests.len(), 2);
    assert_eq!(tests[0]["failure"], "timed out waiting for the condition");
    assert_eq!(tests[1]["status"], "timeout");
}

/// > An unavailable run reports its reason
#[test]
fn tests_unavailable_run() {
    let temp = Project::dump();
    temp.file("results_dump_e2e.yaml", "{ not yaml");

    tests("results_dump_e2e.yaml")
        .pwd(temp.path())
        .runs()
        .stdout_has("results_dump_e2e: unavailable (failed to parse");
}
