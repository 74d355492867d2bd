// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared unit test utilities.
//!
//! Provides sample dumps and temp directory helpers for unit tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// E2E plugin dump: one passed, one failed, one skipped test.
pub const E2E_DUMP: &str = r#"name: e2e
status: failed
meta:
  type: summary
items:
- name: junit_01.xml
  status: failed
  meta:
    file: plugins/e2e/results/global/junit_01.xml
  items:
  - name: "[sig-node] Pods should be submitted and removed"
    status: passed
  - name: "[sig-apps] Deployment should roll <fast>"
    status: failed
    details:
      failure: "timed out waiting for rollout"
      system-out: "rolling update started"
  - name: "[sig-storage] CSI volume expansion"
    status: skipped
"#;

/// Systemd logs plugin dump: one container per node.
pub const SYSTEMD_DUMP: &str = r#"name: systemd-logs
status: passed
items:
- name: worker-1
  status: passed
  items:
  - name: systemd_logs
    status: passed
- name: worker-2
  status: passed
  items:
  - name: systemd_logs
    status: passed
"#;

/// Cluster health dump with one unhealthy node.
pub const CLUSTER_DUMP: &str = r#"api_version: v1.29.2
node_health:
  total_nodes: 3
  healthy_nodes: 2
  details:
  - name: worker-3
    healthy: false
    ready: "False"
    reason: KubeletNotReady
    message: container runtime is down
pod_health:
  total_nodes: 10
  healthy_nodes: 10
error_summary:
  error:
    podlogs/kube-system/etcd.txt: 4
"#;

/// Default artifact file names.
pub const E2E_FILE: &str = "results_dump_e2e.yaml";
pub const SYSTEMD_FILE: &str = "results_dump_systemd_logs.yaml";
pub const CLUSTER_FILE: &str = "results_dump_sonobuoy.yaml";

/// Creates a temp directory with a minimal sonoview.toml.
pub fn temp_project() -> TempDir {
    temp_project_with_config("version = 1\n")
}

/// Creates a temp directory with custom config content.
pub fn temp_project_with_config(config: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("sonoview.toml"), config).unwrap();
    dir
}

/// Creates a temp directory holding the three sample dumps under their default names.
pub fn temp_dump_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    create_tree(
        dir.path(),
        &[
            (E2E_FILE, E2E_DUMP),
            (SYSTEMD_FILE, SYSTEMD_DUMP),
            (CLUSTER_FILE, CLUSTER_DUMP),
        ],
    );
    dir
}

/// Creates a directory tree from a list of (path, content) pairs.
///
/// Parent directories are created automatically.
pub fn create_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
}
