// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for report formatter tests.

// Test helpers that use unwrap for clarity (tests should panic on unexpected failures).
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::Path;

use chrono::TimeZone;

use crate::health::ClusterHealth;
use crate::ingest::{parse_cluster, parse_tree};
use crate::model::{ReportModel, RunEntry, UnavailableRun};
use crate::summary::summarize_run;
use crate::test_utils::{CLUSTER_DUMP, CLUSTER_FILE, E2E_DUMP, E2E_FILE, SYSTEMD_DUMP, SYSTEMD_FILE};

/// A ready run parsed from a sample dump.
pub fn ready_run(source: &str, dump: &str) -> RunEntry {
    let root = parse_tree(dump, Path::new(source)).unwrap();
    RunEntry::Ready(summarize_run(source, root).unwrap())
}

/// An unavailable run.
pub fn unavailable_run() -> RunEntry {
    RunEntry::Unavailable(UnavailableRun {
        source: "results_dump_broken.yaml".to_string(),
        name: "broken".to_string(),
        reason: "failed to parse results_dump_broken.yaml: bad indentation".to_string(),
    })
}

pub fn sample_cluster() -> ClusterHealth {
    parse_cluster(CLUSTER_DUMP, Path::new(CLUSTER_FILE)).unwrap()
}

/// Standard test model: e2e (one failure), an unavailable run, systemd logs
/// (all passed), and a cluster with one unhealthy node.
pub fn create_test_model() -> ReportModel {
    ReportModel::new(
        vec![
            ready_run(E2E_FILE, E2E_DUMP),
            unavailable_run(),
            ready_run(SYSTEMD_FILE, SYSTEMD_DUMP),
        ],
        CLUSTER_FILE,
        sample_cluster(),
    )
    .with_loaded_at(chrono::Utc.with_ymd_and_hms(2026, 1, 20, 10, 30, 0).unwrap())
}

/// The e2e run of the test model.
pub fn e2e_entry() -> RunEntry {
    ready_run(E2E_FILE, E2E_DUMP)
}

/// A model with no runs.
pub fn empty_model() -> ReportModel {
    ReportModel::new(Vec::new(), CLUSTER_FILE, ClusterHealth::default())
}
