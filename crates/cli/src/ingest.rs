// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Artifact ingestion.
//!
//! Reads plugin dumps and the cluster health dump, summarizes every plugin
//! and assembles a [`ReportModel`]. A plugin that cannot be read or
//! summarized becomes an unavailable run; the cluster dump is required.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::health::ClusterHealth;
use crate::item::ResultItem;
use crate::model::{ReportModel, RunEntry, UnavailableRun};
use crate::summary::summarize_run;

/// The artifacts making up one report.
///
/// Relative paths are resolved against `root`. The paths as given double as
/// the source identifiers of the runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSet {
    pub root: PathBuf,
    pub plugins: Vec<PathBuf>,
    pub cluster: PathBuf,
}

impl ArtifactSet {
    /// Location on disk of an artifact path.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

/// Errors loading a single artifact.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {}", .path.display(), .message)]
    Parse { path: PathBuf, message: String },
}

fn read(path: &Path) -> Result<String, IngestError> {
    std::fs::read_to_string(path).map_err(|e| IngestError::Read {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parse a plugin dump.
pub fn parse_tree(content: &str, path: &Path) -> Result<ResultItem, IngestError> {
    serde_yaml::from_str(content).map_err(|e| IngestError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a plugin dump from disk.
pub fn load_tree(path: &Path) -> Result<ResultItem, IngestError> {
    parse_tree(&read(path)?, path)
}

/// Parse a cluster health dump.
pub fn parse_cluster(content: &str, path: &Path) -> Result<ClusterHealth, IngestError> {
    serde_yaml::from_str(content).map_err(|e| IngestError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a cluster health dump from disk.
pub fn load_cluster(path: &Path) -> Result<ClusterHealth, IngestError> {
    parse_cluster(&read(path)?, path)
}

/// Load and summarize one plugin artifact. Never fails; problems produce
/// an unavailable entry.
pub fn load_run(artifacts: &ArtifactSet, plugin: &Path) -> RunEntry {
    let source = plugin.display().to_string();
    let root = match load_tree(&artifacts.resolve(plugin)) {
        Ok(root) => root,
        Err(e) => return unavailable(source, fallback_name(plugin), e.to_string()),
    };

    let name = root.name().to_string();
    match summarize_run(source.clone(), root) {
        Ok(run) => {
            tracing::debug!(
                source = %source,
                plugin = %name,
                total = run.summary().total,
                failed = run.summary().failed.len(),
                "summarized run"
            );
            RunEntry::Ready(run)
        }
        Err(e) => unavailable(source, name, e.to_string()),
    }
}

fn unavailable(source: String, name: String, reason: String) -> RunEntry {
    tracing::warn!(source = %source, reason = %reason, "run unavailable");
    RunEntry::Unavailable(UnavailableRun {
        source,
        name,
        reason,
    })
}

/// Name for a run whose dump could not be read: the file stem.
fn fallback_name(plugin: &Path) -> String {
    plugin
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| plugin.display().to_string())
}

/// Load every artifact of the set into a fresh report.
///
/// Plugins are summarized in parallel; the report keeps them in the order
/// they were listed.
pub fn load_report(artifacts: &ArtifactSet) -> Result<ReportModel, IngestError> {
    let cluster = load_cluster(&artifacts.resolve(&artifacts.cluster))?;
    tracing::debug!(source = %artifacts.cluster.display(), "loaded cluster health");

    let runs: Vec<RunEntry> = artifacts
        .plugins
        .par_iter()
        .map(|plugin| load_run(artifacts, plugin))
        .collect();

    Ok(ReportModel::new(
        runs,
        artifacts.cluster.display().to_string(),
        cluster,
    ))
}

#[cfg(test)]
#[path = "ingest_tests.rs"]
mod tests;
