// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The report read model.
//!
//! A [`ReportModel`] is assembled once per load and never changes. Readers
//! share it through a [`ReportHandle`], which swaps in a whole new model on
//! reload so nobody observes a half-updated report.

use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};

use crate::health::{ClusterHealth, HealthError, health_rate};
use crate::summary::{RunSummary, StatusSummary};

/// A run that could not be summarized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnavailableRun {
    pub source: String,
    pub name: String,
    pub reason: String,
}

/// One plugin artifact in the report.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEntry {
    Ready(RunSummary),
    Unavailable(UnavailableRun),
}

impl RunEntry {
    pub fn source(&self) -> &str {
        match self {
            RunEntry::Ready(run) => run.source(),
            RunEntry::Unavailable(run) => &run.source,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            RunEntry::Ready(run) => run.name(),
            RunEntry::Unavailable(run) => &run.name,
        }
    }

    pub fn run(&self) -> Option<&RunSummary> {
        match self {
            RunEntry::Ready(run) => Some(run),
            RunEntry::Unavailable(_) => None,
        }
    }

    pub fn summary(&self) -> Option<&StatusSummary> {
        self.run().map(RunSummary::summary)
    }

    pub fn is_available(&self) -> bool {
        matches!(self, RunEntry::Ready(_))
    }
}

/// Immutable view over all runs of a load plus the cluster health.
#[derive(Debug, Clone)]
pub struct ReportModel {
    runs: Vec<RunEntry>,
    cluster_source: String,
    cluster: ClusterHealth,
    loaded_at: DateTime<Utc>,
}

impl ReportModel {
    pub fn new(
        runs: Vec<RunEntry>,
        cluster_source: impl Into<String>,
        cluster: ClusterHealth,
    ) -> Self {
        Self {
            runs,
            cluster_source: cluster_source.into(),
            cluster,
            loaded_at: Utc::now(),
        }
    }

    /// Override the load timestamp.
    pub fn with_loaded_at(mut self, loaded_at: DateTime<Utc>) -> Self {
        self.loaded_at = loaded_at;
        self
    }

    /// Runs in ingestion order.
    pub fn runs(&self) -> &[RunEntry] {
        &self.runs
    }

    /// Find a run by source identifier, then by plugin name. No fallback.
    pub fn find(&self, key: &str) -> Option<&RunEntry> {
        self.runs
            .iter()
            .find(|entry| entry.source() == key)
            .or_else(|| self.runs.iter().find(|entry| entry.name() == key))
    }

    /// Like [`find`](Self::find), but an unknown key falls back to the first run.
    ///
    /// Returns `None` only when there are no runs at all.
    pub fn lookup(&self, key: &str) -> Option<&RunEntry> {
        self.find(key).or_else(|| self.runs.first())
    }

    pub fn cluster(&self) -> &ClusterHealth {
        &self.cluster
    }

    /// Identifier of the cluster health artifact.
    pub fn cluster_source(&self) -> &str {
        &self.cluster_source
    }

    pub fn node_health_rate(&self) -> Result<u8, HealthError> {
        health_rate(&self.cluster.node_health)
    }

    pub fn pod_health_rate(&self) -> Result<u8, HealthError> {
        health_rate(&self.cluster.pod_health)
    }

    /// Summary merged over every available run.
    pub fn totals(&self) -> StatusSummary {
        self.runs
            .iter()
            .filter_map(RunEntry::summary)
            .fold(StatusSummary::default(), |mut acc, summary| {
                acc.merge(summary.clone());
                acc
            })
    }

    /// Sources of every artifact this model was built from.
    pub fn artifact_paths(&self) -> impl Iterator<Item = &str> {
        self.runs
            .iter()
            .map(RunEntry::source)
            .chain(std::iter::once(self.cluster_source.as_str()))
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// Shared handle to the current report.
pub struct ReportHandle {
    current: ArcSwap<ReportModel>,
}

impl ReportHandle {
    pub fn new(model: ReportModel) -> Self {
        Self {
            current: ArcSwap::from_pointee(model),
        }
    }

    /// The report as of now. Later publishes do not affect the returned snapshot.
    pub fn snapshot(&self) -> Arc<ReportModel> {
        self.current.load_full()
    }

    /// Replace the current report, returning the previous one.
    pub fn publish(&self, model: ReportModel) -> Arc<ReportModel> {
        self.current.swap(Arc::new(model))
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
