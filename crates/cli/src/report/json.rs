// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON format report output.

use serde_json::{Value, json};

use crate::health::HealthRecord;
use crate::model::{ReportModel, RunEntry};
use crate::summary::StatusSummary;

use super::{ReportFormatter, RunView};

/// JSON format report formatter.
pub struct JsonFormatter {
    compact: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    ///
    /// If `compact` is true, outputs single-line JSON without whitespace.
    pub fn new(compact: bool) -> Self {
        Self { compact }
    }

    fn write_value(&self, writer: &mut dyn std::io::Write, value: &Value) -> anyhow::Result<()> {
        if self.compact {
            serde_json::to_writer(writer, value)?;
        } else {
            serde_json::to_writer_pretty(writer, value)?;
        }
        Ok(())
    }

    /// Build the overview document.
    fn build_json(&self, model: &ReportModel) -> Value {
        let runs: Vec<Value> = model.runs().iter().map(run_json).collect();
        let cluster = model.cluster();

        json!({
            "loaded_at": model.loaded_at().to_rfc3339(),
            "runs": runs,
            "totals": summary_json(&model.totals()),
            "cluster": {
                "source": model.cluster_source(),
                "api_version": cluster.api_version,
                "node_health": health_json(&cluster.node_health),
                "pod_health": health_json(&cluster.pod_health),
                "error_summary": cluster.errors,
            },
        })
    }

    /// Build the test listing of one run.
    fn build_run_json(&self, entry: &RunEntry, view: RunView) -> Value {
        let run = match entry {
            RunEntry::Ready(run) => run,
            RunEntry::Unavailable(run) => {
                return json!({
                    "name": run.name,
                    "source": run.source,
                    "available": false,
                    "reason": run.reason,
                });
            }
        };

        let tests: Vec<Value> = view
            .leaves(run)
            .into_iter()
            .map(|leaf_ref| {
                let leaf = leaf_ref.leaf;
                let mut test = serde_json::Map::new();
                test.insert("name".to_string(), json!(leaf.name));
                test.insert("suite".to_string(), json!(leaf_ref.suite()));
                test.insert("status".to_string(), json!(leaf.status));
                if let Some(failure) = leaf.failure() {
                    test.insert("failure".to_string(), json!(failure));
                }
                if let Some(out) = leaf.system_out() {
                    test.insert("system_out".to_string(), json!(out));
                }
                Value::Object(test)
            })
            .collect();

        json!({
            "name": run.name(),
            "source": run.source(),
            "available": true,
            "view": view.as_str(),
            "status": run.root().status(),
            "tests": tests,
        })
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new(false)
    }
}

fn summary_json(summary: &StatusSummary) -> Value {
    json!({
        "total": summary.total,
        "counts": summary.counts,
        "failed": summary.failed,
    })
}

fn run_json(entry: &RunEntry) -> Value {
    match entry {
        RunEntry::Ready(run) => {
            let summary = run.summary();
            json!({
                "name": run.name(),
                "source": run.source(),
                "available": true,
                "status": run.root().status(),
                "total": summary.total,
                "counts": summary.counts,
                "failed": summary.failed,
            })
        }
        RunEntry::Unavailable(run) => json!({
            "name": run.name,
            "source": run.source,
            "available": false,
            "reason": run.reason,
        }),
    }
}

fn health_json(record: &HealthRecord) -> Value {
    let unhealthy: Vec<_> = record.unhealthy().collect();
    json!({
        "total": record.total,
        "healthy": record.healthy,
        // null when the rate is undefined
        "rate": record.rate().ok(),
        "unhealthy": unhealthy,
    })
}

impl ReportFormatter for JsonFormatter {
    fn format_to(&self, writer: &mut dyn std::io::Write, model: &ReportModel) -> anyhow::Result<()> {
        let value = self.build_json(model);
        self.write_value(writer, &value)
    }

    fn format_run_to(
        &self,
        writer: &mut dyn std::io::Write,
        entry: &RunEntry,
        view: RunView,
    ) -> anyhow::Result<()> {
        let value = self.build_run_json(entry, view);
        self.write_value(writer, &value)
    }

    fn format_empty(&self) -> String {
        if self.compact {
            r#"{"runs":[]}"#.to_string()
        } else {
            "{\n  \"runs\": []\n}".to_string()
        }
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
