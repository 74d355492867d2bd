// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text format report output.

use std::io::Write;

use crate::health::{HealthRecord, rate_label};
use crate::model::{ReportModel, RunEntry};

use super::{ReportFormatter, RunView, displayed_statuses};

/// Text format report formatter.
pub struct TextFormatter;

impl ReportFormatter for TextFormatter {
    fn format_to(&self, writer: &mut dyn Write, model: &ReportModel) -> anyhow::Result<()> {
        writeln!(writer, "Sonoview Report")?;
        writeln!(writer, "===============")?;
        writeln!(
            writer,
            "Loaded: {}",
            model.loaded_at().format("%Y-%m-%d %H:%M UTC")
        )?;

        for entry in model.runs() {
            writeln!(writer)?;
            write_run_summary(writer, entry)?;
        }

        writeln!(writer)?;
        write_cluster(writer, model)?;
        Ok(())
    }

    fn format_run_to(
        &self,
        writer: &mut dyn Write,
        entry: &RunEntry,
        view: RunView,
    ) -> anyhow::Result<()> {
        let run = match entry {
            RunEntry::Ready(run) => run,
            RunEntry::Unavailable(run) => {
                writeln!(writer, "{}: unavailable ({})", run.name, run.reason)?;
                return Ok(());
            }
        };

        let leaves = view.leaves(run);
        let label = match view {
            RunView::All => "tests",
            RunView::Failed => "failed tests",
        };
        writeln!(writer, "{}: {} {}", run.name(), leaves.len(), label)?;

        for leaf_ref in leaves {
            let leaf = leaf_ref.leaf;
            let suite = leaf_ref.suite();
            if suite.is_empty() {
                writeln!(writer, "{}: {}", leaf.name, leaf.status)?;
            } else {
                writeln!(writer, "[{}] {}: {}", suite, leaf.name, leaf.status)?;
            }
            if let Some(failure) = leaf.failure() {
                writeln!(writer, "  failure: {}", failure.trim_end())?;
            }
            if let Some(out) = leaf.system_out() {
                writeln!(writer, "  system-out: {}", out.trim_end())?;
            }
        }
        Ok(())
    }

    fn format_empty(&self) -> String {
        "No runs found.\n".to_string()
    }
}

fn write_run_summary(writer: &mut dyn Write, entry: &RunEntry) -> anyhow::Result<()> {
    writeln!(writer, "{} ({})", entry.name(), entry.source())?;
    let run = match entry {
        RunEntry::Ready(run) => run,
        RunEntry::Unavailable(run) => {
            writeln!(writer, "  unavailable: {}", run.reason)?;
            return Ok(());
        }
    };

    let summary = run.summary();
    writeln!(writer, "  status: {}", run.root().status())?;
    writeln!(writer, "  total: {}", summary.total)?;
    for status in displayed_statuses(summary) {
        writeln!(writer, "  {}: {}", status, summary.count(status))?;
    }
    if summary.has_failures() {
        writeln!(writer, "  failed tests:")?;
        for name in &summary.failed {
            writeln!(writer, "    {}", name)?;
        }
    }
    Ok(())
}

fn write_cluster(writer: &mut dyn Write, model: &ReportModel) -> anyhow::Result<()> {
    let cluster = model.cluster();
    writeln!(writer, "Cluster ({})", model.cluster_source())?;
    writeln!(writer, "  api version: {}", cluster.api_version)?;
    write_health(writer, "node health", &cluster.node_health)?;
    write_health(writer, "pod health", &cluster.pod_health)?;

    if !cluster.errors.is_empty() {
        writeln!(writer, "  errors:")?;
        for (category, hits) in &cluster.errors {
            writeln!(writer, "    {}:", category)?;
            for (location, count) in hits {
                writeln!(writer, "      {} {}", count, location)?;
            }
        }
    }
    Ok(())
}

fn write_health(writer: &mut dyn Write, label: &str, record: &HealthRecord) -> anyhow::Result<()> {
    writeln!(
        writer,
        "  {}: {}/{} ({})",
        label,
        record.healthy,
        record.total,
        rate_label(record.rate())
    )?;
    if record.is_degraded() {
        for detail in record.unhealthy() {
            let name = match detail.namespace {
                Some(ref ns) => format!("{}/{}", ns, detail.name),
                None => detail.name.clone(),
            };
            write!(writer, "    unhealthy: {} ready={}", name, detail.ready)?;
            if let Some(ref reason) = detail.reason {
                write!(writer, " reason={}", reason)?;
            }
            if let Some(ref message) = detail.message {
                write!(writer, " message={:?}", message)?;
            }
            writeln!(writer)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
