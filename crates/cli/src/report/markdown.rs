// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Markdown format report output.

use std::io::Write;

use crate::health::{HealthRecord, rate_label};
use crate::item::Status;
use crate::model::{ReportModel, RunEntry};

use super::{ReportFormatter, RunView, displayed_statuses};

/// Markdown format report formatter.
pub struct MarkdownFormatter;

/// Escape a value for use inside a table cell.
fn md_cell(s: &str) -> String {
    s.replace('|', "\\|").replace("\r\n", " ").replace('\n', " ")
}

fn write_health_row(writer: &mut dyn Write, label: &str, record: &HealthRecord) -> std::io::Result<()> {
    writeln!(
        writer,
        "| {} | {} | {} | {} |",
        label,
        record.healthy,
        record.total,
        rate_label(record.rate())
    )
}

impl ReportFormatter for MarkdownFormatter {
    fn format_to(&self, writer: &mut dyn Write, model: &ReportModel) -> anyhow::Result<()> {
        writeln!(writer, "# Sonoview Report\n")?;
        writeln!(
            writer,
            "**Loaded:** {}\n",
            model.loaded_at().format("%Y-%m-%d %H:%M UTC")
        )?;

        // Summary table
        writeln!(writer, "| Plugin | Status | Passed | Failed | Skipped | Total |")?;
        writeln!(writer, "|--------|--------|-------:|-------:|--------:|------:|")?;
        for entry in model.runs() {
            match entry {
                RunEntry::Ready(run) => {
                    let summary = run.summary();
                    writeln!(
                        writer,
                        "| {} | {} | {} | {} | {} | {} |",
                        md_cell(run.name()),
                        run.root().status(),
                        summary.count(Status::Passed),
                        summary.count(Status::Failed),
                        summary.count(Status::Skipped),
                        summary.total
                    )?;
                }
                RunEntry::Unavailable(run) => {
                    writeln!(writer, "| {} | unavailable | | | | |", md_cell(&run.name))?;
                }
            }
        }

        for entry in model.runs() {
            match entry {
                RunEntry::Ready(run) => {
                    let summary = run.summary();
                    let extra: Vec<String> = displayed_statuses(summary)
                        .into_iter()
                        .filter(|s| !matches!(s, Status::Passed | Status::Failed | Status::Skipped))
                        .map(|s| format!("{} {}", summary.count(s), s))
                        .collect();
                    if !summary.has_failures() && extra.is_empty() {
                        continue;
                    }
                    writeln!(writer, "\n## {}\n", run.name())?;
                    if !extra.is_empty() {
                        writeln!(writer, "Also: {}\n", extra.join(", "))?;
                    }
                    for name in &summary.failed {
                        writeln!(writer, "- {}", name)?;
                    }
                }
                RunEntry::Unavailable(run) => {
                    writeln!(writer, "\n## {}\n", run.name)?;
                    writeln!(writer, "*Unavailable:* {}", run.reason)?;
                }
            }
        }

        let cluster = model.cluster();
        writeln!(writer, "\n## Cluster\n")?;
        writeln!(writer, "**API version:** {}\n", cluster.api_version)?;
        writeln!(writer, "| Dimension | Healthy | Total | Rate |")?;
        writeln!(writer, "|-----------|--------:|------:|-----:|")?;
        write_health_row(writer, "Nodes", &cluster.node_health)?;
        write_health_row(writer, "Pods", &cluster.pod_health)?;

        let unhealthy: Vec<_> = cluster
            .node_health
            .unhealthy()
            .chain(cluster.pod_health.unhealthy())
            .collect();
        if !unhealthy.is_empty() {
            writeln!(writer, "\n| Unhealthy | Ready | Reason | Message |")?;
            writeln!(writer, "|-----------|-------|--------|---------|")?;
            for detail in unhealthy {
                let name = match detail.namespace {
                    Some(ref ns) => format!("{}/{}", ns, detail.name),
                    None => detail.name.clone(),
                };
                writeln!(
                    writer,
                    "| {} | {} | {} | {} |",
                    md_cell(&name),
                    md_cell(&detail.ready),
                    md_cell(detail.reason.as_deref().unwrap_or("")),
                    md_cell(detail.message.as_deref().unwrap_or(""))
                )?;
            }
        }

        if !cluster.errors.is_empty() {
            writeln!(writer, "\n| Category | Location | Count |")?;
            writeln!(writer, "|----------|----------|------:|")?;
            for (category, hits) in &cluster.errors {
                for (location, count) in hits {
                    writeln!(
                        writer,
                        "| {} | {} | {} |",
                        md_cell(category),
                        md_cell(location),
                        count
                    )?;
                }
            }
        }
        Ok(())
    }

    fn format_run_to(
        &self,
        writer: &mut dyn Write,
        entry: &RunEntry,
        view: RunView,
    ) -> anyhow::Result<()> {
        writeln!(writer, "# Tests: {}\n", entry.name())?;
        let run = match entry {
            RunEntry::Ready(run) => run,
            RunEntry::Unavailable(run) => {
                writeln!(writer, "*Unavailable:* {}", run.reason)?;
                return Ok(());
            }
        };

        let leaves = view.leaves(run);
        match view {
            RunView::All => writeln!(writer, "{} tests\n", leaves.len())?,
            RunView::Failed => writeln!(writer, "{} failed tests\n", leaves.len())?,
        }
        writeln!(writer, "| Suite | Name | Status | Failure |")?;
        writeln!(writer, "|-------|------|--------|---------|")?;
        for leaf_ref in leaves {
            let leaf = leaf_ref.leaf;
            writeln!(
                writer,
                "| {} | {} | {} | {} |",
                md_cell(&leaf_ref.suite()),
                md_cell(&leaf.name),
                leaf.status,
                md_cell(&leaf.failure().unwrap_or_default())
            )?;
        }
        Ok(())
    }

    fn format_empty(&self) -> String {
        "# Sonoview Report\n\n*No runs found.*\n".to_string()
    }
}

#[cfg(test)]
#[path = "markdown_tests.rs"]
mod tests;
