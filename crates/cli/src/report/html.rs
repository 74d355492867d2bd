// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! HTML format report output.
//!
//! Every value taken from an artifact is escaped with [`html_escape`].

use std::io::Write;

use crate::health::{HealthRecord, rate_label};
use crate::model::{ReportModel, RunEntry};

use super::{
    ReportFormatter, RunView, displayed_statuses, file_href, html_escape, run_href, run_label,
};

/// HTML format report formatter.
pub struct HtmlFormatter;

impl HtmlFormatter {
    /// Generate CSS styles for the report.
    fn css() -> &'static str {
        r#":root {
      --bg: #1a1a2e;
      --card-bg: #16213e;
      --text: #eef;
      --muted: #8892b0;
      --accent: #64ffda;
      --failed: #f43f5e;
      --passed: #10b981;
    }
    * { box-sizing: border-box; margin: 0; padding: 0; }
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
      background: var(--bg);
      color: var(--text);
      padding: 2rem;
      line-height: 1.6;
    }
    a { color: var(--accent); }
    .container { max-width: 1200px; margin: 0 auto; }
    header {
      margin-bottom: 2rem;
      padding-bottom: 1rem;
      border-bottom: 1px solid var(--card-bg);
    }
    h1 { color: var(--accent); font-size: 1.5rem; }
    h2 { font-size: 1.125rem; margin: 1.5rem 0 0.75rem; }
    section { margin-bottom: 2rem; }
    .meta { color: var(--muted); font-size: 0.875rem; margin-top: 0.5rem; }
    .cards {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(200px, 1fr));
      gap: 1rem;
    }
    .card {
      background: var(--card-bg);
      padding: 1.5rem;
      border-radius: 8px;
      border-left: 4px solid var(--accent);
    }
    .card.passed { border-color: var(--passed); }
    .card.failed { border-color: var(--failed); }
    .card.unavailable { border-color: var(--muted); }
    .card-title { color: var(--muted); font-size: 0.75rem; text-transform: uppercase; }
    .card-value { font-size: 2rem; font-weight: 600; margin-top: 0.5rem; }
    table {
      width: 100%;
      border-collapse: collapse;
      background: var(--card-bg);
      border-radius: 8px;
      overflow: hidden;
    }
    th, td { padding: 0.75rem 1rem; text-align: left; vertical-align: top; }
    th { background: rgba(0,0,0,0.2); color: var(--muted); font-size: 0.75rem; text-transform: uppercase; }
    tr:not(:last-child) td { border-bottom: 1px solid var(--bg); }
    td.num { text-align: right; font-family: monospace; }
    td.status-failed, td.status-timeout { color: var(--failed); }
    td.status-passed { color: var(--passed); }
    pre { white-space: pre-wrap; font-size: 0.8rem; }
    ul { margin-left: 1.5rem; }"#
    }

    fn write_head(writer: &mut dyn Write, title: &str, meta: &str) -> std::io::Result<()> {
        let css = Self::css();
        write!(
            writer,
            r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>
    {css}
  </style>
</head>
<body>
  <div class="container">
    <header>
      <h1>{title}</h1>
      <div class="meta">{meta}</div>
    </header>
"#
        )
    }

    fn write_foot(writer: &mut dyn Write) -> std::io::Result<()> {
        write!(
            writer,
            r#"  </div>
</body>
</html>"#
        )
    }

    /// Render a run card.
    fn render_card(entry: &RunEntry) -> String {
        let title = html_escape(run_label(entry));
        let href = html_escape(&run_href(entry));
        let (category, value) = match entry.summary() {
            Some(summary) if summary.has_failures() => {
                ("failed", format!("{} failed", summary.failed.len()))
            }
            Some(summary) => ("passed", format!("{} tests", summary.total)),
            None => ("unavailable", "n/a".to_string()),
        };
        format!(
            r#"      <div class="card {category}">
        <div class="card-title"><a href="{href}">{title}</a></div>
        <div class="card-value">{value}</div>
      </div>"#
        )
    }

    /// Render a row of the run table.
    fn render_run_row(entry: &RunEntry) -> String {
        let name = html_escape(run_label(entry));
        let href = html_escape(&run_href(entry));
        let source = html_escape(entry.source());
        let file = html_escape(&file_href(entry.source()));
        let cells = match entry {
            RunEntry::Ready(run) => {
                let summary = run.summary();
                let counts: Vec<String> = displayed_statuses(summary)
                    .into_iter()
                    .map(|s| format!("{} {}", summary.count(s), s))
                    .collect();
                format!(
                    r#"<td class="status-{status}">{status}</td><td>{counts}</td><td class="num">{total}</td>"#,
                    status = run.root().status(),
                    counts = counts.join(", "),
                    total = summary.total,
                )
            }
            RunEntry::Unavailable(run) => format!(
                r#"<td>unavailable</td><td colspan="2">{}</td>"#,
                html_escape(&run.reason)
            ),
        };
        format!(
            r#"        <tr><td><a href="{href}">{name}</a></td>{cells}<td><a href="{file}">{source}</a></td></tr>"#
        )
    }

    fn write_runs(writer: &mut dyn Write, model: &ReportModel) -> std::io::Result<()> {
        writeln!(writer, r#"    <section class="cards">"#)?;
        for entry in model.runs() {
            writeln!(writer, "{}", Self::render_card(entry))?;
        }
        write!(
            writer,
            r#"    </section>
    <section>
      <table>
        <thead><tr><th>Plugin</th><th>Status</th><th>Counts</th><th>Total</th><th>Artifact</th></tr></thead>
        <tbody>
"#
        )?;
        for entry in model.runs() {
            writeln!(writer, "{}", Self::render_run_row(entry))?;
        }
        writeln!(
            writer,
            r#"        </tbody>
      </table>
    </section>"#
        )?;

        for entry in model.runs() {
            let Some(summary) = entry.summary() else {
                continue;
            };
            if !summary.has_failures() {
                continue;
            }
            writeln!(writer, "    <section>")?;
            writeln!(
                writer,
                r#"      <h2>Failed in <a href="{}">{}</a></h2>"#,
                html_escape(&run_href(entry)),
                html_escape(run_label(entry))
            )?;
            writeln!(writer, "      <ul>")?;
            for name in &summary.failed {
                writeln!(writer, "        <li>{}</li>", html_escape(name))?;
            }
            writeln!(writer, "      </ul>")?;
            writeln!(writer, "    </section>")?;
        }
        Ok(())
    }

    fn write_health(writer: &mut dyn Write, label: &str, record: &HealthRecord) -> std::io::Result<()> {
        writeln!(writer, "    <section>")?;
        writeln!(
            writer,
            "      <h2>{}: {}/{} healthy ({})</h2>",
            label,
            record.healthy,
            record.total,
            rate_label(record.rate())
        )?;
        if record.is_degraded() && record.unhealthy().next().is_some() {
            writeln!(writer, "      <table>")?;
            writeln!(
                writer,
                "        <thead><tr><th>Name</th><th>Namespace</th><th>Ready</th><th>Reason</th><th>Message</th></tr></thead>"
            )?;
            writeln!(writer, "        <tbody>")?;
            for detail in record.unhealthy() {
                writeln!(
                    writer,
                    "        <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                    html_escape(&detail.name),
                    html_escape(detail.namespace.as_deref().unwrap_or("")),
                    html_escape(&detail.ready),
                    html_escape(detail.reason.as_deref().unwrap_or("")),
                    html_escape(detail.message.as_deref().unwrap_or("")),
                )?;
            }
            writeln!(writer, "        </tbody>")?;
            writeln!(writer, "      </table>")?;
        }
        writeln!(writer, "    </section>")
    }

    fn write_cluster(writer: &mut dyn Write, model: &ReportModel) -> std::io::Result<()> {
        let cluster = model.cluster();
        writeln!(writer, "    <section>")?;
        writeln!(
            writer,
            r#"      <h2>Cluster (<a href="{}">{}</a>)</h2>"#,
            html_escape(&file_href(model.cluster_source())),
            html_escape(model.cluster_source())
        )?;
        writeln!(
            writer,
            r#"      <div class="meta">API version: {}</div>"#,
            html_escape(&cluster.api_version)
        )?;
        writeln!(writer, "    </section>")?;

        Self::write_health(writer, "Nodes", &cluster.node_health)?;
        Self::write_health(writer, "Pods", &cluster.pod_health)?;

        if cluster.errors.is_empty() {
            return Ok(());
        }
        write!(
            writer,
            r#"    <section>
      <h2>Errors</h2>
      <table>
        <thead><tr><th>Category</th><th>Location</th><th>Count</th></tr></thead>
        <tbody>
"#
        )?;
        for (category, hits) in &cluster.errors {
            for (location, count) in hits {
                writeln!(
                    writer,
                    r#"        <tr><td>{}</td><td><a href="{}">{}</a></td><td class="num">{}</td></tr>"#,
                    html_escape(category),
                    html_escape(&file_href(location)),
                    html_escape(location),
                    count
                )?;
            }
        }
        writeln!(
            writer,
            r#"        </tbody>
      </table>
    </section>"#
        )
    }
}

impl ReportFormatter for HtmlFormatter {
    fn format_to(&self, writer: &mut dyn Write, model: &ReportModel) -> anyhow::Result<()> {
        let meta = format!("Loaded {}", model.loaded_at().format("%Y-%m-%d %H:%M UTC"));
        Self::write_head(writer, "Sonoview Report", &meta)?;
        Self::write_runs(writer, model)?;
        Self::write_cluster(writer, model)?;
        Self::write_foot(writer)?;
        Ok(())
    }

    fn format_run_to(
        &self,
        writer: &mut dyn Write,
        entry: &RunEntry,
        view: RunView,
    ) -> anyhow::Result<()> {
        let title = format!("Tests: {}", html_escape(entry.name()));
        let run = match entry {
            RunEntry::Ready(run) => run,
            RunEntry::Unavailable(run) => {
                let meta = format!("Unavailable: {}", html_escape(&run.reason));
                Self::write_head(writer, &title, &meta)?;
                writeln!(writer, r#"    <p><a href="/">Back to report</a></p>"#)?;
                Self::write_foot(writer)?;
                return Ok(());
            }
        };

        let leaves = view.leaves(run);
        let href = html_escape(&run_href(entry));
        let meta = match view {
            RunView::All => format!(
                r#"{} tests &middot; <a href="{href}/failed">failed only</a>"#,
                leaves.len()
            ),
            RunView::Failed => format!(
                r#"{} failed tests &middot; <a href="{href}">all tests</a>"#,
                leaves.len()
            ),
        };
        Self::write_head(writer, &title, &meta)?;

        write!(
            writer,
            r#"    <p><a href="/">Back to report</a> &middot; <a href="{}">{}</a></p>
    <section>
      <table>
        <thead><tr><th>Suite</th><th>Name</th><th>Status</th><th>Failure</th><th>System out</th></tr></thead>
        <tbody>
"#,
            html_escape(&file_href(run.source())),
            html_escape(run.source())
        )?;
        for leaf_ref in &leaves {
            let leaf = leaf_ref.leaf;
            writeln!(
                writer,
                r#"        <tr><td>{}</td><td>{}</td><td class="status-{status}">{status}</td><td><pre>{}</pre></td><td><pre>{}</pre></td></tr>"#,
                html_escape(&leaf_ref.suite()),
                html_escape(&leaf.name),
                html_escape(&leaf.failure().unwrap_or_default()),
                html_escape(&leaf.system_out().unwrap_or_default()),
                status = leaf.status,
            )?;
        }
        writeln!(
            writer,
            r#"        </tbody>
      </table>
    </section>"#
        )?;
        Self::write_foot(writer)?;
        Ok(())
    }

    fn format_empty(&self) -> String {
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Sonoview Report</title>
</head>
<body>
  <h1>No runs found.</h1>
</body>
</html>"#
            .to_string()
    }
}

#[cfg(test)]
#[path = "html_tests.rs"]
mod tests;
