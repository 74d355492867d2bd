// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report rendering.
//!
//! Renders a [`ReportModel`] overview, or the tests of a single run, in
//! text, JSON, HTML or Markdown.

mod html;
mod json;
mod markdown;
mod text;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::cli::OutputFormat;
use crate::item::{LeafRef, Status};
use crate::model::{ReportModel, RunEntry};
use crate::summary::{RunSummary, StatusSummary};

pub use html::HtmlFormatter;
pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Which leaves of a run to list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunView {
    #[default]
    All,
    /// Only failed and timed-out tests.
    Failed,
}

impl RunView {
    pub fn from_failed_flag(failed: bool) -> Self {
        if failed { RunView::Failed } else { RunView::All }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RunView::All => "all",
            RunView::Failed => "failed",
        }
    }

    /// Leaves of a run selected by this view, in pre-order.
    pub fn leaves(self, run: &RunSummary) -> Vec<LeafRef<'_>> {
        run.root()
            .leaves()
            .filter(|l| self == RunView::All || l.leaf.status.is_failure())
            .collect()
    }
}

/// Statuses shown for a run: passed, failed and skipped always, the rest
/// only when observed.
pub fn displayed_statuses(summary: &StatusSummary) -> Vec<Status> {
    Status::ALL
        .into_iter()
        .filter(|s| {
            matches!(s, Status::Passed | Status::Failed | Status::Skipped) || summary.count(*s) > 0
        })
        .collect()
}

/// Trait for formatting the report into various output formats.
pub trait ReportFormatter {
    /// Write the overview of every run and the cluster health.
    fn format_to(
        &self,
        writer: &mut dyn std::io::Write,
        model: &ReportModel,
    ) -> anyhow::Result<()>;

    /// Write the tests of a single run.
    fn format_run_to(
        &self,
        writer: &mut dyn std::io::Write,
        entry: &RunEntry,
        view: RunView,
    ) -> anyhow::Result<()>;

    /// Output for when there are no runs to show.
    fn format_empty(&self) -> String;

    /// Format the overview into a string.
    fn format(&self, model: &ReportModel) -> anyhow::Result<String> {
        let mut buf = Vec::with_capacity(1024);
        self.format_to(&mut buf, model)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Format a run into a string.
    fn format_run(&self, entry: &RunEntry, view: RunView) -> anyhow::Result<String> {
        let mut buf = Vec::with_capacity(1024);
        self.format_run_to(&mut buf, entry, view)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Write empty output to a writer.
    fn format_empty_to(&self, writer: &mut dyn std::io::Write) -> std::io::Result<()> {
        write!(writer, "{}", self.format_empty())
    }
}

/// Create formatter based on output format.
pub fn create_formatter(format: OutputFormat, compact: bool) -> Box<dyn ReportFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter::new(compact)),
        OutputFormat::Html => Box::new(HtmlFormatter),
        OutputFormat::Markdown => Box::new(MarkdownFormatter),
    }
}

/// Write the overview report.
pub fn format_report_to(
    writer: &mut dyn std::io::Write,
    format: OutputFormat,
    model: &ReportModel,
    compact: bool,
) -> anyhow::Result<()> {
    create_formatter(format, compact).format_to(writer, model)
}

/// Write the tests of the run matching `key`.
///
/// Unknown keys fall back to the first run; a model without runs renders
/// the format's empty output.
pub fn format_run_report_to(
    writer: &mut dyn std::io::Write,
    format: OutputFormat,
    model: &ReportModel,
    key: &str,
    view: RunView,
    compact: bool,
) -> anyhow::Result<()> {
    let formatter = create_formatter(format, compact);
    match model.lookup(key) {
        Some(entry) => formatter.format_run_to(writer, entry, view),
        None => Ok(formatter.format_empty_to(writer)?),
    }
}

/// Characters left unescaped in URL components.
const URL_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a value for a URL path segment or query value.
pub fn url_component(value: &str) -> String {
    utf8_percent_encode(value, URL_COMPONENT).to_string()
}

/// Link to the test listing of a run, keyed by its source identifier.
///
/// Plugin names can repeat or be empty; sources are unique per model.
pub fn run_href(entry: &RunEntry) -> String {
    format!("/tests/{}", url_component(entry.source()))
}

/// Text for a link to a run: its name, or the source when unnamed.
pub fn run_label(entry: &RunEntry) -> &str {
    if entry.name().is_empty() {
        entry.source()
    } else {
        entry.name()
    }
}

/// Link to a raw artifact.
pub fn file_href(path: &str) -> String {
    format!("/file?file={}", url_component(path))
}

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
pub mod test_support;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
