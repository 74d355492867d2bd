// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::resolve_dir;
use crate::ingest::ArtifactSet;

/// Summarize conformance result dumps and browse them as a report
#[derive(Parser)]
#[command(name = "sonoview")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "SONOVIEW_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Summarize every plugin run and the cluster health
    Report(ReportArgs),
    /// List the tests of one plugin run
    Tests(TestsArgs),
    /// Serve the report over HTTP
    Serve(ServeArgs),
}

/// Artifact selection shared by every command.
#[derive(clap::Args, Default, Clone)]
pub struct ArtifactArgs {
    /// Directory artifacts are read from (overrides config)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Plugin result dump, relative to the artifact root (repeatable, replaces config)
    #[arg(long = "plugin", value_name = "PATH")]
    pub plugins: Vec<PathBuf>,

    /// Cluster health dump, relative to the artifact root (overrides config)
    #[arg(long, value_name = "PATH")]
    pub cluster: Option<PathBuf>,
}

impl ArtifactArgs {
    /// Apply command-line overrides to a configured artifact set.
    pub fn apply(&self, mut set: ArtifactSet, cwd: &Path) -> ArtifactSet {
        if let Some(ref root) = self.root {
            set.root = resolve_dir(cwd, root);
        }
        if !self.plugins.is_empty() {
            set.plugins = self.plugins.clone();
        }
        if let Some(ref cluster) = self.cluster {
            set.cluster = cluster.clone();
        }
        set
    }
}

/// Output selection shared by the rendering commands.
#[derive(clap::Args, Clone)]
pub struct OutputArgs {
    /// Output format or file path (e.g., text, json, html, markdown, report.html)
    #[arg(short, long, default_value = "text")]
    pub output: String,

    /// Output compact JSON (no whitespace, single line)
    #[arg(long)]
    pub compact: bool,
}

impl Default for OutputArgs {
    fn default() -> Self {
        Self {
            output: "text".to_string(),
            compact: false,
        }
    }
}

impl OutputArgs {
    /// Parse output argument into format and optional file path.
    pub fn output_target(&self) -> (OutputFormat, Option<PathBuf>) {
        let val = self.output.to_lowercase();

        // Check for file extension
        if val.ends_with(".html") {
            (OutputFormat::Html, Some(PathBuf::from(&self.output)))
        } else if val.ends_with(".json") {
            (OutputFormat::Json, Some(PathBuf::from(&self.output)))
        } else if val.ends_with(".md") {
            (OutputFormat::Markdown, Some(PathBuf::from(&self.output)))
        } else if val.ends_with(".txt") {
            (OutputFormat::Text, Some(PathBuf::from(&self.output)))
        } else {
            // Parse as format name
            let format = match val.as_str() {
                "json" => OutputFormat::Json,
                "html" => OutputFormat::Html,
                "markdown" | "md" => OutputFormat::Markdown,
                _ => OutputFormat::Text,
            };
            (format, None)
        }
    }
}

#[derive(clap::Args, Default)]
pub struct ReportArgs {
    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub artifacts: ArtifactArgs,
}

#[derive(clap::Args)]
pub struct TestsArgs {
    /// Plugin name or artifact path (unknown names show the first plugin)
    #[arg(value_name = "PLUGIN")]
    pub plugin: String,

    /// Show only failed and timed-out tests
    #[arg(long)]
    pub failed: bool,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub artifacts: ArtifactArgs,
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Listen address (overrides config)
    #[arg(long, value_name = "ADDR")]
    pub addr: Option<String>,

    #[command(flatten)]
    pub artifacts: ArtifactArgs,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Html,
    Markdown,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
