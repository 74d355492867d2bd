// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report and tests command implementations.

use std::io::Write;
use std::path::Path;

use sonoview::cli::{ArtifactArgs, Cli, OutputArgs, OutputFormat, ReportArgs, TestsArgs};
use sonoview::config::Config;
use sonoview::discovery;
use sonoview::ingest::{self, ArtifactSet};
use sonoview::model::ReportModel;
use sonoview::report::{self, RunView};

/// Load config and apply command-line artifact overrides.
pub fn resolve_artifacts(
    cli: &Cli,
    args: &ArtifactArgs,
    cwd: &Path,
) -> anyhow::Result<(Config, ArtifactSet)> {
    let (config, base_dir) = discovery::load_effective(cli.config.as_deref(), cwd)?;
    let artifacts = args.apply(config.artifacts.artifact_set(&base_dir), cwd);
    Ok((config, artifacts))
}

fn load_model(cli: &Cli, args: &ArtifactArgs) -> anyhow::Result<ReportModel> {
    let cwd = std::env::current_dir()?;
    let (_, artifacts) = resolve_artifacts(cli, args, &cwd)?;
    Ok(ingest::load_report(&artifacts).map_err(sonoview::Error::from)?)
}

/// Write rendered output to the requested file, or to stdout.
fn emit(
    output: &OutputArgs,
    render: impl Fn(&mut dyn Write, OutputFormat) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    // Parse output target (format and optional file path)
    let (format, file_path) = output.output_target();

    if output.compact && !matches!(format, OutputFormat::Json) {
        eprintln!("warning: --compact only applies to JSON output, ignoring");
    }

    match file_path {
        Some(path) => {
            let file = std::fs::File::create(&path).map_err(|e| sonoview::Error::Io {
                path: path.clone(),
                source: e,
            })?;
            let mut writer = std::io::BufWriter::new(file);
            render(&mut writer, format)?;
            writer.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            render(&mut handle, format)?;
            // Add trailing newline for JSON output
            if matches!(format, OutputFormat::Json) {
                writeln!(handle)?;
            }
        }
    }
    Ok(())
}

/// Run the report command.
pub fn run(cli: &Cli, args: &ReportArgs) -> anyhow::Result<()> {
    let model = load_model(cli, &args.artifacts)?;
    emit(&args.output, |writer, format| {
        report::format_report_to(writer, format, &model, args.output.compact)
    })
}

/// Run the tests command.
pub fn run_tests(cli: &Cli, args: &TestsArgs) -> anyhow::Result<()> {
    let model = load_model(cli, &args.artifacts)?;
    let view = RunView::from_failed_flag(args.failed);
    if let (None, Some(first)) = (model.find(&args.plugin), model.runs().first()) {
        eprintln!(
            "warning: no plugin named `{}`, showing `{}`",
            args.plugin,
            first.name()
        );
    }
    emit(&args.output, |writer, format| {
        report::format_run_report_to(
            writer,
            format,
            &model,
            &args.plugin,
            view,
            args.output.compact,
        )
    })
}
