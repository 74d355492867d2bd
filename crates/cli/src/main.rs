// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sonoview CLI entry point.

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt};

use sonoview::cli::{Cli, Command};
use sonoview::error::ExitCode;

mod cmd_report;
mod cmd_serve;

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("SONOVIEW_LOG").unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("sonoview: {}", e);
            match e.downcast_ref::<sonoview::Error>() {
                Some(err) => ExitCode::from(err),
                None => ExitCode::InternalError,
            }
        }
    };

    std::process::exit(exit_code as i32);
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.command {
        None => {
            // Show help for bare invocation
            Cli::command().print_help()?;
            println!();
            Ok(ExitCode::Success)
        }
        Some(Command::Report(args)) => {
            cmd_report::run(&cli, args)?;
            Ok(ExitCode::Success)
        }
        Some(Command::Tests(args)) => {
            cmd_report::run_tests(&cli, args)?;
            Ok(ExitCode::Success)
        }
        Some(Command::Serve(args)) => {
            cmd_serve::run(&cli, args)?;
            Ok(ExitCode::Success)
        }
    }
}
