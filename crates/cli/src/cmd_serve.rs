// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Serve command implementation.

use std::sync::Arc;

use sonoview::cli::{Cli, ServeArgs};
use sonoview::ingest;
use sonoview::serve::{self, AppState};

use crate::cmd_report::resolve_artifacts;

/// Run the serve command.
pub fn run(cli: &Cli, args: &ServeArgs) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let (config, artifacts) = resolve_artifacts(cli, &args.artifacts, &cwd)?;

    // CLI flag overrides config
    let addr = args.addr.as_deref().unwrap_or(&config.serve.addr);
    let addr = serve::parse_addr(addr)?;

    // Fail before binding when the initial load is broken.
    let model = ingest::load_report(&artifacts).map_err(sonoview::Error::from)?;
    let state = Arc::new(AppState::new(model, artifacts));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(serve::serve(addr, state))
}
