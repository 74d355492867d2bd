// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Config file discovery.
//!
//! Walks from the current directory up to the git root looking for sonoview.toml.

use std::path::{Path, PathBuf};

use crate::config::{self, Config};
use crate::error::{Error, Result};

/// Config file name.
pub const CONFIG_FILE: &str = "sonoview.toml";

/// Find sonoview.toml starting from `start_dir` and walking up to git root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        // Stop at git root
        if current.join(".git").exists() {
            return None;
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return None,
        }
    }
}

/// Resolve config path from CLI arg, env var, or discovery.
///
/// Priority:
/// 1. CLI flag `-C`/`--config` (handled by clap with env = "SONOVIEW_CONFIG")
/// 2. Discovery from current directory up to git root
/// 3. None (use defaults)
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) => {
            if path.exists() {
                Ok(Some(path.to_path_buf()))
            } else {
                Err(Error::Config(format!(
                    "config file not found: {}",
                    path.display()
                )))
            }
        }
        None => Ok(find_config(cwd)),
    }
}

/// Load the effective config along with the directory its relative paths
/// are based on (the config file's directory, or `cwd` without a config).
pub fn load_effective(explicit: Option<&Path>, cwd: &Path) -> Result<(Config, PathBuf)> {
    match resolve_config(explicit, cwd)? {
        Some(path) => {
            tracing::debug!(config = %path.display(), "using config");
            let config = config::load_with_warnings(&path)?;
            let base = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => config::resolve_dir(cwd, parent),
                _ => cwd.to_path_buf(),
            };
            Ok((config, base))
        }
        None => Ok((Config::default(), cwd.to_path_buf())),
    }
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
