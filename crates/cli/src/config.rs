// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles sonoview.toml parsing with version validation and unknown key warnings.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::ingest::ArtifactSet;

/// Config with flexible parsing that captures unknown keys.
#[derive(Deserialize)]
struct FlexibleConfig {
    version: Option<i64>,

    #[serde(default)]
    artifacts: Option<toml::Value>,

    #[serde(default)]
    serve: Option<toml::Value>,

    #[serde(flatten)]
    unknown: std::collections::BTreeMap<String, toml::Value>,
}

/// Full configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Where the dump artifacts live.
    #[serde(default)]
    pub artifacts: ArtifactsConfig,

    /// HTTP server settings.
    #[serde(default)]
    pub serve: ServeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            artifacts: ArtifactsConfig::default(),
            serve: ServeConfig::default(),
        }
    }
}

/// Artifact locations.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactsConfig {
    /// Directory artifacts are read (and served) from, relative to the config file.
    #[serde(default = "ArtifactsConfig::default_root")]
    pub root: PathBuf,

    /// Plugin result dumps, in display order.
    #[serde(default = "ArtifactsConfig::default_plugins")]
    pub plugins: Vec<PathBuf>,

    /// Cluster health dump.
    #[serde(default = "ArtifactsConfig::default_cluster")]
    pub cluster: PathBuf,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            root: Self::default_root(),
            plugins: Self::default_plugins(),
            cluster: Self::default_cluster(),
        }
    }
}

impl ArtifactsConfig {
    fn default_root() -> PathBuf {
        PathBuf::from(".")
    }

    fn default_plugins() -> Vec<PathBuf> {
        vec![
            PathBuf::from("results_dump_e2e.yaml"),
            PathBuf::from("results_dump_systemd_logs.yaml"),
        ]
    }

    fn default_cluster() -> PathBuf {
        PathBuf::from("results_dump_sonobuoy.yaml")
    }

    /// Resolve into an artifact set, with `root` taken relative to `base_dir`.
    pub fn artifact_set(&self, base_dir: &Path) -> ArtifactSet {
        ArtifactSet {
            root: resolve_dir(base_dir, &self.root),
            plugins: self.plugins.clone(),
            cluster: self.cluster.clone(),
        }
    }
}

/// Join `path` onto `base` unless it is absolute or `.`.
pub fn resolve_dir(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else if path == Path::new(".") {
        base.to_path_buf()
    } else {
        base.join(path)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServeConfig {
    /// Listen address (default: 127.0.0.1:8080).
    #[serde(default = "ServeConfig::default_addr")]
    pub addr: String,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            addr: Self::default_addr(),
        }
    }
}

impl ServeConfig {
    fn default_addr() -> String {
        "127.0.0.1:8080".to_string()
    }
}

/// Currently supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Known top-level keys in the config.
const KNOWN_KEYS: &[&str] = &["version", "artifacts", "serve"];

/// Known keys of the `[artifacts]` table.
const KNOWN_ARTIFACT_KEYS: &[&str] = &["root", "plugins", "cluster"];

/// Known keys of the `[serve]` table.
const KNOWN_SERVE_KEYS: &[&str] = &["addr"];

/// Load config, warning on unknown keys.
pub fn load_with_warnings(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| config_error(format!("failed to read config: {e}"), path))?;

    parse_with_warnings(&content, path)
}

fn config_error(message: impl Into<String>, path: &Path) -> Error {
    Error::Config(format!("{}: {}", path.display(), message.into()))
}

fn check_version(version: Option<i64>, path: &Path) -> Result<()> {
    let version = version.ok_or_else(|| config_error("missing required field: version", path))?;
    if version != SUPPORTED_VERSION {
        return Err(config_error(
            format!(
                "unsupported config version {} (supported: {})\n  Upgrade sonoview to use this config.",
                version, SUPPORTED_VERSION
            ),
            path,
        ));
    }
    Ok(())
}

/// Parse config, warning on unknown keys.
pub fn parse_with_warnings(content: &str, path: &Path) -> Result<Config> {
    let flexible: FlexibleConfig =
        toml::from_str(content).map_err(|e| config_error(e.to_string(), path))?;

    check_version(flexible.version, path)?;

    let mut unknown_keys = BTreeSet::new();
    for key in flexible.unknown.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            unknown_keys.insert(key.clone());
        }
    }
    collect_unknown_table_keys(
        &mut unknown_keys,
        "artifacts",
        flexible.artifacts.as_ref(),
        KNOWN_ARTIFACT_KEYS,
    );
    collect_unknown_table_keys(
        &mut unknown_keys,
        "serve",
        flexible.serve.as_ref(),
        KNOWN_SERVE_KEYS,
    );

    for key in &unknown_keys {
        warn_unknown_key(path, key);
    }

    // Unknown keys are ignored by the typed parse.
    toml::from_str(content).map_err(|e| config_error(e.to_string(), path))
}

fn collect_unknown_table_keys(
    unknown: &mut BTreeSet<String>,
    table_name: &str,
    table: Option<&toml::Value>,
    known: &[&str],
) {
    if let Some(toml::Value::Table(t)) = table {
        for key in t.keys() {
            if !known.contains(&key.as_str()) {
                unknown.insert(format!("{}.{}", table_name, key));
            }
        }
    }
}

fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "sonoview: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
