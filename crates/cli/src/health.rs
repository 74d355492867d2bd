// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Cluster health records and health rates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Health of one infrastructure dimension (nodes or pods).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthRecord {
    /// Units inspected.
    #[serde(rename = "total_nodes", default)]
    pub total: u32,
    /// Units found healthy.
    #[serde(rename = "healthy_nodes", default)]
    pub healthy: u32,
    /// Per-unit facts, for drill-down listings only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<HealthDetail>,
}

/// Health facts for a single node or pod.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDetail {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub healthy: bool,
    #[serde(default)]
    pub ready: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Error hits per category, then per source location.
pub type ErrorSummary = BTreeMap<String, BTreeMap<String, u64>>;

/// Cluster health as reported alongside a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterHealth {
    #[serde(default)]
    pub node_health: HealthRecord,
    #[serde(default)]
    pub pod_health: HealthRecord,
    #[serde(default)]
    pub api_version: String,
    #[serde(rename = "error_summary", default)]
    pub errors: ErrorSummary,
}

/// Errors computing a health rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HealthError {
    /// Nothing was inspected, so there is no rate.
    #[error("health record has no units")]
    Degenerate,

    #[error("health record reports {healthy} healthy out of {total}")]
    HealthyExceedsTotal { healthy: u32, total: u32 },
}

/// Percentage of healthy units, truncated toward zero.
///
/// A record with no units is [`HealthError::Degenerate`] everywhere it is
/// used; callers render it as "n/a".
pub fn health_rate(record: &HealthRecord) -> Result<u8, HealthError> {
    if record.total == 0 {
        return Err(HealthError::Degenerate);
    }
    if record.healthy > record.total {
        return Err(HealthError::HealthyExceedsTotal {
            healthy: record.healthy,
            total: record.total,
        });
    }
    let percent = u64::from(record.healthy) * 100 / u64::from(record.total);
    Ok(percent as u8)
}

/// Render a rate for display: `66%`, or `n/a` when undefined.
pub fn rate_label(rate: Result<u8, HealthError>) -> String {
    match rate {
        Ok(percent) => format!("{percent}%"),
        Err(_) => "n/a".to_string(),
    }
}

impl HealthRecord {
    pub fn rate(&self) -> Result<u8, HealthError> {
        health_rate(self)
    }

    /// Whether some inspected unit is unhealthy.
    pub fn is_degraded(&self) -> bool {
        self.healthy < self.total
    }

    /// Details of units reported unhealthy.
    pub fn unhealthy(&self) -> impl Iterator<Item = &HealthDetail> {
        self.details.iter().filter(|d| !d.healthy)
    }
}

#[cfg(test)]
#[path = "health_tests.rs"]
mod tests;
