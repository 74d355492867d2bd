// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Status aggregation over result trees.
//!
//! Each subtree folds into a fresh [`StatusSummary`]; containers merge the
//! summaries of their children in order, so the failed list comes out in
//! pre-order. Only leaves are counted.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::item::{Leaf, ResultItem, Status};

/// Deepest container nesting accepted by [`summarize`].
pub const MAX_TREE_DEPTH: usize = 512;

/// Flat statistics for one result tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    /// Leaf count per observed status. Absent statuses are zero.
    pub counts: BTreeMap<Status, usize>,
    /// Names of failed and timed-out leaves, in traversal order.
    pub failed: Vec<String>,
    /// Number of leaves.
    pub total: usize,
}

impl StatusSummary {
    fn of_leaf(leaf: &Leaf) -> Self {
        let mut summary = Self::default();
        summary.counts.insert(leaf.status, 1);
        if leaf.status.is_failure() {
            summary.failed.push(leaf.name.clone());
        }
        summary.total = 1;
        summary
    }

    /// Count for a status (zero when never observed).
    pub fn count(&self, status: Status) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    /// Append another summary. `other`'s failures go after ours.
    pub fn merge(&mut self, other: StatusSummary) {
        for (status, n) in other.counts {
            *self.counts.entry(status).or_insert(0) += n;
        }
        self.failed.extend(other.failed);
        self.total += other.total;
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Errors from aggregating a single tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SummaryError {
    #[error("malformed result tree: `{container}` is nested deeper than {limit} levels")]
    MalformedTree { container: String, limit: usize },
}

/// Reduce a result tree to its status summary.
pub fn summarize(root: &ResultItem) -> Result<StatusSummary, SummaryError> {
    fold(root, 0)
}

fn fold(item: &ResultItem, depth: usize) -> Result<StatusSummary, SummaryError> {
    match item {
        ResultItem::Leaf(leaf) => Ok(StatusSummary::of_leaf(leaf)),
        ResultItem::Container(container) => {
            if depth >= MAX_TREE_DEPTH {
                return Err(SummaryError::MalformedTree {
                    container: container.name.clone(),
                    limit: MAX_TREE_DEPTH,
                });
            }
            container
                .children
                .iter()
                .try_fold(StatusSummary::default(), |mut acc, child| {
                    acc.merge(fold(child, depth + 1)?);
                    Ok(acc)
                })
        }
    }
}

/// Aggregated statistics for one ingested artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    source: String,
    root: ResultItem,
    summary: StatusSummary,
}

impl RunSummary {
    /// Identifier of the artifact this run came from. Opaque; passed through as given.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Plugin name (the root item's name).
    pub fn name(&self) -> &str {
        self.root.name()
    }

    pub fn root(&self) -> &ResultItem {
        &self.root
    }

    pub fn summary(&self) -> &StatusSummary {
        &self.summary
    }
}

/// Summarize a tree and pair it with its source identifier.
pub fn summarize_run(
    source: impl Into<String>,
    root: ResultItem,
) -> Result<RunSummary, SummaryError> {
    let summary = summarize(&root)?;
    Ok(RunSummary {
        source: source.into(),
        root,
        summary,
    })
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
