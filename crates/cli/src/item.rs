// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Result tree types.
//!
//! A plugin dump is a tree of named items. Leaves are individual test
//! outcomes; containers group them into suites. Whether a node is a leaf or
//! a container is decided once, when the document is read, and is carried
//! by the [`ResultItem`] variant from then on.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of a single test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Passed,
    Failed,
    Skipped,
    Timeout,
    Unknown,
}

impl Status {
    /// Every status, in display order.
    pub const ALL: [Status; 5] = [
        Status::Passed,
        Status::Failed,
        Status::Skipped,
        Status::Timeout,
        Status::Unknown,
    ];

    /// Parse a status as written in a dump.
    ///
    /// Anything unrecognized (including an empty or missing status) is
    /// folded into [`Status::Unknown`].
    pub fn parse(s: &str) -> Self {
        match s {
            "passed" => Status::Passed,
            "failed" => Status::Failed,
            "skipped" => Status::Skipped,
            "timeout" => Status::Timeout,
            _ => Status::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Passed => "passed",
            Status::Failed => "failed",
            Status::Skipped => "skipped",
            Status::Timeout => "timeout",
            Status::Unknown => "unknown",
        }
    }

    /// Whether a leaf with this status belongs in the failed list.
    ///
    /// A plugin that did not report in time is treated as a failure.
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failed | Status::Timeout)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque string metadata attached to an item.
pub type Metadata = BTreeMap<String, String>;

/// Free-form details attached to an item (`failure`, `system-out`, ...).
pub type Details = BTreeMap<String, serde_json::Value>;

/// Detail key holding a failure message.
pub const DETAIL_FAILURE: &str = "failure";

/// Detail key holding captured output.
pub const DETAIL_SYSTEM_OUT: &str = "system-out";

/// A node of a result tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawItem", into = "RawItem")]
pub enum ResultItem {
    Leaf(Leaf),
    Container(Container),
}

/// A single test outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub name: String,
    pub status: Status,
    pub metadata: Metadata,
    pub details: Details,
}

/// A group of items (plugin, suite, ...).
///
/// `status` is what the producer reported for the group. It is shown to
/// readers but never counted.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    pub name: String,
    pub status: Status,
    pub metadata: Metadata,
    pub details: Details,
    pub children: Vec<ResultItem>,
}

impl Leaf {
    pub fn new(name: impl Into<String>, status: Status) -> Self {
        Self {
            name: name.into(),
            status,
            metadata: Metadata::new(),
            details: Details::new(),
        }
    }

    /// Attach a string detail.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details
            .insert(key.into(), serde_json::Value::String(value.into()));
        self
    }

    /// Get a detail rendered as text. Null values count as absent.
    pub fn detail(&self, key: &str) -> Option<String> {
        match self.details.get(key)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Failure message, if the producer recorded one.
    pub fn failure(&self) -> Option<String> {
        self.detail(DETAIL_FAILURE)
    }

    /// Captured output, if the producer recorded any.
    pub fn system_out(&self) -> Option<String> {
        self.detail(DETAIL_SYSTEM_OUT)
    }
}

impl Container {
    pub fn new(name: impl Into<String>, children: Vec<ResultItem>) -> Self {
        Self {
            name: name.into(),
            status: Status::Unknown,
            metadata: Metadata::new(),
            details: Details::new(),
            children,
        }
    }

    /// Set the reported status.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }
}

impl ResultItem {
    /// Create a leaf item.
    pub fn leaf(name: impl Into<String>, status: Status) -> Self {
        ResultItem::Leaf(Leaf::new(name, status))
    }

    /// Create a container item.
    pub fn container(name: impl Into<String>, children: Vec<ResultItem>) -> Self {
        ResultItem::Container(Container::new(name, children))
    }

    pub fn name(&self) -> &str {
        match self {
            ResultItem::Leaf(leaf) => &leaf.name,
            ResultItem::Container(container) => &container.name,
        }
    }

    /// The status as reported by the producer.
    pub fn status(&self) -> Status {
        match self {
            ResultItem::Leaf(leaf) => leaf.status,
            ResultItem::Container(container) => container.status,
        }
    }

    /// Child items; always empty for a leaf.
    pub fn children(&self) -> &[ResultItem] {
        match self {
            ResultItem::Leaf(_) => &[],
            ResultItem::Container(container) => &container.children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, ResultItem::Leaf(_))
    }

    /// Iterate leaves in pre-order, with the names of their enclosing containers.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            stack: vec![(self, 0)],
            path: Vec::new(),
        }
    }
}

/// A leaf together with the containers above it.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafRef<'a> {
    /// Container names from the root down to the leaf's parent.
    pub path: Vec<&'a str>,
    pub leaf: &'a Leaf,
}

impl LeafRef<'_> {
    /// Suite label for listings: the path below the root, joined with " / ".
    pub fn suite(&self) -> String {
        self.path
            .iter()
            .skip(1)
            .copied()
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

/// Pre-order leaf iterator, see [`ResultItem::leaves`].
pub struct Leaves<'a> {
    stack: Vec<(&'a ResultItem, usize)>,
    path: Vec<&'a str>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = LeafRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((item, depth)) = self.stack.pop() {
            self.path.truncate(depth);
            match item {
                ResultItem::Leaf(leaf) => {
                    return Some(LeafRef {
                        path: self.path.clone(),
                        leaf,
                    });
                }
                ResultItem::Container(container) => {
                    self.path.push(&container.name);
                    // Reverse so the first child is popped first.
                    for child in container.children.iter().rev() {
                        self.stack.push((child, depth + 1));
                    }
                }
            }
        }
        None
    }
}

/// Document shape of an item as written by the producer.
///
/// Every field is optional in practice; a node without an `items` key is a
/// leaf, a node with an `items` sequence (even an empty one) is a container.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawItem {
    #[serde(default)]
    name: String,
    #[serde(default)]
    status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    meta: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Details>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<Vec<RawItem>>,
}

impl From<RawItem> for ResultItem {
    fn from(raw: RawItem) -> Self {
        let status = Status::parse(&raw.status);
        let metadata = raw.meta.unwrap_or_default();
        let details = raw.details.unwrap_or_default();
        match raw.items {
            Some(items) => ResultItem::Container(Container {
                name: raw.name,
                status,
                metadata,
                details,
                children: items.into_iter().map(ResultItem::from).collect(),
            }),
            None => ResultItem::Leaf(Leaf {
                name: raw.name,
                status,
                metadata,
                details,
            }),
        }
    }
}

fn non_empty<K: Ord, V>(map: BTreeMap<K, V>) -> Option<BTreeMap<K, V>> {
    if map.is_empty() { None } else { Some(map) }
}

impl From<ResultItem> for RawItem {
    fn from(item: ResultItem) -> Self {
        match item {
            ResultItem::Leaf(leaf) => RawItem {
                name: leaf.name,
                status: leaf.status.as_str().to_string(),
                meta: non_empty(leaf.metadata),
                details: non_empty(leaf.details),
                items: None,
            },
            ResultItem::Container(container) => RawItem {
                name: container.name,
                status: container.status.as_str().to_string(),
                meta: non_empty(container.metadata),
                details: non_empty(container.details),
                items: Some(container.children.into_iter().map(RawItem::from).collect()),
            },
        }
    }
}

#[cfg(test)]
#[path = "item_tests.rs"]
mod tests;
