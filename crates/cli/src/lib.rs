pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod health;
pub mod ingest;
pub mod item;
pub mod model;
pub mod report;
pub mod serve;
pub mod summary;

pub use cli::{Cli, Command, OutputFormat, ReportArgs, ServeArgs, TestsArgs};
pub use error::{Error, ExitCode, Result};
pub use health::{ClusterHealth, HealthError, HealthRecord, health_rate};
pub use ingest::{ArtifactSet, IngestError, load_report};
pub use item::{Container, Leaf, ResultItem, Status};
pub use model::{ReportHandle, ReportModel, RunEntry};
pub use summary::{RunSummary, StatusSummary, SummaryError, summarize};

#[cfg(test)]
pub mod test_utils;
