//! Test helpers for behavioral specifications.
//!
//! Provides high-level DSL for testing sonoview CLI behavior.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use std::marker::PhantomData;
use std::path::Path;
use std::process::Command;

/// Trait for converting into a string predicate.
/// Allows passing `&str` (as contains) or any `Predicate<str>`.
pub trait IntoStrPredicate<P: Predicate<str>> {
    fn into_predicate(self) -> P;
}

impl IntoStrPredicate<predicates::str::ContainsPredicate> for &str {
    fn into_predicate(self) -> predicates::str::ContainsPredicate {
        predicates::str::contains(self)
    }
}

impl<P: Predicate<str>> IntoStrPredicate<P> for P {
    fn into_predicate(self) -> P {
        self
    }
}

/// Returns a Command configured to run the sonoview binary
pub fn sonoview_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("sonoview"))
}

/// Create a report command builder
pub fn report() -> ReportBuilder<Text> {
    ReportBuilder::new("report", None)
}

/// Create a tests command builder for a plugin
pub fn tests(plugin: &str) -> ReportBuilder<Text> {
    ReportBuilder::new("tests", Some(plugin))
}

/// Typestate markers for output mode
pub struct Text;
pub struct Json;
pub struct Html;
pub struct Markdown;

// =============================================================================
// ReportBuilder
// =============================================================================

/// Rendering command builder for fluent test assertions
pub struct ReportBuilder<Mode = Text> {
    command: &'static str,
    dir: Option<std::path::PathBuf>,
    args: Vec<String>,
    _mode: PhantomData<Mode>,
}

#[allow(dead_code)]
impl ReportBuilder<Text> {
    fn new(command: &'static str, plugin: Option<&str>) -> Self {
        Self {
            command,
            dir: None,
            args: plugin.into_iter().map(str::to_string).collect(),
            _mode: PhantomData,
        }
    }

    pub fn json(self) -> ReportBuilder<Json> {
        self.with_mode()
    }

    pub fn html(self) -> ReportBuilder<Html> {
        self.with_mode()
    }

    pub fn markdown(self) -> ReportBuilder<Markdown> {
        self.with_mode()
    }
}

#[allow(dead_code)]
impl ReportBuilder<Json> {
    /// Run and parse stdout as JSON
    pub fn json_output(self) -> serde_json::Value {
        let output = run_passes(self.build());
        serde_json::from_slice(&output.output.stdout).expect("output should be valid JSON")
    }
}

#[allow(dead_code)]
impl<Mode: 'static> ReportBuilder<Mode> {
    fn with_mode<M>(self) -> ReportBuilder<M> {
        ReportBuilder {
            command: self.command,
            dir: self.dir,
            args: self.args,
            _mode: PhantomData,
        }
    }

    /// Set fixture directory by name
    pub fn on(mut self, fixture_name: &str) -> Self {
        self.dir = Some(fixture(fixture_name));
        self
    }

    /// Set working directory (alternative to fixture)
    pub fn pwd(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    /// Add CLI arguments
    pub fn args<const N: usize>(mut self, args: [&str; N]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    pub fn runs(self) -> RunAssert {
        run_passes(self.build())
    }

    pub fn exits(self, code: i32) -> RunAssert {
        run_exits(self.build(), code)
    }

    /// Build the command
    fn build(self) -> Command {
        let is_json = std::any::TypeId::of::<Mode>() == std::any::TypeId::of::<Json>();
        let is_html = std::any::TypeId::of::<Mode>() == std::any::TypeId::of::<Html>();
        let is_markdown = std::any::TypeId::of::<Mode>() == std::any::TypeId::of::<Markdown>();

        let mut cmd = sonoview_cmd();
        cmd.arg(self.command);

        if is_json {
            cmd.args(["-o", "json"]);
        } else if is_html {
            cmd.args(["-o", "html"]);
        } else if is_markdown {
            cmd.args(["-o", "markdown"]);
        }

        cmd.args(&self.args);

        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }

        cmd
    }
}

fn run_passes(mut cmd: Command) -> RunAssert {
    let output = cmd.output().expect("command should run");
    assert!(
        output.status.success(),
        "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    RunAssert { output }
}

fn run_exits(mut cmd: Command, code: i32) -> RunAssert {
    let output = cmd.output().expect("command should run");
    assert_eq!(
        output.status.code(),
        Some(code),
        "expected exit code {}, got {:?}\nstdout: {}\nstderr: {}",
        code,
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    RunAssert { output }
}

/// Result of a command run for chaining assertions
pub struct RunAssert {
    output: std::process::Output,
}

#[allow(dead_code)]
impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert stdout equals expected (with diff on failure)
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stdout matches predicate.
    /// Prefer `stdout_eq` for strict matching.
    ///
    /// ```ignore
    /// .stdout_has("failed tests")  // contains
    /// .stdout_has(predicates::str::is_match(r"^\w+: \d+ tests").unwrap())
    /// ```
    pub fn stdout_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            predicate.into_predicate().eval(&stdout),
            "stdout predicate failed:\n{}",
            stdout
        );
        self
    }

    /// Assert stdout does not match predicate.
    pub fn stdout_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            !predicate.into_predicate().eval(&stdout),
            "stdout should NOT match predicate:\n{}",
            stdout
        );
        self
    }

    /// Assert stderr matches predicate.
    pub fn stderr_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(
            predicate.into_predicate().eval(&stderr),
            "stderr predicate failed:\n{}",
            stderr
        );
        self
    }

    /// Assert stderr does not match predicate.
    pub fn stderr_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(
            !predicate.into_predicate().eval(&stderr),
            "stderr should NOT match predicate:\n{}",
            stderr
        );
        self
    }
}

/// Get path to a test fixture directory
pub fn fixture(name: &str) -> std::path::PathBuf {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR should be set");
    std::path::PathBuf::from(manifest_dir)
        .parent()
        .expect("parent should exist")
        .parent()
        .expect("grandparent should exist")
        .join("tests")
        .join("fixtures")
        .join(name)
}

// =============================================================================
// Project
// =============================================================================

/// Temporary directory holding artifacts and config.
///
/// ```ignore
/// let temp = Project::dump();
/// temp.file("results_dump_e2e.yaml", "name: e2e\nstatus: passed\n");
/// report().pwd(temp.path()).runs();
/// ```
pub struct Project {
    dir: tempfile::TempDir,
}

#[allow(dead_code)]
impl Project {
    /// Create an empty project with no files
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Create a project holding a copy of the `dump` fixture
    pub fn dump() -> Self {
        let temp = Self::empty();
        for entry in std::fs::read_dir(fixture("dump")).unwrap() {
            let entry = entry.unwrap();
            if entry.file_type().unwrap().is_file() {
                std::fs::copy(entry.path(), temp.path().join(entry.file_name())).unwrap();
            }
        }
        temp
    }

    /// Get the project path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write sonoview.toml (auto-prefixes with `version = 1` if not present)
    pub fn config(&self, content: &str) {
        let content = if content.contains("version") {
            content.to_string()
        } else {
            format!("version = 1\n{}", content)
        };
        self.file("sonoview.toml", &content);
    }

    /// Write a file, creating parent directories
    pub fn file(&self, path: &str, content: &str) {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, content).unwrap();
    }

    /// Remove a file
    pub fn remove(&self, path: &str) {
        std::fs::remove_file(self.dir.path().join(path)).unwrap();
    }
}
