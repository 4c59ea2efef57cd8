//! Environment checks for running chapters.
//!
//! Two things have to be in place before the launcher is useful: the run
//! tool must be installed, and the chapters root must be a readable
//! directory tree.
//!
//! # Example
//!
//! ```rust
//! use codebook::doctor::{DependencyChecker, ToolStatus};
//! use codebook::runner::RunCommand;
//! use std::path::Path;
//!
//! let checker = DependencyChecker::new();
//! let statuses = checker.check_all(&RunCommand::default(), Path::new("../chapters"));
//!
//! for status in &statuses {
//!     if status.status != ToolStatus::Available {
//!         println!("{}: {}", status.name, status.message);
//!     }
//! }
//! ```

use crate::catalog::Catalog;
use crate::error::FilesystemError;
use crate::runner::RunCommand;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Name reported for the run tool check.
pub const RUN_TOOL: &str = "Run Tool";

/// Name reported for the chapters root check.
pub const CHAPTERS: &str = "Chapters";

/// Status of a single dependency check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolStatus {
    /// Dependency is present and working
    Available,
    /// Dependency is not found or not working
    Missing,
    /// Could not determine status
    Unknown,
}

/// Result of checking a single dependency.
#[derive(Debug, Clone)]
pub struct DependencyStatus {
    /// Name of the dependency
    pub name: String,
    /// Status of the dependency
    pub status: ToolStatus,
    /// Version string if detected (e.g., "8.0.100")
    pub version: Option<String>,
    /// Human-readable message about the status
    pub message: String,
}

impl DependencyStatus {
    /// Creates a new dependency status.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        status: ToolStatus,
        version: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            status,
            version,
            message: message.into(),
        }
    }

    /// Creates a status for an available dependency.
    #[must_use]
    pub fn available(
        name: impl Into<String>,
        version: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(name, ToolStatus::Available, version, message)
    }

    /// Creates a status for a missing dependency.
    #[must_use]
    pub fn missing(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, ToolStatus::Missing, None, message)
    }

    /// Creates a status for an unknown dependency state.
    #[must_use]
    pub fn unknown(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, ToolStatus::Unknown, None, message)
    }
}

/// Checker for the launcher's external dependencies.
#[derive(Debug, Default)]
pub struct DependencyChecker;

impl DependencyChecker {
    /// Creates a new dependency checker.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Checks the run tool and the chapters root.
    pub fn check_all(&self, command: &RunCommand, chapters_root: &Path) -> Vec<DependencyStatus> {
        vec![
            self.check_run_tool(&command.program),
            self.check_chapters(chapters_root),
        ]
    }

    /// Checks that the run tool starts.
    ///
    /// Runs `<program> --version` and looks for a version number in the output.
    pub fn check_run_tool(&self, program: &str) -> DependencyStatus {
        match Self::run_version_command(program) {
            Ok(output) => match Self::parse_version_simple(&output) {
                Some(version) => {
                    let message = format!("Found {program} version {version}");
                    DependencyStatus::available(RUN_TOOL, Some(version), message)
                }
                None => DependencyStatus::unknown(
                    RUN_TOOL,
                    format!(
                        "Found '{program}' but could not parse version: {}",
                        output.lines().next().unwrap_or("").trim()
                    ),
                ),
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                DependencyStatus::missing(RUN_TOOL, format!("'{program}' not found in PATH"))
            }
            Err(e) => {
                DependencyStatus::unknown(RUN_TOOL, format!("Error running '{program}': {e}"))
            }
        }
    }

    /// Checks that the chapters root can be listed.
    pub fn check_chapters(&self, root: &Path) -> DependencyStatus {
        match Catalog::scan(root) {
            Ok(catalog) if catalog.groups.is_empty() => DependencyStatus::unknown(
                CHAPTERS,
                format!("No groups found in {}", root.display()),
            ),
            Ok(catalog) => DependencyStatus::available(
                CHAPTERS,
                None,
                format!(
                    "{} groups, {} chapters in {}",
                    catalog.groups.len(),
                    catalog.chapter_count(),
                    root.display()
                ),
            ),
            Err(e @ (FilesystemError::NotFound { .. } | FilesystemError::NotADirectory { .. })) => {
                DependencyStatus::missing(CHAPTERS, e.to_string())
            }
            Err(e) => DependencyStatus::unknown(CHAPTERS, e.to_string()),
        }
    }

    /// Runs `<program> --version` and returns its output.
    ///
    /// Some tools print their version to stderr, so stderr is used when stdout is empty.
    fn run_version_command(program: &str) -> io::Result<String> {
        let output = Command::new(program)
            .arg("--version")
            .stdin(Stdio::null())
            .output()?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        Ok(if stdout.trim().is_empty() {
            stderr.into_owned()
        } else {
            stdout.into_owned()
        })
    }

    /// Finds the first word that looks like a dotted version number.
    ///
    /// Examples:
    /// - "8.0.100" -> Some("8.0.100")
    /// - "sh (GNU bash) 5.2.15" -> Some("5.2.15")
    fn parse_version_simple(output: &str) -> Option<String> {
        output
            .split_whitespace()
            .map(|word| word.trim_matches(|c: char| !c.is_ascii_digit() && c != '.'))
            .find(|word| {
                let parts: Vec<&str> = word.split('.').collect();
                parts.len() >= 2
                    && parts
                        .iter()
                        .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
            })
            .map(String::from)
    }
}
