//! Output formatting for dependency check results.
//!
//! Results are rendered either as a human-readable report with ✓/✗/⚠ markers
//! and installation hints, or as JSON for scripts.

use crate::doctor::checker::{CHAPTERS, RUN_TOOL};
use crate::doctor::{DependencyStatus, ToolStatus};
use crate::runner::RunCommand;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Output format for doctor results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable terminal output
    Terminal,
    /// Machine-readable JSON output
    Json,
}

/// Platform used to pick installation instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// macOS
    MacOs,
    /// Linux
    Linux,
    /// Windows
    Windows,
    /// Unknown platform
    Unknown,
}

impl Platform {
    /// Detects the current platform from OS configuration.
    #[must_use]
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Unknown
        }
    }

    /// Returns the platform name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MacOs => "macOS",
            Self::Linux => "Linux",
            Self::Windows => "Windows",
            Self::Unknown => "Unknown",
        }
    }
}

/// JSON output structure for doctor results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Overall status ("ready", "missing_dependencies" or "warnings")
    pub status: String,
    /// Number of successful checks
    pub passed: usize,
    /// Number of failed checks
    pub failed: usize,
    /// Number of inconclusive checks
    pub unknown: usize,
    /// Individual results
    pub dependencies: Vec<JsonDependency>,
    /// Platform information
    pub platform: String,
}

/// JSON representation of a single check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonDependency {
    /// Dependency name
    pub name: String,
    /// Status (available, missing, unknown)
    pub status: String,
    /// Version string if detected
    pub version: Option<String>,
    /// Status message
    pub message: String,
    /// Installation hint if missing
    pub installation_hint: Option<String>,
}

/// Formatter for dependency check results.
pub struct DoctorFormatter {
    format: OutputFormat,
    platform: Platform,
    program: String,
}

impl DoctorFormatter {
    /// Creates a new formatter with terminal output and auto-detected platform.
    #[must_use]
    pub fn new() -> Self {
        Self::with_format(OutputFormat::Terminal)
    }

    /// Creates a new formatter with specified output format.
    #[must_use]
    pub fn with_format(format: OutputFormat) -> Self {
        Self {
            format,
            platform: Platform::detect(),
            program: RunCommand::default().program,
        }
    }

    /// Creates a new formatter with specified platform (for testing).
    #[must_use]
    pub fn with_platform(platform: Platform) -> Self {
        Self {
            format: OutputFormat::Terminal,
            platform,
            program: RunCommand::default().program,
        }
    }

    /// Sets the run tool the installation hint refers to.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Formats check results in the configured format.
    pub fn format_results(&self, statuses: &[DependencyStatus]) -> String {
        match self.format {
            OutputFormat::Terminal => self.format_terminal(statuses),
            OutputFormat::Json => self.format_json(statuses),
        }
    }

    fn counts(statuses: &[DependencyStatus]) -> (usize, usize, usize) {
        let count = |wanted: ToolStatus| statuses.iter().filter(|s| s.status == wanted).count();
        (
            count(ToolStatus::Available),
            count(ToolStatus::Missing),
            count(ToolStatus::Unknown),
        )
    }

    fn format_terminal(&self, statuses: &[DependencyStatus]) -> String {
        let mut output = String::new();

        output.push_str("Codebook Environment Status\n");
        output.push_str("═══════════════════════════\n\n");

        let (passed, failed, unknown) = Self::counts(statuses);

        for status in statuses {
            let (symbol, status_text) = match status.status {
                ToolStatus::Available => ("✓", "OK"),
                ToolStatus::Missing => ("✗", "MISSING"),
                ToolStatus::Unknown => ("⚠", "UNKNOWN"),
            };

            // ✓ Run Tool ............ OK (v8.0.100)
            let name_width: usize = 20;
            let dots = ".".repeat(name_width.saturating_sub(status.name.len()));
            write!(output, "{} {}{} {}", symbol, status.name, dots, status_text)
                .expect("Writing to String should not fail");
            if let Some(version) = &status.version {
                write!(output, " (v{})", version).expect("Writing to String should not fail");
            }
            output.push('\n');

            for line in status.message.lines() {
                writeln!(output, "    {}", line).expect("Writing to String should not fail");
            }

            if status.status == ToolStatus::Missing {
                if let Some(hint) = self.installation_hint(&status.name) {
                    writeln!(output, "    Fix: {}", hint)
                        .expect("Writing to String should not fail");
                }
            }
            output.push('\n');
        }

        output.push_str("───────────────────────────\n");
        write!(output, "Summary: {} passed", passed).expect("Writing to String should not fail");
        if failed > 0 {
            write!(output, ", {} failed", failed).expect("Writing to String should not fail");
        }
        if unknown > 0 {
            write!(output, ", {} unknown", unknown).expect("Writing to String should not fail");
        }
        output.push('\n');

        if failed == 0 && unknown == 0 {
            output.push_str("\n✓ Ready to run chapters.\n");
        } else if failed > 0 {
            output.push_str("\n✗ Some requirements are missing.\n");
        } else {
            output.push_str("\n⚠ Some checks could not be completed.\n");
        }

        output
    }

    fn format_json(&self, statuses: &[DependencyStatus]) -> String {
        let (passed, failed, unknown) = Self::counts(statuses);

        let overall_status = if failed == 0 && unknown == 0 {
            "ready"
        } else if failed > 0 {
            "missing_dependencies"
        } else {
            "warnings"
        };

        let dependencies = statuses
            .iter()
            .map(|s| JsonDependency {
                name: s.name.clone(),
                status: match s.status {
                    ToolStatus::Available => "available",
                    ToolStatus::Missing => "missing",
                    ToolStatus::Unknown => "unknown",
                }
                .to_string(),
                version: s.version.clone(),
                message: s.message.clone(),
                installation_hint: if s.status == ToolStatus::Missing {
                    self.installation_hint(&s.name)
                } else {
                    None
                },
            })
            .collect();

        let json_output = JsonOutput {
            status: overall_status.to_string(),
            passed,
            failed,
            unknown,
            dependencies,
            platform: self.platform.name().to_string(),
        };

        serde_json::to_string_pretty(&json_output).unwrap_or_else(|_| {
            r#"{"status":"error","message":"Failed to serialize JSON output"}"#.to_string()
        })
    }

    fn installation_hint(&self, name: &str) -> Option<String> {
        match name {
            RUN_TOOL if self.program == "dotnet" => Some(self.dotnet_install_instructions()),
            RUN_TOOL => Some(format!(
                "Install '{}' and add it to your PATH, or change runner.program in config.toml",
                self.program
            )),
            CHAPTERS => Some(
                "Pass --chapters <PATH> or set paths.chapters in config.toml".to_string(),
            ),
            _ => None,
        }
    }

    fn dotnet_install_instructions(&self) -> String {
        match self.platform {
            Platform::MacOs => "brew install --cask dotnet-sdk".to_string(),
            Platform::Linux => "sudo apt-get install dotnet-sdk-8.0  (Debian/Ubuntu)".to_string(),
            Platform::Windows => "winget install Microsoft.DotNet.SDK.8".to_string(),
            Platform::Unknown => "Install the .NET SDK from https://dot.net".to_string(),
        }
    }
}

impl Default for DoctorFormatter {
    fn default() -> Self {
        Self::new()
    }
}
