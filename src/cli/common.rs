//! Shared types for CLI commands.

use crate::config::Config;
use std::fmt;
use std::path::PathBuf;

/// Process exit codes used by the CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Invalid input or a failed check
    Validation = 1,
    /// Filesystem or serialization failure
    Io = 2,
    /// Chapter process could not be started
    Launch = 3,
}

impl ExitCode {
    /// Numeric process exit code.
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code to terminate with
    pub code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Invalid input or a failed check.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::Validation,
            message: message.into(),
        }
    }

    /// Filesystem or serialization failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::Io,
            message: message.into(),
        }
    }

    /// Chapter process could not be started.
    pub fn launch(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::Launch,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct CliContext {
    /// Loaded configuration
    pub config: Config,
    /// Resolved chapters root
    pub chapters_root: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(CliError::validation("x").code.code(), 1);
        assert_eq!(CliError::io("x").code.code(), 2);
        assert_eq!(CliError::launch("x").code.code(), 3);
    }

    #[test]
    fn test_display_is_message() {
        assert_eq!(CliError::io("disk full").to_string(), "disk full");
    }
}
