//! Error types for the launcher.
//!
//! Listing failures and process launch failures are recoverable: the
//! navigation loop catches them and reports them to the user. Terminal
//! failures are not, since nothing can be drawn or read without a console.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for launcher operations.
pub type LauncherResult<T> = Result<T, LauncherError>;

/// Failure while enumerating a directory.
#[derive(Debug, Error)]
pub enum FilesystemError {
    /// The directory does not exist
    #[error("Directory does not exist: {}", path.display())]
    NotFound {
        /// Path that was requested
        path: PathBuf,
    },

    /// The path exists but is not a directory
    #[error("Path is not a directory: {}", path.display())]
    NotADirectory {
        /// Path that was requested
        path: PathBuf,
    },

    /// Any other I/O failure while reading the directory
    #[error("Failed to read directory {}: {source}", path.display())]
    Io {
        /// Directory being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

/// Failure while launching or relaying a chapter process.
#[derive(Debug, Error)]
pub enum ProcessLaunchError {
    /// The run tool could not be found on PATH
    #[error("Run tool '{program}' was not found. Is it installed and on your PATH?")]
    ToolNotFound {
        /// Program that was invoked
        program: String,
    },

    /// The chapter path is missing or not a directory
    #[error("Chapter path is not a directory: {}", path.display())]
    InvalidPath {
        /// Chapter path
        path: PathBuf,
    },

    /// Spawning failed for another reason
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        /// Program that was invoked
        program: String,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Reading the child's output or writing it to the console failed
    #[error("Failed to relay output of '{program}': {source}")]
    Relay {
        /// Program that was invoked
        program: String,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

/// Umbrella error for the navigation loop.
#[derive(Debug, Error)]
pub enum LauncherError {
    /// Directory listing failed
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),

    /// Chapter launch failed
    #[error(transparent)]
    ProcessLaunch(#[from] ProcessLaunchError),

    /// The console could not be drawn to or read from
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),

    /// A menu was asked to display no options
    #[error("Menu '{prompt}' has no options")]
    EmptyMenu {
        /// Prompt of the offending menu
        prompt: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filesystem_error_messages() {
        let err = FilesystemError::NotFound {
            path: PathBuf::from("/missing/chapters"),
        };
        assert_eq!(err.to_string(), "Directory does not exist: /missing/chapters");

        let err = FilesystemError::NotADirectory {
            path: PathBuf::from("notes.txt"),
        };
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_launcher_error_is_transparent() {
        let err: LauncherError = ProcessLaunchError::ToolNotFound {
            program: "dotnet".to_string(),
        }
        .into();
        assert!(err.to_string().starts_with("Run tool 'dotnet' was not found"));
        assert!(matches!(err, LauncherError::ProcessLaunch(_)));
    }
}
