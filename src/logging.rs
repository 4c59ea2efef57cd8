//! Log file setup.
//!
//! The launcher owns the console, so logs go to `codebook.log` in the config
//! directory instead of stderr.

use crate::config::Config;
use crate::constants::LOG_FILE_NAME;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default log file location.
pub fn default_log_path() -> Option<PathBuf> {
    Config::config_dir().ok().map(|dir| dir.join(LOG_FILE_NAME))
}

fn open_log_file(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `info`, or `debug` when verbose.
/// Logging is silently disabled when the log file cannot be opened.
pub fn init(verbose: bool, path: Option<&Path>) {
    let Some(file) = path.and_then(open_log_file) else {
        return;
    };

    let filter = if verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_log_file_creates_parent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("logs").join(LOG_FILE_NAME);

        assert!(open_log_file(&path).is_some());
        assert!(path.exists());
    }

    #[test]
    fn test_default_log_path_file_name() {
        if let Some(path) = default_log_path() {
            assert_eq!(path.file_name().unwrap(), LOG_FILE_NAME);
        }
    }
}
