//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the labels shown by the launcher.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Codebook";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "codebook";

/// Directory name used below the platform config directory.
pub const CONFIG_DIR_NAME: &str = "Codebook";

/// Default chapters root, relative to the current working directory.
pub const DEFAULT_CHAPTERS_DIR: &str = "../chapters";

/// Placeholder in runner arguments that is replaced by the chapter path.
pub const PATH_PLACEHOLDER: &str = "{path}";

/// Sentinel appended to the group list.
pub const EXIT_LABEL: &str = "Exit";

/// Sentinel appended to every chapter list.
pub const BACK_LABEL: &str = "Back";

/// Log file written below the config directory.
pub const LOG_FILE_NAME: &str = "codebook.log";
