//! Configuration management for the launcher.
//!
//! This module handles loading, validating, and saving launcher configuration
//! in TOML format with platform-specific directory resolution.

use crate::constants::{CONFIG_DIR_NAME, DEFAULT_CHAPTERS_DIR, PATH_PLACEHOLDER};
use crate::runner::RunCommand;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Chapters root directory (contains the group directories)
    #[serde(default)]
    pub chapters: Option<PathBuf>,
}

/// External run tool configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Program used to run a chapter
    pub program: String,
    /// Arguments passed to the program; `{path}` is replaced by the chapter path
    pub args: Vec<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        let command = RunCommand::default();
        Self {
            program: command.program,
            args: command.args,
        }
    }
}

impl RunnerConfig {
    /// Converts this configuration into a run command.
    pub fn to_command(&self) -> RunCommand {
        RunCommand::new(self.program.clone(), self.args.iter().cloned())
    }
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Theme mode preference (Auto, Dark, Light)
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

/// Launcher configuration.
///
/// # File Location
///
/// - Linux: `~/.config/Codebook/config.toml`
/// - macOS: `~/Library/Application Support/Codebook/config.toml`
/// - Windows: `%APPDATA%\Codebook\config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Chapter run tool
    #[serde(default)]
    pub runner: RunnerConfig,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from a specific file.
    ///
    /// A missing file yields the defaults.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to a specific file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - `runner.program` is not empty
    /// - `runner.args` mention `{path}` so the chapter is actually passed along
    pub fn validate(&self) -> Result<()> {
        if self.runner.program.trim().is_empty() {
            anyhow::bail!("runner.program must not be empty");
        }

        if !self
            .runner
            .args
            .iter()
            .any(|arg| arg.contains(PATH_PLACEHOLDER))
        {
            anyhow::bail!(
                "runner.args must contain '{}' so the chapter path is passed to {}",
                PATH_PLACEHOLDER,
                self.runner.program
            );
        }

        Ok(())
    }

    /// Resolves the chapters root.
    ///
    /// Order: explicit override, then `paths.chapters`, then `../chapters`
    /// relative to `cwd`.
    pub fn chapters_root(&self, override_path: Option<&Path>, cwd: &Path) -> PathBuf {
        override_path
            .map(Path::to_path_buf)
            .or_else(|| self.paths.chapters.clone())
            .unwrap_or_else(|| cwd.join(DEFAULT_CHAPTERS_DIR))
    }
}
