//! Dependency checking and environment validation.
//!
//! This module checks that the run tool is installed and that the chapters
//! root can be browsed, and formats the results for the terminal or as JSON.

pub mod checker;
pub mod formatter;

pub use checker::{DependencyChecker, DependencyStatus, ToolStatus};
pub use formatter::{DoctorFormatter, OutputFormat};
