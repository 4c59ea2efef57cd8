//! CLI command handlers.
//!
//! These give scriptable access to the launcher's catalog and runner without
//! the interactive menu.

pub mod common;
pub mod doctor;
pub mod list;
pub mod run;

// Re-export types used by main.rs and tests
pub use common::{CliContext, CliError, CliResult, ExitCode};
pub use doctor::DoctorArgs;
pub use list::ListArgs;
pub use run::RunArgs;
