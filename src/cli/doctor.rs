//! Doctor command for dependency checking.

use crate::cli::common::{CliContext, CliError, CliResult};
use crate::doctor::{DependencyChecker, DoctorFormatter, OutputFormat, ToolStatus};
use clap::Args;

/// Check that the run tool and the chapters root are usable
#[derive(Debug, Clone, Args)]
pub struct DoctorArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

impl DoctorArgs {
    /// Execute the doctor command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let checker = DependencyChecker::new();
        let command = ctx.config.runner.to_command();
        let statuses = checker.check_all(&command, &ctx.chapters_root);

        let format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Terminal
        };

        let formatter = DoctorFormatter::with_format(format).with_program(command.program);
        println!("{}", formatter.format_results(&statuses));

        if statuses.iter().any(|s| s.status == ToolStatus::Missing) {
            Err(CliError::validation("Some requirements are missing"))
        } else {
            Ok(())
        }
    }
}
