//! Run command: launch one chapter without the menu.

use crate::catalog;
use crate::cli::common::{CliContext, CliError, CliResult};
use crate::runner::{ChapterRunner, ProcessRunner, RunOutcome};
use clap::Args;
use std::io;

/// Run a single chapter and exit with its exit code
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Group directory name (e.g. 03_routing)
    #[arg(value_name = "GROUP")]
    pub group: String,

    /// Chapter directory name inside the group
    #[arg(value_name = "CHAPTER")]
    pub chapter: String,
}

impl RunArgs {
    /// Execute the run command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<RunOutcome> {
        let chapter = catalog::find_chapter(&ctx.chapters_root, &self.group, &self.chapter)
            .map_err(|e| CliError::validation(format!("Unknown chapter: {e}")))?;

        let mut runner = ProcessRunner::new(ctx.config.runner.to_command());
        let mut stdout = io::stdout();

        runner
            .run(&chapter, &mut stdout)
            .map_err(|e| CliError::launch(e.to_string()))
    }
}
