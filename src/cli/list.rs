//! List command: print every group and its chapters.

use crate::catalog::Catalog;
use crate::cli::common::{CliContext, CliError, CliResult};
use clap::Args;
use std::fmt::Write;

/// List groups and chapters without starting the menu
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    /// Execute the list command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let catalog = Catalog::scan(&ctx.chapters_root)
            .map_err(|e| CliError::io(format!("Failed to list chapters: {e}")))?;

        let output = if self.json {
            serde_json::to_string_pretty(&catalog)
                .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
        } else {
            format_tree(&catalog)
        };

        println!("{}", output);
        Ok(())
    }
}

/// Renders the catalog as an indented tree.
pub fn format_tree(catalog: &Catalog) -> String {
    let mut output = String::new();

    for group in &catalog.groups {
        writeln!(output, "{}", group.name).expect("Writing to String should not fail");
        if group.chapters.is_empty() {
            output.push_str("  (no chapters)\n");
        }
        for chapter in &group.chapters {
            writeln!(output, "  {}", chapter.name).expect("Writing to String should not fail");
        }
    }

    write!(
        output,
        "\n{} groups, {} chapters",
        catalog.groups.len(),
        catalog.chapter_count()
    )
    .expect("Writing to String should not fail");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Entry, GroupListing};
    use std::path::PathBuf;

    #[test]
    fn test_format_tree() {
        let catalog = Catalog {
            root: PathBuf::from("/chapters"),
            groups: vec![
                GroupListing {
                    name: "01_di".to_string(),
                    path: PathBuf::from("/chapters/01_di"),
                    chapters: vec![Entry::from_path("/chapters/01_di/01_services")],
                },
                GroupListing {
                    name: "02_empty".to_string(),
                    path: PathBuf::from("/chapters/02_empty"),
                    chapters: vec![],
                },
            ],
        };

        assert_eq!(
            format_tree(&catalog),
            "01_di\n  01_services\n02_empty\n  (no chapters)\n\n2 groups, 1 chapters"
        );
    }
}
