//! Shared test fixtures for launcher and CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use codebook::config::{Config, RunnerConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a chapters tree from `(group, chapters)` pairs.
///
/// Each chapter directory gets a `Program.cs` so it looks like a real chapter.
pub fn create_chapters_tree(groups: &[(&str, &[&str])]) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    for (group, chapters) in groups {
        let group_path = temp_dir.path().join(group);
        fs::create_dir_all(&group_path).expect("Failed to create group dir");
        for chapter in *chapters {
            let chapter_path = group_path.join(chapter);
            fs::create_dir_all(&chapter_path).expect("Failed to create chapter dir");
            fs::write(chapter_path.join("Program.cs"), "// chapter\n")
                .expect("Failed to write chapter file");
        }
    }
    temp_dir
}

/// The two-group tree used across the navigation tests.
pub fn sample_chapters_tree() -> TempDir {
    create_chapters_tree(&[
        (
            "02_project_configuration",
            &["01_appsettings", "02_environments"],
        ),
        ("03_routing", &["01_basic_routes", "02_route_constraints"]),
    ])
}

/// Writes a config file whose runner is `program args...` and returns its path.
pub fn write_runner_config(dir: &Path, program: &str, args: &[&str]) -> PathBuf {
    let mut config = Config::new();
    config.runner = RunnerConfig {
        program: program.to_string(),
        args: args.iter().map(ToString::to_string).collect(),
    };

    let path = dir.join("config.toml");
    config.save_to(&path).expect("Failed to save config");
    path
}

/// Config that runs a chapter with `sh`, echoing its path and exiting with `code`.
#[cfg(unix)]
pub fn write_shell_config(dir: &Path, code: i32) -> PathBuf {
    let script = format!("echo \"ran $0\"; exit {code}");
    write_runner_config(dir, "sh", &["-c", &script, "{path}"])
}
