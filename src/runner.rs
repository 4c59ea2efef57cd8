//! Chapter process launching.
//!
//! A chapter is run by spawning the configured run tool (by default
//! `dotnet run --project <path>`). The child's stdout is piped and relayed to
//! the launcher's output line by line; stdin and stderr stay attached to the
//! console so interactive chapters still work. The launcher blocks until the
//! child's output ends and the process exits.

use crate::catalog::Entry;
use crate::constants::PATH_PLACEHOLDER;
use crate::error::ProcessLaunchError;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use tracing::{info, warn};

/// Program and argument template used to run a chapter.
///
/// Every occurrence of `{path}` in the arguments is replaced by the chapter path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCommand {
    /// Executable name or path
    pub program: String,
    /// Argument template
    pub args: Vec<String>,
}

impl RunCommand {
    /// Creates a run command from a program and argument template.
    pub fn new(
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Arguments with the chapter path substituted.
    pub fn resolve_args(&self, chapter_path: &Path) -> Vec<String> {
        let path = chapter_path.display().to_string();
        self.args
            .iter()
            .map(|arg| arg.replace(PATH_PLACEHOLDER, &path))
            .collect()
    }

    /// Builds the `Command` for a chapter.
    fn command_for(&self, chapter_path: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.resolve_args(chapter_path))
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        cmd
    }
}

impl Default for RunCommand {
    fn default() -> Self {
        Self::new("dotnet", ["run", "--project", PATH_PLACEHOLDER])
    }
}

/// Result of a finished chapter run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// Exit code, or `None` if the process was terminated by a signal
    pub exit_code: Option<i32>,
}

impl RunOutcome {
    /// Whether the chapter exited with status 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

impl From<ExitStatus> for RunOutcome {
    fn from(status: ExitStatus) -> Self {
        Self {
            exit_code: status.code(),
        }
    }
}

impl std::fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.exit_code {
            Some(code) => write!(f, "exit code {code}"),
            None => write!(f, "terminated by signal"),
        }
    }
}

/// Runs a chapter, relaying its output to `out`.
pub trait ChapterRunner {
    /// Runs the chapter to completion.
    fn run(
        &mut self,
        chapter: &Entry,
        out: &mut dyn Write,
    ) -> Result<RunOutcome, ProcessLaunchError>;
}

/// Owns a running child. If the child has not been waited on when the guard
/// is dropped, it is killed and reaped.
struct ChildGuard {
    child: Option<Child>,
}

impl ChildGuard {
    fn new(child: Child) -> Self {
        Self { child: Some(child) }
    }

    fn child_mut(&mut self) -> Option<&mut Child> {
        self.child.as_mut()
    }

    fn wait(mut self) -> io::Result<ExitStatus> {
        match self.child.take() {
            Some(mut child) => child.wait(),
            None => Err(io::Error::other("child already reaped")),
        }
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            warn!(pid = child.id(), "killing chapter process after relay failure");
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// Runs chapters as child processes of the launcher.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    command: RunCommand,
}

impl ProcessRunner {
    /// Creates a runner for the given run command.
    pub fn new(command: RunCommand) -> Self {
        Self { command }
    }

    /// The run command used for every chapter.
    pub fn command(&self) -> &RunCommand {
        &self.command
    }

    fn spawn(&self, chapter_path: &Path) -> Result<Child, ProcessLaunchError> {
        if !chapter_path.is_dir() {
            return Err(ProcessLaunchError::InvalidPath {
                path: chapter_path.to_path_buf(),
            });
        }

        self.command_for(chapter_path)
            .spawn()
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => ProcessLaunchError::ToolNotFound {
                    program: self.command.program.clone(),
                },
                _ => ProcessLaunchError::Spawn {
                    program: self.command.program.clone(),
                    source,
                },
            })
    }

    fn command_for(&self, chapter_path: &Path) -> Command {
        self.command.command_for(chapter_path)
    }

    fn relay_err(&self, source: io::Error) -> ProcessLaunchError {
        ProcessLaunchError::Relay {
            program: self.command.program.clone(),
            source,
        }
    }
}

impl ChapterRunner for ProcessRunner {
    fn run(
        &mut self,
        chapter: &Entry,
        out: &mut dyn Write,
    ) -> Result<RunOutcome, ProcessLaunchError> {
        info!(
            chapter = %chapter.name,
            program = %self.command.program,
            "starting chapter process"
        );

        let mut guard = ChildGuard::new(self.spawn(&chapter.path)?);

        if let Some(stdout) = guard.child_mut().and_then(|child| child.stdout.take()) {
            relay_lines(stdout, out).map_err(|e| self.relay_err(e))?;
        }

        let status = guard.wait().map_err(|e| self.relay_err(e))?;
        let outcome = RunOutcome::from(status);
        info!(chapter = %chapter.name, %outcome, "chapter process exited");

        Ok(outcome)
    }
}

/// Copies `reader` to `out` one line at a time until end of stream.
///
/// Invalid UTF-8 is replaced rather than treated as an error.
pub fn relay_lines<R: io::Read>(reader: R, out: &mut dyn Write) -> io::Result<usize> {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut count = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        writeln!(out, "{line}")?;
        out.flush()?;
        count += 1;
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_command_is_dotnet_run() {
        let command = RunCommand::default();
        assert_eq!(command.program, "dotnet");
        assert_eq!(
            command.resolve_args(Path::new("/chapters/03_routing/01_minimal_api")),
            vec!["run", "--project", "/chapters/03_routing/01_minimal_api"]
        );
    }

    #[test]
    fn test_resolve_args_inside_argument() {
        let command = RunCommand::new("make", ["-C", "{path}", "DIR={path}/bin"]);
        assert_eq!(
            command.resolve_args(Path::new("/c/x")),
            vec!["-C", "/c/x", "DIR=/c/x/bin"]
        );
    }

    #[test]
    fn test_relay_lines_strips_line_endings() {
        let input: &[u8] = b"first\r\nsecond\nlast without newline";
        let mut out = Vec::new();

        let count = relay_lines(input, &mut out).unwrap();

        assert_eq!(count, 3);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "first\nsecond\nlast without newline\n"
        );
    }

    #[test]
    fn test_relay_lines_lossy_utf8() {
        let input: &[u8] = b"caf\xff\n";
        let mut out = Vec::new();

        relay_lines(input, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "caf\u{fffd}\n");
    }

    #[test]
    fn test_run_outcome_display() {
        assert_eq!(RunOutcome { exit_code: Some(0) }.to_string(), "exit code 0");
        assert_eq!(RunOutcome { exit_code: None }.to_string(), "terminated by signal");
        assert!(RunOutcome { exit_code: Some(0) }.success());
        assert!(!RunOutcome { exit_code: Some(2) }.success());
    }

    #[test]
    fn test_missing_tool_is_tool_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let chapter = Entry::from_path(temp_dir.path());
        let mut runner = ProcessRunner::new(RunCommand::new(
            "codebook-test-tool-that-does-not-exist",
            ["run", "{path}"],
        ));
        let mut out = Vec::new();

        let err = runner.run(&chapter, &mut out).unwrap_err();
        assert!(matches!(err, ProcessLaunchError::ToolNotFound { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_invalid_chapter_path() {
        let temp_dir = TempDir::new().unwrap();
        let chapter = Entry::from_path(temp_dir.path().join("gone"));
        let mut runner = ProcessRunner::default();
        let mut out = Vec::new();

        let err = runner.run(&chapter, &mut out).unwrap_err();
        match err {
            ProcessLaunchError::InvalidPath { path } => {
                assert_eq!(path, temp_dir.path().join("gone"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_run_relays_child_output() {
        let temp_dir = TempDir::new().unwrap();
        let chapter = Entry::from_path(temp_dir.path());
        let mut runner = ProcessRunner::new(RunCommand::new(
            "sh",
            ["-c", "echo running; echo \"$0\"", "{path}"],
        ));
        let mut out = Vec::new();

        let outcome = runner.run(&chapter, &mut out).unwrap();

        assert!(outcome.success());
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "running");
        assert_eq!(lines[1], temp_dir.path().display().to_string());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_reports_exit_code() {
        let temp_dir = TempDir::new().unwrap();
        let chapter = Entry::from_path(temp_dir.path());
        let mut runner = ProcessRunner::new(RunCommand::new("sh", ["-c", "exit 3"]));
        let mut out = Vec::new();

        let outcome = runner.run(&chapter, &mut out).unwrap();
        assert_eq!(outcome.exit_code, Some(3));
    }
}
