//! Top-level navigation loop.
//!
//! The launcher moves between three screens: choosing a group, choosing a
//! chapter inside that group, and running the chosen chapter. Listing and
//! launch failures are reported on screen and never end the loop; only the
//! `Exit` entry of the group menu does.

use crate::catalog::{self, Entry};
use crate::constants::{APP_NAME, BACK_LABEL, EXIT_LABEL};
use crate::error::LauncherResult;
use crate::menu::{self, KeySource, MenuView};
use crate::runner::ChapterRunner;
use crate::theme::Theme;
use crossterm::style::{Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor, queue};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Prompt of the group menu.
pub const GROUP_PROMPT: &str = "Select a group:";

const NAVIGATION_HINT: &str = "Use Up/Down Arrow keys to navigate and Enter to select.";

/// Navigation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Choosing a group (or `Exit`)
    GroupSelection,
    /// Choosing a chapter of the given group (or `Back`)
    ChapterSelection(Entry),
    /// Running the given chapter
    Running(Entry),
    /// The user chose `Exit`
    Exit,
}

/// Interactive launcher over a chapters root.
pub struct Launcher<K, R, W> {
    root: PathBuf,
    keys: K,
    runner: R,
    out: W,
    theme: Theme,
    group_cursor: usize,
    notice: Option<String>,
}

impl<K, R, W> Launcher<K, R, W>
where
    K: KeySource,
    R: ChapterRunner,
    W: Write,
{
    /// Creates a launcher that starts on the group menu.
    pub fn new(root: impl Into<PathBuf>, keys: K, runner: R, out: W, theme: Theme) -> Self {
        Self {
            root: root.into(),
            keys,
            runner,
            out,
            theme,
            group_cursor: 0,
            notice: None,
        }
    }

    /// Runs until the user selects `Exit`.
    pub fn run(&mut self) -> LauncherResult<()> {
        info!(root = %self.root.display(), "launcher started");

        let mut screen = Screen::GroupSelection;
        while screen != Screen::Exit {
            screen = self.step(screen)?;
        }

        info!("launcher exited");
        Ok(())
    }

    /// Handles one screen and returns the next one.
    pub fn step(&mut self, screen: Screen) -> LauncherResult<Screen> {
        debug!(?screen, "entering screen");
        match screen {
            Screen::GroupSelection => self.select_group(),
            Screen::ChapterSelection(group) => self.select_chapter(&group),
            Screen::Running(chapter) => self.run_chapter(&chapter),
            Screen::Exit => Ok(Screen::Exit),
        }
    }

    fn select_group(&mut self) -> LauncherResult<Screen> {
        // Re-read on every visit so directory changes show up
        let (groups, notice) = match catalog::list_groups(&self.root) {
            Ok(groups) => (groups, self.notice.take()),
            Err(e) => {
                warn!(error = %e, "failed to list groups");
                self.notice = None;
                (Vec::new(), Some(e.to_string()))
            }
        };

        let mut labels: Vec<String> = groups.iter().map(|g| g.name.clone()).collect();
        labels.push(EXIT_LABEL.to_string());

        let welcome = format!("Welcome to the C# {APP_NAME}");
        let header = [welcome.as_str()];
        let view = MenuView {
            header: &header,
            hint: Some(NAVIGATION_HINT),
            notice: notice.as_deref(),
            prompt: GROUP_PROMPT,
            options: &labels,
        };

        let index = menu::select(
            &mut self.out,
            &mut self.keys,
            &view,
            self.group_cursor,
            &self.theme,
        )?;
        self.group_cursor = index;

        match groups.get(index) {
            Some(group) => Ok(Screen::ChapterSelection(group.clone())),
            None => {
                writeln!(self.out, "Goodbye!")?;
                self.out.flush()?;
                Ok(Screen::Exit)
            }
        }
    }

    fn select_chapter(&mut self, group: &Entry) -> LauncherResult<Screen> {
        let chapters = match catalog::list_chapters(group) {
            Ok(chapters) => chapters,
            Err(e) => {
                warn!(group = %group.name, error = %e, "failed to list chapters");
                self.notice = Some(format!("Could not open {}: {e}", group.name));
                return Ok(Screen::GroupSelection);
            }
        };

        let mut labels: Vec<String> = chapters.iter().map(|c| c.name.clone()).collect();
        labels.push(BACK_LABEL.to_string());

        let prompt = format!("Select a chapter from {}:", group.name);
        let view = MenuView::new(&prompt, &labels);

        let index = menu::select(&mut self.out, &mut self.keys, &view, 0, &self.theme)?;

        // The last entry is always "Back"
        match chapters.get(index) {
            Some(chapter) => Ok(Screen::Running(chapter.clone())),
            None => Ok(Screen::GroupSelection),
        }
    }

    fn run_chapter(&mut self, chapter: &Entry) -> LauncherResult<Screen> {
        queue!(
            self.out,
            Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            Print(format!("Running chapter: {}\n\n", chapter.name))
        )?;
        self.out.flush()?;

        match self.runner.run(chapter, &mut self.out) {
            Ok(outcome) => {
                let color = if outcome.success() {
                    self.theme.success
                } else {
                    self.theme.error
                };
                queue!(
                    self.out,
                    Print("\n"),
                    SetForegroundColor(color),
                    Print(format!("Chapter process has exited ({outcome}).")),
                    ResetColor,
                    Print("\n")
                )?;
            }
            Err(e) => {
                warn!(chapter = %chapter.name, error = %e, "chapter launch failed");
                queue!(
                    self.out,
                    SetForegroundColor(self.theme.error),
                    Print(format!("An error occurred: {e}")),
                    ResetColor,
                    Print("\n")
                )?;
            }
        }

        queue!(self.out, Print("Press any key to continue...\n"))?;
        self.out.flush()?;
        self.keys.next_key()?;

        Ok(Screen::GroupSelection)
    }

    /// Index last confirmed on the group menu.
    pub fn group_cursor(&self) -> usize {
        self.group_cursor
    }

    /// Everything written so far.
    pub fn output(&self) -> &W {
        &self.out
    }

    /// The chapter runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// The key source, e.g. to queue more scripted keys.
    pub fn keys_mut(&mut self) -> &mut K {
        &mut self.keys
    }
}
