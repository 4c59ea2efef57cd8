//! Arrow-key driven menu.
//!
//! The menu is drawn as plain lines: an optional header, an optional muted
//! hint, an optional notice, the prompt, then one line per option. The
//! selected option is prefixed with `"> "` and drawn in the highlight colour.
//! Selection state is an explicit index passed in and returned, nothing is
//! kept between calls.

use crate::error::{LauncherError, LauncherResult};
use crate::theme::Theme;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::style::{Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{cursor, queue};
use std::collections::VecDeque;
use std::io::{self, Write};
use tracing::debug;

/// Key presses the menu reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    /// Move the highlight up
    Up,
    /// Move the highlight down
    Down,
    /// Confirm the highlighted option
    Enter,
    /// Any other key
    Other,
}

impl From<KeyEvent> for MenuKey {
    fn from(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => Self::Up,
            KeyCode::Down | KeyCode::Char('j') => Self::Down,
            KeyCode::Enter => Self::Enter,
            _ => Self::Other,
        }
    }
}

/// Source of key presses.
///
/// `next_key` blocks until a key is available.
pub trait KeySource {
    /// Blocks until the next key press.
    fn next_key(&mut self) -> io::Result<MenuKey>;
}

/// Restores cooked mode when dropped.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Reads keys from the real terminal.
///
/// Raw mode is only active while waiting for a key, so chapter output and
/// menu rendering happen in the normal cooked mode.
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_key(&mut self) -> io::Result<MenuKey> {
        let _raw = RawModeGuard::enable()?;
        loop {
            // Windows reports releases too
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(MenuKey::from(key));
                }
            }
        }
    }
}

/// Replays a fixed list of keys. Returns an error once exhausted.
#[derive(Debug, Default, Clone)]
pub struct ScriptedKeys {
    keys: VecDeque<MenuKey>,
}

impl ScriptedKeys {
    /// Creates a key source from a sequence of keys.
    pub fn new(keys: impl IntoIterator<Item = MenuKey>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Queues more keys after the ones not consumed yet.
    pub fn extend(&mut self, keys: impl IntoIterator<Item = MenuKey>) {
        self.keys.extend(keys);
    }

    /// Keys not consumed yet.
    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn next_key(&mut self) -> io::Result<MenuKey> {
        self.keys.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no more scripted keys")
        })
    }
}

/// Index one above `selected`, wrapping to the last option.
pub fn move_up(selected: usize, len: usize) -> usize {
    if selected == 0 {
        len.saturating_sub(1)
    } else {
        selected - 1
    }
}

/// Index one below `selected`, wrapping to the first option.
pub fn move_down(selected: usize, len: usize) -> usize {
    if selected + 1 >= len {
        0
    } else {
        selected + 1
    }
}

/// Everything needed to draw one menu frame.
#[derive(Debug, Clone, Copy)]
pub struct MenuView<'a> {
    /// Lines printed above everything else
    pub header: &'a [&'a str],
    /// Key help printed in the muted colour below the header
    pub hint: Option<&'a str>,
    /// Message printed in the error colour above the prompt
    pub notice: Option<&'a str>,
    /// Prompt line
    pub prompt: &'a str,
    /// Option labels
    pub options: &'a [String],
}

impl<'a> MenuView<'a> {
    /// A menu with only a prompt and options.
    pub fn new(prompt: &'a str, options: &'a [String]) -> Self {
        Self {
            header: &[],
            hint: None,
            notice: None,
            prompt,
            options,
        }
    }
}

/// Draws one frame of the menu.
pub fn render<W: Write>(
    out: &mut W,
    view: &MenuView<'_>,
    selected: usize,
    theme: &Theme,
) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;

    for line in view.header {
        queue!(out, Print(line), Print("\n"))?;
    }

    if let Some(hint) = view.hint {
        queue!(
            out,
            SetForegroundColor(theme.muted),
            Print(hint),
            ResetColor,
            Print("\n\n")
        )?;
    }

    if let Some(notice) = view.notice {
        queue!(
            out,
            SetForegroundColor(theme.error),
            Print(notice),
            ResetColor,
            Print("\n\n")
        )?;
    }

    queue!(out, Print(view.prompt), Print("\n"))?;

    for (i, option) in view.options.iter().enumerate() {
        if i == selected {
            queue!(
                out,
                SetForegroundColor(theme.highlight),
                Print(format!("> {option}")),
                ResetColor,
                Print("\n")
            )?;
        } else {
            queue!(out, Print(format!("  {option}")), Print("\n"))?;
        }
    }

    out.flush()
}

/// Displays the menu until the user confirms an option and returns its index.
///
/// `initial` is clamped to the last option.
pub fn select<W: Write, K: KeySource + ?Sized>(
    out: &mut W,
    keys: &mut K,
    view: &MenuView<'_>,
    initial: usize,
    theme: &Theme,
) -> LauncherResult<usize> {
    let len = view.options.len();
    if len == 0 {
        return Err(LauncherError::EmptyMenu {
            prompt: view.prompt.to_string(),
        });
    }

    let mut selected = initial.min(len - 1);
    loop {
        render(out, view, selected, theme)?;

        match keys.next_key()? {
            MenuKey::Up => selected = move_up(selected, len),
            MenuKey::Down => selected = move_down(selected, len),
            MenuKey::Enter => {
                debug!(prompt = view.prompt, selected, "menu option confirmed");
                return Ok(selected);
            }
            MenuKey::Other => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    fn frame(output: &[u8]) -> String {
        String::from_utf8_lossy(output).into_owned()
    }

    #[test]
    fn test_move_up_wraps_to_last() {
        assert_eq!(move_up(0, 3), 2);
        assert_eq!(move_up(2, 3), 1);
        assert_eq!(move_up(0, 1), 0);
    }

    #[test]
    fn test_move_down_wraps_to_first() {
        assert_eq!(move_down(2, 3), 0);
        assert_eq!(move_down(0, 3), 1);
        assert_eq!(move_down(0, 1), 0);
    }

    #[test]
    fn test_down_full_cycle_returns_to_start() {
        for len in 1..6 {
            let mut selected = 0;
            for _ in 0..len - 1 {
                selected = move_down(selected, len);
            }
            assert_eq!(selected, len - 1);
            assert_eq!(move_down(selected, len), 0);
        }
    }

    #[test]
    fn test_key_mapping() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(MenuKey::from(key(KeyCode::Up)), MenuKey::Up);
        assert_eq!(MenuKey::from(key(KeyCode::Char('k'))), MenuKey::Up);
        assert_eq!(MenuKey::from(key(KeyCode::Down)), MenuKey::Down);
        assert_eq!(MenuKey::from(key(KeyCode::Char('j'))), MenuKey::Down);
        assert_eq!(MenuKey::from(key(KeyCode::Enter)), MenuKey::Enter);
        assert_eq!(MenuKey::from(key(KeyCode::Esc)), MenuKey::Other);
    }

    #[test]
    fn test_render_marks_selected_option() {
        let options = labels(&["01_di", "02_middleware", "Back"]);
        let view = MenuView::new("Select a chapter:", &options);
        let mut out = Vec::new();

        render(&mut out, &view, 1, &Theme::dark()).unwrap();

        let text = frame(&out);
        assert!(text.contains("Select a chapter:\n"));
        assert!(text.contains("  01_di\n"));
        assert!(text.contains("> 02_middleware"));
        assert!(text.contains("  Back\n"));
        assert!(!text.contains("> 01_di"));
    }

    #[test]
    fn test_render_header_and_notice() {
        let options = labels(&["Exit"]);
        let view = MenuView {
            header: &["Welcome"],
            hint: Some("Use the arrow keys"),
            notice: Some("Directory does not exist"),
            prompt: "Select a group:",
            options: &options,
        };
        let mut out = Vec::new();

        render(&mut out, &view, 0, &Theme::dark()).unwrap();

        let text = frame(&out);
        let welcome = text.find("Welcome").unwrap();
        let hint = text.find("Use the arrow keys").unwrap();
        let notice = text.find("Directory does not exist").unwrap();
        let prompt = text.find("Select a group:").unwrap();
        assert!(welcome < hint && hint < notice && notice < prompt);
    }

    #[test]
    fn test_render_hint_in_muted_colour() {
        let theme = Theme::dark();
        let options = labels(&["Exit"]);
        let view = MenuView {
            header: &[],
            hint: Some("Use the arrow keys"),
            notice: None,
            prompt: "Select a group:",
            options: &options,
        };
        let mut out = Vec::new();
        render(&mut out, &view, 0, &theme).unwrap();

        let mut muted = Vec::new();
        queue!(muted, SetForegroundColor(theme.muted), Print("Use the arrow keys")).unwrap();
        assert!(frame(&out).contains(&frame(&muted)));
    }

    #[test]
    fn test_select_enter_returns_initial() {
        let options = labels(&["a", "b", "Exit"]);
        let mut keys = ScriptedKeys::new([MenuKey::Enter]);
        let mut out = Vec::new();

        let index = select(
            &mut out,
            &mut keys,
            &MenuView::new("Pick", &options),
            1,
            &Theme::dark(),
        )
        .unwrap();
        assert_eq!(index, 1);
    }

    #[test]
    fn test_select_up_from_zero_lands_on_last() {
        let options = labels(&["a", "b", "Exit"]);
        let mut keys = ScriptedKeys::new([MenuKey::Up, MenuKey::Enter]);
        let mut out = Vec::new();

        let index = select(
            &mut out,
            &mut keys,
            &MenuView::new("Pick", &options),
            0,
            &Theme::dark(),
        )
        .unwrap();
        assert_eq!(index, 2);
    }

    #[test]
    fn test_select_ignores_other_keys() {
        let options = labels(&["a", "b"]);
        let mut keys = ScriptedKeys::new([
            MenuKey::Other,
            MenuKey::Down,
            MenuKey::Other,
            MenuKey::Enter,
        ]);
        let mut out = Vec::new();

        let index = select(
            &mut out,
            &mut keys,
            &MenuView::new("Pick", &options),
            0,
            &Theme::dark(),
        )
        .unwrap();
        assert_eq!(index, 1);
        assert_eq!(keys.remaining(), 0);
    }

    #[test]
    fn test_select_clamps_initial_index() {
        let options = labels(&["a", "Exit"]);
        let mut keys = ScriptedKeys::new([MenuKey::Enter]);
        let mut out = Vec::new();

        let index = select(
            &mut out,
            &mut keys,
            &MenuView::new("Pick", &options),
            7,
            &Theme::dark(),
        )
        .unwrap();
        assert_eq!(index, 1);
    }

    #[test]
    fn test_select_empty_menu_is_rejected() {
        let options: Vec<String> = Vec::new();
        let mut keys = ScriptedKeys::new([MenuKey::Enter]);
        let mut out = Vec::new();

        let result = select(
            &mut out,
            &mut keys,
            &MenuView::new("Pick", &options),
            0,
            &Theme::dark(),
        );
        assert!(matches!(result, Err(LauncherError::EmptyMenu { .. })));
    }

    #[test]
    fn test_select_exhausted_keys_is_terminal_error() {
        let options = labels(&["a"]);
        let mut keys = ScriptedKeys::default();
        let mut out = Vec::new();

        let result = select(
            &mut out,
            &mut keys,
            &MenuView::new("Pick", &options),
            0,
            &Theme::dark(),
        );
        assert!(matches!(result, Err(LauncherError::Terminal(_))));
    }
}
