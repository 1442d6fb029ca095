//! Input handling abstractions.
//!
//! Key events are translated into [`InputResult`] actions by small
//! mode-specific handlers, so the key map can be tested without a terminal
//! or an [`App`](crate::app::App).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::AppMode;
use crate::constants::reader::{PAGE_STEP, SCROLL_STEP};
use crate::services::Direction;

/// Result of processing an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    /// The input was ignored (not applicable to this handler).
    Ignored,
    /// The application should quit.
    Quit,
    /// The mode should change.
    ModeChange(AppMode),
    /// Open the help overlay.
    ShowHelp,
    /// Start typing a `:` command.
    StartCommand,
    /// Step one chapter.
    Navigate(Direction),
    /// Scroll the passage up by a number of lines.
    ScrollUp(u16),
    /// Scroll the passage down by a number of lines.
    ScrollDown(u16),
    /// Fetch the current passage again.
    Reload,
    /// Copy the current passage to the clipboard.
    CopyPassage,
    /// Move the book selection down.
    SelectNext,
    /// Move the book selection up.
    SelectPrevious,
    /// Open the selected book at chapter 1.
    OpenSelectedBook,
    /// Append a character to the book filter.
    FilterPush(char),
    /// Remove the last character of the book filter.
    FilterPop,
}

/// Context passed to input handlers.
#[derive(Debug, Clone, Copy)]
pub struct InputContext {
    /// Current application mode.
    pub mode: AppMode,
    /// Whether a passage request is in flight.
    pub is_loading: bool,
}

/// Trait for handling keyboard input.
pub trait InputHandler {
    /// Handle a key event.
    fn handle(&mut self, key: KeyEvent, ctx: &InputContext) -> InputResult;

    /// Get the name of this handler (for debugging).
    fn name(&self) -> &'static str;
}

/// Handler for global shortcuts (help, quit, command line).
#[derive(Debug, Default)]
pub struct GlobalHandler;

impl InputHandler for GlobalHandler {
    fn handle(&mut self, key: KeyEvent, ctx: &InputContext) -> InputResult {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return InputResult::Quit;
        }

        if key.code == KeyCode::F(1) {
            return InputResult::ShowHelp;
        }

        // In the book list printable keys feed the filter
        if ctx.mode == AppMode::BookList {
            return InputResult::Ignored;
        }

        match key.code {
            KeyCode::Char('?') => InputResult::ShowHelp,
            KeyCode::Char(':') => InputResult::StartCommand,
            _ => InputResult::Ignored,
        }
    }

    fn name(&self) -> &'static str {
        "GlobalHandler"
    }
}

/// Handler for the reading pane.
#[derive(Debug, Default)]
pub struct ReaderHandler;

impl InputHandler for ReaderHandler {
    fn handle(&mut self, key: KeyEvent, ctx: &InputContext) -> InputResult {
        match key.code {
            KeyCode::Char('n' | 'l') | KeyCode::Right => InputResult::Navigate(Direction::Next),
            KeyCode::Char('p' | 'h') | KeyCode::Left => InputResult::Navigate(Direction::Previous),
            KeyCode::Char('j') | KeyCode::Down => InputResult::ScrollDown(SCROLL_STEP),
            KeyCode::Char('k') | KeyCode::Up => InputResult::ScrollUp(SCROLL_STEP),
            KeyCode::PageDown | KeyCode::Char(' ') => InputResult::ScrollDown(PAGE_STEP),
            KeyCode::PageUp => InputResult::ScrollUp(PAGE_STEP),
            KeyCode::Char('b') | KeyCode::Tab => InputResult::ModeChange(AppMode::BookList),
            KeyCode::Char('y') => InputResult::CopyPassage,
            // A reload while loading would only supersede the same request
            KeyCode::Char('r') if !ctx.is_loading => InputResult::Reload,
            KeyCode::Char('q') => InputResult::Quit,
            _ => InputResult::Ignored,
        }
    }

    fn name(&self) -> &'static str {
        "ReaderHandler"
    }
}

/// Handler for the book picker.
#[derive(Debug, Default)]
pub struct BookListHandler;

impl InputHandler for BookListHandler {
    fn handle(&mut self, key: KeyEvent, _ctx: &InputContext) -> InputResult {
        match key.code {
            KeyCode::Esc | KeyCode::Tab => InputResult::ModeChange(AppMode::Reader),
            KeyCode::Down => InputResult::SelectNext,
            KeyCode::Up => InputResult::SelectPrevious,
            KeyCode::Enter => InputResult::OpenSelectedBook,
            KeyCode::Backspace => InputResult::FilterPop,
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                InputResult::FilterPush(c)
            }
            _ => InputResult::Ignored,
        }
    }

    fn name(&self) -> &'static str {
        "BookListHandler"
    }
}
