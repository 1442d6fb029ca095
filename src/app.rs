//! Reader application state.
//!
//! Passage loads run on tokio tasks and report back over an mpsc channel.
//! Each load carries a ticket; starting a new load aborts the previous task
//! and any update whose ticket is not the latest is dropped, so the most
//! recent navigation always wins.

use std::sync::Arc;

use arboard::Clipboard;
use crossterm::event::{KeyCode, KeyEvent};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use ratatui::widgets::ListState;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::bible::{normalize, parse_reference, render_superscript, Book, Catalogue, ChapterPosition};
use crate::config::Config;
use crate::constants::async_tasks::CHANNEL_BUFFER_SIZE;
use crate::constants::book_list::MIN_FUZZY_SCORE;
use crate::error::{Error, FetchError};
use crate::input::{BookListHandler, GlobalHandler, InputContext, InputHandler, InputResult, ReaderHandler};
use crate::provider::TextApiClient;
use crate::services::{advance, ChapterText, Direction, Navigator, Passage};

/// Messages sent from async tasks back to the UI loop.
#[derive(Debug)]
pub enum AppUpdate {
    /// A passage request finished.
    PassageLoaded {
        /// Ticket issued when the request started.
        ticket: u64,
        /// Fetched text or the provider's failure.
        result: Result<ChapterText, FetchError>,
    },
}

/// Which screen has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Reading pane.
    Reader,
    /// Book picker.
    BookList,
}

/// Terminal reader state.
pub struct App {
    /// Screen with focus.
    pub mode: AppMode,
    /// Books offered by the picker and used by the parser.
    pub catalogue: Catalogue,
    navigator: Option<Navigator>,
    /// Navigation cursor; moves as soon as a load is requested.
    pub position: Option<ChapterPosition>,
    /// Chapter of the passage currently on screen.
    pub shown_position: Option<ChapterPosition>,
    /// Passage currently on screen.
    pub passage: Option<ChapterText>,
    /// Vertical scroll offset of the passage pane.
    pub scroll: u16,
    /// Text typed into the book picker.
    pub book_filter: String,
    /// Selection within the filtered book list.
    pub book_list_state: ListState,
    /// Text typed after `:`.
    pub command_buffer: String,
    /// Whether the command line has focus.
    pub is_command_mode: bool,
    /// Whether a passage request is in flight.
    pub is_loading: bool,
    /// Blocking error overlay text.
    pub error_message: Option<String>,
    /// Non-blocking status line text.
    pub status_message: Option<String>,
    /// Whether the help overlay is shown.
    pub show_help: bool,
    should_quit: bool,
    /// Loaded configuration.
    pub config: Config,
    update_tx: mpsc::Sender<AppUpdate>,
    update_rx: mpsc::Receiver<AppUpdate>,
    ticket: u64,
    in_flight: Option<JoinHandle<()>>,
    last_request: Option<Passage>,
    shown_request: Option<Passage>,
}

impl App {
    /// Build the reader from the environment.
    ///
    /// Invalid settings fall back to defaults and a broken catalogue override
    /// falls back to the built-in catalogue; either problem is reported in the
    /// error overlay.
    pub fn new() -> Self {
        let (config, config_error) = match Config::load() {
            Ok(config) => (config, None),
            Err(e) => {
                tracing::warn!("Using default configuration: {e}");
                (Config::default(), Some(e.user_message()))
            }
        };

        let (catalogue, catalogue_error) = match Catalogue::load(&config) {
            Ok(catalogue) => (catalogue, None),
            Err(e) => (Catalogue::spanish(), Some(e.user_message())),
        };

        let navigator = config
            .has_text_provider()
            .then(|| Navigator::new(Arc::new(TextApiClient::new(&config))));

        let mut app = Self::with_parts(config, catalogue, navigator);
        app.error_message = config_error.or(catalogue_error);
        app
    }

    /// Build the reader from explicit parts.
    pub fn with_parts(config: Config, catalogue: Catalogue, navigator: Option<Navigator>) -> Self {
        let (update_tx, update_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        let mut book_list_state = ListState::default();
        book_list_state.select((!catalogue.is_empty()).then_some(0));

        Self {
            mode: AppMode::Reader,
            catalogue,
            navigator,
            position: None,
            shown_position: None,
            passage: None,
            scroll: 0,
            book_filter: String::new(),
            book_list_state,
            command_buffer: String::new(),
            is_command_mode: false,
            is_loading: false,
            error_message: None,
            status_message: None,
            show_help: false,
            should_quit: false,
            config,
            update_tx,
            update_rx,
            ticket: 0,
            in_flight: None,
            last_request: None,
            shown_request: None,
        }
    }

    /// Open the configured start reference.
    pub fn start(&mut self) {
        let start = self.config.start_reference.clone();
        self.go_to(&start);
    }

    /// Whether the main loop should exit.
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Request exit.
    pub fn quit(&mut self) {
        self.should_quit = true;
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }

    /// Parse free text and open it.
    pub fn go_to(&mut self, input: &str) {
        match parse_reference(input, &self.catalogue) {
            Ok(reference) => {
                self.position = Some(reference.position());
                self.request(Passage::Reference(reference));
            }
            Err(e) => self.error_message = Some(Error::from(e).user_message()),
        }
    }

    /// Step one chapter from the cursor.
    pub fn navigate(&mut self, direction: Direction) {
        let Some(position) = &self.position else {
            self.status_message = Some("Open a book first".to_string());
            return;
        };

        match advance(position, direction) {
            Ok(next) => {
                self.position = Some(next.clone());
                self.request(Passage::Chapter(next));
            }
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    /// Open a catalogue book at chapter 1.
    pub fn open_book(&mut self, book: &Book) {
        let position = ChapterPosition::start_of(book);
        self.position = Some(position.clone());
        self.mode = AppMode::Reader;
        self.request(Passage::Chapter(position));
    }

    /// Fetch the passage on screen again.
    ///
    /// When nothing has been shown yet, the last failed request is retried.
    pub fn reload(&mut self) {
        match self.shown_request.clone().or_else(|| self.last_request.clone()) {
            Some(passage) => {
                self.position = Some(passage.position());
                self.request(passage);
            }
            None => self.status_message = Some("Nothing to reload".to_string()),
        }
    }

    /// Start loading a passage, superseding any request in flight.
    fn request(&mut self, passage: Passage) {
        let Some(navigator) = self.navigator.clone() else {
            self.error_message = Some(Error::from(FetchError::not_configured()).user_message());
            self.position.clone_from(&self.shown_position);
            return;
        };

        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }

        self.ticket = self.ticket.wrapping_add(1);
        let ticket = self.ticket;
        self.is_loading = true;
        self.status_message = None;
        self.last_request = Some(passage.clone());

        let tx = self.update_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let result = navigator.load(passage).await;
            if tx.send(AppUpdate::PassageLoaded { ticket, result }).await.is_err() {
                tracing::debug!("Reader closed before request {ticket} finished");
            }
        }));
    }

    /// Apply a finished request, ignoring superseded ones.
    fn apply_update(&mut self, update: AppUpdate) {
        match update {
            AppUpdate::PassageLoaded { ticket, result } => {
                if ticket != self.ticket {
                    tracing::debug!("Discarding stale passage update {ticket} (current {})", self.ticket);
                    return;
                }

                self.is_loading = false;
                self.in_flight = None;
                match result {
                    Ok(text) => {
                        self.shown_position.clone_from(&self.position);
                        self.shown_request.clone_from(&self.last_request);
                        self.passage = Some(text);
                        self.scroll = 0;
                    }
                    Err(e) => {
                        // Keep the cursor on what the reader can actually see
                        self.position.clone_from(&self.shown_position);
                        self.error_message = Some(Error::from(e).user_message());
                    }
                }
            }
        }
    }

    /// Drain finished requests without blocking.
    pub fn handle_updates(&mut self) {
        while let Ok(update) = self.update_rx.try_recv() {
            self.apply_update(update);
        }
    }

    /// Wait for the next finished request and apply it.
    pub async fn wait_for_update(&mut self) {
        if let Some(update) = self.update_rx.recv().await {
            self.apply_update(update);
        }
    }

    /// Books matching the picker filter, best match first, with catalogue indices.
    pub fn filtered_books(&self) -> Vec<(usize, &Book)> {
        let books = self.catalogue.books().iter().enumerate();
        let query = normalize(&self.book_filter);
        if query.is_empty() {
            return books.collect();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<_> = books
            .filter_map(|(idx, book)| {
                let score = matcher.fuzzy_match(&normalize(&book.name), &query)?;
                (score >= MIN_FUZZY_SCORE).then_some((idx, book, score))
            })
            .collect();

        scored.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
        scored.into_iter().map(|(idx, book, _)| (idx, book)).collect()
    }

    fn reset_book_selection(&mut self) {
        let any = !self.filtered_books().is_empty();
        self.book_list_state.select(any.then_some(0));
    }

    fn move_book_selection(&mut self, forward: bool) {
        let len = self.filtered_books().len();
        if len == 0 {
            self.book_list_state.select(None);
            return;
        }
        let current = self.book_list_state.selected().unwrap_or(0);
        let next = if forward {
            (current + 1) % len
        } else {
            current.checked_sub(1).unwrap_or(len - 1)
        };
        self.book_list_state.select(Some(next));
    }

    fn open_selected_book(&mut self) {
        let selected = self
            .book_list_state
            .selected()
            .and_then(|i| self.filtered_books().get(i).map(|(_, book)| (*book).clone()));

        if let Some(book) = selected {
            self.book_filter.clear();
            self.reset_book_selection();
            self.open_book(&book);
        }
    }

    /// Copy the passage on screen to the system clipboard.
    fn copy_passage(&mut self) {
        let Some(passage) = &self.passage else {
            self.status_message = Some("Nothing to copy".to_string());
            return;
        };

        let text = format!("{}\n{}", passage.reference, render_superscript(&passage.segments));
        let reference = passage.reference.clone();
        match Clipboard::new().and_then(|mut cb| cb.set_text(text)) {
            Ok(()) => self.status_message = Some(format!("Copied {reference}")),
            Err(e) => {
                tracing::warn!("Clipboard unavailable: {e}");
                self.error_message = Some(format!("Could not copy: {e}"));
            }
        }
    }

    /// Run a `:` command line.
    pub fn execute_command(&mut self, command: &str) {
        let command = command.trim();
        match command {
            "" => {}
            "q" | "quit" => self.quit(),
            "reload" => self.reload(),
            "books" | "libros" => self.mode = AppMode::BookList,
            reference => self.go_to(reference),
        }
    }

    fn handle_command_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.is_command_mode = false;
                self.command_buffer.clear();
            }
            KeyCode::Enter => {
                self.is_command_mode = false;
                let command = std::mem::take(&mut self.command_buffer);
                self.execute_command(&command);
            }
            KeyCode::Backspace => {
                self.command_buffer.pop();
            }
            KeyCode::Char(c) => self.command_buffer.push(c),
            _ => {}
        }
    }

    /// Route a key press to overlays, the command line, or the focused screen.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        if self.error_message.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.error_message = None;
            }
            return;
        }

        self.status_message = None;

        if self.is_command_mode {
            self.handle_command_input(key);
            return;
        }

        let ctx = InputContext { mode: self.mode, is_loading: self.is_loading };
        let mut result = GlobalHandler.handle(key, &ctx);
        if result == InputResult::Ignored {
            result = match self.mode {
                AppMode::Reader => ReaderHandler.handle(key, &ctx),
                AppMode::BookList => BookListHandler.handle(key, &ctx),
            };
        }
        self.apply_input(result);
    }

    fn apply_input(&mut self, result: InputResult) {
        match result {
            InputResult::Ignored => {}
            InputResult::Quit => self.quit(),
            InputResult::ModeChange(mode) => self.mode = mode,
            InputResult::ShowHelp => self.show_help = true,
            InputResult::StartCommand => {
                self.is_command_mode = true;
                self.command_buffer.clear();
            }
            InputResult::Navigate(direction) => self.navigate(direction),
            InputResult::ScrollUp(n) => self.scroll = self.scroll.saturating_sub(n),
            InputResult::ScrollDown(n) => self.scroll = self.scroll.saturating_add(n),
            InputResult::Reload => self.reload(),
            InputResult::CopyPassage => self.copy_passage(),
            InputResult::SelectNext => self.move_book_selection(true),
            InputResult::SelectPrevious => self.move_book_selection(false),
            InputResult::OpenSelectedBook => self.open_selected_book(),
            InputResult::FilterPush(c) => {
                self.book_filter.push(c);
                self.reset_book_selection();
            }
            InputResult::FilterPop => {
                self.book_filter.pop();
                self.reset_book_selection();
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::bible::VerseSpan;
    use crate::services::TextProvider;
    use async_trait::async_trait;
    use crossterm::event::KeyModifiers;
    use std::time::Duration;

    /// Serves "[1] <book> <chapter>" after a per-chapter delay; chapters above 21 fail.
    struct Slow;

    #[async_trait]
    impl TextProvider for Slow {
        async fn fetch_chapter(&self, book: &str, chapter: u32) -> Result<String, FetchError> {
            let delay = if chapter == 1 { 200 } else { 5 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            if chapter > 21 {
                return Err(FetchError::with_status("chapter not found", 404));
            }
            Ok(format!("[1] {book} {chapter}"))
        }

        async fn fetch_verses(
            &self,
            book: &str,
            chapter: u32,
            verses: VerseSpan,
        ) -> Result<String, FetchError> {
            Ok(format!("[{}] {book} {chapter}", verses.start()))
        }

        fn name(&self) -> &'static str {
            "Slow"
        }
    }

    fn app() -> App {
        let navigator = Navigator::new(Arc::new(Slow));
        App::with_parts(Config::default(), Catalogue::spanish(), Some(navigator))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[tokio::test]
    async fn latest_request_wins() {
        let mut app = app();
        app.go_to("Juan 1"); // slow
        app.navigate(Direction::Next); // fast, supersedes
        app.wait_for_update().await;

        assert_eq!(app.passage.as_ref().unwrap().reference, "Juan 2");
        assert!(!app.is_loading);

        // The aborted first request never reports back
        tokio::time::sleep(Duration::from_millis(300)).await;
        app.handle_updates();
        assert_eq!(app.passage.as_ref().unwrap().reference, "Juan 2");
    }

    #[tokio::test]
    async fn stale_ticket_is_discarded() {
        let mut app = app();
        app.go_to("Juan 3");
        app.wait_for_update().await;

        app.apply_update(AppUpdate::PassageLoaded {
            ticket: 0,
            result: Ok(ChapterText::new("Juan 9", "[1] viejo")),
        });
        assert_eq!(app.passage.as_ref().unwrap().reference, "Juan 3");
    }

    #[tokio::test]
    async fn previous_at_first_chapter_reports_without_request() {
        let mut app = app();
        app.go_to("Genesis 1");
        app.wait_for_update().await;
        let ticket = app.ticket;

        app.navigate(Direction::Previous);
        assert_eq!(app.status_message.as_deref(), Some("at first chapter"));
        assert_eq!(app.ticket, ticket);
        assert_eq!(app.position, Some(ChapterPosition::new("Genesis", 1)));
    }

    #[tokio::test]
    async fn failed_fetch_restores_cursor() {
        let mut app = app();
        app.go_to("Juan 21");
        app.wait_for_update().await;

        app.navigate(Direction::Next);
        assert_eq!(app.position, Some(ChapterPosition::new("Juan", 22)));
        app.wait_for_update().await;

        assert!(app.error_message.as_deref().unwrap().starts_with("chapter not found"));
        assert_eq!(app.position, Some(ChapterPosition::new("Juan", 21)));
        assert_eq!(app.passage.as_ref().unwrap().reference, "Juan 21");
    }

    #[tokio::test]
    async fn reload_after_failure_refetches_shown_passage() {
        let mut app = app();
        app.go_to("Juan 21");
        app.wait_for_update().await;
        app.navigate(Direction::Next);
        app.wait_for_update().await;
        app.error_message = None;

        app.reload();
        assert_eq!(app.position, Some(ChapterPosition::new("Juan", 21)));
        app.wait_for_update().await;

        assert!(app.error_message.is_none());
        assert_eq!(app.passage.as_ref().unwrap().reference, "Juan 21");
        assert_eq!(app.position, Some(ChapterPosition::new("Juan", 21)));
    }

    #[tokio::test]
    async fn reload_retries_when_nothing_shown() {
        let mut app = app();
        app.go_to("Juan 22");
        app.wait_for_update().await;
        assert!(app.passage.is_none());
        app.error_message = None;

        app.reload();
        assert_eq!(app.position, Some(ChapterPosition::new("Juan", 22)));
        assert!(app.is_loading);
    }

    #[test]
    fn parse_error_shown_without_request() {
        let mut app = App::with_parts(Config::default(), Catalogue::spanish(), None);
        app.go_to("Xyzzy 3");
        assert_eq!(app.error_message.as_deref(), Some("book not found: xyzzy"));
        assert!(!app.is_loading);
        assert!(app.position.is_none());
    }

    #[test]
    fn missing_provider_is_reported() {
        let mut app = App::with_parts(Config::default(), Catalogue::spanish(), None);
        app.go_to("Juan 3");
        assert!(app.error_message.as_deref().unwrap().contains("not configured"));
        assert!(app.position.is_none());
    }

    #[test]
    fn book_filter_is_fuzzy_and_accent_blind() {
        let mut app = App::with_parts(Config::default(), Catalogue::spanish(), None);
        app.book_filter = "apoc".to_string();
        let names: Vec<&str> = app.filtered_books().iter().map(|(_, b)| b.name.as_str()).collect();
        assert_eq!(names.first(), Some(&"Apocalipsis"));

        app.book_filter = "Éxo".to_string();
        assert_eq!(app.filtered_books()[0].1.name, "Exodo");

        app.book_filter = "qqqq".to_string();
        assert!(app.filtered_books().is_empty());
    }

    #[test]
    fn book_selection_wraps() {
        let mut app = App::with_parts(Config::default(), Catalogue::spanish(), None);
        app.mode = AppMode::BookList;
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.book_list_state.selected(), Some(65));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.book_list_state.selected(), Some(0));
    }

    #[tokio::test]
    async fn picking_a_book_opens_chapter_one() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('b')));
        assert_eq!(app.mode, AppMode::BookList);

        for c in "rut".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.mode, AppMode::Reader);
        assert!(app.book_filter.is_empty());

        app.wait_for_update().await;
        assert_eq!(app.position, Some(ChapterPosition::new("Rut", 1)));
        assert_eq!(app.passage.as_ref().unwrap().reference, "Rut 1");
    }

    #[tokio::test]
    async fn command_line_opens_reference() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char(':')));
        for c in "1 juan 3:1-3".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
        assert!(!app.is_command_mode);

        app.wait_for_update().await;
        assert_eq!(app.passage.as_ref().unwrap().reference, "1 Juan 3:1-3");
        assert_eq!(app.position, Some(ChapterPosition::new("1 Juan", 3)));
    }

    #[test]
    fn quit_command() {
        let mut app = App::with_parts(Config::default(), Catalogue::spanish(), None);
        app.execute_command("q");
        assert!(app.should_quit());
    }

    #[test]
    fn error_overlay_swallows_keys_until_dismissed() {
        let mut app = App::with_parts(Config::default(), Catalogue::spanish(), None);
        app.error_message = Some("boom".to_string());
        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.should_quit());
        app.handle_key(key(KeyCode::Esc));
        assert!(app.error_message.is_none());
    }

    #[test]
    fn scroll_saturates() {
        let mut app = App::with_parts(Config::default(), Catalogue::spanish(), None);
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.scroll, 0);
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.scroll, 1);
    }
}
