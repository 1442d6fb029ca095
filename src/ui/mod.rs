//! User interface components.
//!
//! Provides TUI widgets and drawing functions for the reader's
//! terminal-based user interface using ratatui.

mod book_list;
mod reader;

pub use book_list::draw_book_list;
pub use reader::draw_reader;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, AppMode};

/// Render the full application UI to the terminal frame.
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3), // Command/status bar at bottom
        ])
        .split(f.size());

    match app.mode {
        AppMode::Reader => draw_reader(f, app, chunks[0]),
        AppMode::BookList => draw_book_list(f, app, chunks[0]),
    }

    draw_command_bar(f, app, chunks[1]);

    if app.is_loading {
        draw_loading_indicator(f);
    }

    if let Some(error) = &app.error_message {
        draw_error_message(f, error);
        return;
    }

    if app.show_help {
        draw_help_modal(f, app);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn draw_command_bar(f: &mut Frame, app: &App, area: Rect) {
    let title = if app.is_command_mode { "Command" } else { "Commands/Status" };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(title, Style::default().fg(Color::Yellow)));

    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1)
        .split(area)[0];

    if app.is_command_mode {
        let command = Paragraph::new(format!(" :{}", app.command_buffer))
            .style(Style::default().fg(Color::Yellow));
        f.render_widget(command, inner_area);
        let cursor = inner_area.left() + app.command_buffer.width() as u16 + 2;
        f.set_cursor(cursor.min(inner_area.right().saturating_sub(1)), inner_area.top());
        return;
    }

    let mut line = match app.mode {
        AppMode::Reader => create_help_text(&[
            ("n/p", "Chapter"),
            ("j/k", "Scroll"),
            ("b", "Books"),
            (":", "Go to"),
            ("y", "Copy"),
            ("q", "Quit"),
        ]),
        AppMode::BookList => create_help_text(&[
            ("Type", "Filter"),
            ("↑/↓", "Select"),
            ("Enter", "Open"),
            ("Esc", "Back"),
        ]),
    };

    if let Some(status) = &app.status_message {
        line.push(Span::styled(format!(" | {status}"), Style::default().fg(Color::Cyan)));
    } else if let Some(position) = &app.position {
        line.push(Span::styled(format!(" | {position}"), Style::default().fg(Color::Gray)));
    }

    let status_bar = Paragraph::new(Line::from(line)).style(Style::default().fg(Color::Gray));
    f.render_widget(status_bar, inner_area);
}

/// Build styled help text spans from key-description pairs for the command bar.
pub fn create_help_text<'a>(commands: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut text = vec![Span::raw(" ")];

    for (i, (key, description)) in commands.iter().enumerate() {
        text.push(Span::styled(*key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
        text.push(Span::raw(format!(": {description}")));

        if i + 1 < commands.len() {
            text.push(Span::raw(" | "));
        }
    }

    text
}

/// Create a bordered block with a title, highlighted when focused.
pub fn create_titled_block(title: &str, is_focused: bool) -> Block<'_> {
    let (title_style, border_style) = if is_focused {
        (
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Yellow),
        )
    } else {
        (Style::default(), Style::default())
    };

    Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_style(border_style)
}

fn centered(size: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: (size.width.saturating_sub(width)) / 2,
        y: (size.height.saturating_sub(height)) / 2,
        width: width.min(size.width),
        height: height.min(size.height),
    }
}

// Draw a loading indicator overlay
fn draw_loading_indicator(f: &mut Frame) {
    let area = centered(f.size(), 22, 3);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let text = Paragraph::new("Cargando...")
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(block);

    f.render_widget(Clear, area);
    f.render_widget(text, area);
}

// Draw an error message overlay
#[allow(clippy::cast_possible_truncation)]
fn draw_error_message(f: &mut Frame, message: &str) {
    let size = f.size();
    let width = 50.min(size.width.saturating_sub(4));
    let inner_width = usize::from(width.saturating_sub(2)).max(1);
    let msg_lines = message.width().div_ceil(inner_width).max(1);
    let height = (msg_lines as u16).saturating_add(4);
    let area = centered(size, width, height);

    let block = Block::default()
        .title(Span::styled("Error", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .style(Style::default().bg(Color::Black));

    let text = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)])
        .margin(1)
        .split(area);

    f.render_widget(text, inner_area[1]);

    let hint = Paragraph::new("Press Esc to dismiss")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(hint, inner_area[2]);
}

// Draw the help modal with keybindings
fn draw_help_modal(f: &mut Frame, app: &App) {
    let size = f.size();
    let area = centered(size, 60.min(size.width.saturating_sub(4)), 24.min(size.height.saturating_sub(4)));

    let block = Block::default()
        .title(Span::styled(" Help - Keybindings ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let help_text: Vec<Line> = build_help_content(app.mode)
        .into_iter()
        .map(|(key, desc, is_header)| {
            if is_header {
                Line::from(Span::styled(key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)))
            } else {
                Line::from(vec![
                    Span::styled(format!("{key:>14}"), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                    Span::raw("  "),
                    Span::styled(desc, Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(help_text).block(block).wrap(Wrap { trim: true }), area);
}

fn build_help_content(mode: AppMode) -> Vec<(&'static str, &'static str, bool)> {
    let mut lines = vec![
        ("── Global ──", "", true),
        ("F1 / ?", "Show this help", false),
        (":", "Enter command mode", false),
        (":Juan 3:16", "Go to a reference", false),
        (":books", "Open the book list", false),
        (":reload", "Reload the passage on screen", false),
        (":q / :quit", "Quit application", false),
        ("Ctrl+C", "Quit application", false),
        ("", "", false),
    ];

    match mode {
        AppMode::Reader => lines.extend([
            ("── Reader ──", "", true),
            ("n / l / →", "Next chapter", false),
            ("p / h / ←", "Previous chapter", false),
            ("j/k or ↑/↓", "Scroll", false),
            ("PgUp/PgDn", "Scroll a page", false),
            ("b / Tab", "Book list", false),
            ("y", "Copy passage", false),
            ("r", "Reload the passage on screen", false),
            ("q", "Quit", false),
        ]),
        AppMode::BookList => lines.extend([
            ("── Books ──", "", true),
            ("Type", "Filter books", false),
            ("Backspace", "Delete filter character", false),
            ("↑/↓", "Move selection", false),
            ("Enter", "Open chapter 1", false),
            ("Esc / Tab", "Back to reader", false),
        ]),
    }

    lines.push(("", "", false));
    lines.push(("Press Esc, F1 or ? to close", "", true));
    lines
}
