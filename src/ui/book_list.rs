//! Book picker: filter line above a list of books with chapter counts.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::constants::book_list::NAME_COLUMN_WIDTH;
use crate::ui::create_titled_block;

/// Draw the filter line and the filtered book list.
pub fn draw_book_list(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let filter = Paragraph::new(Line::from(vec![
        Span::styled(" / ", Style::default().fg(Color::Yellow)),
        Span::raw(app.book_filter.as_str()),
    ]))
    .block(create_titled_block("Filter", false));
    f.render_widget(filter, chunks[0]);

    let selected = app.book_list_state.selected();
    let items: Vec<ListItem> = app
        .filtered_books()
        .into_iter()
        .enumerate()
        .map(|(i, (_, book))| {
            let (prefix, text_style) = if Some(i) == selected {
                ("> ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                ("  ", Style::default().fg(Color::White))
            };

            let pad = NAME_COLUMN_WIDTH.saturating_sub(book.name.width());
            ListItem::new(Line::from(vec![
                Span::raw(prefix),
                Span::styled(format!("{}{}", book.name, " ".repeat(pad)), text_style),
                Span::styled(format!("{:>3} cap.", book.chapters), Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();

    let title = format!("Books ({})", items.len());
    let list = List::new(items)
        .block(create_titled_block(&title, true))
        .highlight_style(Style::default().bg(Color::Rgb(80, 80, 120)).add_modifier(Modifier::BOLD));

    f.render_stateful_widget(list, chunks[1], &mut app.book_list_state);
}
