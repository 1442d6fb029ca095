//! Passage pane.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::bible::to_superscript;
use crate::ui::create_titled_block;

/// Draw the passage pane: one wrapped line per verse, numbered in superscript.
pub fn draw_reader(f: &mut Frame, app: &App, area: Rect) {
    let title = match (&app.passage, &app.position) {
        (Some(passage), _) => format!(" {} ({}) ", passage.reference, app.config.translation),
        (None, Some(position)) => format!(" {position} "),
        (None, None) => format!(" Lámpara v{} ", app.config.app_version()),
    };
    let block = create_titled_block(&title, true);

    let Some(passage) = &app.passage else {
        let placeholder = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Nothing loaded yet. Press : and type a reference, or b to pick a book.",
                Style::default().fg(Color::Gray),
            )),
        ])
        .block(block)
        .wrap(Wrap { trim: true });
        f.render_widget(placeholder, area);
        return;
    };

    let number_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let lines: Vec<Line> = passage
        .rows()
        .into_iter()
        .map(|row| match row.verse {
            Some(n) => Line::from(vec![
                Span::styled(to_superscript(n), number_style),
                Span::raw(row.text),
            ]),
            None => Line::from(row.text),
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));

    f.render_widget(paragraph, area);
}
