//! Name field and vote cards.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::client::state::{ClientApp, Focus};

fn border_color(focused: bool) -> Color {
    if focused { Color::Yellow } else { Color::DarkGray }
}

pub fn render_name_field(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let focused = app.focus == Focus::Name;
    let cursor = if focused { "_" } else { "" };

    let content = Line::from(vec![
        Span::styled("Prenom: ", Style::default().fg(Color::White)),
        Span::styled(app.name_input(), Style::default().fg(Color::Yellow)),
        Span::styled(cursor, Style::default().fg(Color::Yellow)),
    ]);

    let widget = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color(focused))),
    );
    frame.render_widget(widget, area);
}

/// One button per card, the selected one highlighted.
pub fn render_cards(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let focused = app.focus == Focus::Cards;

    let spans: Vec<Span> = app
        .cards()
        .iter()
        .enumerate()
        .flat_map(|(i, card)| {
            let style = if focused && i == app.selected_card() {
                Style::default().fg(Color::Black).bg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };
            [Span::styled(format!(" {} ", card), style), Span::raw("  ")]
        })
        .collect();

    let widget = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color(focused)))
                .title(" Votes ")
                .title_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(widget, area);
}
