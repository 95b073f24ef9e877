//! Main client UI renderer.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::client::state::{ClientApp, Focus, NETWORK_ERROR};

use super::{board, input};

/// Render the whole client screen.
pub fn render(frame: &mut Frame, app: &ClientApp) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let chunks = Layout::vertical([
        Constraint::Length(3), // Header + status
        Constraint::Min(8),    // Participants / results
        Constraint::Length(1), // Average
        Constraint::Length(3), // Name field
        Constraint::Length(3), // Cards
        Constraint::Length(1), // Notice
        Constraint::Length(1), // Controls
    ])
    .split(area);

    render_header(frame, chunks[0], app);
    board::render(frame, chunks[1], app.view());
    board::render_average(frame, chunks[2], app.view());
    input::render_name_field(frame, chunks[3], app);
    input::render_cards(frame, chunks[4], app);
    render_notice(frame, chunks[5], app.notice());
    render_controls(frame, chunks[6], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let status_color = if app.status() == NETWORK_ERROR {
        Color::Red
    } else {
        Color::Green
    };

    let header = Paragraph::new(format!(" {}", app.status()))
        .style(Style::default().fg(status_color).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" Scrum Vote · {} ", app.server))
                .title_style(Style::default().fg(Color::Cyan).bold()),
        );

    frame.render_widget(header, area);
}

fn render_notice(frame: &mut Frame, area: Rect, notice: Option<&str>) {
    let Some(notice) = notice else {
        return;
    };

    let widget = Paragraph::new(notice)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red).bold());
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let help = match app.focus {
        Focus::Name => "type your name  ·  Enter register  ·  Tab cards  ·  Esc quit",
        Focus::Cards => {
            "h/l or arrows to pick  ·  Enter/Space vote  ·  r reveal  ·  x reset  ·  Tab name  ·  q quit"
        }
    };

    let widget = Paragraph::new(help)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
