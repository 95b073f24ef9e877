//! Participants, results and average panes.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::client::render::{NO_PARTICIPANTS, ParticipantsView, ResultBar, ResultsView, SessionView};

const BAR_WIDTH: usize = 20;

/// Render participants and results side by side.
pub fn render(frame: &mut Frame, area: Rect, view: Option<&SessionView>) {
    let chunks =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).split(area);

    match view {
        Some(view) => {
            render_participants(frame, chunks[0], &view.participants);
            render_results(frame, chunks[1], &view.results);
        }
        None => {
            render_participants(frame, chunks[0], &ParticipantsView::Empty);
            render_results(frame, chunks[1], &ResultsView::Hidden);
        }
    }
}

pub fn render_average(frame: &mut Frame, area: Rect, view: Option<&SessionView>) {
    let average = view.map(|v| v.average.as_str()).unwrap_or("");
    let widget = Paragraph::new(average)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow).bold());
    frame.render_widget(widget, area);
}

fn pane(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title)
        .title_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1))
}

fn render_participants(frame: &mut Frame, area: Rect, participants: &ParticipantsView) {
    let lines: Vec<Line> = match participants {
        ParticipantsView::Empty => vec![Line::from(Span::styled(
            NO_PARTICIPANTS,
            Style::default().fg(Color::DarkGray),
        ))],
        ParticipantsView::List(list) => list
            .iter()
            .map(|participant| {
                let (symbol, color) = if participant.has_voted {
                    ("+", Color::Green)
                } else {
                    ("-", Color::Yellow)
                };
                Line::from(vec![
                    Span::styled(format!("{} ", symbol), Style::default().fg(color)),
                    Span::styled(participant.text(), Style::default().fg(Color::White)),
                ])
            })
            .collect(),
    };

    let widget = Paragraph::new(lines).block(pane(" Participants "));
    frame.render_widget(widget, area);
}

fn render_results(frame: &mut Frame, area: Rect, results: &ResultsView) {
    let block = pane(" Resultats ");

    let widget = match results {
        ResultsView::Distribution(bars) => {
            Paragraph::new(bars.iter().map(result_line).collect::<Vec<_>>()).block(block)
        }
        other => Paragraph::new(other.placeholder().unwrap_or(""))
            .wrap(Wrap { trim: true })
            .fg(Color::DarkGray)
            .block(block),
    };

    frame.render_widget(widget, area);
}

fn result_line(bar: &ResultBar) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>3} ", bar.vote), Style::default().fg(Color::Cyan).bold()),
        Span::styled(bar_text(bar.percent, BAR_WIDTH), Style::default().fg(Color::Green)),
        Span::styled(
            format!(" {:>4}  {}", bar.percent_text(), bar.count_text()),
            Style::default().fg(Color::White),
        ),
    ])
}

/// A bar of `width` cells, filled in proportion to `percent`.
fn bar_text(percent: u32, width: usize) -> String {
    let filled = (percent.min(100) as usize * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_text() {
        assert_eq!(bar_text(0, 10), "░░░░░░░░░░");
        assert_eq!(bar_text(100, 10), "██████████");
        assert_eq!(bar_text(30, 10), "███░░░░░░░");
        assert_eq!(bar_text(250, 4), "████");
        assert_eq!(bar_text(50, BAR_WIDTH).chars().count(), BAR_WIDTH);
    }
}
