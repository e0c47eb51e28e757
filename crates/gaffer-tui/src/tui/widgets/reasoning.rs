// Reasoning panel: the model's free-text explanation, wrapped and scrollable.
// Also draws the report tab placeholder before any report has arrived.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use gaffer_core::report::TacticalReport;

pub fn render(frame: &mut Frame, area: Rect, report: &TacticalReport, scroll: u16) {
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        " Reasoning ",
        Style::default().add_modifier(Modifier::BOLD),
    ));

    let text: Vec<Line> = if report.reasoning.trim().is_empty() {
        vec![Line::from(Span::styled(
            "No reasoning provided.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        report
            .reasoning
            .lines()
            .map(|l| Line::from(l.to_string()))
            .collect()
    };

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

pub fn render_empty(frame: &mut Frame, area: Rect, loading: bool) {
    let message = if loading {
        "Analysing... the report will open here when it arrives."
    } else {
        "No report yet. Fill in the match setup and squad, then press a."
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(
        message,
        Style::default().fg(Color::Gray),
    )))
    .block(Block::default().borders(Borders::ALL).title(" Report "))
    .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
