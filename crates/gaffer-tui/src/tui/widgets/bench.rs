// Bench list and rotation suggestions.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use gaffer_core::classify::{fitness_severity, to_percent};
use gaffer_core::report::{PlayerSlot, TacticalReport};

use super::severity_color;

pub fn render(frame: &mut Frame, area: Rect, report: &TacticalReport) {
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        format!(" Bench ({}) ", report.bench.len()),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    let paragraph = Paragraph::new(build_lines(report))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// "ST · 82%" for a bench player.
pub fn bench_detail(slot: &PlayerSlot) -> String {
    format!("{} · {}%", slot.specific_position, to_percent(slot.fitness_score))
}

pub fn build_lines(report: &TacticalReport) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for slot in &report.bench {
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<20}", slot.name), Style::default().fg(Color::White)),
            Span::styled(
                bench_detail(slot),
                Style::default().fg(severity_color(fitness_severity(slot.fitness_score))),
            ),
        ]));
    }

    let overlapping = report.overlapping_names();
    if !overlapping.is_empty() {
        lines.push(Line::from(Span::styled(
            format!(" Also in XI: {}", overlapping.join(", ")),
            Style::default().fg(Color::Yellow),
        )));
    }

    if !report.rotation_suggestions.is_empty() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            " Rotation",
            Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
        )));
        for note in &report.rotation_suggestions {
            lines.push(Line::from(vec![
                Span::styled(" → ", Style::default().fg(Color::Cyan)),
                Span::raw(note.clone()),
            ]));
        }
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            " No bench or rotation notes.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}
