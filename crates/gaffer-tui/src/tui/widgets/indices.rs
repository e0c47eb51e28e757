// Report indices: one horizontal bar per index, coloured by severity.
//
// Order: Offensive Strength, Defensive Vulnerability, Fatigue Risk,
// Tactical Stability. Missing indices show an empty grey bar and "--".

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use gaffer_core::classify::{index_bar, IndexBar};
use gaffer_core::report::TacticalReport;

use super::severity_color;

const LABEL_WIDTH: usize = 24;
/// Space after the bar for " NNN%".
const VALUE_WIDTH: usize = 5;

pub fn render(frame: &mut Frame, area: Rect, report: &TacticalReport) {
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        " Indices ",
        Style::default().add_modifier(Modifier::BOLD),
    ));
    let inner_width = usize::from(block.inner(area).width);
    let bar_width = inner_width.saturating_sub(LABEL_WIDTH + VALUE_WIDTH + 1);

    let lines: Vec<Line> = report
        .indices()
        .iter()
        .map(|(label, value)| bar_line(&index_bar(*label, *value), bar_width))
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Label, filled/empty bar of `bar_width` cells, and the value text.
pub fn bar_line(bar: &IndexBar, bar_width: usize) -> Line<'static> {
    let filled = ((bar.ratio() * bar_width as f64).round() as usize).min(bar_width);
    let color = severity_color(bar.severity);
    Line::from(vec![
        Span::styled(
            format!(" {:<width$}", bar.label, width = LABEL_WIDTH),
            Style::default().fg(Color::Gray),
        ),
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled(
            "░".repeat(bar_width - filled),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!(" {:>4}", bar.value_text()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])
}
