// Report headline: formation, press, defensive line, risk, tactical focus
// and outcome probabilities.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use gaffer_core::classify::{format_percent, press_severity, risk_severity, Severity};
use gaffer_core::report::TacticalReport;

use super::severity_color;

pub fn render(frame: &mut Frame, area: Rect, report: &TacticalReport) {
    let title = format!(
        " {} vs {} ({}) ",
        report.team_name,
        report.opponent_name,
        report.tier_used.short_label()
    );
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        title,
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ));

    let paragraph = Paragraph::new(build_lines(report)).block(block);
    frame.render_widget(paragraph, area);
}

/// "--" for blank text fields.
fn or_dash(s: &str) -> &str {
    if s.trim().is_empty() {
        "--"
    } else {
        s
    }
}

fn kpi_spans(label: &'static str, value: &str, severity: Severity) -> [Span<'static>; 2] {
    let value_style = match severity {
        Severity::Neutral => Style::default().fg(Color::White),
        s => Style::default().fg(severity_color(s)),
    }
    .add_modifier(Modifier::BOLD);
    [
        Span::styled(format!(" {}: ", label), Style::default().fg(Color::Gray)),
        Span::styled(or_dash(value).to_string(), value_style),
    ]
}

pub fn build_lines(report: &TacticalReport) -> Vec<Line<'static>> {
    let sep = || Span::styled("  |", Style::default().fg(Color::DarkGray));

    let mut strip = Vec::new();
    strip.extend(kpi_spans("Formation", &report.recommended_formation, Severity::Neutral));
    strip.push(sep());
    strip.extend(kpi_spans(
        "Press",
        &report.press_intensity,
        press_severity(&report.press_intensity),
    ));
    strip.push(sep());
    strip.extend(kpi_spans("Def. Line", &report.defensive_line, Severity::Neutral));
    strip.push(sep());
    strip.extend(kpi_spans(
        "Risk",
        &report.match_risk_level,
        risk_severity(&report.match_risk_level),
    ));

    let focus = Line::from(vec![
        Span::styled(" Focus: ", Style::default().fg(Color::Gray)),
        Span::styled(
            or_dash(&report.tactical_focus).to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
        ),
    ]);

    let odds = Line::from(vec![
        Span::styled(" Win ", Style::default().fg(Color::Gray)),
        Span::styled(format_percent(report.win_probability), Style::default().fg(Color::Green)),
        Span::styled("  Draw ", Style::default().fg(Color::Gray)),
        Span::styled(format_percent(report.draw_probability), Style::default().fg(Color::Yellow)),
        Span::styled("  Loss ", Style::default().fg(Color::Gray)),
        Span::styled(format_percent(report.loss_probability), Style::default().fg(Color::Red)),
    ]);

    vec![Line::from(strip), focus, odds]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::sample_report;
    use crate::tui::widgets::buffer_text;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn strip_contains_all_kpis() {
        let lines = build_lines(&sample_report());
        assert_eq!(lines.len(), 3);
        let strip = line_text(&lines[0]);
        assert!(strip.contains("Formation: 4-3-3"));
        assert!(strip.contains("Press: High"));
        assert!(strip.contains("Def. Line: Medium"));
        assert!(strip.contains("Risk: Medium"));
        assert_eq!(line_text(&lines[2]), " Win 48%  Draw 27%  Loss 25%");
    }

    #[test]
    fn press_and_risk_are_coloured() {
        let lines = build_lines(&sample_report());
        let press_value = &lines[0].spans[4];
        assert_eq!(press_value.content, "High");
        assert_eq!(press_value.style.fg, Some(severity_color(press_severity("High"))));
        let risk_value = &lines[0].spans[10];
        assert_eq!(risk_value.content, "Medium");
        assert_eq!(risk_value.style.fg, Some(severity_color(risk_severity("Medium"))));
    }

    #[test]
    fn missing_values_render_as_dashes() {
        let mut report = sample_report();
        report.tactical_focus.clear();
        report.win_probability = None;
        let lines = build_lines(&report);
        assert_eq!(line_text(&lines[1]), " Focus: --");
        assert!(line_text(&lines[2]).starts_with(" Win --"));
    }

    #[test]
    fn render_shows_matchup_title() {
        let backend = ratatui::backend::TestBackend::new(100, 5);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let report = sample_report();
        terminal.draw(|frame| render(frame, frame.area(), &report)).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("GafferOS FC vs Riverside United (T1)"));
        assert!(text.contains("Win the second balls"));
    }
}
