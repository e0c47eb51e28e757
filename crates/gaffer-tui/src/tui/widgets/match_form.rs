// Match setup form: one column per team.
//
// Each column lists the team name, the last five results as coloured chips,
// goal totals and (tier 2 only) per-match statistics. The focused field is
// highlighted; a field being typed into shows the entry buffer instead of
// its value.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use gaffer_core::assembler::{Side, StatField, RESULTS_WINDOW};
use gaffer_core::request::MatchResult;

use crate::tui::{match_fields, EditTarget, MatchField, ViewState};

const LABEL_WIDTH: usize = 26;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

    for (side, rect) in [(Side::Own, left), (Side::Opponent, right)] {
        let title = match side {
            Side::Own => " Your Team ",
            Side::Opponent => " Opponent ",
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(title, Style::default().add_modifier(Modifier::BOLD)));
        if side == Side::Own {
            block = block.title_bottom(confirm_hint(state.snapshot.match_entered));
        }
        frame.render_widget(Paragraph::new(side_lines(state, side)).block(block), rect);
    }
}

fn confirm_hint(entered: bool) -> Span<'static> {
    if entered {
        Span::styled(" setup confirmed ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" c: confirm setup ", Style::default().fg(Color::Yellow))
    }
}

/// Chip colour for a past result.
pub fn result_color(result: MatchResult) -> Color {
    match result {
        MatchResult::Win => Color::Green,
        MatchResult::Draw => Color::Yellow,
        MatchResult::Loss => Color::Red,
    }
}

/// Statistic value at the precision of its step.
pub fn format_stat(field: StatField, value: f64) -> String {
    if field.step() >= 1.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

fn side_lines(state: &ViewState, side: Side) -> Vec<Line<'static>> {
    let input = &state.snapshot.match_input;
    let focused = state.focused_match_field();
    let typing = state.entry.as_ref().and_then(|e| match e.target {
        EditTarget::Match(field) => Some((field, e.buffer.as_str())),
        _ => None,
    });

    let mut lines = Vec::new();
    for field in match_fields(state.snapshot.tier) {
        if field.side() != side {
            continue;
        }
        let (label, value) = match field {
            MatchField::Result(_, 0) => {
                lines.push(results_line(state, side));
                continue;
            }
            MatchField::Result(..) => continue,
            MatchField::Name(_) => ("Name", input.name(side).to_string()),
            MatchField::Goals(g) => (g.label(), input.goals(g).to_string()),
            MatchField::Stat(s) => (s.label(), format_stat(s, input.stat(s))),
        };

        let value_span = match typing {
            Some((target, buffer)) if target == field => Span::styled(
                format!("{}_", buffer),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::UNDERLINED),
            ),
            _ => Span::styled(value, focus_style(focused == Some(field))),
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<width$}", label, width = LABEL_WIDTH),
                Style::default().fg(Color::Gray),
            ),
            value_span,
        ]));
    }
    lines
}

fn results_line(state: &ViewState, side: Side) -> Line<'static> {
    let results = state.snapshot.match_input.results(side);
    let focused = state.focused_match_field();

    let mut spans = vec![Span::styled(
        format!(" {:<width$}", "Last 5 (oldest first)", width = LABEL_WIDTH),
        Style::default().fg(Color::Gray),
    )];
    for (i, result) in results.iter().enumerate().take(RESULTS_WINDOW) {
        let style = if focused == Some(MatchField::Result(side, i)) {
            Style::default()
                .fg(Color::Black)
                .bg(result_color(*result))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(result_color(*result))
        };
        spans.push(Span::styled(format!("[{}]", result), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
