// Status bar widget: service status, data tier, tab indicator, request state.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use gaffer_core::request::DataTier;

use crate::protocol::{ServiceStatus, TabId};
use crate::tui::ViewState;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Render the status bar into the given area.
///
/// Layout: [service dot] GafferOS | [tabs] | tier | request state
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = Vec::new();

    let (dot, dot_color) = service_indicator(state.snapshot.service);
    spans.push(Span::styled(format!(" {} ", dot), Style::default().fg(dot_color)));
    spans.push(Span::styled(
        "GafferOS",
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));

    spans.extend(tab_spans(state.active_tab));
    spans.push(Span::styled("| ", Style::default().fg(Color::Gray)));

    spans.push(Span::styled(
        tier_label(state.snapshot.tier),
        Style::default().fg(Color::Cyan),
    ));
    spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));

    spans.push(request_span(state));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Dot character and colour for the last health probe.
pub fn service_indicator(status: ServiceStatus) -> (&'static str, Color) {
    match status {
        ServiceStatus::Online => ("●", Color::Green),
        ServiceStatus::Offline => ("●", Color::Red),
        ServiceStatus::Unknown => ("○", Color::DarkGray),
    }
}

/// "[1:Match Setup] [2:Squad] [3:Report] " with the active tab inverted.
pub fn tab_spans(active: TabId) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for tab in TabId::ALL {
        let style = if tab == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}:{}]", tab.index() + 1, tab.label()), style));
        spans.push(Span::raw(" "));
    }
    spans
}

pub fn tier_label(tier: DataTier) -> String {
    format!("{} {}", tier.short_label(), tier.description())
}

fn request_span(state: &ViewState) -> Span<'static> {
    let snapshot = &state.snapshot;
    if snapshot.loading {
        let frame = SPINNER[state.tick % SPINNER.len()];
        return Span::styled(
            format!("{} Analysing...", frame),
            Style::default().fg(Color::Yellow),
        );
    }
    match &snapshot.report {
        Some(received) => Span::styled(
            format!("Report {}", received.received_at.format("%H:%M:%S")),
            Style::default().fg(Color::Green),
        ),
        None if !snapshot.match_entered => {
            Span::styled("Match setup pending", Style::default().fg(Color::Gray))
        }
        None => Span::styled("Ready (a to analyse)", Style::default().fg(Color::White)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
