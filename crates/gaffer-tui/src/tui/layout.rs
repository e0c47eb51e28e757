// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Error Banner (3 rows, only while an error shows)  |
// +--------------------------------------------------+
// | Main Panel (tab content)                          |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+
//
// The report tab subdivides the main panel:
//
// +--------------------------------------------------+
// | KPI strip + focus + outcome odds (5 rows)         |
// +-------------------------+------------------------+
// | Pitch (55%)              | Indices (6 rows)       |
// |                          | Bench (40%)            |
// |                          | Reasoning (fill)       |
// +-------------------------+------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each top-level zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: tabs, data tier, service status.
    pub status_bar: Rect,
    /// Last request error. Zero height when there is nothing to show.
    pub error_banner: Rect,
    /// Tab-switched content area.
    pub main_panel: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Areas of the report tab.
#[derive(Debug, Clone)]
pub struct ReportLayout {
    pub kpi: Rect,
    pub pitch: Rect,
    pub indices: Rect,
    pub bench: Rect,
    pub reasoning: Rect,
}

/// Build the top-level layout from the available terminal area.
pub fn build_layout(area: Rect, has_error: bool) -> AppLayout {
    let banner_height = if has_error { 3 } else { 0 };
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // status bar
            Constraint::Length(banner_height), // error banner
            Constraint::Min(5),                // main panel
            Constraint::Length(1),             // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        error_banner: vertical[1],
        main_panel: vertical[2],
        help_bar: vertical[3],
    }
}

/// Split the main panel for the report tab.
pub fn build_report_layout(area: Rect) -> ReportLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(8)])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(vertical[1]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Percentage(40),
            Constraint::Min(3),
        ])
        .split(horizontal[1]);

    ReportLayout {
        kpi: vertical[0],
        pitch: horizontal[0],
        indices: side[0],
        bench: side[1],
        reasoning: side[2],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
