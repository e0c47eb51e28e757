// TUI: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding the latest `AppSnapshot` from the
// controller plus purely local state (focused field, cursor, text being
// typed, scroll). The controller pushes `UiUpdate` messages over an mpsc
// channel; the TUI applies them to `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;

use gaffer_core::assembler::{GoalField, Side, StatField, RESULTS_WINDOW};
use gaffer_core::formation::PitchGeometry;
use gaffer_core::request::DataTier;

use crate::protocol::{AppSnapshot, TabId, UiUpdate, UserCommand};

use layout::{build_layout, build_report_layout, AppLayout};

// ---------------------------------------------------------------------------
// Form navigation model
// ---------------------------------------------------------------------------

/// One focusable entry on the match form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchField {
    Name(Side),
    Result(Side, usize),
    Goals(GoalField),
    Stat(StatField),
}

impl MatchField {
    pub fn side(&self) -> Side {
        match self {
            MatchField::Name(side) | MatchField::Result(side, _) => *side,
            MatchField::Goals(g) => g.side(),
            MatchField::Stat(s) => s.side(),
        }
    }
}

/// Focus order for the match form under `tier`: own team first, then the
/// opponent. Tier-2 statistics only appear when tier 2 is selected.
pub fn match_fields(tier: DataTier) -> Vec<MatchField> {
    let mut fields = Vec::new();
    for side in [Side::Own, Side::Opponent] {
        fields.push(MatchField::Name(side));
        fields.extend((0..RESULTS_WINDOW).map(|i| MatchField::Result(side, i)));
        let goals = match side {
            Side::Own => [GoalField::Scored, GoalField::Conceded],
            Side::Opponent => [GoalField::OpponentScored, GoalField::OpponentConceded],
        };
        fields.extend(goals.into_iter().map(MatchField::Goals));
        if tier == DataTier::Tier2 {
            fields.extend(
                gaffer_core::assembler::ALL_STATS
                    .iter()
                    .filter(|s| s.side() == side)
                    .map(|s| MatchField::Stat(*s)),
            );
        }
    }
    fields
}

/// Editable columns of the squad table, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquadColumn {
    Name,
    Position,
    Specific,
    Secondary,
    Fitness,
    Available,
}

impl SquadColumn {
    pub const ALL: [SquadColumn; 6] = [
        SquadColumn::Name,
        SquadColumn::Position,
        SquadColumn::Specific,
        SquadColumn::Secondary,
        SquadColumn::Fitness,
        SquadColumn::Available,
    ];

    pub fn index(&self) -> usize {
        SquadColumn::ALL
            .iter()
            .position(|c| c == self)
            .unwrap_or(0)
    }
}

/// What the text entry box is editing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditTarget {
    Match(MatchField),
    PlayerName(usize),
    PlayerFitness(usize),
}

/// In-progress text entry. Committed on Enter, discarded on Esc.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEntry {
    pub target: EditTarget,
    pub buffer: String,
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state: the controller's latest snapshot plus navigation.
pub struct ViewState {
    pub snapshot: AppSnapshot,
    pub active_tab: TabId,
    /// Index into `match_fields(snapshot.tier)`.
    pub match_focus: usize,
    pub squad_row: usize,
    pub squad_column: SquadColumn,
    pub entry: Option<TextEntry>,
    pub reasoning_scroll: u16,
    pub confirm_quit: bool,
    /// Advances once per render tick; drives the loading spinner.
    pub tick: usize,
    pub geometry: PitchGeometry,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            snapshot: AppSnapshot::default(),
            active_tab: TabId::Match,
            match_focus: 0,
            squad_row: 0,
            squad_column: SquadColumn::Name,
            entry: None,
            reasoning_scroll: 0,
            confirm_quit: false,
            tick: 0,
            geometry: PitchGeometry::default(),
        }
    }
}

impl ViewState {
    pub fn with_geometry(geometry: PitchGeometry) -> Self {
        ViewState {
            geometry,
            ..ViewState::default()
        }
    }

    /// Replace the snapshot and pull local cursors back into range.
    pub fn apply_snapshot(&mut self, snapshot: AppSnapshot) {
        let had_report = self.snapshot.report.as_ref().map(|r| r.received_at);
        self.snapshot = snapshot;

        let field_count = match_fields(self.snapshot.tier).len();
        self.match_focus = self.match_focus.min(field_count.saturating_sub(1));
        self.squad_row = self.squad_row.min(self.snapshot.squad.len().saturating_sub(1));

        if self.snapshot.report.as_ref().map(|r| r.received_at) != had_report {
            self.reasoning_scroll = 0;
        }
    }

    pub fn focused_match_field(&self) -> Option<MatchField> {
        match_fields(self.snapshot.tier).get(self.match_focus).copied()
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Snapshot(snapshot) => state.apply_snapshot(*snapshot),
        UiUpdate::SwitchTab(tab) => {
            state.active_tab = tab;
            state.entry = None;
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area(), state.snapshot.error.is_some());

    widgets::status_bar::render(frame, layout.status_bar, state);
    if let Some(err) = &state.snapshot.error {
        widgets::error_banner::render(frame, layout.error_banner, err);
    }
    render_main_panel(frame, &layout, state);
    render_help_bar(frame, &layout, state);

    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

fn render_main_panel(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    match state.active_tab {
        TabId::Match => widgets::match_form::render(frame, layout.main_panel, state),
        TabId::Squad => widgets::squad_table::render(frame, layout.main_panel, state),
        TabId::Report => match &state.snapshot.report {
            Some(received) => {
                let report = &received.report;
                let areas = build_report_layout(layout.main_panel);
                widgets::kpi::render(frame, areas.kpi, report);
                widgets::pitch::render(frame, areas.pitch, report, &state.geometry);
                widgets::bench::render(frame, areas.bench, report);
                widgets::indices::render(frame, areas.indices, report);
                widgets::reasoning::render(frame, areas.reasoning, report, state.reasoning_scroll);
            }
            None => widgets::reasoning::render_empty(frame, layout.main_panel, state.snapshot.loading),
        },
    }
}

fn help_text(state: &ViewState) -> &'static str {
    if state.entry.is_some() {
        return " Enter:Save | Esc:Cancel";
    }
    match state.active_tab {
        TabId::Match => {
            " q:Quit | Tab:Next tab | j/k:Field | h/l:Change | Enter:Edit | c:Confirm | t:Tier | a:Analyse"
        }
        TabId::Squad => {
            " q:Quit | Tab:Next tab | j/k:Row | h/l:Column | Space:Change | +/-:Count | x:Remove | a:Analyse"
        }
        TabId::Report => " q:Quit | Tab:Next tab | j/k:Scroll reasoning | a:Re-run analysis",
    }
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        help_text(state),
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop until the user quits or the controller hangs up.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    geometry: PitchGeometry,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    // Restore the terminal before the default hook prints a panic.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::with_geometry(geometry);
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => break,
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(_)) | None => break,
                }
            }

            _ = render_tick.tick() => {
                view_state.tick = view_state.tick.wrapping_add(1);
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
