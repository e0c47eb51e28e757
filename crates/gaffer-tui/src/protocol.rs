// Message types exchanged between the TUI, the app controller and the
// analysis request task.
//
// View -> controller: `UserCommand`
// Controller -> view: `UiUpdate`
// Request task -> controller: `AnalysisOutcome`

use chrono::{DateTime, Local};

use gaffer_api::ApiError;
use gaffer_core::assembler::{GoalField, MatchInput, Side, StatField};
use gaffer_core::player::Player;
use gaffer_core::position::{BroadPosition, SpecificPosition};
use gaffer_core::report::TacticalReport;
use gaffer_core::request::{DataTier, MatchResult};

/// Shown when analysis is requested before any match data exists.
pub const MISSING_MATCH_DATA: &str = "Please fill in the match setup first.";

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TabId {
    #[default]
    Match,
    Squad,
    Report,
}

impl TabId {
    pub const ALL: [TabId; 3] = [TabId::Match, TabId::Squad, TabId::Report];

    pub fn label(&self) -> &'static str {
        match self {
            TabId::Match => "Match Setup",
            TabId::Squad => "Squad",
            TabId::Report => "Report",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            TabId::Match => 0,
            TabId::Squad => 1,
            TabId::Report => 2,
        }
    }

    pub fn next(&self) -> Self {
        TabId::ALL[(self.index() + 1) % TabId::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        TabId::ALL[(self.index() + TabId::ALL.len() - 1) % TabId::ALL.len()]
    }
}

// ---------------------------------------------------------------------------
// Commands (view -> controller)
// ---------------------------------------------------------------------------

/// A single edit to the match form.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchEdit {
    Name { side: Side, name: String },
    Result { side: Side, index: usize, result: MatchResult },
    Goals { field: GoalField, value: i64 },
    Stat { field: StatField, value: f64 },
    StepStat { field: StatField, steps: i32 },
    /// Mark the form as filled in without changing a value.
    Confirm,
}

/// A single edit to the squad list.
#[derive(Debug, Clone, PartialEq)]
pub enum SquadEdit {
    SetCount(usize),
    Rename { index: usize, name: String },
    SetPosition { index: usize, position: BroadPosition },
    SetSpecific { index: usize, specific: SpecificPosition },
    SetSecondary { index: usize, secondary: Option<SpecificPosition> },
    SetFitness { index: usize, fitness: f64 },
    SetAvailable { index: usize, available: bool },
    Remove(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    SwitchTab(TabId),
    SetTier(DataTier),
    EditMatch(MatchEdit),
    EditSquad(SquadEdit),
    Analyse,
    DismissError,
    Quit,
}

// ---------------------------------------------------------------------------
// Controller -> view
// ---------------------------------------------------------------------------

/// Reachability of the analysis service as last probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceStatus {
    #[default]
    Unknown,
    Online,
    Offline,
}

/// A report together with the local time it arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedReport {
    pub report: TacticalReport,
    pub received_at: DateTime<Local>,
}

/// Everything the view needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSnapshot {
    pub tier: DataTier,
    pub match_input: MatchInput,
    pub match_entered: bool,
    pub squad: Vec<Player>,
    pub max_players: usize,
    pub report: Option<ReceivedReport>,
    pub loading: bool,
    pub error: Option<String>,
    pub service: ServiceStatus,
}

impl Default for AppSnapshot {
    fn default() -> Self {
        AppSnapshot {
            tier: DataTier::default(),
            match_input: MatchInput::default(),
            match_entered: false,
            squad: Vec::new(),
            max_players: gaffer_core::assembler::MAX_SQUAD_SIZE,
            report: None,
            loading: false,
            error: None,
            service: ServiceStatus::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    Snapshot(Box<AppSnapshot>),
    SwitchTab(TabId),
}

// ---------------------------------------------------------------------------
// Request task -> controller
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum AnalysisOutcome {
    Completed(TacticalReport),
    Failed(ApiError),
    Health(Result<(), ApiError>),
}
