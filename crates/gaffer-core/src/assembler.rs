// Match and squad input state, assembled into an analysis request.
//
// The assembler owns the editable form state for one session. Every mutator
// coerces its input into range and rebuilds the cached request before
// returning, so `payload()` always reflects the latest edit. Nothing here
// rejects input: out-of-range values are clamped, never refused.

use tracing::{debug, warn};

use crate::player::Player;
use crate::request::{AnalyseRequest, DataTier, MatchResult, Tier1Data, Tier2Data};

/// Hard upper bound on squad size.
pub const MAX_SQUAD_SIZE: usize = 25;

/// Number of recent results tracked per team.
pub const RESULTS_WINDOW: usize = 5;

// ---------------------------------------------------------------------------
// Match input
// ---------------------------------------------------------------------------

/// Which team a form field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Own,
    Opponent,
}

/// Goal tallies over the last five matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoalField {
    Scored,
    Conceded,
    OpponentScored,
    OpponentConceded,
}

pub const ALL_GOALS: [GoalField; 4] = [
    GoalField::Scored,
    GoalField::Conceded,
    GoalField::OpponentScored,
    GoalField::OpponentConceded,
];

impl GoalField {
    pub fn label(&self) -> &'static str {
        match self {
            GoalField::Scored | GoalField::OpponentScored => "Goals Scored (last 5)",
            GoalField::Conceded | GoalField::OpponentConceded => "Goals Conceded (last 5)",
        }
    }

    pub fn side(&self) -> Side {
        match self {
            GoalField::Scored | GoalField::Conceded => Side::Own,
            GoalField::OpponentScored | GoalField::OpponentConceded => Side::Opponent,
        }
    }
}

/// Per-match averages collected for tier 2. There is no opponent shots on
/// target field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatField {
    Possession,
    PassingAccuracy,
    ShotsPerMatch,
    ShotsOnTarget,
    DefensiveErrors,
    OppPossession,
    OppPassingAccuracy,
    OppShotsPerMatch,
    OppDefensiveErrors,
}

pub const ALL_STATS: [StatField; 9] = [
    StatField::Possession,
    StatField::PassingAccuracy,
    StatField::ShotsPerMatch,
    StatField::ShotsOnTarget,
    StatField::DefensiveErrors,
    StatField::OppPossession,
    StatField::OppPassingAccuracy,
    StatField::OppShotsPerMatch,
    StatField::OppDefensiveErrors,
];

impl StatField {
    /// Inclusive value range.
    pub fn range(&self) -> (f64, f64) {
        match self {
            StatField::Possession | StatField::OppPossession => (30.0, 70.0),
            StatField::PassingAccuracy | StatField::OppPassingAccuracy => (50.0, 95.0),
            StatField::ShotsPerMatch | StatField::OppShotsPerMatch => (0.0, 30.0),
            StatField::ShotsOnTarget => (0.0, 15.0),
            StatField::DefensiveErrors | StatField::OppDefensiveErrors => (0.0, 5.0),
        }
    }

    /// Increment used by the form's +/- keys.
    pub fn step(&self) -> f64 {
        match self {
            StatField::Possession
            | StatField::OppPossession
            | StatField::PassingAccuracy
            | StatField::OppPassingAccuracy => 1.0,
            StatField::ShotsPerMatch | StatField::OppShotsPerMatch | StatField::ShotsOnTarget => 0.5,
            StatField::DefensiveErrors | StatField::OppDefensiveErrors => 0.1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatField::Possession | StatField::OppPossession => "Avg Possession (%)",
            StatField::PassingAccuracy | StatField::OppPassingAccuracy => "Passing Accuracy (%)",
            StatField::ShotsPerMatch | StatField::OppShotsPerMatch => "Shots / Match",
            StatField::ShotsOnTarget => "Shots on Target / Match",
            StatField::DefensiveErrors | StatField::OppDefensiveErrors => "Defensive Errors / Match",
        }
    }

    pub fn side(&self) -> Side {
        match self {
            StatField::Possession
            | StatField::PassingAccuracy
            | StatField::ShotsPerMatch
            | StatField::ShotsOnTarget
            | StatField::DefensiveErrors => Side::Own,
            _ => Side::Opponent,
        }
    }

    /// Clamp `value` into range. NaN collapses to the lower bound.
    pub fn clamp(&self, value: f64) -> f64 {
        let (lo, hi) = self.range();
        if value.is_nan() {
            lo
        } else {
            value.clamp(lo, hi)
        }
    }
}

/// Match form values for both teams.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchInput {
    pub team_name: String,
    pub opponent_name: String,
    /// Oldest first.
    pub results: [MatchResult; RESULTS_WINDOW],
    pub opponent_results: [MatchResult; RESULTS_WINDOW],
    pub goals_scored: u32,
    pub goals_conceded: u32,
    pub opponent_goals_scored: u32,
    pub opponent_goals_conceded: u32,
    pub possession: f64,
    pub passing_accuracy: f64,
    pub shots_per_match: f64,
    pub shots_on_target: f64,
    pub defensive_errors: f64,
    pub opp_possession: f64,
    pub opp_passing_accuracy: f64,
    pub opp_shots_per_match: f64,
    pub opp_defensive_errors: f64,
}

impl Default for MatchInput {
    fn default() -> Self {
        use crate::request::MatchResult::{Draw as D, Loss as L, Win as W};
        MatchInput {
            team_name: "GafferOS FC".to_string(),
            opponent_name: "Riverside United".to_string(),
            results: [W, D, W, L, W],
            opponent_results: [L, W, D, L, D],
            goals_scored: 9,
            goals_conceded: 5,
            opponent_goals_scored: 5,
            opponent_goals_conceded: 8,
            possession: 54.0,
            passing_accuracy: 79.0,
            shots_per_match: 13.0,
            shots_on_target: 6.0,
            defensive_errors: 1.2,
            opp_possession: 46.0,
            opp_passing_accuracy: 70.0,
            opp_shots_per_match: 10.0,
            opp_defensive_errors: 2.4,
        }
    }
}

impl MatchInput {
    pub fn results(&self, side: Side) -> &[MatchResult; RESULTS_WINDOW] {
        match side {
            Side::Own => &self.results,
            Side::Opponent => &self.opponent_results,
        }
    }

    pub fn name(&self, side: Side) -> &str {
        match side {
            Side::Own => &self.team_name,
            Side::Opponent => &self.opponent_name,
        }
    }

    pub fn goals(&self, field: GoalField) -> u32 {
        match field {
            GoalField::Scored => self.goals_scored,
            GoalField::Conceded => self.goals_conceded,
            GoalField::OpponentScored => self.opponent_goals_scored,
            GoalField::OpponentConceded => self.opponent_goals_conceded,
        }
    }

    pub fn stat(&self, field: StatField) -> f64 {
        match field {
            StatField::Possession => self.possession,
            StatField::PassingAccuracy => self.passing_accuracy,
            StatField::ShotsPerMatch => self.shots_per_match,
            StatField::ShotsOnTarget => self.shots_on_target,
            StatField::DefensiveErrors => self.defensive_errors,
            StatField::OppPossession => self.opp_possession,
            StatField::OppPassingAccuracy => self.opp_passing_accuracy,
            StatField::OppShotsPerMatch => self.opp_shots_per_match,
            StatField::OppDefensiveErrors => self.opp_defensive_errors,
        }
    }

    fn stat_mut(&mut self, field: StatField) -> &mut f64 {
        match field {
            StatField::Possession => &mut self.possession,
            StatField::PassingAccuracy => &mut self.passing_accuracy,
            StatField::ShotsPerMatch => &mut self.shots_per_match,
            StatField::ShotsOnTarget => &mut self.shots_on_target,
            StatField::DefensiveErrors => &mut self.defensive_errors,
            StatField::OppPossession => &mut self.opp_possession,
            StatField::OppPassingAccuracy => &mut self.opp_passing_accuracy,
            StatField::OppShotsPerMatch => &mut self.opp_shots_per_match,
            StatField::OppDefensiveErrors => &mut self.opp_defensive_errors,
        }
    }

    fn goals_mut(&mut self, field: GoalField) -> &mut u32 {
        match field {
            GoalField::Scored => &mut self.goals_scored,
            GoalField::Conceded => &mut self.goals_conceded,
            GoalField::OpponentScored => &mut self.opponent_goals_scored,
            GoalField::OpponentConceded => &mut self.opponent_goals_conceded,
        }
    }

    fn tier1_data(&self, players: &[Player]) -> Tier1Data {
        Tier1Data {
            team_name: self.team_name.clone(),
            opponent_name: self.opponent_name.clone(),
            last_5_results: self.results.to_vec(),
            goals_scored_last_5: self.goals_scored,
            goals_conceded_last_5: self.goals_conceded,
            players: players.to_vec(),
            opponent_last_5_results: Some(self.opponent_results.to_vec()),
            opponent_goals_scored: Some(self.opponent_goals_scored),
            opponent_goals_conceded: Some(self.opponent_goals_conceded),
        }
    }

    fn tier2_data(&self, players: &[Player]) -> Tier2Data {
        Tier2Data {
            base: self.tier1_data(players),
            avg_possession: self.possession,
            avg_passing_accuracy: self.passing_accuracy,
            avg_shots_per_match: self.shots_per_match,
            avg_shots_on_target: self.shots_on_target,
            avg_defensive_errors: self.defensive_errors,
            opp_avg_possession: Some(self.opp_possession),
            opp_avg_passing_accuracy: Some(self.opp_passing_accuracy),
            opp_avg_shots_per_match: Some(self.opp_shots_per_match),
            opp_avg_defensive_errors: Some(self.opp_defensive_errors),
        }
    }
}

// ---------------------------------------------------------------------------
// InputAssembler
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct InputAssembler {
    tier: DataTier,
    input: MatchInput,
    /// False until the match form is first touched. Squad edits alone do not
    /// produce match data.
    match_entered: bool,
    squad: Vec<Player>,
    max_players: usize,
    payload: Option<AnalyseRequest>,
}

impl Default for InputAssembler {
    fn default() -> Self {
        InputAssembler::new(MAX_SQUAD_SIZE)
    }
}

impl InputAssembler {
    /// Fresh form state with default match values and an empty squad.
    /// `max_players` is capped at [`MAX_SQUAD_SIZE`].
    pub fn new(max_players: usize) -> Self {
        InputAssembler {
            tier: DataTier::default(),
            input: MatchInput::default(),
            match_entered: false,
            squad: Vec::new(),
            max_players: max_players.min(MAX_SQUAD_SIZE),
            payload: None,
        }
    }

    pub fn tier(&self) -> DataTier {
        self.tier
    }

    pub fn match_input(&self) -> &MatchInput {
        &self.input
    }

    pub fn squad(&self) -> &[Player] {
        &self.squad
    }

    pub fn max_players(&self) -> usize {
        self.max_players
    }

    pub fn has_match_data(&self) -> bool {
        self.match_entered
    }

    /// The request as of the last mutation, or `None` before any match data
    /// has been entered.
    pub fn payload(&self) -> Option<&AnalyseRequest> {
        self.payload.as_ref()
    }

    /// The request serialized as compact JSON.
    pub fn payload_json(&self) -> Option<String> {
        self.payload
            .as_ref()
            .and_then(|p| serde_json::to_string(p).ok())
    }

    // -- tier ---------------------------------------------------------------

    pub fn set_tier(&mut self, tier: DataTier) {
        self.tier = tier;
        self.reassemble();
    }

    pub fn toggle_tier(&mut self) {
        self.set_tier(self.tier.toggled());
    }

    // -- match form ---------------------------------------------------------

    /// Mark the match form as entered without changing any value.
    pub fn confirm_match(&mut self) {
        self.touch_match(|_| {});
    }

    pub fn set_name(&mut self, side: Side, name: impl Into<String>) {
        let name = name.into();
        self.touch_match(|m| match side {
            Side::Own => m.team_name = name,
            Side::Opponent => m.opponent_name = name,
        });
    }

    /// Set result `index` (0 = oldest). Out-of-range indices are ignored.
    pub fn set_result(&mut self, side: Side, index: usize, result: MatchResult) {
        if index >= RESULTS_WINDOW {
            debug!("ignoring result index {} for {:?}", index, side);
            return;
        }
        self.touch_match(|m| match side {
            Side::Own => m.results[index] = result,
            Side::Opponent => m.opponent_results[index] = result,
        });
    }

    /// Set a goal tally. Negative values clamp to zero.
    pub fn set_goals(&mut self, field: GoalField, goals: i64) {
        let goals = goals.clamp(0, i64::from(u32::MAX)) as u32;
        self.touch_match(|m| *m.goals_mut(field) = goals);
    }

    /// Set a tier-2 statistic, clamped into the field's range.
    pub fn set_stat(&mut self, field: StatField, value: f64) {
        let value = field.clamp(value);
        self.touch_match(|m| *m.stat_mut(field) = value);
    }

    /// Nudge a statistic by `steps` increments. The result is rounded to the
    /// step's precision so repeated nudges do not accumulate float noise.
    pub fn step_stat(&mut self, field: StatField, steps: i32) {
        let step = field.step();
        let raw = self.input.stat(field) + step * f64::from(steps);
        let snapped = (raw / step).round() * step;
        let rounded = (snapped * 10.0).round() / 10.0;
        self.set_stat(field, rounded);
    }

    // -- squad --------------------------------------------------------------

    /// Grow or shrink the squad to `count`, capped at the maximum. New
    /// members are placeholders numbered by their position in the list.
    pub fn set_player_count(&mut self, count: usize) {
        let count = count.min(self.max_players);
        if count > self.squad.len() {
            let start = self.squad.len();
            self.squad.extend((start..count).map(Player::placeholder));
        } else {
            self.squad.truncate(count);
        }
        self.reassemble();
    }

    /// Apply `edit` to the player at `index` and reassemble. Returns `None`
    /// when the index is out of range.
    pub fn edit_player<T>(&mut self, index: usize, edit: impl FnOnce(&mut Player) -> T) -> Option<T> {
        let player = self.squad.get_mut(index)?;
        let out = edit(player);
        self.reassemble();
        Some(out)
    }

    pub fn remove_player(&mut self, index: usize) -> Option<Player> {
        if index >= self.squad.len() {
            return None;
        }
        let removed = self.squad.remove(index);
        self.reassemble();
        Some(removed)
    }

    /// Replace the whole squad, keeping at most the maximum.
    pub fn replace_squad(&mut self, mut players: Vec<Player>) {
        if players.len() > self.max_players {
            warn!(
                "squad of {} exceeds the maximum of {}; keeping the first {}",
                players.len(),
                self.max_players,
                self.max_players
            );
            players.truncate(self.max_players);
        }
        self.squad = players;
        self.reassemble();
    }

    // -- internals ----------------------------------------------------------

    fn touch_match(&mut self, f: impl FnOnce(&mut MatchInput)) {
        f(&mut self.input);
        self.match_entered = true;
        self.reassemble();
    }

    fn reassemble(&mut self) {
        if !self.match_entered {
            self.payload = None;
            return;
        }
        let request = match self.tier {
            DataTier::Tier1 => AnalyseRequest::tier1(self.input.tier1_data(&self.squad)),
            DataTier::Tier2 => AnalyseRequest::tier2(self.input.tier2_data(&self.squad)),
        };
        self.payload = Some(request);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
