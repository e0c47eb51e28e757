// Wire types for the analysis request.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::player::Player;

/// Input richness selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DataTier {
    /// Results and goals only.
    #[default]
    #[serde(rename = "tier_1")]
    Tier1,
    /// Results plus per-match statistics.
    #[serde(rename = "tier_2")]
    Tier2,
}

impl DataTier {
    pub fn toggled(&self) -> Self {
        match self {
            DataTier::Tier1 => DataTier::Tier2,
            DataTier::Tier2 => DataTier::Tier1,
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            DataTier::Tier1 => "T1",
            DataTier::Tier2 => "T2",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DataTier::Tier1 => "Basic",
            DataTier::Tier2 => "Full Stats",
        }
    }
}

impl fmt::Display for DataTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataTier::Tier1 => write!(f, "tier_1"),
            DataTier::Tier2 => write!(f, "tier_2"),
        }
    }
}

/// Outcome of a single past match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "L")]
    Loss,
}

impl MatchResult {
    pub fn display_str(&self) -> &'static str {
        match self {
            MatchResult::Win => "W",
            MatchResult::Draw => "D",
            MatchResult::Loss => "L",
        }
    }

    /// W -> D -> L -> W.
    pub fn next(&self) -> Self {
        match self {
            MatchResult::Win => MatchResult::Draw,
            MatchResult::Draw => MatchResult::Loss,
            MatchResult::Loss => MatchResult::Win,
        }
    }

    /// W -> L -> D -> W.
    pub fn prev(&self) -> Self {
        match self {
            MatchResult::Win => MatchResult::Loss,
            MatchResult::Draw => MatchResult::Win,
            MatchResult::Loss => MatchResult::Draw,
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// Results-only match data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier1Data {
    pub team_name: String,
    pub opponent_name: String,
    /// Oldest first.
    pub last_5_results: Vec<MatchResult>,
    pub goals_scored_last_5: u32,
    pub goals_conceded_last_5: u32,
    pub players: Vec<Player>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent_last_5_results: Option<Vec<MatchResult>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent_goals_scored: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent_goals_conceded: Option<u32>,
}

/// Tier 1 data extended with per-match statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier2Data {
    #[serde(flatten)]
    pub base: Tier1Data,
    pub avg_possession: f64,
    pub avg_passing_accuracy: f64,
    pub avg_shots_per_match: f64,
    pub avg_shots_on_target: f64,
    pub avg_defensive_errors: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opp_avg_possession: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opp_avg_passing_accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opp_avg_shots_per_match: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opp_avg_defensive_errors: Option<f64>,
}

/// Body of `POST /analyse`. Exactly one of the data fields is set, matching
/// `tier`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyseRequest {
    pub tier: DataTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier1_data: Option<Tier1Data>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier2_data: Option<Tier2Data>,
}

impl AnalyseRequest {
    pub fn tier1(data: Tier1Data) -> Self {
        AnalyseRequest {
            tier: DataTier::Tier1,
            tier1_data: Some(data),
            tier2_data: None,
        }
    }

    pub fn tier2(data: Tier2Data) -> Self {
        AnalyseRequest {
            tier: DataTier::Tier2,
            tier1_data: None,
            tier2_data: Some(data),
        }
    }

    /// The results-level data regardless of tier.
    pub fn base(&self) -> Option<&Tier1Data> {
        match self.tier {
            DataTier::Tier1 => self.tier1_data.as_ref(),
            DataTier::Tier2 => self.tier2_data.as_ref().map(|d| &d.base),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
