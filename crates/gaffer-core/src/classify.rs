// Severity classification for report display.
//
// Maps fitness scores, risk indices and the categorical report fields onto
// a four-step severity scale. Rendering picks colours from the severity;
// nothing here knows about terminals.

use crate::report::{Level, PlayerSlot};

/// Fitness at or above this is good.
pub const FITNESS_GOOD: f64 = 0.80;
/// Fitness at or above this (and below good) is a caution.
pub const FITNESS_CAUTION: f64 = 0.65;

/// Index values below this are good.
pub const INDEX_GOOD_BELOW: f64 = 0.35;
/// Index values below this (and at or above good) are a caution.
pub const INDEX_CAUTION_BELOW: f64 = 0.65;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Good,
    Caution,
    Risk,
    /// No value to classify, or a value with no severity attached.
    Neutral,
}

/// Classify a player's fitness score.
pub fn fitness_severity(fitness: f64) -> Severity {
    if fitness >= FITNESS_GOOD {
        Severity::Good
    } else if fitness >= FITNESS_CAUTION {
        Severity::Caution
    } else {
        Severity::Risk
    }
}

/// Classify a pitch slot; empty slots are neutral.
pub fn slot_severity(player: Option<&PlayerSlot>) -> Severity {
    match player {
        Some(p) => fitness_severity(p.fitness_score),
        None => Severity::Neutral,
    }
}

/// Classify a 0..1 index where higher means more danger.
pub fn index_severity(value: f64) -> Severity {
    if value < INDEX_GOOD_BELOW {
        Severity::Good
    } else if value < INDEX_CAUTION_BELOW {
        Severity::Caution
    } else {
        Severity::Risk
    }
}

/// A labelled horizontal bar for one report index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexBar {
    pub label: &'static str,
    /// Whole percent, or `None` when the index was not reported.
    pub percent: Option<u8>,
    pub severity: Severity,
}

impl IndexBar {
    /// Text shown next to the bar: "NN%" or "--".
    pub fn value_text(&self) -> String {
        match self.percent {
            Some(p) => format!("{}%", p),
            None => "--".to_string(),
        }
    }

    /// Bar fill as a 0..1 ratio.
    pub fn ratio(&self) -> f64 {
        f64::from(self.percent.unwrap_or(0)) / 100.0
    }
}

/// Build the display bar for an index. The percentage is rounded for
/// display but severity is taken from the raw value, so 0.649 shows as
/// 65% in the caution band.
pub fn index_bar(label: &'static str, value: Option<f64>) -> IndexBar {
    match value.filter(|v| v.is_finite()) {
        Some(v) => IndexBar {
            label,
            percent: Some(to_percent(v)),
            severity: index_severity(v),
        },
        None => IndexBar {
            label,
            percent: None,
            severity: Severity::Neutral,
        },
    }
}

/// Press intensity: a high press is good news.
pub fn press_severity(press: &str) -> Severity {
    match Level::parse(press) {
        Some(Level::High) => Severity::Good,
        Some(Level::Medium) => Severity::Caution,
        _ => Severity::Risk,
    }
}

/// Match risk level: a high risk is bad news.
pub fn risk_severity(risk: &str) -> Severity {
    match Level::parse(risk) {
        Some(Level::High) => Severity::Risk,
        Some(Level::Medium) => Severity::Caution,
        _ => Severity::Good,
    }
}

/// round(value * 100) clamped to 0..=100.
pub fn to_percent(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    (value * 100.0).round().clamp(0.0, 100.0) as u8
}

/// "NN%" for a probability or score, "--" when missing.
pub fn format_percent(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("{}%", to_percent(v)),
        None => "--".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
