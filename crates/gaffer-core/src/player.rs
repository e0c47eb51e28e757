// Squad member representation with position and fitness invariants.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::position::{BroadPosition, SpecificPosition};

/// Fitness assigned to a newly added squad member.
pub const DEFAULT_FITNESS: f64 = 0.85;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlayerError {
    #[error("{specific} is not a {broad} position")]
    SpecificMismatch {
        broad: BroadPosition,
        specific: SpecificPosition,
    },

    #[error("secondary position {0} duplicates the primary position")]
    SecondaryDuplicatesPrimary(SpecificPosition),

    #[error("fitness score must be a finite number, got {0}")]
    InvalidFitness(f64),
}

/// A squad member as entered by the user.
///
/// `specific_position` always belongs to `position`, and
/// `secondary_position` (when set) always differs from `specific_position`.
/// The secondary position is free to sit outside the broad role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPlayer")]
pub struct Player {
    pub name: String,
    position: BroadPosition,
    specific_position: SpecificPosition,
    secondary_position: Option<SpecificPosition>,
    pub available: bool,
    fitness_score: f64,
}

/// Unchecked wire shape, validated into a [`Player`].
#[derive(Debug, Deserialize)]
struct RawPlayer {
    name: String,
    position: BroadPosition,
    specific_position: SpecificPosition,
    #[serde(default)]
    secondary_position: Option<SpecificPosition>,
    #[serde(default = "default_available")]
    available: bool,
    #[serde(default = "default_fitness")]
    fitness_score: f64,
}

fn default_available() -> bool {
    true
}

fn default_fitness() -> f64 {
    1.0
}

impl TryFrom<RawPlayer> for Player {
    type Error = PlayerError;

    fn try_from(raw: RawPlayer) -> Result<Self, Self::Error> {
        let mut player = Player::new(raw.name, raw.specific_position);
        if raw.position != raw.specific_position.broad() {
            return Err(PlayerError::SpecificMismatch {
                broad: raw.position,
                specific: raw.specific_position,
            });
        }
        player.set_secondary_position(raw.secondary_position)?;
        player.available = raw.available;
        if !raw.fitness_score.is_finite() {
            return Err(PlayerError::InvalidFitness(raw.fitness_score));
        }
        player.set_fitness(raw.fitness_score);
        Ok(player)
    }
}

impl Player {
    /// Create an available player at full fitness. The broad role is
    /// derived from `specific`.
    pub fn new(name: impl Into<String>, specific: SpecificPosition) -> Self {
        Player {
            name: name.into(),
            position: specific.broad(),
            specific_position: specific,
            secondary_position: None,
            available: true,
            fitness_score: 1.0,
        }
    }

    /// The placeholder player added when the squad count grows.
    ///
    /// `index` is zero-based; the generated name is one-based.
    pub fn placeholder(index: usize) -> Self {
        let mut player = Player::new(format!("Player {}", index + 1), SpecificPosition::CM);
        player.fitness_score = DEFAULT_FITNESS;
        player
    }

    /// Builder-style fitness setter.
    pub fn with_fitness(mut self, fitness: f64) -> Self {
        self.set_fitness(fitness);
        self
    }

    /// Builder-style availability setter.
    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    pub fn position(&self) -> BroadPosition {
        self.position
    }

    pub fn specific_position(&self) -> SpecificPosition {
        self.specific_position
    }

    pub fn secondary_position(&self) -> Option<SpecificPosition> {
        self.secondary_position
    }

    pub fn fitness_score(&self) -> f64 {
        self.fitness_score
    }

    /// Move the player into a new broad role. The specific position resets
    /// to the role's default and the secondary position is cleared.
    pub fn set_position(&mut self, broad: BroadPosition) {
        self.position = broad;
        self.specific_position = broad.default_specific();
        self.secondary_position = None;
    }

    /// Set the specific position. It must belong to the current broad role.
    pub fn set_specific_position(&mut self, specific: SpecificPosition) -> Result<(), PlayerError> {
        if specific.broad() != self.position {
            return Err(PlayerError::SpecificMismatch {
                broad: self.position,
                specific,
            });
        }
        self.specific_position = specific;
        if self.secondary_position == Some(specific) {
            self.secondary_position = None;
        }
        Ok(())
    }

    /// Set or clear the secondary position.
    pub fn set_secondary_position(
        &mut self,
        secondary: Option<SpecificPosition>,
    ) -> Result<(), PlayerError> {
        if secondary == Some(self.specific_position) {
            return Err(PlayerError::SecondaryDuplicatesPrimary(self.specific_position));
        }
        self.secondary_position = secondary;
        Ok(())
    }

    /// Set fitness, clamped to [0, 1]. Non-finite values are ignored.
    pub fn set_fitness(&mut self, fitness: f64) {
        if fitness.is_finite() {
            self.fitness_score = fitness.clamp(0.0, 1.0);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
