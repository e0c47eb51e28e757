// Squad loading from CSV.
//
// Expected header: name, position, specific_position, secondary_position,
// available, fitness_score. Only `name` and `specific_position` are
// required; `position` is checked against the specific position when given.
// Rows that fail to parse or validate are skipped with a warning.

use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use gaffer_core::player::{Player, DEFAULT_FITNESS};
use gaffer_core::position::{BroadPosition, SpecificPosition};

#[derive(Debug, thiserror::Error)]
pub enum SquadImportError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

// ---------------------------------------------------------------------------
// Raw CSV row
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawSquadRow {
    name: String,
    #[serde(default)]
    position: String,
    specific_position: String,
    #[serde(default)]
    secondary_position: String,
    #[serde(default)]
    available: String,
    #[serde(default)]
    fitness_score: Option<f64>,
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "" | "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

impl RawSquadRow {
    /// Validate into a [`Player`], or explain why the row was rejected.
    fn into_player(self) -> Result<Player, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("blank name".into());
        }

        let specific = SpecificPosition::from_str_pos(&self.specific_position)
            .ok_or_else(|| format!("unknown specific position '{}'", self.specific_position.trim()))?;

        if !self.position.trim().is_empty() {
            let broad = BroadPosition::from_str_pos(&self.position)
                .ok_or_else(|| format!("unknown position '{}'", self.position.trim()))?;
            if broad != specific.broad() {
                return Err(format!("{specific} is not a {broad} position"));
            }
        }

        let available = parse_flag(&self.available)
            .ok_or_else(|| format!("unreadable availability '{}'", self.available.trim()))?;

        let fitness = self.fitness_score.unwrap_or(DEFAULT_FITNESS);
        if !fitness.is_finite() {
            return Err("non-finite fitness score".into());
        }

        let mut player = Player::new(name, specific)
            .with_fitness(fitness)
            .with_available(available);

        if !self.secondary_position.trim().is_empty() {
            let secondary = SpecificPosition::from_str_pos(&self.secondary_position)
                .ok_or_else(|| {
                    format!("unknown secondary position '{}'", self.secondary_position.trim())
                })?;
            player
                .set_secondary_position(Some(secondary))
                .map_err(|e| e.to_string())?;
        }

        Ok(player)
    }
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

fn load_squad_from_reader<R: Read>(rdr: R) -> Result<Vec<Player>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let mut players = Vec::new();
    for result in reader.deserialize::<RawSquadRow>() {
        match result {
            Ok(raw) => {
                let label = raw.name.trim().to_string();
                match raw.into_player() {
                    Ok(p) => players.push(p),
                    Err(reason) => warn!("skipping squad row '{}': {}", label, reason),
                }
            }
            Err(e) => {
                warn!("skipping malformed squad row: {}", e);
            }
        }
    }
    Ok(players)
}

/// Load a squad from a CSV file.
pub fn load_squad(path: &Path) -> Result<Vec<Player>, SquadImportError> {
    let file = std::fs::File::open(path).map_err(|e| SquadImportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let players = load_squad_from_reader(file).map_err(|e| SquadImportError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;
    info!("imported {} players from {}", players.len(), path.display());
    Ok(players)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
