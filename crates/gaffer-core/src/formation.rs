// Formation layout: turns a formation descriptor and a starting XI into
// rows of positioned slots for the pitch diagram.
//
// Rows are built bottom-up: a synthetic goalkeeper row of one slot, then one
// row per descriptor line in the order given (defence first). Players are
// stable-sorted by broad position (GK, DEF, MID, FWD) and poured into the
// rows in sequence, each row filled to capacity before the next. A player's
// specific position is not matched against the row's role: a squad with
// three defenders in a back four puts the first midfielder at the end of the
// defensive line.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

use crate::report::PlayerSlot;

/// Separator between outfield lines in a descriptor.
pub const LINE_SEPARATOR: char = '-';

/// Most slots a formation may place on the pitch, goalkeeper included.
pub const MAX_SLOTS: usize = 11;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormationError {
    #[error("formation descriptor is empty")]
    Empty,

    #[error("formation line `{part}` is not a positive integer")]
    InvalidLine { part: String },

    #[error("formation places more than {MAX_SLOTS} players on the pitch")]
    TooLarge,
}

// ---------------------------------------------------------------------------
// FormationDescriptor
// ---------------------------------------------------------------------------

/// Parsed outfield line sizes, defence to attack. The goalkeeper is implicit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormationDescriptor {
    lines: Vec<usize>,
}

impl FormationDescriptor {
    pub fn parse(s: &str) -> Result<Self, FormationError> {
        if s.trim().is_empty() {
            return Err(FormationError::Empty);
        }
        let lines = s
            .split(LINE_SEPARATOR)
            .map(|part| match part.trim().parse::<usize>() {
                Ok(n) if n > 0 => Ok(n),
                _ => Err(FormationError::InvalidLine {
                    part: part.to_string(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        let outfield = lines
            .iter()
            .try_fold(0usize, |acc, n| acc.checked_add(*n))
            .ok_or(FormationError::TooLarge)?;
        if outfield >= MAX_SLOTS {
            return Err(FormationError::TooLarge);
        }
        Ok(FormationDescriptor { lines })
    }

    /// Outfield line sizes as written.
    pub fn lines(&self) -> &[usize] {
        &self.lines
    }

    /// Row sizes including the leading goalkeeper row.
    pub fn row_sizes(&self) -> Vec<usize> {
        std::iter::once(1).chain(self.lines.iter().copied()).collect()
    }

    /// Total slots on the pitch, goalkeeper included.
    pub fn total_slots(&self) -> usize {
        1 + self.lines.iter().sum::<usize>()
    }
}

impl FromStr for FormationDescriptor {
    type Err = FormationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormationDescriptor::parse(s)
    }
}

impl fmt::Display for FormationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.lines.iter().map(|n| n.to_string()).collect();
        write!(f, "{}", parts.join("-"))
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Drawing surface for the pitch, in abstract units. `y` grows downward:
/// the goalkeeper sits near `height - padding`, the attack near `padding`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchGeometry {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for PitchGeometry {
    fn default() -> Self {
        PitchGeometry {
            width: 360.0,
            height: 520.0,
            padding: 28.0,
        }
    }
}

impl PitchGeometry {
    /// Vertical coordinate of row `row` out of `rows`, evenly spaced between
    /// the padding bounds with row 0 at the bottom.
    pub fn row_y(&self, row: usize, rows: usize) -> f64 {
        let usable = self.height - self.padding * 2.0;
        let gap = usable / rows.saturating_sub(1).max(1) as f64;
        let from_top = rows.saturating_sub(1).saturating_sub(row);
        self.padding + from_top as f64 * gap
    }

    /// Horizontal coordinate of slot `slot` out of `slots`: the width is cut
    /// into `slots + 1` equal segments and slot j sits at the end of
    /// segment j.
    pub fn slot_x(&self, slot: usize, slots: usize) -> f64 {
        self.width / (slots + 1) as f64 * (slot + 1) as f64
    }
}

// ---------------------------------------------------------------------------
// Layout output
// ---------------------------------------------------------------------------

/// One position on the pitch, occupied or empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot<'a> {
    pub player: Option<&'a PlayerSlot>,
    pub x: f64,
    pub y: f64,
}

impl Slot<'_> {
    pub fn is_empty(&self) -> bool {
        self.player.is_none()
    }
}

/// A horizontal line of slots. Row 0 is the goalkeeper.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<'a> {
    pub y: f64,
    pub slots: Vec<Slot<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PitchLayout<'a> {
    pub rows: Vec<Row<'a>>,
    /// Starting players that did not fit on the grid.
    pub dropped: usize,
    /// Set when the descriptor could not be parsed and the layout fell back
    /// to the goalkeeper row alone.
    pub formation_error: Option<FormationError>,
}

impl<'a> PitchLayout<'a> {
    pub fn row_sizes(&self) -> Vec<usize> {
        self.rows.iter().map(|r| r.slots.len()).collect()
    }

    pub fn slot_count(&self) -> usize {
        self.rows.iter().map(|r| r.slots.len()).sum()
    }

    pub fn empty_slots(&self) -> usize {
        self.slots().filter(|s| s.is_empty()).count()
    }

    /// All slots, goalkeeper row first.
    pub fn slots(&self) -> impl Iterator<Item = &Slot<'a>> {
        self.rows.iter().flat_map(|r| r.slots.iter())
    }

    /// Players that made it onto the grid, in fill order.
    pub fn placed(&self) -> impl Iterator<Item = &'a PlayerSlot> + '_ {
        self.slots().filter_map(|s| s.player)
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Lay out `starting` on the default pitch geometry.
pub fn layout<'a>(descriptor: &str, starting: &'a [PlayerSlot]) -> PitchLayout<'a> {
    layout_with(descriptor, starting, &PitchGeometry::default())
}

/// Lay out `starting` on the given geometry.
///
/// Never fails: an unparseable descriptor yields just the goalkeeper row,
/// missing players leave empty slots, surplus players are dropped and
/// counted.
pub fn layout_with<'a>(
    descriptor: &str,
    starting: &'a [PlayerSlot],
    geometry: &PitchGeometry,
) -> PitchLayout<'a> {
    let (row_sizes, formation_error) = match FormationDescriptor::parse(descriptor) {
        Ok(formation) => (formation.row_sizes(), None),
        Err(e) => {
            warn!("unusable formation '{}': {}; showing goalkeeper only", descriptor, e);
            (vec![1], Some(e))
        }
    };

    let mut sorted: Vec<&'a PlayerSlot> = starting.iter().collect();
    sorted.sort_by_key(|p| p.position.sort_order());
    let mut queue = sorted.into_iter();

    let row_count = row_sizes.len();
    let rows: Vec<Row<'a>> = row_sizes
        .iter()
        .enumerate()
        .map(|(ri, &size)| {
            let y = geometry.row_y(ri, row_count);
            let slots = (0..size)
                .map(|ci| Slot {
                    player: queue.next(),
                    x: geometry.slot_x(ci, size),
                    y,
                })
                .collect();
            Row { y, slots }
        })
        .collect();

    PitchLayout {
        rows,
        dropped: queue.len(),
        formation_error,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
