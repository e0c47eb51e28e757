// Broad and specific football positions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse player role. Ordering matches the defence-to-attack fill order
/// used by the formation layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BroadPosition {
    #[serde(rename = "GK")]
    Goalkeeper,
    #[serde(rename = "DEF")]
    Defender,
    #[serde(rename = "MID")]
    Midfielder,
    #[serde(rename = "FWD")]
    Forward,
}

/// All broad positions in sort order.
pub const ALL_BROAD: [BroadPosition; 4] = [
    BroadPosition::Goalkeeper,
    BroadPosition::Defender,
    BroadPosition::Midfielder,
    BroadPosition::Forward,
];

const GK_SPECIFICS: &[SpecificPosition] = &[SpecificPosition::GK];

const DEF_SPECIFICS: &[SpecificPosition] = &[
    SpecificPosition::CB,
    SpecificPosition::RB,
    SpecificPosition::LB,
    SpecificPosition::RWB,
    SpecificPosition::LWB,
];

const MID_SPECIFICS: &[SpecificPosition] = &[
    SpecificPosition::CDM,
    SpecificPosition::CM,
    SpecificPosition::CAM,
    SpecificPosition::RM,
    SpecificPosition::LM,
];

const FWD_SPECIFICS: &[SpecificPosition] = &[
    SpecificPosition::RW,
    SpecificPosition::LW,
    SpecificPosition::ST,
    SpecificPosition::CF,
    SpecificPosition::SS,
];

impl BroadPosition {
    /// Parse a broad position abbreviation ("GK", "DEF", "MID", "FWD").
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "GK" => Some(BroadPosition::Goalkeeper),
            "DEF" => Some(BroadPosition::Defender),
            "MID" => Some(BroadPosition::Midfielder),
            "FWD" => Some(BroadPosition::Forward),
            _ => None,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            BroadPosition::Goalkeeper => "GK",
            BroadPosition::Defender => "DEF",
            BroadPosition::Midfielder => "MID",
            BroadPosition::Forward => "FWD",
        }
    }

    /// Deterministic ordering index: GK=0, DEF=1, MID=2, FWD=3.
    pub fn sort_order(&self) -> u8 {
        match self {
            BroadPosition::Goalkeeper => 0,
            BroadPosition::Defender => 1,
            BroadPosition::Midfielder => 2,
            BroadPosition::Forward => 3,
        }
    }

    /// The specific positions that belong to this broad role. The first
    /// entry is the default when a player is moved into this role.
    pub fn specifics(&self) -> &'static [SpecificPosition] {
        match self {
            BroadPosition::Goalkeeper => GK_SPECIFICS,
            BroadPosition::Defender => DEF_SPECIFICS,
            BroadPosition::Midfielder => MID_SPECIFICS,
            BroadPosition::Forward => FWD_SPECIFICS,
        }
    }

    pub fn default_specific(&self) -> SpecificPosition {
        self.specifics()[0]
    }

    /// Next broad position in sort order, wrapping FWD back to GK.
    pub fn next(&self) -> Self {
        ALL_BROAD[(self.sort_order() as usize + 1) % ALL_BROAD.len()]
    }

    /// Previous broad position in sort order, wrapping GK back to FWD.
    pub fn prev(&self) -> Self {
        let len = ALL_BROAD.len();
        ALL_BROAD[(self.sort_order() as usize + len - 1) % len]
    }
}

impl fmt::Display for BroadPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// Concrete on-pitch role. Each value belongs to exactly one
/// [`BroadPosition`]; see [`SpecificPosition::broad`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecificPosition {
    GK,
    CB,
    RB,
    LB,
    RWB,
    LWB,
    CDM,
    CM,
    CAM,
    RM,
    LM,
    RW,
    LW,
    ST,
    CF,
    SS,
}

/// All 16 specific positions, grouped by broad role.
pub const ALL_SPECIFIC: [SpecificPosition; 16] = [
    SpecificPosition::GK,
    SpecificPosition::CB,
    SpecificPosition::RB,
    SpecificPosition::LB,
    SpecificPosition::RWB,
    SpecificPosition::LWB,
    SpecificPosition::CDM,
    SpecificPosition::CM,
    SpecificPosition::CAM,
    SpecificPosition::RM,
    SpecificPosition::LM,
    SpecificPosition::RW,
    SpecificPosition::LW,
    SpecificPosition::ST,
    SpecificPosition::CF,
    SpecificPosition::SS,
];

impl SpecificPosition {
    /// The broad role this position belongs to.
    pub fn broad(&self) -> BroadPosition {
        match self {
            SpecificPosition::GK => BroadPosition::Goalkeeper,
            SpecificPosition::CB
            | SpecificPosition::RB
            | SpecificPosition::LB
            | SpecificPosition::RWB
            | SpecificPosition::LWB => BroadPosition::Defender,
            SpecificPosition::CDM
            | SpecificPosition::CM
            | SpecificPosition::CAM
            | SpecificPosition::RM
            | SpecificPosition::LM => BroadPosition::Midfielder,
            SpecificPosition::RW
            | SpecificPosition::LW
            | SpecificPosition::ST
            | SpecificPosition::CF
            | SpecificPosition::SS => BroadPosition::Forward,
        }
    }

    pub fn from_str_pos(s: &str) -> Option<Self> {
        let upper = s.trim().to_uppercase();
        ALL_SPECIFIC
            .iter()
            .copied()
            .find(|p| p.display_str() == upper)
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            SpecificPosition::GK => "GK",
            SpecificPosition::CB => "CB",
            SpecificPosition::RB => "RB",
            SpecificPosition::LB => "LB",
            SpecificPosition::RWB => "RWB",
            SpecificPosition::LWB => "LWB",
            SpecificPosition::CDM => "CDM",
            SpecificPosition::CM => "CM",
            SpecificPosition::CAM => "CAM",
            SpecificPosition::RM => "RM",
            SpecificPosition::LM => "LM",
            SpecificPosition::RW => "RW",
            SpecificPosition::LW => "LW",
            SpecificPosition::ST => "ST",
            SpecificPosition::CF => "CF",
            SpecificPosition::SS => "SS",
        }
    }

    /// Cycle to the next specific position within the same broad role.
    pub fn next_in_role(&self) -> Self {
        let role = self.broad().specifics();
        let idx = role.iter().position(|p| p == self).unwrap_or(0);
        role[(idx + 1) % role.len()]
    }

    /// Cycle to the previous specific position within the same broad role.
    pub fn prev_in_role(&self) -> Self {
        let role = self.broad().specifics();
        let idx = role.iter().position(|p| p == self).unwrap_or(0);
        role[(idx + role.len() - 1) % role.len()]
    }
}

impl fmt::Display for SpecificPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn broad_sets_partition_all_specifics() {
        let mut seen = HashSet::new();
        for broad in ALL_BROAD {
            for specific in broad.specifics() {
                assert!(seen.insert(*specific), "{specific} appears in two broad sets");
                assert_eq!(specific.broad(), broad, "{specific} maps to the wrong role");
            }
        }
        assert_eq!(seen.len(), 16);
        for specific in ALL_SPECIFIC {
            assert!(seen.contains(&specific), "{specific} missing from every broad set");
        }
    }

    #[test]
    fn sort_order_is_defence_to_attack() {
        let orders: Vec<u8> = ALL_BROAD.iter().map(|b| b.sort_order()).collect();
        assert_eq!(orders, vec![0, 1, 2, 3]);
    }

    #[test]
    fn default_specific_is_first_of_role() {
        assert_eq!(BroadPosition::Goalkeeper.default_specific(), SpecificPosition::GK);
        assert_eq!(BroadPosition::Defender.default_specific(), SpecificPosition::CB);
        assert_eq!(BroadPosition::Midfielder.default_specific(), SpecificPosition::CDM);
        assert_eq!(BroadPosition::Forward.default_specific(), SpecificPosition::RW);
    }

    #[test]
    fn broad_cycle_wraps() {
        assert_eq!(BroadPosition::Forward.next(), BroadPosition::Goalkeeper);
        assert_eq!(BroadPosition::Goalkeeper.prev(), BroadPosition::Forward);
        assert_eq!(BroadPosition::Defender.next(), BroadPosition::Midfielder);
    }

    #[test]
    fn specific_cycle_stays_in_role() {
        assert_eq!(SpecificPosition::LWB.next_in_role(), SpecificPosition::CB);
        assert_eq!(SpecificPosition::CB.prev_in_role(), SpecificPosition::LWB);
        assert_eq!(SpecificPosition::GK.next_in_role(), SpecificPosition::GK);
        assert_eq!(SpecificPosition::ST.next_in_role(), SpecificPosition::CF);
    }

    #[test]
    fn parse_abbreviations() {
        assert_eq!(BroadPosition::from_str_pos("def"), Some(BroadPosition::Defender));
        assert_eq!(BroadPosition::from_str_pos(" FWD "), Some(BroadPosition::Forward));
        assert_eq!(BroadPosition::from_str_pos("WING"), None);
        assert_eq!(SpecificPosition::from_str_pos("cam"), Some(SpecificPosition::CAM));
        assert_eq!(SpecificPosition::from_str_pos("RWB"), Some(SpecificPosition::RWB));
        assert_eq!(SpecificPosition::from_str_pos("XX"), None);
    }

    #[test]
    fn serde_uses_wire_abbreviations() {
        let json = serde_json::to_string(&BroadPosition::Midfielder).unwrap();
        assert_eq!(json, "\"MID\"");
        let back: BroadPosition = serde_json::from_str("\"GK\"").unwrap();
        assert_eq!(back, BroadPosition::Goalkeeper);
        let spec: SpecificPosition = serde_json::from_str("\"CDM\"").unwrap();
        assert_eq!(spec, SpecificPosition::CDM);
    }
}
