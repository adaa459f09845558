//! Batted-ball observation types
//!
//! Pitch and hit labels are the fixed Japanese scorebook terms that data
//! files carry. `name()` gives an ASCII form for on-screen display (the
//! default UI font has no CJK glyphs); `label()` is what gets persisted.

use serde::{Deserialize, Serialize};

/// Pitch type thrown on the recorded pitch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PitchType {
    Straight,
    Curve,
    Slider,
    Fork,
    Changeup,
    Other,
}

impl PitchType {
    pub const ALL: [PitchType; 6] = [
        PitchType::Straight,
        PitchType::Curve,
        PitchType::Slider,
        PitchType::Fork,
        PitchType::Changeup,
        PitchType::Other,
    ];

    /// Label as written to data files
    pub fn label(&self) -> &'static str {
        match self {
            PitchType::Straight => "ストレート",
            PitchType::Curve => "カーブ",
            PitchType::Slider => "スライダー",
            PitchType::Fork => "フォーク",
            PitchType::Changeup => "チェンジアップ",
            PitchType::Other => "その他",
        }
    }

    /// ASCII display name for the entry panel
    pub fn name(&self) -> &'static str {
        match self {
            PitchType::Straight => "Straight",
            PitchType::Curve => "Curve",
            PitchType::Slider => "Slider",
            PitchType::Fork => "Fork",
            PitchType::Changeup => "Changeup",
            PitchType::Other => "Other",
        }
    }

    pub fn from_label(s: &str) -> Option<PitchType> {
        PitchType::ALL.iter().copied().find(|p| p.label() == s)
    }
}

impl std::fmt::Display for PitchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result of the recorded pitch or plate appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitType {
    Grounder,
    Fly,
    Liner,
    Strikeout,
    Walk,
}

impl HitType {
    pub const ALL: [HitType; 5] = [
        HitType::Grounder,
        HitType::Fly,
        HitType::Liner,
        HitType::Strikeout,
        HitType::Walk,
    ];

    /// Label as written to data files
    pub fn label(&self) -> &'static str {
        match self {
            HitType::Grounder => "ゴロ",
            HitType::Fly => "フライ",
            HitType::Liner => "ライナー",
            HitType::Strikeout => "三振",
            HitType::Walk => "四死球",
        }
    }

    /// ASCII display name for the entry panel
    pub fn name(&self) -> &'static str {
        match self {
            HitType::Grounder => "Grounder",
            HitType::Fly => "Fly",
            HitType::Liner => "Liner",
            HitType::Strikeout => "Strikeout",
            HitType::Walk => "Walk",
        }
    }

    pub fn from_label(s: &str) -> Option<HitType> {
        HitType::ALL.iter().copied().find(|h| h.label() == s)
    }
}

impl std::fmt::Display for HitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One recorded batted-ball event.
/// Immutable once built; coordinates are already clamped to the field
/// grid at capture time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Roster file name the player came from
    pub team: String,
    pub player: String,
    pub balls: u8,
    pub strikes: u8,
    pub pitch: PitchType,
    pub hit: HitType,
    /// Pixel coordinates on the 750x750 field image
    pub x: u32,
    pub y: u32,
}

impl Observation {
    /// Row for the per-roster data file (no team column)
    pub fn data_record(&self) -> [String; 7] {
        [
            self.player.clone(),
            self.balls.to_string(),
            self.strikes.to_string(),
            self.pitch.label().to_string(),
            self.hit.label().to_string(),
            self.x.to_string(),
            self.y.to_string(),
        ]
    }

    /// Row for session export files (leading team column)
    pub fn export_record(&self) -> [String; 8] {
        [
            self.team.clone(),
            self.player.clone(),
            self.balls.to_string(),
            self.strikes.to_string(),
            self.pitch.label().to_string(),
            self.hit.label().to_string(),
            self.x.to_string(),
            self.y.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Observation {
        Observation {
            team: "A.csv".to_string(),
            player: "Taro".to_string(),
            balls: 1,
            strikes: 2,
            pitch: PitchType::Straight,
            hit: HitType::Fly,
            x: 100,
            y: 200,
        }
    }

    #[test]
    fn test_labels_roundtrip() {
        for pitch in PitchType::ALL {
            assert_eq!(PitchType::from_label(pitch.label()), Some(pitch));
        }
        for hit in HitType::ALL {
            assert_eq!(HitType::from_label(hit.label()), Some(hit));
        }
        assert_eq!(PitchType::from_label("Straight"), None);
        assert_eq!(HitType::from_label(""), None);
    }

    #[test]
    fn test_data_record_layout() {
        let record = sample().data_record();
        assert_eq!(
            record,
            ["Taro", "1", "2", "ストレート", "フライ", "100", "200"].map(String::from)
        );
    }

    #[test]
    fn test_export_record_adds_team_column() {
        let record = sample().export_record();
        assert_eq!(record[0], "A.csv");
        assert_eq!(&record[1..], &sample().data_record());
    }
}
